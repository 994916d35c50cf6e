//! Circle entity: a shaded planet with one orbiting moon

use glam::Vec2;

use crate::consts::*;
use crate::polar_to_cartesian;
use crate::renderer::{Color, Surface, render_circle};

/// A planet with a moon.
///
/// `selected` is owned by [`super::CircleManager`]; nothing else sets it.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    /// Identity, assigned by the manager on insertion (0 until then)
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// Base color of the body
    pub color: Color,
    pub(crate) selected: bool,
    /// Current moon angle (radians, unbounded)
    pub moon_angle: f32,
    moon_orbit_radius: f32,
    moon_radius: f32,
}

impl Circle {
    pub fn new(pos: Vec2, radius: f32, color: Color) -> Self {
        Self {
            id: 0,
            pos,
            radius,
            color,
            selected: false,
            moon_angle: 0.0,
            moon_orbit_radius: radius + MOON_ORBIT_OFFSET,
            moon_radius: MOON_RADIUS,
        }
    }

    /// Start the moon at a given phase
    pub fn with_moon_angle(mut self, angle: f32) -> Self {
        self.moon_angle = angle;
        self
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn moon_orbit_radius(&self) -> f32 {
        self.moon_orbit_radius
    }

    pub fn moon_radius(&self) -> f32 {
        self.moon_radius
    }

    /// Advance the moon along its orbit. `dt` is in frames.
    pub fn update(&mut self, dt: f32) {
        self.moon_angle += MOON_ORBIT_SPEED * dt;
    }

    /// Moon center for the current angle
    pub fn moon_position(&self) -> Vec2 {
        self.pos + polar_to_cartesian(self.moon_orbit_radius, self.moon_angle)
    }

    /// Step toward `target` at constant speed; stays put once within
    /// `ARRIVAL_THRESHOLD` so it does not jitter around the target.
    pub fn move_toward(&mut self, target: Vec2, speed: f32) {
        let delta = target - self.pos;
        let distance = delta.length();
        if distance > ARRIVAL_THRESHOLD {
            self.pos += delta / distance * speed;
        }
    }

    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.pos.distance(point)
    }

    /// Draw body and moon; does not advance the moon
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        render_circle(self, surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn circle_at(x: f32, y: f32) -> Circle {
        Circle::new(Vec2::new(x, y), 20.0, Color::rgb(0.5, 0.5, 0.5))
    }

    #[test]
    fn test_moon_orbit_outside_body() {
        let c = Circle::new(Vec2::ZERO, 17.5, Color::WHITE);
        assert_eq!(c.moon_orbit_radius(), 27.5);
        assert_eq!(c.moon_radius(), MOON_RADIUS);
        assert!(c.moon_orbit_radius() > c.radius);
    }

    #[test]
    fn test_update_advances_moon_only() {
        let mut c = circle_at(10.0, 10.0);
        for _ in 0..500 {
            c.update(1.0);
        }
        assert!((c.moon_angle - 500.0 * MOON_ORBIT_SPEED).abs() < 1e-3);
        assert_eq!(c.pos, Vec2::new(10.0, 10.0));
        assert_eq!(c.moon_orbit_radius(), c.radius + MOON_ORBIT_OFFSET);
    }

    #[test]
    fn test_moon_position() {
        let c = circle_at(100.0, 50.0);
        assert!((c.moon_position() - Vec2::new(130.0, 50.0)).length() < 1e-4);

        let c = c.with_moon_angle(std::f32::consts::PI);
        assert!((c.moon_position() - Vec2::new(70.0, 50.0)).length() < 1e-3);
    }

    #[test]
    fn test_move_toward_steps_to_target() {
        let mut c = circle_at(0.0, 0.0);
        let target = Vec2::new(10.0, 0.0);

        c.move_toward(target, 2.0);
        assert_eq!(c.pos, Vec2::new(2.0, 0.0));
        c.move_toward(target, 2.0);
        assert_eq!(c.pos, Vec2::new(4.0, 0.0));
        for _ in 0..3 {
            c.move_toward(target, 2.0);
        }
        assert_eq!(c.pos, Vec2::new(10.0, 0.0));

        // Arrived: further calls do nothing
        for _ in 0..10 {
            c.move_toward(target, 2.0);
        }
        assert_eq!(c.pos, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_move_toward_within_threshold_is_noop() {
        let mut c = circle_at(5.0, 5.0);
        c.move_toward(Vec2::new(5.5, 5.5), 2.0);
        assert_eq!(c.pos, Vec2::new(5.0, 5.0));
        c.move_toward(Vec2::new(6.0, 5.0), 2.0);
        assert_eq!(c.pos, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_distance_to() {
        let c = circle_at(3.0, 4.0);
        assert_eq!(c.distance_to(Vec2::ZERO), 5.0);
        assert_eq!(c.distance_to(Vec2::new(3.0, 4.0)), 0.0);
    }

    proptest! {
        #[test]
        fn prop_move_toward_closes_by_speed_on_line(
            x in -500.0f32..500.0, y in -500.0f32..500.0,
            tx in -500.0f32..500.0, ty in -500.0f32..500.0,
        ) {
            let start = Vec2::new(x, y);
            let target = Vec2::new(tx, ty);
            let d = start.distance(target);
            prop_assume!(d > MOVE_SPEED);

            let mut c = Circle::new(start, 15.0, Color::WHITE);
            c.move_toward(target, MOVE_SPEED);

            let tol = 1e-3 * (1.0 + d);
            prop_assert!((c.distance_to(target) - (d - MOVE_SPEED)).abs() < tol);
            // Collinear with start and target
            let along = (target - start).normalize();
            let moved = c.pos - start;
            prop_assert!(along.perp_dot(moved).abs() < tol);
            prop_assert!(along.dot(moved) > 0.0);
        }

        #[test]
        fn prop_move_toward_converges_then_stops(
            x in -300.0f32..300.0, y in -300.0f32..300.0,
            tx in -300.0f32..300.0, ty in -300.0f32..300.0,
        ) {
            let target = Vec2::new(tx, ty);
            let mut c = Circle::new(Vec2::new(x, y), 15.0, Color::WHITE);
            // Worst case distance ~850 units at 2 units/frame
            for _ in 0..1000 {
                c.move_toward(target, MOVE_SPEED);
            }
            prop_assert!(c.distance_to(target) <= ARRIVAL_THRESHOLD);

            let settled = c.pos;
            for _ in 0..10 {
                c.move_toward(target, MOVE_SPEED);
            }
            prop_assert_eq!(c.pos, settled);
        }
    }
}

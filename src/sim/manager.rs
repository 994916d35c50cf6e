//! Circle registry: ownership, nearest-circle selection, per-frame updates

use glam::Vec2;

use super::circle::Circle;
use crate::renderer::Surface;

/// Owns every circle and tracks which one follows the cursor.
///
/// Circles are stored in insertion order and never removed, so the
/// selection index stays valid for the life of the manager.
#[derive(Debug, Clone, Default)]
pub struct CircleManager {
    circles: Vec<Circle>,
    selected: Option<usize>,
    next_id: u32,
}

impl CircleManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a circle and return its assigned id
    pub fn add(&mut self, mut circle: Circle) -> u32 {
        self.next_id += 1;
        circle.id = self.next_id;
        circle.selected = false;
        self.circles.push(circle);
        self.next_id
    }

    /// Select the circle closest to `point`, clearing every other flag.
    ///
    /// Ties go to the earliest inserted circle. With no circles this does
    /// nothing.
    pub fn select_nearest(&mut self, point: Vec2) {
        let mut closest = None;
        let mut min_distance = f32::INFINITY;
        for (i, circle) in self.circles.iter().enumerate() {
            let distance = circle.distance_to(point);
            if distance < min_distance {
                min_distance = distance;
                closest = Some(i);
            }
        }

        let Some(index) = closest else {
            return;
        };

        for circle in &mut self.circles {
            circle.selected = false;
        }
        self.circles[index].selected = true;
        self.selected = Some(index);
    }

    /// Move the selected circle (if any) one step toward `target`
    pub fn move_selected(&mut self, target: Vec2, speed: f32) {
        if let Some(index) = self.selected {
            self.circles[index].move_toward(target, speed);
        }
    }

    /// Advance every moon by `dt` frames
    pub fn update(&mut self, dt: f32) {
        for circle in &mut self.circles {
            circle.update(dt);
        }
    }

    /// Render every circle once, in insertion order
    pub fn draw_all<S: Surface + ?Sized>(&self, surface: &mut S) {
        for circle in &self.circles {
            circle.render(surface);
        }
    }

    pub fn selected(&self) -> Option<&Circle> {
        self.selected.map(|i| &self.circles[i])
    }

    pub fn get(&self, id: u32) -> Option<&Circle> {
        self.circles.iter().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Circle> {
        self.circles.iter()
    }

    pub fn len(&self) -> usize {
        self.circles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.circles.is_empty()
    }
}

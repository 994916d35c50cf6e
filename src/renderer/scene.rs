//! Scene drawing: turns circles into surface draw calls
//!
//! Read-only over the simulation state; moons are advanced in `sim::tick`.

use super::surface::{Color, Fill, RadialGradient, Surface};
use crate::sim::Circle;

/// Draw one planet (shaded body) and its moon.
pub fn render_circle<S: Surface + ?Sized>(circle: &Circle, surface: &mut S) {
    let body = Fill::Radial(RadialGradient::planet(circle.pos, circle.radius, circle.color));
    surface.fill_circle(circle.pos, circle.radius, &body);

    surface.fill_circle(
        circle.moon_position(),
        circle.moon_radius(),
        &Fill::Solid(Color::WHITE),
    );
}

//! Orbit Canvas - planets with orbiting moons that chase the pointer
//!
//! Core modules:
//! - `sim`: Circles, the circle registry and the per-frame simulation step
//! - `renderer`: Drawing surface contract plus software and WebGPU backends
//! - `background`: One-shot background image decoding and placement
//! - `app`: Frame loop and input handling glue
//! - `settings`: Ambient configuration

pub mod app;
pub mod background;
pub mod error;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::App;
pub use error::CanvasError;
pub use settings::Settings;

use glam::Vec2;

/// Fixed behaviour constants (not user configurable)
pub mod consts {
    /// Radius of every moon
    pub const MOON_RADIUS: f32 = 5.0;
    /// Moon orbit distance beyond the planet's own radius
    pub const MOON_ORBIT_OFFSET: f32 = 10.0;
    /// Moon angular speed (radians per frame)
    pub const MOON_ORBIT_SPEED: f32 = 0.02;

    /// Speed of the selected circle toward the cursor (units per frame)
    pub const MOVE_SPEED: f32 = 2.0;
    /// Distance under which a moving circle counts as arrived
    pub const ARRIVAL_THRESHOLD: f32 = 1.0;

    /// Spawned radius range, half-open [MIN, MAX)
    pub const MIN_RADIUS: f32 = 10.0;
    pub const MAX_RADIUS: f32 = 30.0;

    /// HSL saturation and lightness of spawned circles
    pub const SATURATION: f32 = 0.7;
    pub const LIGHTNESS: f32 = 0.5;

    /// Gradient stop offsets: highlight, base color, shadow
    pub const HIGHLIGHT_STOP: f32 = 0.0;
    pub const BASE_STOP: f32 = 0.3;
    pub const SHADOW_STOP: f32 = 1.0;
    /// Fraction of the radius the highlight sits up and left of center
    pub const LIGHT_OFFSET_FRACTION: f32 = 1.0 / 3.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Scale `size` to fit inside `bounds` without changing its aspect ratio.
///
/// Width is matched first; if the resulting height overflows, height is
/// matched instead.
#[inline]
pub fn fit_within(size: Vec2, bounds: Vec2) -> Vec2 {
    let aspect = size.x / size.y;
    let mut fitted = Vec2::new(bounds.x, bounds.x / aspect);
    if fitted.y > bounds.y {
        fitted = Vec2::new(bounds.y * aspect, bounds.y);
    }
    fitted
}

//! Simulation module
//!
//! Circles, the registry that owns them, and the per-frame step. This module
//! has no platform dependencies:
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - Drawing goes through the `Surface` trait

pub mod circle;
pub mod manager;
pub mod state;
pub mod tick;

pub use circle::Circle;
pub use manager::CircleManager;
pub use state::AppState;
pub use tick::tick;

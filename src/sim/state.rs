//! Application state shared by the frame loop and input handlers

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::circle::Circle;
use super::manager::CircleManager;
use crate::consts::*;
use crate::renderer::Color;

/// Everything the frame loop and input handlers read or mutate.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Last pointer position in surface coordinates
    pub cursor: Vec2,
    pub circles: CircleManager,
    /// Bounds used for spawning and background fit
    pub surface_size: Vec2,
    /// Frames simulated so far
    pub frame: u64,
    rng: Pcg32,
}

impl AppState {
    pub fn new(seed: u64, surface_size: Vec2) -> Self {
        Self {
            cursor: Vec2::ZERO,
            circles: CircleManager::new(),
            surface_size,
            frame: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Build a circle with random radius, position, hue and moon phase
    pub fn random_circle(&mut self) -> Circle {
        let x = self.rng.random::<f32>() * self.surface_size.x;
        let y = self.rng.random::<f32>() * self.surface_size.y;
        let radius = self.rng.random_range(MIN_RADIUS..MAX_RADIUS);
        let hue = self.rng.random::<f32>() * 360.0;
        let moon_angle = self.rng.random::<f32>() * std::f32::consts::TAU;

        Circle::new(
            Vec2::new(x, y),
            radius,
            Color::from_hsl(hue, SATURATION, LIGHTNESS),
        )
        .with_moon_angle(moon_angle)
    }

    /// Create a random circle and register it
    pub fn spawn_circle(&mut self) -> u32 {
        let circle = self.random_circle();
        self.circles.add(circle)
    }
}

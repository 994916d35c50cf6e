//! Immediate-mode drawing surface contract
//!
//! Every backend (software framebuffer, WebGPU) implements [`Surface`]. The
//! scene code only ever talks to this trait.

use glam::Vec2;

use crate::background::Image;
use crate::consts::{BASE_STOP, HIGHLIGHT_STOP, LIGHT_OFFSET_FRACTION, SHADOW_STOP};

/// Straight-alpha RGBA color, components in 0-1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Build an opaque color from hue (degrees), saturation and lightness (0-1)
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = lightness - chroma / 2.0;
        Self::rgb(r + m, g + m, b + m)
    }

    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    pub fn from_rgba8(px: [u8; 4]) -> Self {
        Color {
            r: px[0] as f32 / 255.0,
            g: px[1] as f32 / 255.0,
            b: px[2] as f32 / 255.0,
            a: px[3] as f32 / 255.0,
        }
    }
}

/// Axis-aligned rectangle in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    pub fn max(&self) -> Vec2 {
        self.origin + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.origin + self.size / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

/// Two-circle radial gradient with a zero-radius start circle at `focal`
/// and an end circle at (`center`, `radius`), as in canvas
/// `createRadialGradient(fx, fy, 0, cx, cy, r)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGradient {
    pub focal: Vec2,
    pub center: Vec2,
    pub radius: f32,
    /// Sorted by offset
    pub stops: [GradientStop; 3],
}

impl RadialGradient {
    /// Planet shading: white highlight up and left of center, base color at
    /// 30%, black at the rim.
    pub fn planet(center: Vec2, radius: f32, base: Color) -> Self {
        let light = radius * LIGHT_OFFSET_FRACTION;
        Self {
            focal: center - Vec2::splat(light),
            center,
            radius,
            stops: [
                GradientStop {
                    offset: HIGHLIGHT_STOP,
                    color: Color::WHITE,
                },
                GradientStop {
                    offset: BASE_STOP,
                    color: base,
                },
                GradientStop {
                    offset: SHADOW_STOP,
                    color: Color::BLACK,
                },
            ],
        }
    }

    /// Gradient parameter for a point: the largest `t >= 0` such that `point`
    /// lies on the circle interpolated between the start and end circles.
    pub fn t_at(&self, point: Vec2) -> f32 {
        let d = self.center - self.focal;
        let q = point - self.focal;
        let a = d.length_squared() - self.radius * self.radius;
        let b = q.dot(d);
        let c = q.length_squared();
        if a.abs() < f32::EPSILON {
            // Focal point on the rim
            return if b > 0.0 { c / (2.0 * b) } else { 0.0 };
        }
        let disc = (b * b - a * c).max(0.0);
        ((b - disc.sqrt()) / a).max(0.0)
    }

    /// Color at gradient parameter `t`, padded beyond the outer stops.
    pub fn color_at(&self, t: f32) -> Color {
        let first = self.stops[0];
        if t <= first.offset {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if t <= hi.offset {
                let span = hi.offset - lo.offset;
                let local = if span > 0.0 { (t - lo.offset) / span } else { 1.0 };
                return lo.color.lerp(hi.color, local);
            }
        }
        self.stops[self.stops.len() - 1].color
    }

    pub fn sample(&self, point: Vec2) -> Color {
        self.color_at(self.t_at(point))
    }
}

/// Fill style for a disc
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    Solid(Color),
    Radial(RadialGradient),
}

impl Fill {
    pub fn color_at(&self, point: Vec2) -> Color {
        match self {
            Fill::Solid(color) => *color,
            Fill::Radial(gradient) => gradient.sample(point),
        }
    }
}

/// A 2D immediate-mode raster target.
///
/// Pixel fidelity is not part of the contract; shapes and layout are.
pub trait Surface {
    /// Logical size in surface units
    fn size(&self) -> Vec2;

    /// Clear the whole surface to transparent
    fn clear(&mut self);

    /// Fill a full disc
    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: &Fill);

    /// Draw `image` scaled into `dest`
    fn draw_image(&mut self, image: &Image, dest: Rect);

    /// Push everything drawn since the last clear to the display
    fn present(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 1e-3
            && (a.g - b.g).abs() < 1e-3
            && (a.b - b.b).abs() < 1e-3
            && (a.a - b.a).abs() < 1e-3
    }

    #[test]
    fn test_hsl_primaries() {
        assert!(close(Color::from_hsl(0.0, 1.0, 0.5), Color::rgb(1.0, 0.0, 0.0)));
        assert!(close(Color::from_hsl(120.0, 1.0, 0.5), Color::rgb(0.0, 1.0, 0.0)));
        assert!(close(Color::from_hsl(240.0, 1.0, 0.5), Color::rgb(0.0, 0.0, 1.0)));
        assert!(close(Color::from_hsl(360.0, 1.0, 0.5), Color::rgb(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_hsl_spawn_saturation() {
        // hsl(200, 70%, 50%) == rgb(38, 157, 217)
        let c = Color::from_hsl(200.0, 0.7, 0.5).to_rgba8();
        assert_eq!(c, [38, 157, 217, 255]);
    }

    #[test]
    fn test_gradient_focal_is_white() {
        let g = RadialGradient::planet(Vec2::new(50.0, 50.0), 30.0, Color::rgb(1.0, 0.0, 0.0));
        assert!(g.t_at(g.focal).abs() < 1e-5);
        assert!(close(g.sample(g.focal), Color::WHITE));
    }

    #[test]
    fn test_gradient_rim_is_black() {
        let center = Vec2::new(50.0, 50.0);
        let g = RadialGradient::planet(center, 30.0, Color::rgb(1.0, 0.0, 0.0));
        for angle in [0.0_f32, 1.0, 2.5, 4.0] {
            let rim = center + crate::polar_to_cartesian(30.0, angle);
            assert!((g.t_at(rim) - 1.0).abs() < 1e-3, "angle {angle}");
            assert!(close(g.sample(rim), Color::BLACK));
        }
    }

    #[test]
    fn test_gradient_concentric_is_linear_in_distance() {
        let g = RadialGradient {
            focal: Vec2::ZERO,
            center: Vec2::ZERO,
            radius: 10.0,
            stops: RadialGradient::planet(Vec2::ZERO, 10.0, Color::WHITE).stops,
        };
        assert!((g.t_at(Vec2::new(3.0, 0.0)) - 0.3).abs() < 1e-5);
        assert!((g.t_at(Vec2::new(0.0, -5.0)) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_color_at_base_stop() {
        let base = Color::rgb(0.2, 0.4, 0.6);
        let g = RadialGradient::planet(Vec2::ZERO, 10.0, base);
        assert!(close(g.color_at(0.3), base));
        assert!(close(g.color_at(0.15), Color::WHITE.lerp(base, 0.5)));
        assert!(close(g.color_at(2.0), Color::BLACK));
    }
}

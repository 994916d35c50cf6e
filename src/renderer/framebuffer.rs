//! Software RGBA8 surface
//!
//! Used by the native build and by tests. Pixels are sampled at their
//! centers, blended source-over with straight alpha.

use std::io::Write;

use glam::Vec2;

use super::surface::{Color, Fill, Rect, Surface};
use crate::background::Image;
use crate::error::CanvasError;

/// CPU pixel buffer, row-major RGBA8
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = self.offset(x, y);
        let mut px = [0; 4];
        px.copy_from_slice(&self.pixels[offset..offset + 4]);
        Some(px)
    }

    /// Encode the current contents as PNG
    pub fn write_png<W: Write>(&self, writer: W) -> Result<(), CanvasError> {
        let mut encoder = png::Encoder::new(writer, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.pixels)?;
        writer.finish()?;
        Ok(())
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    fn blend(&mut self, x: u32, y: u32, src: Color) {
        let offset = self.offset(x, y);
        let dst = Color::from_rgba8([
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
            self.pixels[offset + 3],
        ]);

        let out_a = src.a + dst.a * (1.0 - src.a);
        let out = if out_a > 0.0 {
            let mix = |s: f32, d: f32| (s * src.a + d * dst.a * (1.0 - src.a)) / out_a;
            Color {
                r: mix(src.r, dst.r),
                g: mix(src.g, dst.g),
                b: mix(src.b, dst.b),
                a: out_a,
            }
        } else {
            Color::TRANSPARENT
        };
        self.pixels[offset..offset + 4].copy_from_slice(&out.to_rgba8());
    }

    /// Pixel index range covering [lo, hi) along one axis, clipped
    fn span(lo: f32, hi: f32, limit: u32) -> std::ops::Range<u32> {
        let start = lo.floor().max(0.0) as u32;
        let end = (hi.ceil().max(0.0) as u32).min(limit);
        start.min(end)..end
    }
}

impl Surface for Framebuffer {
    fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: &Fill) {
        if radius <= 0.0 {
            return;
        }
        // Half a pixel of coverage falloff on each side of the edge
        let reach = radius + 0.5;
        let xs = Self::span(center.x - reach, center.x + reach, self.width);
        let ys = Self::span(center.y - reach, center.y + reach, self.height);

        for y in ys {
            for x in xs.clone() {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = (reach - p.distance(center)).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    let color = fill.color_at(p);
                    self.blend(
                        x,
                        y,
                        Color {
                            a: color.a * coverage,
                            ..color
                        },
                    );
                }
            }
        }
    }

    fn draw_image(&mut self, image: &Image, dest: Rect) {
        if image.width == 0 || image.height == 0 || dest.size.x <= 0.0 || dest.size.y <= 0.0 {
            return;
        }
        let max = dest.max();
        let xs = Self::span(dest.origin.x, max.x, self.width);
        let ys = Self::span(dest.origin.y, max.y, self.height);
        let scale = Vec2::new(image.width as f32, image.height as f32) / dest.size;

        for y in ys {
            for x in xs.clone() {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if p.x < dest.origin.x || p.y < dest.origin.y || p.x >= max.x || p.y >= max.y {
                    continue;
                }
                // Nearest neighbour
                let src = (p - dest.origin) * scale;
                let sx = (src.x as u32).min(image.width - 1);
                let sy = (src.y as u32).min(image.height - 1);
                if let Some(px) = image.pixel(sx, sy) {
                    self.blend(x, y, Color::from_rgba8(px));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RadialGradient;

    #[test]
    fn test_new_is_transparent() {
        let fb = Framebuffer::new(4, 3);
        assert_eq!(fb.pixels().len(), 4 * 3 * 4);
        assert_eq!(fb.pixel(3, 2), Some([0, 0, 0, 0]));
        assert_eq!(fb.pixel(4, 0), None);
    }

    #[test]
    fn test_solid_circle_coverage() {
        let mut fb = Framebuffer::new(40, 40);
        fb.fill_circle(Vec2::new(20.0, 20.0), 5.0, &Fill::Solid(Color::WHITE));

        assert_eq!(fb.pixel(20, 20), Some([255, 255, 255, 255]));
        assert_eq!(fb.pixel(23, 20), Some([255, 255, 255, 255]));
        assert_eq!(fb.pixel(26, 20), Some([0, 0, 0, 0]));
        assert_eq!(fb.pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_circle_edge_is_antialiased() {
        let mut fb = Framebuffer::new(40, 40);
        // Pixel centers land on whole distances from this center
        fb.fill_circle(Vec2::new(20.5, 20.5), 5.0, &Fill::Solid(Color::WHITE));

        assert_eq!(fb.pixel(24, 20), Some([255, 255, 255, 255]));
        let [_, _, _, edge] = fb.pixel(25, 20).unwrap_or_default();
        assert!(edge > 100 && edge < 160, "edge alpha {edge}");
        assert_eq!(fb.pixel(26, 20), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_circle_clipped_at_edges() {
        let mut fb = Framebuffer::new(10, 10);
        fb.fill_circle(Vec2::new(-2.0, -2.0), 6.0, &Fill::Solid(Color::WHITE));
        fb.fill_circle(Vec2::new(50.0, 50.0), 6.0, &Fill::Solid(Color::WHITE));
        assert_eq!(fb.pixel(0, 0), Some([255, 255, 255, 255]));
        assert_eq!(fb.pixel(9, 9), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_planet_shading() {
        let mut fb = Framebuffer::new(100, 100);
        let center = Vec2::new(50.0, 50.0);
        let base = Color::rgb(1.0, 0.0, 0.0);
        let gradient = RadialGradient::planet(center, 30.0, base);
        fb.fill_circle(center, 30.0, &Fill::Radial(gradient));

        // Highlight near the upper-left focal point, dark rim
        let [r, g, b, a] = fb.pixel(40, 40).unwrap_or_default();
        assert_eq!(a, 255);
        assert!(r > 240 && g > 200 && b > 200, "highlight {r} {g} {b}");
        let [r, g, b, _] = fb.pixel(79, 50).unwrap_or_default();
        assert!(r < 40 && g < 10 && b < 10, "rim {r} {g} {b}");
        // Lower-right is darker than upper-left
        let upper_left = fb.pixel(35, 35).unwrap_or_default()[0];
        let lower_right = fb.pixel(65, 65).unwrap_or_default()[0];
        assert!(upper_left > lower_right);
    }

    #[test]
    fn test_clear_resets() {
        let mut fb = Framebuffer::new(10, 10);
        fb.fill_circle(Vec2::new(5.0, 5.0), 3.0, &Fill::Solid(Color::WHITE));
        fb.clear();
        assert!(fb.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_draw_image_scaled() {
        // 2x1 image: red | blue, stretched onto a 4x2 rect at (2, 2)
        let image = Image {
            width: 2,
            height: 1,
            pixels: vec![255, 0, 0, 255, 0, 0, 255, 255],
        };
        let mut fb = Framebuffer::new(8, 8);
        fb.draw_image(&image, Rect::new(Vec2::new(2.0, 2.0), Vec2::new(4.0, 2.0)));

        assert_eq!(fb.pixel(2, 2), Some([255, 0, 0, 255]));
        assert_eq!(fb.pixel(3, 3), Some([255, 0, 0, 255]));
        assert_eq!(fb.pixel(4, 2), Some([0, 0, 255, 255]));
        assert_eq!(fb.pixel(5, 3), Some([0, 0, 255, 255]));
        assert_eq!(fb.pixel(6, 2), Some([0, 0, 0, 0]));
        assert_eq!(fb.pixel(1, 2), Some([0, 0, 0, 0]));
        assert_eq!(fb.pixel(2, 4), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_write_png_header() {
        let mut fb = Framebuffer::new(3, 2);
        fb.fill_circle(Vec2::new(1.5, 1.0), 1.0, &Fill::Solid(Color::WHITE));
        let mut out = Vec::new();
        fb.write_png(&mut out).expect("encode");
        assert_eq!(&out[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    }
}

//! Background image loading
//!
//! A background is drawn once, aspect-fit and centered, and is wiped by the
//! next frame's clear. Nothing here is kept between draws.

use std::borrow::Cow;

use glam::Vec2;

use crate::error::CanvasError;
use crate::fit_within;
use crate::renderer::Rect;

/// Decoded RGBA8 image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8, straight alpha
    pub pixels: Vec<u8>,
}

impl Image {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let mut px = [0; 4];
        px.copy_from_slice(self.pixels.get(offset..offset + 4)?);
        Some(px)
    }

    /// Decode PNG, JPEG, GIF (first frame) or WebP bytes into RGBA8.
    /// The format is sniffed from the bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, CanvasError> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(CanvasError::EmptyImage);
        }
        Ok(Self {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }

    /// Nearest-neighbour resample so neither side exceeds `max_dimension`,
    /// keeping the aspect ratio. Images that already fit are borrowed.
    pub fn downscaled(&self, max_dimension: u32) -> Cow<'_, Image> {
        let longest = self.width.max(self.height);
        if longest <= max_dimension || max_dimension == 0 {
            return Cow::Borrowed(self);
        }

        let shrink = |side: u32| {
            ((side as u64 * max_dimension as u64) / longest as u64).clamp(1, max_dimension as u64) as u32
        };
        let width = shrink(self.width);
        let height = shrink(self.height);

        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            let sy = (y as u64 * self.height as u64 / height as u64) as u32;
            for x in 0..width {
                let sx = (x as u64 * self.width as u64 / width as u64) as u32;
                pixels.extend_from_slice(&self.pixel(sx, sy).unwrap_or_default());
            }
        }

        Cow::Owned(Image {
            width,
            height,
            pixels,
        })
    }
}

/// Where an image of `image_size` lands on a surface of `surface_size`:
/// as large as fits without distortion, centered on both axes.
pub fn fit_rect(image_size: Vec2, surface_size: Vec2) -> Rect {
    let size = fit_within(image_size, surface_size);
    Rect::new((surface_size - size) / 2.0, size)
}

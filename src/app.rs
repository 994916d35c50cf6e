//! Frame loop and input handling
//!
//! `App` is what the platform layer talks to: it forwards pointer, button
//! and file events into the simulation and drives one frame per display
//! refresh.

use glam::Vec2;

use crate::background::{Image, fit_rect};
use crate::error::CanvasError;
use crate::renderer::Surface;
use crate::sim::{AppState, tick};

/// Simulated frames per display frame
const FRAME_DT: f32 = 1.0;

pub struct App {
    pub state: AppState,
}

impl App {
    pub fn new(seed: u64, surface_size: Vec2) -> Self {
        Self {
            state: AppState::new(seed, surface_size),
        }
    }

    /// Pointer moved to (x, y) in surface coordinates: remember it and
    /// reselect the nearest circle.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        self.state.cursor = Vec2::new(x, y);
        self.state.circles.select_nearest(self.state.cursor);
    }

    /// Spawn a random circle; returns its id
    pub fn on_create(&mut self) -> u32 {
        let id = self.state.spawn_circle();
        if let Some(circle) = self.state.circles.get(id) {
            log::debug!(
                "Spawned circle {} at ({:.1}, {:.1}) r={:.1}",
                id,
                circle.pos.x,
                circle.pos.y,
                circle.radius
            );
        }
        id
    }

    /// Decode `bytes` and draw them once as a centered, aspect-fit
    /// background. The next frame clears it like everything else.
    ///
    /// Decode failures are logged and returned; the app keeps running.
    pub fn on_background<S: Surface + ?Sized>(
        &mut self,
        bytes: &[u8],
        surface: &mut S,
    ) -> Result<(), CanvasError> {
        let image = match Image::decode(bytes) {
            Ok(image) => image,
            Err(e) => {
                log::error!("Error loading the image: {}", e);
                return Err(e);
            }
        };

        let dest = fit_rect(image.size(), surface.size());
        surface.clear();
        surface.draw_image(&image, dest);
        surface.present();
        log::info!(
            "Background {}x{} drawn at ({:.0}, {:.0}) size {:.0}x{:.0}",
            image.width,
            image.height,
            dest.origin.x,
            dest.origin.y,
            dest.size.x,
            dest.size.y
        );
        Ok(())
    }

    /// Surface bounds changed
    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.surface_size = Vec2::new(width, height);
    }

    /// One display frame: clear, step the simulation, draw every circle,
    /// present.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        surface.clear();
        tick(&mut self.state, FRAME_DT);
        self.state.circles.draw_all(surface);
        surface.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MOVE_SPEED;
    use crate::renderer::scene::tests::RecordingSurface;
    use crate::renderer::{Color, Fill, Framebuffer};
    use crate::sim::Circle;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut fb = Framebuffer::new(width, height);
        fb.fill_circle(
            Vec2::new(width as f32 / 2.0, height as f32 / 2.0),
            width.min(height) as f32,
            &Fill::Solid(Color::rgb(0.0, 1.0, 0.0)),
        );
        let mut out = Vec::new();
        fb.write_png(&mut out).expect("encode");
        out
    }

    #[test]
    fn test_frame_on_empty_app() {
        let mut app = App::new(1, Vec2::new(800.0, 600.0));
        let mut surface = RecordingSurface::default();
        app.on_pointer_move(5.0, 5.0);
        app.frame(&mut surface);

        assert!(app.state.circles.selected().is_none());
        assert_eq!(surface.clears, 1);
        assert_eq!(surface.presents, 1);
        assert!(surface.discs.is_empty());
    }

    #[test]
    fn test_pointer_move_selects_and_frame_moves() {
        let mut app = App::new(3, Vec2::new(800.0, 600.0));
        let near = app
            .state
            .circles
            .add(Circle::new(Vec2::new(100.0, 100.0), 20.0, Color::WHITE));
        app.state
            .circles
            .add(Circle::new(Vec2::new(600.0, 400.0), 20.0, Color::WHITE));

        app.on_pointer_move(140.0, 100.0);
        assert_eq!(app.state.cursor, Vec2::new(140.0, 100.0));
        assert_eq!(app.state.circles.selected().map(|c| c.id), Some(near));

        let mut surface = RecordingSurface::default();
        app.frame(&mut surface);

        let pos = app.state.circles.get(near).map(|c| c.pos);
        assert_eq!(pos, Some(Vec2::new(100.0 + MOVE_SPEED, 100.0)));
        // Two circles, body + moon each
        assert_eq!(surface.discs.len(), 4);
    }

    #[test]
    fn test_create_spawns_inside_bounds() {
        let mut app = App::new(11, Vec2::new(320.0, 240.0));
        for _ in 0..20 {
            app.on_create();
        }
        assert_eq!(app.state.circles.len(), 20);
        assert!(app.state.circles.iter().all(|c| c.pos.x < 320.0 && c.pos.y < 240.0));
    }

    #[test]
    fn test_background_fit_and_one_shot() {
        let mut app = App::new(5, Vec2::new(800.0, 600.0));
        app.on_create();
        let mut surface = RecordingSurface::default();

        app.on_background(&png_bytes(40, 10), &mut surface)
            .expect("valid png");
        assert_eq!(surface.images.len(), 1);
        let dest = surface.images[0];
        assert_eq!(dest.size, Vec2::new(800.0, 200.0));
        assert_eq!(dest.origin, Vec2::new(0.0, 200.0));

        // Next frame wipes it
        app.frame(&mut surface);
        assert!(surface.images.is_empty());
    }

    #[test]
    fn test_background_decode_failure_keeps_running() {
        let mut app = App::new(5, Vec2::new(800.0, 600.0));
        app.on_create();
        let mut surface = RecordingSurface::default();

        let result = app.on_background(b"\x89PNG but not really", &mut surface);
        assert!(result.is_err());
        assert!(surface.images.is_empty());
        assert_eq!(surface.clears, 0);

        app.frame(&mut surface);
        assert_eq!(surface.discs.len(), 2);
    }

    #[test]
    fn test_background_accepts_jpeg() {
        let mut app = App::new(5, Vec2::new(800.0, 600.0));
        let photo = image::RgbImage::from_pixel(64, 48, image::Rgb([30, 90, 200]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(photo)
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Jpeg)
            .expect("encode jpeg");

        let mut surface = RecordingSurface::default();
        app.on_background(&bytes, &mut surface).expect("valid jpeg");
        assert_eq!(surface.images.len(), 1);
        assert_eq!(surface.images[0].size, Vec2::new(800.0, 600.0));
    }

    #[test]
    fn test_background_on_framebuffer() {
        let mut app = App::new(5, Vec2::new(100.0, 100.0));
        let mut fb = Framebuffer::new(100, 100);
        app.on_background(&png_bytes(10, 10), &mut fb)
            .expect("valid png");
        // Solid green image covers the whole square surface
        assert_eq!(fb.pixel(0, 0), Some([0, 255, 0, 255]));
        assert_eq!(fb.pixel(99, 99), Some([0, 255, 0, 255]));
    }

    #[test]
    fn test_resize_changes_spawn_bounds() {
        let mut app = App::new(8, Vec2::new(800.0, 600.0));
        app.resize(50.0, 40.0);
        for _ in 0..10 {
            app.on_create();
        }
        assert!(app.state.circles.iter().all(|c| c.pos.x < 50.0 && c.pos.y < 40.0));
    }
}

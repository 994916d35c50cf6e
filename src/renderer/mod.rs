//! Rendering module
//!
//! Scene code draws through the [`Surface`] trait. Backends: a software
//! framebuffer (native, tests) and a WebGPU SDF renderer (browser).

pub mod framebuffer;
pub mod scene;
pub mod sdf_pipeline;
pub mod surface;

pub use framebuffer::Framebuffer;
pub use scene::render_circle;
pub use sdf_pipeline::SdfRenderState;
pub use surface::{Color, Fill, GradientStop, RadialGradient, Rect, Surface};

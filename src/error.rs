//! Error types
//!
//! Only the background image path and native frame export can fail;
//! simulation and drawing are total.

use thiserror::Error;

/// Errors surfaced at the input/export boundary.
#[derive(Error, Debug)]
pub enum CanvasError {
    /// Image bytes are not a format we can decode, or are corrupt.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// Image has zero width or height.
    #[error("image has no pixels")]
    EmptyImage,

    /// Frame could not be encoded as PNG.
    #[error("failed to encode frame: {0}")]
    Encode(#[from] png::EncodingError),

    /// File system error.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

//! Graphics error types

use thiserror::Error;

use super::ImageFormat;

/// Errors raised by renderer backends
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphicsError {
    /// Requested image has a zero dimension
    #[error("Invalid image size: {width}x{height}")]
    InvalidImageSize { width: u32, height: u32 },

    /// Pixel data does not match the declared format and size
    #[error("Pixel data size mismatch for {format:?} {width}x{height}: expected {expected} bytes, got {actual}")]
    PixelDataMismatch {
        format: ImageFormat,
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Backend failed to allocate the resource
    #[error("Renderer '{renderer}' failed to create image: {reason}")]
    ImageCreationFailed { renderer: String, reason: String },
}

/// Result type for graphics operations
pub type GraphicsResult<T> = Result<T, GraphicsError>;

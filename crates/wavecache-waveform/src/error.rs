//! Waveform cache error types

use thiserror::Error;
use wavecache_core::graphics::GraphicsError;

/// Reasons an element could not be created or refreshed
///
/// None of these are fatal: a failed element aborts the lookup that needed
/// it, the caller paints a placeholder, and the next paint pass retries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CacheError {
    /// The data provider reported a hard failure
    #[error("Waveform data unavailable at sample {first_sample}")]
    DataUnavailable { first_sample: i64 },

    /// Paint parameters have no vertical extent yet
    #[error("Cannot rasterize a waveform with zero height")]
    ZeroHeight,

    /// Display bounds do not span a positive range
    #[error("Invalid display bounds: min={min}, max={max}")]
    InvalidDisplayBounds { min: f32, max: f32 },

    /// No painter has been attached to the bitmap cache
    #[error("No renderer attached to the bitmap cache")]
    NoRenderer,

    /// The renderer refused to create the image
    #[error("Graphics error: {0}")]
    Graphics(#[from] GraphicsError),
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

//! Wavecache Waveform - Windowed caches for waveform display
//!
//! Two cache tiers sit between a clip's audio and the painter:
//!
//! - [`WaveDataCache`] keeps min/max/RMS summaries per pixel column, pulled
//!   from a [`DataProvider`](wave_data::DataProvider) at a decimation level
//!   matching the zoom.
//! - [`WaveBitmapCache`] rasterizes those summaries into renderer images
//!   using the current paint parameters, selection and envelope.
//!
//! Both are built on [`GraphicsDataCache`], which maps a time range at a
//! zoom level onto fixed-width elements, creates missing ones, refreshes
//! incomplete ones on every pass and evicts the least recently used.
//! [`WaveClipPainter`] blits a bitmap lookup onto a painter.

pub mod bitmap;
pub mod cache;
pub mod clip_painter;
pub mod error;
pub mod wave_data;

#[cfg(test)]
pub(crate) mod testing;

pub use bitmap::{WaveBitmapCache, WaveBitmapCacheElement, WavePaintParameters};
pub use cache::{CacheKey, CacheStatistics, GraphicsDataCache, LookupRange, CACHE_ELEMENT_WIDTH};
pub use clip_painter::WaveClipPainter;
pub use error::{CacheError, CacheResult};
pub use wave_data::{WaveCacheElement, WaveDataCache, WaveDisplayColumn};

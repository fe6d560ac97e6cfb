//! Numeric summary tier
//!
//! [`WaveDataCache`] keeps min/max/RMS columns per cache element, pulled
//! from a [`DataProvider`] at a decimation level picked from the zoom.

mod block;
mod cache;

pub use block::{MinMaxRms, SampleBlockType, Summary, WaveCacheSampleBlock};
pub use cache::{DataProvider, WaveCacheElement, WaveDataCache, WaveDataLoader, WaveDisplayColumn};

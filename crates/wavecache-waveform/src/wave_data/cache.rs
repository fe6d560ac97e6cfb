//! Numeric waveform tier
//!
//! Turns provider blocks into one min/max/RMS column per pixel.

use wavecache_core::config::CacheConfig;
use wavecache_core::ZoomInfo;

use super::block::{SampleBlockType, Summary, WaveCacheSampleBlock};
use crate::cache::{
    CacheContext, CacheElement, CacheKey, CacheStatistics, ElementInitializer, GraphicsDataCache,
    LookupRange, CACHE_ELEMENT_WIDTH,
};
use crate::error::{CacheError, CacheResult};

/// Fills `block` with data covering `required_sample` at the given level
///
/// Returns false only on a hard failure. Data that is still loading is
/// reported by leaving the block short of `required_sample`.
pub type DataProvider = Box<dyn FnMut(i64, SampleBlockType, &mut WaveCacheSampleBlock) -> bool>;

/// Summary of the samples under one pixel column
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WaveDisplayColumn {
    pub min: f32,
    pub max: f32,
    pub rms: f32,
}

/// Numeric payload of one cache element
#[derive(Debug, Clone)]
pub struct WaveCacheElement {
    pub columns: [WaveDisplayColumn; CACHE_ELEMENT_WIDTH],
    /// Leading columns holding valid data
    pub available_columns: usize,
    pub is_complete: bool,
}

impl Default for WaveCacheElement {
    fn default() -> Self {
        Self {
            columns: [WaveDisplayColumn::default(); CACHE_ELEMENT_WIDTH],
            available_columns: 0,
            is_complete: false,
        }
    }
}

impl WaveCacheElement {
    /// The columns that hold valid data
    pub fn available(&self) -> &[WaveDisplayColumn] {
        &self.columns[..self.available_columns]
    }
}

impl CacheElement for WaveCacheElement {
    fn is_complete(&self) -> bool {
        self.is_complete
    }

    fn dispose(&mut self) {
        self.available_columns = 0;
        self.is_complete = false;
    }
}

/// Element initializer pulling from a [`DataProvider`]
pub struct WaveDataLoader {
    provider: DataProvider,
    block: WaveCacheSampleBlock,
}

impl WaveDataLoader {
    pub fn new(provider: DataProvider) -> Self {
        Self {
            provider,
            block: WaveCacheSampleBlock::default(),
        }
    }

    /// Make sure the scratch block covers `sample` at `data_type`
    ///
    /// Ok(false) means the provider has no data there yet.
    fn ensure_block(&mut self, sample: i64, data_type: SampleBlockType) -> CacheResult<bool> {
        if self.block.data_type() == data_type && self.block.contains_sample(sample) {
            return Ok(true);
        }

        if !(self.provider)(sample, data_type, &mut self.block) {
            return Err(CacheError::DataUnavailable { first_sample: sample });
        }

        Ok(self.block.data_type() == data_type && self.block.contains_sample(sample))
    }

    /// Summarize `[from, to)`, or None when the data runs out first
    fn summarize(&mut self, from: i64, to: i64, data_type: SampleBlockType) -> CacheResult<Option<Summary>> {
        let mut summary = Summary::default();
        let mut position = from;

        while position < to {
            if !self.ensure_block(position, data_type)? {
                return Ok(None);
            }

            let chunk_end = to.min(self.block.end_sample());
            summary = self.block.summary(position, (chunk_end - position) as u64, &summary);
            position = chunk_end;
        }

        Ok((summary.samples_count > 0).then_some(summary))
    }
}

impl ElementInitializer for WaveDataLoader {
    type Element = WaveCacheElement;

    fn initialize_element(
        &mut self,
        context: &CacheContext,
        key: &CacheKey,
        element: &mut WaveCacheElement,
    ) -> CacheResult<()> {
        let samples_per_pixel = context.sample_rate / key.pixels_per_second;
        let data_type = SampleBlockType::for_samples_per_pixel(samples_per_pixel);
        let column_start = |column: usize| key.first_sample + (column as f64 * samples_per_pixel) as i64;

        element.available_columns = 0;
        element.is_complete = false;

        for column in 0..CACHE_ELEMENT_WIDTH {
            let from = column_start(column);
            let to = column_start(column + 1).max(from + 1);

            let Some(summary) = self.summarize(from, to, data_type)? else {
                break;
            };

            element.columns[column] = WaveDisplayColumn {
                min: summary.min,
                max: summary.max,
                rms: summary.rms(),
            };
            element.available_columns = column + 1;
        }

        element.is_complete = element.available_columns == CACHE_ELEMENT_WIDTH;

        if !element.is_complete {
            log::trace!(
                "[WAVE_DATA] Element at sample {} partially available: {}/{} columns",
                key.first_sample,
                element.available_columns,
                CACHE_ELEMENT_WIDTH
            );
        }

        Ok(())
    }
}

/// Cache of numeric waveform summaries
pub struct WaveDataCache {
    inner: GraphicsDataCache<WaveDataLoader>,
}

impl WaveDataCache {
    pub fn new(provider: DataProvider, sample_rate: f64) -> Self {
        Self::with_config(provider, sample_rate, &CacheConfig::default())
    }

    pub fn with_config(provider: DataProvider, sample_rate: f64, config: &CacheConfig) -> Self {
        Self {
            inner: GraphicsDataCache::with_config(WaveDataLoader::new(provider), sample_rate, config),
        }
    }

    pub fn perform_lookup(&mut self, zoom_info: &ZoomInfo, t0: f64, t1: f64) -> LookupRange<'_, WaveCacheElement> {
        self.inner.perform_lookup(zoom_info, t0, t1)
    }

    /// Resolve the element for a single key
    pub fn lookup_key(&mut self, key: &CacheKey) -> Option<&WaveCacheElement> {
        self.inner.lookup_key(key)
    }

    /// Drop every element and the scratch block after the audio changed
    pub fn invalidate(&mut self) {
        self.inner.invalidate();
        self.inner.initializer_mut().block = WaveCacheSampleBlock::default();
    }

    pub fn update_viewport_width(&mut self, width: i64) {
        self.inner.update_viewport_width(width);
    }

    pub fn sample_rate(&self) -> f64 {
        self.inner.sample_rate()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn statistics(&self) -> CacheStatistics {
        self.inner.statistics()
    }

    pub fn reset_statistics(&mut self) {
        self.inner.reset_statistics();
    }
}

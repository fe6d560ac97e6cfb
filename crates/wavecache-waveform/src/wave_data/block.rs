//! Scratch block exchanged with the data provider
//!
//! The provider fills a [`WaveCacheSampleBlock`] with either raw samples or
//! pre-decimated min/max/RMS triples. The cache then reduces whatever the
//! block holds into per-column summaries.

use bytemuck::{Pod, Zeroable};
use wavecache_core::Sample;

/// Granularity of the data stored in a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SampleBlockType {
    /// One entry per raw sample
    #[default]
    Samples,
    /// One min/max/RMS triple per 256 samples
    MinMaxRms256,
    /// One min/max/RMS triple per 65536 samples
    MinMaxRms64k,
}

impl SampleBlockType {
    /// Number of raw samples summarized by one entry
    pub const fn samples_per_entry(&self) -> u64 {
        match self {
            SampleBlockType::Samples => 1,
            SampleBlockType::MinMaxRms256 => 256,
            SampleBlockType::MinMaxRms64k => 65536,
        }
    }

    /// Coarsest level whose entries still fit inside one pixel column
    pub fn for_samples_per_pixel(samples_per_pixel: f64) -> Self {
        if samples_per_pixel >= SampleBlockType::MinMaxRms64k.samples_per_entry() as f64 {
            SampleBlockType::MinMaxRms64k
        } else if samples_per_pixel >= SampleBlockType::MinMaxRms256.samples_per_entry() as f64 {
            SampleBlockType::MinMaxRms256
        } else {
            SampleBlockType::Samples
        }
    }
}

/// Pre-decimated summary of a run of samples
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct MinMaxRms {
    pub min: f32,
    pub max: f32,
    pub rms: f32,
}

impl MinMaxRms {
    pub const fn new(min: f32, max: f32, rms: f32) -> Self {
        Self { min, max, rms }
    }

    /// Summarize a run of raw samples
    pub fn from_samples(samples: &[Sample]) -> Self {
        if samples.is_empty() {
            return Self::zeroed();
        }

        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut squares = 0.0f64;

        for &sample in samples {
            min = min.min(sample);
            max = max.max(sample);
            squares += sample as f64 * sample as f64;
        }

        Self {
            min,
            max,
            rms: (squares / samples.len() as f64).sqrt() as f32,
        }
    }
}

/// Running reduction over samples or summaries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Raw samples covered so far
    pub samples_count: u64,
    pub min: f32,
    pub max: f32,
    pub squares_sum: f64,
    /// Items contributing to `squares_sum`
    pub sum_items_count: u64,
}

impl Default for Summary {
    fn default() -> Self {
        Self {
            samples_count: 0,
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
            squares_sum: 0.0,
            sum_items_count: 0,
        }
    }
}

impl Summary {
    /// Quadratic mean over everything accumulated
    pub fn rms(&self) -> f32 {
        if self.sum_items_count == 0 {
            0.0
        } else {
            (self.squares_sum / self.sum_items_count as f64).sqrt() as f32
        }
    }

    fn add_sample(&mut self, sample: Sample) {
        self.min = self.min.min(sample);
        self.max = self.max.max(sample);
        self.squares_sum += sample as f64 * sample as f64;
        self.sum_items_count += 1;
    }

    fn add_summary(&mut self, entry: &MinMaxRms) {
        self.min = self.min.min(entry.min);
        self.max = self.max.max(entry.max);
        self.squares_sum += entry.rms as f64 * entry.rms as f64;
        self.sum_items_count += 1;
    }
}

/// Reusable buffer the provider writes into
#[derive(Debug, Clone, Default)]
pub struct WaveCacheSampleBlock {
    data_type: SampleBlockType,
    first_sample: i64,
    num_samples: u64,
    samples: Vec<Sample>,
    summaries: Vec<MinMaxRms>,
}

impl WaveCacheSampleBlock {
    pub fn data_type(&self) -> SampleBlockType {
        self.data_type
    }

    /// First raw sample covered by the block
    pub fn first_sample(&self) -> i64 {
        self.first_sample
    }

    /// Raw samples covered by the block
    pub fn num_samples(&self) -> u64 {
        self.num_samples
    }

    /// One past the last raw sample covered
    pub fn end_sample(&self) -> i64 {
        self.first_sample.saturating_add(self.num_samples as i64)
    }

    pub fn contains_sample(&self, sample_index: i64) -> bool {
        sample_index >= self.first_sample && sample_index < self.end_sample()
    }

    /// Empty the block, keeping its allocations
    pub fn reset(&mut self) {
        self.data_type = SampleBlockType::Samples;
        self.first_sample = 0;
        self.num_samples = 0;
        self.samples.clear();
        self.summaries.clear();
    }

    /// Store raw samples starting at `first_sample`
    pub fn write_samples(&mut self, first_sample: i64, samples: &[Sample]) {
        self.data_type = SampleBlockType::Samples;
        self.first_sample = first_sample;
        self.num_samples = samples.len() as u64;
        self.summaries.clear();
        self.samples.clear();
        self.samples.extend_from_slice(samples);
    }

    /// Store decimated entries starting at `first_sample`
    ///
    /// `num_samples` is the number of raw samples the entries cover; the last
    /// entry may summarize fewer samples than a full decimation step.
    pub fn write_summaries(
        &mut self,
        data_type: SampleBlockType,
        first_sample: i64,
        summaries: &[MinMaxRms],
        num_samples: u64,
    ) {
        let capacity = summaries.len() as u64 * data_type.samples_per_entry();

        self.data_type = data_type;
        self.first_sample = first_sample;
        self.num_samples = num_samples.min(capacity);
        self.samples.clear();
        self.summaries.clear();
        self.summaries.extend_from_slice(summaries);
    }

    /// Fold the samples in `[from, from + count)` into `initializer`
    ///
    /// The range is clamped to the block. For decimated data every entry
    /// overlapping the range contributes as a whole.
    pub fn summary(&self, from: i64, count: u64, initializer: &Summary) -> Summary {
        let mut summary = *initializer;

        let start = from.max(self.first_sample);
        let end = from.saturating_add(count as i64).min(self.end_sample());
        if start >= end {
            return summary;
        }

        let offset = (start - self.first_sample) as u64;
        let len = (end - start) as u64;
        summary.samples_count += len;

        match self.data_type {
            SampleBlockType::Samples => {
                let range = offset as usize..(offset + len) as usize;
                for &sample in self.samples.get(range).unwrap_or_default() {
                    summary.add_sample(sample);
                }
            }
            data_type => {
                let per_entry = data_type.samples_per_entry();
                let first_entry = (offset / per_entry) as usize;
                let last_entry = ((offset + len - 1) / per_entry) as usize;

                for entry in self.summaries.get(first_entry..=last_entry).unwrap_or_default() {
                    summary.add_summary(entry);
                }
            }
        }

        summary
    }
}

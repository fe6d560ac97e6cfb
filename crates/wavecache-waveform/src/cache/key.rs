//! Cache keys and zoom-level tolerance
//!
//! Two zoom levels are treated as equal when, across one element width,
//! their sample positions differ by less than one sample period.

use std::cmp::Ordering;

use super::CACHE_ELEMENT_WIDTH;

/// Identifies one cache element: a run of [`CACHE_ELEMENT_WIDTH`] pixel
/// columns at a zoom level, starting at `first_sample`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheKey {
    pub pixels_per_second: f64,
    pub first_sample: i64,
}

impl CacheKey {
    pub const fn new(pixels_per_second: f64, first_sample: i64) -> Self {
        Self {
            pixels_per_second,
            first_sample,
        }
    }
}

/// True when `t0` and `t1` are closer than one sample period
#[inline]
pub fn is_same_time(sample_rate: f64, t0: f64, t1: f64) -> bool {
    (t0 - t1).abs() < 1.0 / sample_rate
}

/// True when both zoom levels fall into the same ppsGroup
#[inline]
pub fn is_same_pps(sample_rate: f64, lhs: f64, rhs: f64) -> bool {
    (1.0 / lhs - 1.0 / rhs).abs() * (CACHE_ELEMENT_WIDTH as f64) < 1.0 / sample_rate
}

#[inline]
pub fn is_same_key(sample_rate: f64, lhs: &CacheKey, rhs: &CacheKey) -> bool {
    lhs.first_sample == rhs.first_sample
        && is_same_pps(sample_rate, lhs.pixels_per_second, rhs.pixels_per_second)
}

/// Table order: same-zoom keys by first sample, otherwise by zoom
pub fn compare_keys(sample_rate: f64, lhs: &CacheKey, rhs: &CacheKey) -> Ordering {
    if is_same_pps(sample_rate, lhs.pixels_per_second, rhs.pixels_per_second) {
        lhs.first_sample.cmp(&rhs.first_sample)
    } else {
        lhs.pixels_per_second
            .partial_cmp(&rhs.pixels_per_second)
            .unwrap_or(Ordering::Equal)
    }
}

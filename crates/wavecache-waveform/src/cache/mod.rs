//! Windowed, keyed cache over a 1-D timeline
//!
//! ## Architecture
//!
//! ```text
//! perform_lookup(zoom, t0, t1)
//!     │
//!     ├─► pixel range [left, right) → element columns [cacheLeft, cacheRight)
//!     ├─► find same-zoom elements, stage missing keys
//!     ├─► create staged elements (all or nothing), merge into sorted table
//!     ├─► touch + refresh incomplete elements
//!     └─► LRU cleanup, return borrowed range + edge trims
//! ```
//!
//! Concrete caches plug in through [`ElementInitializer`]; the payload type
//! is the only axis of variation, so it is a generic parameter rather than
//! a trait object.

mod element;
mod graphics_cache;
mod key;
mod range;
mod stats;

pub use element::{CacheContext, CacheElement, ElementInitializer};
pub use graphics_cache::{CacheSlot, GraphicsDataCache};
pub use key::{compare_keys, is_same_key, is_same_pps, is_same_time, CacheKey};
pub use range::{LookupItem, LookupIter, LookupRange};
pub use stats::CacheStatistics;

/// Number of pixel columns in one cache element
pub const CACHE_ELEMENT_WIDTH: usize = 256;

/// `ceil(value / divisor)` for a positive divisor
#[inline]
pub(crate) fn ceil_div(value: i64, divisor: i64) -> i64 {
    let quotient = value.div_euclid(divisor);
    if value.rem_euclid(divisor) == 0 {
        quotient
    } else {
        quotient + 1
    }
}

//! Cache sizing configuration

use serde::{Deserialize, Serialize};

/// Smallest multiplier that still fits one full visible range plus the
/// partially visible element at each edge
pub const MIN_SIZE_MULTIPLIER: usize = 2;

/// Sizing of the windowed caches
///
/// A cache keeps at most `ceil(max_width / element_width) * size_multiplier`
/// elements, where `max_width` is the widest range ever requested. The slack
/// above 1 keeps recently scrolled-away elements around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Default: 4
    pub size_multiplier: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { size_multiplier: 4 }
    }
}

impl CacheConfig {
    /// Multiplier clamped to the supported minimum
    pub fn effective_size_multiplier(&self) -> usize {
        if self.size_multiplier < MIN_SIZE_MULTIPLIER {
            log::warn!(
                "CacheConfig: size_multiplier {} is below {}, clamping",
                self.size_multiplier,
                MIN_SIZE_MULTIPLIER
            );
        }
        self.size_multiplier.max(MIN_SIZE_MULTIPLIER)
    }
}

//! Per-cache counters

/// Monotonic counters describing how a cache instance has been used
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStatistics {
    /// Range and key lookups performed
    pub lookups: u64,
    /// Elements found already cached
    pub hits: u64,
    /// Elements that had to be created
    pub misses: u64,
    /// Refreshes of incomplete elements
    pub updates: u64,
    /// Elements evicted by the LRU policy
    pub evictions: u64,
    /// Full invalidations
    pub invalidations: u64,
    /// Lookups that returned nothing because an element failed
    pub failed_lookups: u64,
}

impl CacheStatistics {
    /// Fraction of requested elements that were already cached
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

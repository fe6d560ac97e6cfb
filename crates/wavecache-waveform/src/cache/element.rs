//! Element payloads and the hook trait concrete caches implement

use wavecache_core::ZoomInfo;

use super::CacheKey;
use crate::error::CacheResult;

/// Payload stored per cache element
///
/// Payload containers are recycled: after [`dispose`](Self::dispose) an
/// element may be handed back to the initializer for a different key, so
/// initialization must overwrite every field it relies on.
pub trait CacheElement: Default {
    /// True once all underlying data for the element's span has arrived
    fn is_complete(&self) -> bool;

    /// Release heavy resources (renderer images, buffers)
    fn dispose(&mut self) {}
}

/// Read-only view of the owning cache passed to initializers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheContext {
    pub sample_rate: f64,
    /// Widest pixel range requested so far
    pub max_viewport_width: i64,
}

/// Fills elements for a [`GraphicsDataCache`](super::GraphicsDataCache)
pub trait ElementInitializer {
    type Element: CacheElement;

    /// Populate `element` for `key`
    ///
    /// Called once when the element is created and again on every lookup
    /// pass while the element reports itself incomplete.
    fn initialize_element(
        &mut self,
        context: &CacheContext,
        key: &CacheKey,
        element: &mut Self::Element,
    ) -> CacheResult<()>;

    /// Called before every range lookup. Returning true invalidates the
    /// whole cache first.
    fn check_cache(&mut self, _zoom_info: &ZoomInfo, _t0: f64, _t1: f64) -> bool {
        false
    }
}

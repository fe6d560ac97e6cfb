//! Generic windowed LRU cache core

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use wavecache_core::config::CacheConfig;
use wavecache_core::ZoomInfo;

use super::key::{compare_keys, is_same_key, is_same_pps, is_same_time};
use super::{
    ceil_div, CacheContext, CacheElement, CacheKey, CacheStatistics, ElementInitializer,
    LookupRange, CACHE_ELEMENT_WIDTH,
};

const ELEMENT_WIDTH: i64 = CACHE_ELEMENT_WIDTH as i64;

/// Requests spanning more elements than this are rejected
const MAX_ELEMENTS_PER_LOOKUP: usize = 1 << 16;

/// One entry of the lookup table
#[derive(Debug)]
pub struct CacheSlot<E> {
    pub(crate) key: CacheKey,
    last_cache_access: u64,
    last_update: u64,
    awaits_eviction: bool,
    element: Box<E>,
}

impl<E> CacheSlot<E> {
    pub fn key(&self) -> &CacheKey {
        &self.key
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    /// Access tick of the last lookup that touched this element
    pub fn last_cache_access(&self) -> u64 {
        self.last_cache_access
    }

    /// Access tick of the last (re)initialization
    pub fn last_update(&self) -> u64 {
        self.last_update
    }
}

/// Edge trims of a resolved range
struct BaseLookup {
    left_trim: usize,
    right_trim: usize,
}

/// Windowed cache of fixed-width elements over a timeline
///
/// The lookup table is kept sorted by (ppsGroup, first sample) and holds at
/// most one element per pair. Each instance has its own access tick; there
/// is no state shared between caches.
pub struct GraphicsDataCache<I: ElementInitializer> {
    initializer: I,
    sample_rate: f64,

    lookup: Vec<CacheSlot<I::Element>>,
    new_slots: Vec<CacheSlot<I::Element>>,
    new_keys: Vec<CacheKey>,
    range_keys: Vec<CacheKey>,
    resolved: Vec<usize>,
    free_list: Vec<Box<I::Element>>,

    max_width: i64,
    cache_access_index: u64,
    size_multiplier: usize,

    statistics: CacheStatistics,
}

impl<I: ElementInitializer> GraphicsDataCache<I> {
    pub fn new(initializer: I, sample_rate: f64) -> Self {
        Self::with_config(initializer, sample_rate, &CacheConfig::default())
    }

    pub fn with_config(initializer: I, sample_rate: f64, config: &CacheConfig) -> Self {
        Self {
            initializer,
            sample_rate,
            lookup: Vec::new(),
            new_slots: Vec::new(),
            new_keys: Vec::new(),
            range_keys: Vec::new(),
            resolved: Vec::new(),
            free_list: Vec::new(),
            max_width: 0,
            cache_access_index: 0,
            size_multiplier: config.effective_size_multiplier(),
            statistics: CacheStatistics::default(),
        }
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn initializer(&self) -> &I {
        &self.initializer
    }

    pub fn initializer_mut(&mut self) -> &mut I {
        &mut self.initializer
    }

    /// Widest pixel range requested so far
    pub fn max_viewport_width(&self) -> i64 {
        self.max_width
    }

    /// Raise the recorded viewport width
    ///
    /// Used when this cache is driven by single-key lookups on behalf of a
    /// consumer cache, so it is sized like the consumer.
    pub fn update_viewport_width(&mut self, width: i64) {
        self.max_width = self.max_width.max(width);
    }

    /// Maximum number of elements kept after cleanup
    pub fn capacity(&self) -> usize {
        ceil_div(self.max_width, ELEMENT_WIDTH).max(0) as usize * self.size_multiplier
    }

    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    /// Current access tick, bumped once per lookup
    pub fn access_index(&self) -> u64 {
        self.cache_access_index
    }

    /// The sorted lookup table
    pub fn slots(&self) -> &[CacheSlot<I::Element>] {
        &self.lookup
    }

    pub fn statistics(&self) -> CacheStatistics {
        self.statistics
    }

    pub fn reset_statistics(&mut self) {
        self.statistics = CacheStatistics::default();
    }

    /// Dispose every element and clear the table
    pub fn invalidate(&mut self) {
        if !self.lookup.is_empty() {
            log::debug!("[WAVE_CACHE] Invalidating {} elements", self.lookup.len());
        }

        let slots = std::mem::take(&mut self.lookup);
        for slot in slots {
            self.recycle(slot.element);
        }

        self.statistics.invalidations += 1;
    }

    /// Resolve the elements covering `[t0, t1]` at the given zoom
    ///
    /// Returns an empty range when the request is shorter than one sample
    /// or when any needed element could not be created or refreshed.
    pub fn perform_lookup(&mut self, zoom_info: &ZoomInfo, t0: f64, t1: f64) -> LookupRange<'_, I::Element> {
        if self.initializer.check_cache(zoom_info, t0, t1) {
            self.invalidate();
        }

        self.statistics.lookups += 1;

        match self.perform_base_lookup(zoom_info, t0, t1) {
            Some(result) => LookupRange::new(&self.lookup, &self.resolved, result.left_trim, result.right_trim),
            None => LookupRange::empty(),
        }
    }

    /// Resolve the single element for `key`
    pub fn lookup_key(&mut self, key: &CacheKey) -> Option<&I::Element> {
        self.statistics.lookups += 1;

        let samples_per_pixel = self.sample_rate / key.pixels_per_second;
        let element_index = (key.first_sample as f64 / samples_per_pixel / ELEMENT_WIDTH as f64).round() as i64;

        self.resolve_elements(key.pixels_per_second, element_index.saturating_mul(ELEMENT_WIDTH), 1)?;
        let index = *self.resolved.first()?;
        self.lookup.get(index).map(CacheSlot::element)
    }

    fn context(&self) -> CacheContext {
        CacheContext {
            sample_rate: self.sample_rate,
            max_viewport_width: self.max_width,
        }
    }

    fn perform_base_lookup(&mut self, zoom_info: &ZoomInfo, t0: f64, t1: f64) -> Option<BaseLookup> {
        if !(t0 <= t1) || is_same_time(self.sample_rate, t0, t1) {
            return None;
        }

        let left = zoom_info.time_to_position(t0);
        let right = zoom_info.time_to_position(t1).max(left.saturating_add(1));

        let cache_left = left.div_euclid(ELEMENT_WIDTH);
        let cache_right = ceil_div(right, ELEMENT_WIDTH);
        let count = match usize::try_from(cache_right - cache_left) {
            Ok(count) if count <= MAX_ELEMENTS_PER_LOOKUP => count,
            _ => {
                log::warn!(
                    "[WAVE_CACHE] Rejecting lookup of pixels [{}, {}): too many elements",
                    left,
                    right
                );
                return None;
            }
        };

        self.max_width = self.max_width.max(right.saturating_sub(left));

        let cache_left_column = cache_left * ELEMENT_WIDTH;
        let cache_right_column = cache_right.saturating_mul(ELEMENT_WIDTH);

        self.resolve_elements(zoom_info.zoom(), cache_left_column, count)?;

        Some(BaseLookup {
            left_trim: (left - cache_left_column).max(0) as usize,
            right_trim: cache_right_column.saturating_sub(right).max(0) as usize,
        })
    }

    /// Find or create `count` consecutive elements starting at pixel column
    /// `first_column`, refresh incomplete ones and run cleanup
    ///
    /// On success `resolved` holds their table indices, left to right.
    fn resolve_elements(&mut self, pixels_per_second: f64, first_column: i64, count: usize) -> Option<()> {
        let sample_rate = self.sample_rate;

        // Same-zoom elements form one contiguous run sorted by first sample
        let group_start = self.lookup.partition_point(|slot| {
            !is_same_pps(sample_rate, slot.key.pixels_per_second, pixels_per_second)
                && slot.key.pixels_per_second < pixels_per_second
        });
        let group_end = self.lookup.partition_point(|slot| {
            is_same_pps(sample_rate, slot.key.pixels_per_second, pixels_per_second)
                || slot.key.pixels_per_second < pixels_per_second
        });
        let group = &self.lookup[group_start..group_end.max(group_start)];

        // Snap to the zoom the group was built at. Nearby zoom levels drift
        // apart by up to one sample per element, so recomputing first samples
        // at the requested zoom misses stored elements far from the origin.
        let pixels_per_second = group.first().map_or(pixels_per_second, |slot| slot.key.pixels_per_second);
        let samples_per_pixel = sample_rate / pixels_per_second;

        self.range_keys.clear();
        self.new_keys.clear();
        for item in 0..count {
            let column = first_column.saturating_add((item as i64).saturating_mul(ELEMENT_WIDTH));
            let key = CacheKey::new(pixels_per_second, (column as f64 * samples_per_pixel) as i64);

            if !group.iter().any(|slot| is_same_key(sample_rate, &slot.key, &key)) {
                self.new_keys.push(key);
            }
            self.range_keys.push(key);
        }

        self.statistics.misses += self.new_keys.len() as u64;
        self.statistics.hits += (count - self.new_keys.len()) as u64;

        self.cache_access_index += 1;
        let tick = self.cache_access_index;

        if !self.create_new_items(tick) {
            self.dispose_new_items();
            self.statistics.failed_lookups += 1;
            return None;
        }

        if !self.new_slots.is_empty() {
            self.merge_new_items();
        }

        self.locate_range_keys()?;

        let context = self.context();
        for &index in &self.resolved {
            let slot = &mut self.lookup[index];
            slot.last_cache_access = tick;
            slot.awaits_eviction = false;

            if !slot.element.is_complete() && slot.last_update != tick {
                self.statistics.updates += 1;

                if let Err(e) = self.initializer.initialize_element(&context, &slot.key, &mut slot.element) {
                    log::debug!("[WAVE_CACHE] Failed to update element {:?}: {}", slot.key, e);
                    self.statistics.failed_lookups += 1;
                    return None;
                }

                slot.last_update = tick;
            }
        }

        // Cleanup shifts the table, so resolve again
        self.perform_cleanup(tick);
        self.locate_range_keys()
    }

    /// Fill `resolved` with the table index of every key in `range_keys`
    fn locate_range_keys(&mut self) -> Option<()> {
        let sample_rate = self.sample_rate;
        self.resolved.clear();

        for key in &self.range_keys {
            let Some(index) = self
                .lookup
                .iter()
                .position(|slot| is_same_key(sample_rate, &slot.key, key))
            else {
                debug_assert!(false, "element {:?} missing from the table", key);
                log::error!("[WAVE_CACHE] Element {:?} missing from the table", key);
                self.resolved.clear();
                return None;
            };
            self.resolved.push(index);
        }

        Some(())
    }

    /// Create every staged key. All-or-nothing: false if any creation failed.
    fn create_new_items(&mut self, tick: u64) -> bool {
        let context = self.context();

        for index in 0..self.new_keys.len() {
            let key = self.new_keys[index];
            let mut element = self.free_list.pop().unwrap_or_default();

            if let Err(e) = self.initializer.initialize_element(&context, &key, &mut element) {
                log::debug!("[WAVE_CACHE] Failed to create element {:?}: {}", key, e);
                element.dispose();
                self.free_list.push(element);
                return false;
            }

            self.new_slots.push(CacheSlot {
                key,
                last_cache_access: tick,
                last_update: tick,
                awaits_eviction: false,
                element,
            });
        }

        true
    }

    fn dispose_new_items(&mut self) {
        let slots = std::mem::take(&mut self.new_slots);
        for slot in slots {
            self.recycle(slot.element);
        }
    }

    /// Stable merge of the staged slots into the sorted table
    fn merge_new_items(&mut self) {
        let sample_rate = self.sample_rate;
        let mut merged = Vec::with_capacity(self.lookup.len() + self.new_slots.len());

        let mut existing = std::mem::take(&mut self.lookup).into_iter().peekable();
        let mut staged = self.new_slots.drain(..).peekable();

        loop {
            let take_staged = match (existing.peek(), staged.peek()) {
                (Some(current), Some(new)) => {
                    compare_keys(sample_rate, &new.key, &current.key) == Ordering::Less
                }
                (Some(_), None) => false,
                (None, Some(_)) => true,
                (None, None) => break,
            };

            let next = if take_staged {
                staged.next()
            } else {
                existing.next()
            };
            merged.extend(next);
        }

        drop(staged);
        self.lookup = merged;
    }

    fn recycle(&mut self, mut element: Box<I::Element>) {
        element.dispose();
        self.free_list.push(element);
    }

    fn perform_cleanup(&mut self, tick: u64) {
        let items_to_evict = self.lookup.len().saturating_sub(self.capacity());

        match items_to_evict {
            0 => {}
            1 => {
                let oldest = self
                    .lookup
                    .iter()
                    .enumerate()
                    .min_by_key(|(_, slot)| slot.last_cache_access)
                    .map(|(index, slot)| (index, slot.last_cache_access));

                if let Some((index, last_access)) = oldest {
                    if last_access < tick {
                        let slot = self.lookup.remove(index);
                        self.recycle(slot.element);
                        self.statistics.evictions += 1;
                    }
                }
            }
            _ => self.perform_full_cleanup(items_to_evict, tick),
        }
    }

    fn perform_full_cleanup(&mut self, items_to_evict: usize, tick: u64) {
        let mut heap: BinaryHeap<Reverse<(u64, usize)>> = self
            .lookup
            .iter()
            .enumerate()
            .map(|(index, slot)| Reverse((slot.last_cache_access, index)))
            .collect();

        let mut evicted = 0;
        while evicted < items_to_evict {
            let Some(Reverse((last_access, index))) = heap.pop() else {
                break;
            };

            if last_access >= tick {
                break;
            }

            let slot = &mut self.lookup[index];
            slot.element.dispose();
            slot.awaits_eviction = true;
            evicted += 1;
        }

        if evicted == 0 {
            return;
        }

        let slots = std::mem::take(&mut self.lookup);
        self.lookup.reserve(slots.len() - evicted);

        for slot in slots {
            if slot.awaits_eviction {
                self.free_list.push(slot.element);
            } else {
                self.lookup.push(slot);
            }
        }

        self.statistics.evictions += evicted as u64;
        log::debug!(
            "[WAVE_CACHE] Evicted {} elements, {} remain",
            evicted,
            self.lookup.len()
        );
    }
}

impl<I: ElementInitializer> Drop for GraphicsDataCache<I> {
    fn drop(&mut self) {
        for slot in &mut self.lookup {
            slot.element.dispose();
        }
    }
}

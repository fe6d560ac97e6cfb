//! Rasterizing tier on top of [`WaveDataCache`]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use wavecache_core::config::CacheConfig;
use wavecache_core::graphics::{ImageFormat, ImageHandle, Painter, Renderer, RendererId, Rgb};
use wavecache_core::{ZoomInfo, MAX_AUDIO};

use super::color_function::ColorFunction;
use super::params::WavePaintParameters;
use crate::cache::{
    CacheContext, CacheElement, CacheKey, CacheStatistics, ElementInitializer, GraphicsDataCache,
    LookupRange, CACHE_ELEMENT_WIDTH,
};
use crate::error::{CacheError, CacheResult};
use crate::wave_data::{WaveDataCache, WaveDisplayColumn};

/// Bitmap payload of one cache element
#[derive(Debug, Default)]
pub struct WaveBitmapCacheElement {
    /// Renderer image, `available_columns` wide (1 wide for a placeholder)
    pub bitmap: Option<ImageHandle>,
    pub available_columns: usize,
    pub is_complete: bool,
}

impl CacheElement for WaveBitmapCacheElement {
    fn is_complete(&self) -> bool {
        self.is_complete
    }

    fn dispose(&mut self) {
        self.bitmap = None;
        self.available_columns = 0;
        self.is_complete = false;
    }
}

/// Selected pixel columns `[first_pixel, last_pixel)`, both -1 when empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub first_pixel: i64,
    pub last_pixel: i64,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            first_pixel: -1,
            last_pixel: -1,
        }
    }
}

impl Selection {
    pub fn from_times(zoom_info: &ZoomInfo, t0: f64, t1: f64) -> Self {
        if t0 > t1 || (t1 - t0) < f64::EPSILON {
            return Self::default();
        }

        let first_pixel = zoom_info.time_to_position(t0);
        let last_pixel = zoom_info.time_to_position(t1).max(first_pixel + 1);

        Self {
            first_pixel,
            last_pixel,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.first_pixel >= self.last_pixel
    }

    #[inline]
    pub fn contains(&self, pixel: i64) -> bool {
        pixel >= self.first_pixel && pixel < self.last_pixel
    }
}

/// Element initializer turning numeric columns into images
pub struct WaveBitmapRasterizer {
    data_cache: Rc<RefCell<WaveDataCache>>,
    params: WavePaintParameters,
    envelope_version: u64,
    selection: Selection,
    renderer: Option<Rc<dyn Renderer>>,

    // Scratch buffers reused across elements
    columns: Vec<WaveDisplayColumn>,
    envelope_values: Vec<f64>,
    color_functions: Vec<ColorFunction>,
    image_buffer: Vec<Rgb>,
}

impl WaveBitmapRasterizer {
    fn new(data_cache: Rc<RefCell<WaveDataCache>>) -> Self {
        Self {
            data_cache,
            params: WavePaintParameters::default(),
            envelope_version: 0,
            selection: Selection::default(),
            renderer: None,
            columns: vec![WaveDisplayColumn::default(); CACHE_ELEMENT_WIDTH],
            envelope_values: vec![1.0; CACHE_ELEMENT_WIDTH],
            color_functions: vec![ColorFunction::default(); CACHE_ELEMENT_WIDTH],
            image_buffer: Vec::new(),
        }
    }

    /// Pull the numeric element for `key` into the scratch columns
    ///
    /// Returns the number of available columns and the completeness of the
    /// numeric element, or None when the data tier has nothing.
    fn load_columns(&mut self, context: &CacheContext, key: &CacheKey) -> Option<(usize, bool)> {
        let Ok(mut data_cache) = self.data_cache.try_borrow_mut() else {
            log::warn!("[WAVE_BITMAP] Data cache is busy, skipping element {:?}", key);
            return None;
        };

        data_cache.update_viewport_width(context.max_viewport_width);
        let element = data_cache.lookup_key(key)?;

        let count = element.available_columns;
        self.columns[..count].copy_from_slice(&element.columns[..count]);

        Some((count, element.is_complete))
    }

    /// Apply the dB scale and the envelope to the first `count` columns
    fn remap_columns(&mut self, key: &CacheKey, sample_rate: f64, count: usize) {
        let params = &self.params;

        if params.db_scale {
            for column in &mut self.columns[..count] {
                column.min = params.remap_value(column.min);
                column.max = params.remap_value(column.max);
                column.rms = params.remap_value(column.rms);
            }
        }

        if let Some(envelope) = params.attached_envelope.as_ref().filter(|e| !e.is_trivial()) {
            envelope.values(
                &mut self.envelope_values,
                key.first_sample as f64 / sample_rate,
                1.0 / key.pixels_per_second,
            );

            for (column, &gain) in self.columns[..count].iter_mut().zip(&self.envelope_values) {
                let gain = gain as f32;
                column.min *= gain;
                column.max *= gain;
                column.rms *= gain;
            }
        }
    }

    /// Build the color stops of the first `count` columns
    fn build_color_functions(&mut self, key: &CacheKey, sample_rate: f64, count: usize) {
        let params = &self.params;
        let height = params.height as i64;

        let has_top_blank = params.max > 1.0;
        let global_max_row = params.row_for_value(params.max);
        let global_min_row = params.row_for_value(params.min) + 1;

        let blank = Rgb::from(params.blank_color);

        let mut pixel = (key.first_sample as f64 / sample_rate * key.pixels_per_second + 0.5).floor() as i64;

        for (column, function) in self.columns[..count].iter().zip(&mut self.color_functions) {
            let selected = self.selection.contains(pixel);
            pixel += 1;

            let background = Rgb::from(params.background_colors.pick(selected));
            let sample = Rgb::from(params.sample_colors.pick(selected));
            let rms = Rgb::from(params.rms_colors.pick(selected));

            function.clear();

            if params.show_clipping && (column.min <= -MAX_AUDIO || column.max >= MAX_AUDIO) {
                function.push_stop(Rgb::from(params.clipping_colors.pick(selected)), height);
                continue;
            }

            if has_top_blank {
                function.push_stop(blank, global_max_row);
            }

            let max_row = params.row_for_value(column.max);
            if max_row > 0 {
                function.push_stop(background, max_row);
            }
            if max_row >= height {
                continue;
            }

            let positive_rms_row = params.row_for_value(column.rms);
            if max_row < positive_rms_row {
                function.push_stop(sample, positive_rms_row);
            }
            if positive_rms_row >= height {
                continue;
            }

            let negative_rms_row = params.row_for_value(-column.rms);
            if positive_rms_row < negative_rms_row {
                function.push_stop(rms, negative_rms_row);
            }
            if negative_rms_row >= height {
                continue;
            }

            let min_row = params.row_for_value(column.min);
            function.push_stop(sample, min_row);

            if min_row < global_min_row {
                function.push_stop(background, global_min_row);
            }
            if global_min_row < height {
                function.push_stop(blank, height);
            }
        }
    }

    /// Row-major RGB pixels for the first `count` columns
    fn rasterize(&mut self, count: usize) -> &[u8] {
        let height = self.params.height as i64;
        let blank = Rgb::from(self.params.blank_color);

        self.image_buffer.clear();
        self.image_buffer.reserve(count * height as usize);

        for row in 0..height {
            self.image_buffer.extend(
                self.color_functions[..count]
                    .iter()
                    .map(|function| function.color_at(row, blank)),
            );
        }

        bytemuck::cast_slice(&self.image_buffer)
    }
}

impl ElementInitializer for WaveBitmapRasterizer {
    type Element = WaveBitmapCacheElement;

    fn initialize_element(
        &mut self,
        context: &CacheContext,
        key: &CacheKey,
        element: &mut WaveBitmapCacheElement,
    ) -> CacheResult<()> {
        let height = self.params.height;
        if height == 0 {
            return Err(CacheError::ZeroHeight);
        }

        let (min, max) = (self.params.min, self.params.max);
        if max <= min || !min.is_finite() || !max.is_finite() {
            return Err(CacheError::InvalidDisplayBounds { min, max });
        }

        let renderer = self.renderer.clone().ok_or(CacheError::NoRenderer)?;

        let (count, is_complete) = match self.load_columns(context, key) {
            Some((count, is_complete)) if count > 0 => (count, is_complete),
            _ => {
                // Nothing decoded yet: keep the element around as a blank
                // placeholder and retry on the next pass
                element.bitmap = Some(renderer.create_image(ImageFormat::Rgb888, 1, height, None)?);
                element.available_columns = 0;
                element.is_complete = false;
                return Ok(());
            }
        };

        let start = Instant::now();

        self.remap_columns(key, context.sample_rate, count);
        self.build_color_functions(key, context.sample_rate, count);
        let pixels = self.rasterize(count);

        element.bitmap = Some(renderer.create_image(ImageFormat::Rgb888, count as u32, height, Some(pixels))?);
        element.available_columns = count;
        element.is_complete = is_complete;

        log::trace!(
            "[WAVE_BITMAP] Rasterized {}x{} at sample {} in {:?}",
            count,
            height,
            key.first_sample,
            start.elapsed()
        );

        Ok(())
    }

    fn check_cache(&mut self, _zoom_info: &ZoomInfo, _t0: f64, _t1: f64) -> bool {
        let Some(envelope) = &self.params.attached_envelope else {
            return false;
        };

        let version = envelope.version();
        if version == self.envelope_version {
            return false;
        }

        log::debug!(
            "[WAVE_BITMAP] Envelope version {} -> {}, invalidating",
            self.envelope_version,
            version
        );
        self.envelope_version = version;
        true
    }
}

/// Cache of rasterized waveform bitmaps
///
/// Shares its numeric tier with other consumers through
/// `Rc<RefCell<WaveDataCache>>`. Paint parameters, selection, envelope
/// version and renderer identity all feed into the bitmaps, so a change to
/// any of them invalidates the whole cache.
pub struct WaveBitmapCache {
    inner: GraphicsDataCache<WaveBitmapRasterizer>,
}

impl WaveBitmapCache {
    pub fn new(data_cache: Rc<RefCell<WaveDataCache>>, sample_rate: f64) -> Self {
        Self::with_config(data_cache, sample_rate, &CacheConfig::default())
    }

    pub fn with_config(data_cache: Rc<RefCell<WaveDataCache>>, sample_rate: f64, config: &CacheConfig) -> Self {
        Self {
            inner: GraphicsDataCache::with_config(WaveBitmapRasterizer::new(data_cache), sample_rate, config),
        }
    }

    pub fn data_cache(&self) -> &Rc<RefCell<WaveDataCache>> {
        &self.inner.initializer().data_cache
    }

    pub fn paint_parameters(&self) -> &WavePaintParameters {
        &self.inner.initializer().params
    }

    pub fn selection(&self) -> Selection {
        self.inner.initializer().selection
    }

    /// Id of the renderer bitmaps are currently created on
    pub fn renderer_id(&self) -> RendererId {
        self.inner
            .initializer()
            .renderer
            .as_ref()
            .map(|renderer| renderer.id())
            .unwrap_or_default()
    }

    pub fn set_paint_parameters(&mut self, params: &WavePaintParameters) -> &mut Self {
        if self.inner.initializer().params == *params {
            return self;
        }

        let rasterizer = self.inner.initializer_mut();
        rasterizer.params = params.clone();
        rasterizer.envelope_version = params.attached_envelope.as_ref().map_or(0, |e| e.version());

        log::debug!("[WAVE_BITMAP] Paint parameters changed, invalidating");
        self.inner.invalidate();
        self
    }

    pub fn set_selection(&mut self, zoom_info: &ZoomInfo, t0: f64, t1: f64) -> &mut Self {
        let selection = Selection::from_times(zoom_info, t0, t1);

        if self.inner.initializer().selection != selection {
            self.inner.initializer_mut().selection = selection;
            self.inner.invalidate();
        }
        self
    }

    /// Create bitmaps on the painter's renderer from now on
    pub fn set_painter(&mut self, painter: &dyn Painter) -> &mut Self {
        let renderer = painter.renderer();

        if self.renderer_id() != renderer.id() {
            log::debug!(
                "[WAVE_BITMAP] Renderer changed {} -> {}, invalidating",
                self.renderer_id(),
                renderer.id()
            );
            self.inner.invalidate();
        }

        self.inner.initializer_mut().renderer = Some(renderer);
        self
    }

    pub fn perform_lookup(&mut self, zoom_info: &ZoomInfo, t0: f64, t1: f64) -> LookupRange<'_, WaveBitmapCacheElement> {
        self.inner.perform_lookup(zoom_info, t0, t1)
    }

    pub fn invalidate(&mut self) {
        self.inner.invalidate();
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

    pub fn max_viewport_width(&self) -> i64 {
        self.inner.max_viewport_width()
    }

    pub fn statistics(&self) -> CacheStatistics {
        self.inner.statistics()
    }

    pub fn reset_statistics(&mut self) {
        self.inner.reset_statistics();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{init_logging, MockPainter, MockRenderer, SyntheticAudio};
    use wavecache_core::config::WaveformStyle;
    use wavecache_core::envelope::{Envelope, LinearEnvelope};

    const RATE: f64 = 44100.0;

    struct Fixture {
        audio: SyntheticAudio,
        renderer: Rc<MockRenderer>,
        cache: WaveBitmapCache,
        style: WaveformStyle,
    }

    impl Fixture {
        fn new(audio: SyntheticAudio) -> Self {
            init_logging();

            let data_cache = Rc::new(RefCell::new(WaveDataCache::new(audio.provider(), RATE)));
            let renderer = MockRenderer::new(1);
            let mut cache = WaveBitmapCache::new(data_cache, RATE);
            cache.set_painter(&MockPainter::new(renderer.clone()));

            let style = WaveformStyle::default();
            cache.set_paint_parameters(&WavePaintParameters::from_style(&style, 100, -1.0, 1.0));

            Self {
                audio,
                renderer,
                cache,
                style,
            }
        }

        fn params(&self) -> WavePaintParameters {
            self.cache.paint_parameters().clone()
        }

        /// Look up the first second at 100 px/s and return the element's image
        fn lookup_first_second(&mut self) -> Option<Rc<crate::testing::MockImage>> {
            let zoom = ZoomInfo::new(0.0, 100.0);
            let drawn = self.cache.perform_lookup(&zoom, 0.0, 1.0).len();
            (drawn == 1).then(|| self.renderer.last_image()).flatten()
        }
    }

    fn rgb(color: wavecache_core::Color) -> [u8; 3] {
        [color.red, color.green, color.blue]
    }

    #[test]
    fn test_rms_band_starts_at_row_25() {
        let mut fixture = Fixture::new(SyntheticAudio::constant(200_000, 0.5));
        let image = fixture.lookup_first_second().expect("image");

        assert_eq!(image.width, CACHE_ELEMENT_WIDTH as u32);
        assert_eq!(image.height, 100);

        let style = &fixture.style;
        assert_eq!(image.pixel(0, 24), Some(rgb(style.background_colors.normal)));
        assert_eq!(image.pixel(0, 25), Some(rgb(style.rms_colors.normal)));
        assert_eq!(image.pixel(0, 73), Some(rgb(style.rms_colors.normal)));
        assert_eq!(image.pixel(0, 74), Some(rgb(style.background_colors.normal)));
        assert_eq!(image.pixel(0, 99), Some(rgb(style.background_colors.normal)));
    }

    #[test]
    fn test_db_scale_moves_bands() {
        let mut fixture = Fixture::new(SyntheticAudio::constant(200_000, 0.01));
        let mut params = fixture.params();
        params.set_db_scale(true, 60.0);
        fixture.cache.set_paint_parameters(&params);

        // -40 dB over a 60 dB range sits at 1/3 of the half height
        let image = fixture.lookup_first_second().expect("image");
        let style = &fixture.style;
        assert_eq!(image.pixel(5, 32), Some(rgb(style.background_colors.normal)));
        assert_eq!(image.pixel(5, 33), Some(rgb(style.rms_colors.normal)));
        assert_eq!(image.pixel(5, 66), Some(rgb(style.background_colors.normal)));
    }

    #[test]
    fn test_clipping_overrides_column() {
        let mut fixture = Fixture::new(SyntheticAudio::constant(200_000, 1.0));
        let mut params = fixture.params();
        params.set_show_clipping(true);
        fixture.cache.set_paint_parameters(&params);

        let image = fixture.lookup_first_second().expect("image");
        let clip = rgb(fixture.style.clipping_colors.normal);
        assert!((0..100).all(|row| image.pixel(3, row) == Some(clip)));
    }

    #[test]
    fn test_selection_picks_selected_colors() {
        let mut fixture = Fixture::new(SyntheticAudio::constant(200_000, 0.5));
        let zoom = ZoomInfo::new(0.0, 100.0);
        fixture.cache.set_selection(&zoom, 0.0, 0.5);
        assert_eq!(
            fixture.cache.selection(),
            Selection {
                first_pixel: 0,
                last_pixel: 50
            }
        );

        let image = fixture.lookup_first_second().expect("image");
        let style = &fixture.style;
        assert_eq!(image.pixel(10, 0), Some(rgb(style.background_colors.selected)));
        assert_eq!(image.pixel(49, 0), Some(rgb(style.background_colors.selected)));
        assert_eq!(image.pixel(50, 0), Some(rgb(style.background_colors.normal)));
    }

    #[test]
    fn test_selection_changes_invalidate_once() {
        let mut fixture = Fixture::new(SyntheticAudio::constant(200_000, 0.5));
        let zoom = ZoomInfo::new(0.0, 100.0);
        fixture.lookup_first_second();
        fixture.cache.reset_statistics();

        fixture.cache.set_selection(&zoom, 0.0, 0.5);
        fixture.cache.set_selection(&zoom, 0.0, 0.5);
        assert_eq!(fixture.cache.statistics().invalidations, 1);

        fixture.cache.set_selection(&zoom, 2.0, 1.0);
        assert!(fixture.cache.selection().is_empty());
        assert_eq!(fixture.cache.selection(), Selection::default());
        assert_eq!(fixture.cache.statistics().invalidations, 2);
    }

    #[test]
    fn test_changed_parameters_rasterize_fresh_bitmaps() {
        let mut fixture = Fixture::new(SyntheticAudio::constant(200_000, 0.5));
        fixture.lookup_first_second();
        let created = fixture.renderer.image_count();

        // same values, no invalidation
        fixture.cache.reset_statistics();
        let same = fixture.params();
        fixture.cache.set_paint_parameters(&same);
        fixture.lookup_first_second();
        assert_eq!(fixture.cache.statistics().invalidations, 0);
        assert_eq!(fixture.renderer.image_count(), created);

        let mut taller = fixture.params();
        taller.set_height(120);
        fixture.cache.set_paint_parameters(&taller);
        let image = fixture.lookup_first_second().expect("image");
        assert_eq!(fixture.cache.statistics().invalidations, 1);
        assert_eq!(fixture.renderer.image_count(), created + 1);
        assert_eq!(image.height, 120);
    }

    #[test]
    fn test_renderer_switch_invalidates() {
        let mut fixture = Fixture::new(SyntheticAudio::constant(200_000, 0.5));
        fixture.lookup_first_second();
        fixture.cache.reset_statistics();

        fixture.cache.set_painter(&MockPainter::new(fixture.renderer.clone()));
        assert_eq!(fixture.cache.statistics().invalidations, 0);

        let other = MockRenderer::new(2);
        fixture.cache.set_painter(&MockPainter::new(other.clone()));
        assert_eq!(fixture.cache.statistics().invalidations, 1);
        assert!(fixture.cache.is_empty());

        let zoom = ZoomInfo::new(0.0, 100.0);
        let range = fixture.cache.perform_lookup(&zoom, 0.0, 1.0);
        let bitmap = range.iter().next().and_then(|item| item.element.bitmap.clone()).expect("bitmap");
        assert_eq!(bitmap.renderer_id(), other.id());
    }

    #[test]
    fn test_envelope_gain_and_version_bump() {
        let mut fixture = Fixture::new(SyntheticAudio::constant(200_000, 1.0));
        let envelope = Rc::new(LinearEnvelope::new(0.5));

        let mut params = fixture.params();
        params.set_envelope(Some(envelope.clone() as Rc<dyn Envelope>));
        fixture.cache.set_paint_parameters(&params);

        let image = fixture.lookup_first_second().expect("image");
        let style = fixture.style.clone();
        assert_eq!(image.pixel(0, 10), Some(rgb(style.background_colors.normal)));
        assert_eq!(image.pixel(0, 25), Some(rgb(style.rms_colors.normal)));

        fixture.cache.reset_statistics();
        envelope.set_default_value(1.0);

        let image = fixture.lookup_first_second().expect("image");
        assert_eq!(fixture.cache.statistics().invalidations, 1);
        assert_eq!(image.pixel(0, 10), Some(rgb(style.rms_colors.normal)));
    }

    #[test]
    fn test_placeholder_until_data_arrives() {
        let audio = SyntheticAudio::constant(200_000, 0.5);
        audio.set_available(0);
        let mut fixture = Fixture::new(audio);

        let image = fixture.lookup_first_second().expect("placeholder");
        assert_eq!(image.width, 1);
        assert_eq!(image.height, 100);
        assert!(image.data.is_none());

        {
            let zoom = ZoomInfo::new(0.0, 100.0);
            let range = fixture.cache.perform_lookup(&zoom, 0.0, 1.0);
            let element = range.iter().next().map(|item| item.element).expect("element");
            assert_eq!(element.available_columns, 0);
            assert!(!element.is_complete);
        }

        fixture.audio.set_available(200_000);
        let image = fixture.lookup_first_second().expect("image");
        assert_eq!(image.width, CACHE_ELEMENT_WIDTH as u32);
    }

    #[test]
    fn test_partial_data_yields_narrow_bitmap() {
        let audio = SyntheticAudio::constant(200_000, 0.5);
        // 441 samples per pixel, 100 full columns
        audio.set_available(441 * 100);
        let mut fixture = Fixture::new(audio);

        let image = fixture.lookup_first_second().expect("image");
        assert!(image.width < CACHE_ELEMENT_WIDTH as u32);

        let zoom = ZoomInfo::new(0.0, 100.0);
        let range = fixture.cache.perform_lookup(&zoom, 0.0, 1.0);
        let element = range.iter().next().map(|item| item.element).expect("element");
        assert!(!element.is_complete);
        assert_eq!(element.bitmap.as_ref().map(|b| b.width() as usize), Some(element.available_columns));
    }

    #[test]
    fn test_invalid_parameters_fail_lookup() {
        let mut fixture = Fixture::new(SyntheticAudio::constant(200_000, 0.5));
        let zoom = ZoomInfo::new(0.0, 100.0);

        let mut params = fixture.params();
        params.set_height(0);
        fixture.cache.set_paint_parameters(&params);
        assert!(fixture.cache.perform_lookup(&zoom, 0.0, 1.0).is_empty());

        params.set_height(100).set_display_bounds(1.0, 1.0);
        fixture.cache.set_paint_parameters(&params);
        assert!(fixture.cache.perform_lookup(&zoom, 0.0, 1.0).is_empty());

        assert_eq!(fixture.cache.statistics().failed_lookups, 2);
    }

    #[test]
    fn test_image_creation_failure_fails_lookup() {
        let mut fixture = Fixture::new(SyntheticAudio::constant(200_000, 0.5));
        fixture.renderer.fail.set(true);

        assert!(fixture.lookup_first_second().is_none());
        assert!(fixture.cache.is_empty());

        fixture.renderer.fail.set(false);
        assert!(fixture.lookup_first_second().is_some());
    }

    #[test]
    fn test_missing_renderer_fails_lookup() {
        let audio = SyntheticAudio::constant(200_000, 0.5);
        let data_cache = Rc::new(RefCell::new(WaveDataCache::new(audio.provider(), RATE)));
        let mut cache = WaveBitmapCache::new(data_cache, RATE);
        cache.set_paint_parameters(&WavePaintParameters::from_style(&WaveformStyle::default(), 50, -1.0, 1.0));

        let zoom = ZoomInfo::new(0.0, 100.0);
        assert!(cache.perform_lookup(&zoom, 0.0, 1.0).is_empty());
        assert_eq!(audio.total_requests(), 0);
    }

    #[test]
    fn test_data_tier_sized_like_bitmap_tier() {
        let mut fixture = Fixture::new(SyntheticAudio::constant(2_000_000, 0.5));
        let zoom = ZoomInfo::new(0.0, 100.0);

        fixture.cache.perform_lookup(&zoom, 0.0, 8.0);
        assert_eq!(fixture.cache.max_viewport_width(), 800);
        assert_eq!(fixture.cache.data_cache().borrow().len(), 4);

        // the numeric tier is hit once per bitmap element
        fixture.cache.perform_lookup(&zoom, 0.0, 8.0);
        assert_eq!(fixture.cache.data_cache().borrow().statistics().lookups, 4);
    }
}

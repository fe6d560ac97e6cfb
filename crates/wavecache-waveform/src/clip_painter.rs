//! Blits cached waveform bitmaps for one clip

use std::cell::RefCell;
use std::rc::Rc;

use wavecache_core::config::CacheConfig;
use wavecache_core::graphics::{Painter, Rect};
use wavecache_core::ZoomInfo;

use crate::bitmap::{WaveBitmapCache, WavePaintParameters};
use crate::cache::CACHE_ELEMENT_WIDTH;
use crate::wave_data::WaveDataCache;

/// Draws a clip's waveform through its own [`WaveBitmapCache`]
pub struct WaveClipPainter {
    bitmap_cache: WaveBitmapCache,
}

impl WaveClipPainter {
    pub fn new(data_cache: Rc<RefCell<WaveDataCache>>) -> Self {
        Self::with_config(data_cache, &CacheConfig::default())
    }

    pub fn with_config(data_cache: Rc<RefCell<WaveDataCache>>, config: &CacheConfig) -> Self {
        let sample_rate = data_cache.borrow().sample_rate();

        Self {
            bitmap_cache: WaveBitmapCache::with_config(data_cache, sample_rate, config),
        }
    }

    pub fn bitmap_cache(&self) -> &WaveBitmapCache {
        &self.bitmap_cache
    }

    pub fn set_selection(&mut self, zoom_info: &ZoomInfo, t0: f64, t1: f64) {
        self.bitmap_cache.set_selection(zoom_info, t0, t1);
    }

    /// Draw `[from, to]` into `target_rect`, starting `left_offset` pixels in
    ///
    /// Returns the number of images drawn.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &mut self,
        painter: &mut dyn Painter,
        params: &WavePaintParameters,
        zoom_info: &ZoomInfo,
        target_rect: Rect,
        left_offset: f32,
        from: f64,
        to: f64,
    ) -> usize {
        self.bitmap_cache.set_painter(painter).set_paint_parameters(params);

        let range = self.bitmap_cache.perform_lookup(zoom_info, from, to);
        if range.is_empty() {
            return 0;
        }

        painter.set_clip_rect(Some(target_rect));

        let mut left = target_rect.left() + left_offset;
        let mut drawn = 0;

        for item in &range {
            let width = CACHE_ELEMENT_WIDTH as i64 - item.left_offset as i64 - item.right_offset as i64;

            if let Some(bitmap) = &item.element.bitmap {
                let drawable = width.min(bitmap.width() as i64 - item.left_offset as i64);

                if drawable > 0 {
                    painter.draw_image(
                        &**bitmap,
                        Rect::new(left, target_rect.top(), drawable as f32, target_rect.height()),
                        Rect::new(item.left_offset as f32, 0.0, drawable as f32, bitmap.height() as f32),
                    );
                    drawn += 1;
                }
            }

            left += width as f32;
        }

        painter.set_clip_rect(None);
        drawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockPainter, MockRenderer, SyntheticAudio};
    use wavecache_core::config::WaveformStyle;

    const RATE: f64 = 44100.0;

    fn painter_for(audio: &SyntheticAudio) -> WaveClipPainter {
        let data_cache = Rc::new(RefCell::new(WaveDataCache::new(audio.provider(), RATE)));
        WaveClipPainter::new(data_cache)
    }

    fn params() -> WavePaintParameters {
        WavePaintParameters::from_style(&WaveformStyle::default(), 80, -1.0, 1.0)
    }

    #[test]
    fn test_draws_elements_left_to_right() {
        let audio = SyntheticAudio::constant(2_000_000, 0.5);
        let mut clip = painter_for(&audio);
        let mut painter = MockPainter::new(MockRenderer::new(1));
        let zoom = ZoomInfo::new(0.0, 100.0);
        let target = Rect::new(10.0, 20.0, 500.0, 80.0);

        // pixels [300, 800) -> elements 1..4
        let drawn = clip.draw(&mut painter, &params(), &zoom, target, 0.0, 3.0, 8.0);
        assert_eq!(drawn, 3);
        assert_eq!(painter.draws.len(), 3);
        assert_eq!(painter.clip, None, "clip is lifted after drawing");

        let first = &painter.draws[0];
        assert_eq!(first.source.left(), 44.0);
        assert_eq!(first.dest.left(), 10.0);
        assert_eq!(first.dest.width(), 212.0);
        assert_eq!(first.dest.top(), 20.0);
        assert_eq!(first.dest.height(), 80.0);

        let second = &painter.draws[1];
        assert_eq!(second.source.left(), 0.0);
        assert_eq!(second.dest.left(), 222.0);
        assert_eq!(second.dest.width(), 256.0);

        let last = &painter.draws[2];
        assert_eq!(last.dest.left(), 478.0);
        assert_eq!(last.dest.width(), 32.0);

        let total: f32 = painter.draws.iter().map(|d| d.dest.width()).sum();
        assert_eq!(total, 500.0);
    }

    #[test]
    fn test_partial_bitmap_limits_drawable_width() {
        let audio = SyntheticAudio::constant(2_000_000, 0.5);
        audio.set_available(441 * 100);
        let mut clip = painter_for(&audio);
        let mut painter = MockPainter::new(MockRenderer::new(1));
        let zoom = ZoomInfo::new(0.0, 100.0);

        let drawn = clip.draw(&mut painter, &params(), &zoom, Rect::new(0.0, 0.0, 200.0, 80.0), 0.0, 0.0, 2.0);
        assert_eq!(drawn, 1);
        assert_eq!(painter.draws[0].dest.width(), 100.0);
        assert_eq!(painter.draws[0].image_width, 100);
    }

    #[test]
    fn test_nothing_drawn_for_empty_range() {
        let audio = SyntheticAudio::constant(1000, 0.5);
        let mut clip = painter_for(&audio);
        let mut painter = MockPainter::new(MockRenderer::new(1));
        let zoom = ZoomInfo::new(0.0, 100.0);

        let drawn = clip.draw(&mut painter, &params(), &zoom, Rect::new(0.0, 0.0, 10.0, 80.0), 0.0, 1.0, 1.0);
        assert_eq!(drawn, 0);
        assert!(painter.draws.is_empty());
    }

    #[test]
    fn test_selection_forwarded_to_bitmap_cache() {
        let audio = SyntheticAudio::constant(1000, 0.5);
        let mut clip = painter_for(&audio);
        let zoom = ZoomInfo::new(0.0, 100.0);

        clip.set_selection(&zoom, 0.25, 0.5);
        let selection = clip.bitmap_cache().selection();
        assert_eq!((selection.first_pixel, selection.last_pixel), (25, 50));
    }
}

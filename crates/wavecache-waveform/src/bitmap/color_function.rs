//! Per-column vertical color bands

use wavecache_core::graphics::Rgb;

/// Worst case: blank, background, sample, rms, sample, background, blank
pub const COLOR_FUNCTION_STOPS: usize = 7;

/// Ordered color stops describing one bitmap column
///
/// A stop `(color, row)` paints every row above `row` that no earlier stop
/// claimed. Rows past the last stop get the fallback color.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ColorFunction {
    stops: [(Rgb, i64); COLOR_FUNCTION_STOPS],
    len: usize,
}

impl ColorFunction {
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Append a stop. Stops beyond the capacity are dropped.
    pub fn push_stop(&mut self, color: Rgb, row: i64) {
        debug_assert!(self.len < COLOR_FUNCTION_STOPS, "too many color stops");

        if let Some(stop) = self.stops.get_mut(self.len) {
            *stop = (color, row);
            self.len += 1;
        }
    }

    pub fn stops(&self) -> &[(Rgb, i64)] {
        &self.stops[..self.len]
    }

    pub fn color_at(&self, row: i64, fallback: Rgb) -> Rgb {
        self.stops()
            .iter()
            .find(|(_, threshold)| row < *threshold)
            .map_or(fallback, |(color, _)| *color)
    }
}

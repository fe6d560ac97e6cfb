//! Time ↔ pixel mapping for horizontally zoomed views

/// Horizontal zoom state of a view
///
/// `h` is the time (in seconds) shown at pixel column 0 and `zoom` is the
/// number of pixel columns per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomInfo {
    h: f64,
    zoom: f64,
}

impl ZoomInfo {
    pub fn new(h: f64, pixels_per_second: f64) -> Self {
        Self {
            h,
            zoom: pixels_per_second,
        }
    }

    /// Pixels per second
    #[inline]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Time at pixel column 0
    #[inline]
    pub fn origin(&self) -> f64 {
        self.h
    }

    pub fn set_zoom(&mut self, pixels_per_second: f64) {
        self.zoom = pixels_per_second;
    }

    pub fn set_origin(&mut self, h: f64) {
        self.h = h;
    }

    /// Pixel column containing time `t`, rounded to the nearest column
    pub fn time_to_position(&self, t: f64) -> i64 {
        let position = (0.5 + self.zoom * (t - self.h)).floor();

        if position >= i64::MAX as f64 {
            i64::MAX
        } else if position <= i64::MIN as f64 {
            i64::MIN
        } else {
            position as i64
        }
    }

    /// Time at the left edge of pixel column `position`
    pub fn position_to_time(&self, position: i64) -> f64 {
        self.h + position as f64 / self.zoom
    }
}

impl Default for ZoomInfo {
    fn default() -> Self {
        Self::new(0.0, 44100.0 / 512.0)
    }
}

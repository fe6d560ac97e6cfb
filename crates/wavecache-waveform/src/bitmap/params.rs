//! Paint parameters for the bitmap tier

use std::fmt;
use std::rc::Rc;

use wavecache_core::config::WaveformStyle;
use wavecache_core::envelope::Envelope;
use wavecache_core::{Color, ColorPair};

/// Everything that affects how a waveform column is rasterized
///
/// Compared by value, except the envelope which is compared by identity.
/// Envelope edits are tracked separately through its version counter.
#[derive(Clone)]
pub struct WavePaintParameters {
    /// Bitmap height in pixels
    pub height: u32,
    /// Amplitude shown at the bottom row
    pub min: f32,
    /// Amplitude shown at the top row
    pub max: f32,
    pub db_scale: bool,
    pub db_range: f64,
    pub show_clipping: bool,
    pub blank_color: Color,
    pub background_colors: ColorPair,
    pub sample_colors: ColorPair,
    pub rms_colors: ColorPair,
    pub clipping_colors: ColorPair,
    pub attached_envelope: Option<Rc<dyn Envelope>>,
}

impl Default for WavePaintParameters {
    fn default() -> Self {
        Self::from_style(&WaveformStyle::default(), 0, -1.0, 1.0)
    }
}

impl WavePaintParameters {
    /// Parameters for a clip of the given height and vertical bounds
    pub fn from_style(style: &WaveformStyle, height: u32, min: f32, max: f32) -> Self {
        Self {
            height,
            min,
            max,
            db_scale: style.db_scale,
            db_range: style.db_range,
            show_clipping: style.show_clipping,
            blank_color: style.blank_color,
            background_colors: style.background_colors,
            sample_colors: style.sample_colors,
            rms_colors: style.rms_colors,
            clipping_colors: style.clipping_colors,
            attached_envelope: None,
        }
    }

    pub fn set_height(&mut self, height: u32) -> &mut Self {
        self.height = height;
        self
    }

    pub fn set_display_bounds(&mut self, min: f32, max: f32) -> &mut Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn set_db_scale(&mut self, db_scale: bool, db_range: f64) -> &mut Self {
        self.db_scale = db_scale;
        self.db_range = db_range;
        self
    }

    pub fn set_show_clipping(&mut self, show_clipping: bool) -> &mut Self {
        self.show_clipping = show_clipping;
        self
    }

    pub fn set_blank_color(&mut self, color: Color) -> &mut Self {
        self.blank_color = color;
        self
    }

    pub fn set_background_colors(&mut self, colors: ColorPair) -> &mut Self {
        self.background_colors = colors;
        self
    }

    pub fn set_sample_colors(&mut self, colors: ColorPair) -> &mut Self {
        self.sample_colors = colors;
        self
    }

    pub fn set_rms_colors(&mut self, colors: ColorPair) -> &mut Self {
        self.rms_colors = colors;
        self
    }

    pub fn set_clipping_colors(&mut self, colors: ColorPair) -> &mut Self {
        self.clipping_colors = colors;
        self
    }

    pub fn set_envelope(&mut self, envelope: Option<Rc<dyn Envelope>>) -> &mut Self {
        self.attached_envelope = envelope;
        self
    }

    /// Apply the dB transform when `db_scale` is set
    ///
    /// Maps `|v|` from `[-db_range dB, 0 dB]` onto `[0, 1]`, keeping the sign.
    /// Zero stays zero and anything quieter than the range clamps to zero.
    pub fn remap_value(&self, value: f32) -> f32 {
        if !self.db_scale || value == 0.0 {
            return value;
        }

        let db = wavecache_core::linear_to_db(value.abs() as f64);
        let scaled = ((db + self.db_range) / self.db_range).max(0.0) as f32;

        scaled.copysign(value)
    }

    /// Pixel row showing amplitude `value`, 0 at the top
    pub fn row_for_value(&self, value: f32) -> i64 {
        let normalized = (self.max as f64 - value as f64) / (self.max as f64 - self.min as f64);
        (normalized * (self.height as f64 - 1.0) + 0.5).floor() as i64
    }
}

impl PartialEq for WavePaintParameters {
    fn eq(&self, other: &Self) -> bool {
        let same_envelope = match (&self.attached_envelope, &other.attached_envelope) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };

        same_envelope
            && self.height == other.height
            && self.min == other.min
            && self.max == other.max
            && self.db_scale == other.db_scale
            && self.db_range == other.db_range
            && self.show_clipping == other.show_clipping
            && self.blank_color == other.blank_color
            && self.background_colors == other.background_colors
            && self.sample_colors == other.sample_colors
            && self.rms_colors == other.rms_colors
            && self.clipping_colors == other.clipping_colors
    }
}

impl fmt::Debug for WavePaintParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WavePaintParameters")
            .field("height", &self.height)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("db_scale", &self.db_scale)
            .field("db_range", &self.db_range)
            .field("show_clipping", &self.show_clipping)
            .field("has_envelope", &self.attached_envelope.is_some())
            .finish_non_exhaustive()
    }
}

//! Waveform colors and vertical scale settings

use serde::{Deserialize, Serialize};

use crate::types::{Color, ColorPair};

/// User-facing waveform appearance
///
/// Paint parameters for a clip are built from a style plus the clip's
/// height and vertical display bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveformStyle {
    /// Color outside the display bounds
    pub blank_color: Color,
    pub background_colors: ColorPair,
    pub sample_colors: ColorPair,
    pub rms_colors: ColorPair,
    pub clipping_colors: ColorPair,
    /// Highlight clipped columns
    pub show_clipping: bool,
    /// Use a logarithmic vertical scale
    pub db_scale: bool,
    /// Visible dynamic range in dB when `db_scale` is set (default: 60)
    pub db_range: f64,
}

impl Default for WaveformStyle {
    fn default() -> Self {
        Self {
            blank_color: Color::rgb(214, 214, 222),
            background_colors: ColorPair::new(Color::rgb(255, 255, 255), Color::rgb(186, 186, 214)),
            sample_colors: ColorPair::new(Color::rgb(50, 50, 200), Color::rgb(50, 50, 200)),
            rms_colors: ColorPair::new(Color::rgb(100, 100, 220), Color::rgb(100, 100, 220)),
            clipping_colors: ColorPair::new(Color::rgb(255, 0, 0), Color::rgb(255, 0, 0)),
            show_clipping: false,
            db_scale: false,
            db_range: 60.0,
        }
    }
}

//! Common types for Wavecache
//!
//! Audio-level constants and the color types shared by paint parameters,
//! styles and the rasterizer.

use serde::{Deserialize, Serialize};

/// Default project sample rate in Hz
pub const DEFAULT_SAMPLE_RATE: f64 = 44100.0;

/// Absolute sample value at which audio is considered clipped
pub const MAX_AUDIO: f32 = 1.0;

/// Audio sample type
pub type Sample = f32;

/// Convert a linear amplitude to decibels
#[inline]
pub fn linear_to_db(value: f64) -> f64 {
    20.0 * value.log10()
}

/// Convert decibels to a linear amplitude
#[inline]
pub fn db_to_linear(db: f64) -> f64 {
    10f64.powf(db / 20.0)
}

/// An 8-bit per channel RGBA color
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    #[serde(default = "opaque")]
    pub alpha: u8,
}

fn opaque() -> u8 {
    255
}

impl Color {
    /// Create an opaque color
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 255,
        }
    }

    /// Create a color with explicit alpha
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Parse a `#RRGGBB` or `#RRGGBBAA` hex string
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();

        match digits.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }
}

/// A color used for unselected regions and its selected counterpart
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorPair {
    pub normal: Color,
    pub selected: Color,
}

impl ColorPair {
    pub const fn new(normal: Color, selected: Color) -> Self {
        Self { normal, selected }
    }

    /// Pick the variant for the given selection state
    #[inline]
    pub fn pick(&self, selected: bool) -> Color {
        if selected {
            self.selected
        } else {
            self.normal
        }
    }
}

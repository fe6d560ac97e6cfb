//! Configuration for waveform caches
//!
//! This module provides:
//!
//! - Generic YAML config loading/saving
//! - Cache sizing configuration
//! - Waveform colors and scale settings
//!
//! # Usage
//!
//! ```ignore
//! use wavecache_core::config::{load_config, save_config, CacheConfig, WaveformStyle};
//!
//! let config: WavecacheConfig = load_config(&config_path);
//! save_config(&config, &config_path)?;
//! ```

mod cache;
mod io;
mod style;

pub use cache::{CacheConfig, MIN_SIZE_MULTIPLIER};
pub use io::{load_config, save_config, try_load_config};
pub use style::WaveformStyle;

use serde::{Deserialize, Serialize};

/// Root of a `wavecache.yaml` file
///
/// ```yaml
/// cache:
///   size_multiplier: 4
/// style:
///   db_scale: true
///   db_range: 60.0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WavecacheConfig {
    pub cache: CacheConfig,
    pub style: WaveformStyle,
}

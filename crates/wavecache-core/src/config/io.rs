//! Generic configuration I/O utilities
//!
//! YAML loading and saving for any serializable configuration type.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Read and parse a YAML config file
///
/// Returns `Ok(None)` when the file does not exist.
pub fn try_load_config<T>(path: &Path) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    if !path.exists() {
        return Ok(None);
    }

    let contents =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read config file: {:?}", path))?;
    let config = serde_yaml::from_str(&contents).with_context(|| format!("Invalid YAML in {:?}", path))?;

    Ok(Some(config))
}

/// Load configuration from a YAML file, falling back to defaults
///
/// A missing, unreadable or invalid file yields `T::default()`; the last
/// two are logged as warnings.
///
/// # Example
///
/// ```ignore
/// let config: CacheConfig = load_config(Path::new("cache.yaml"));
/// ```
pub fn load_config<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    match try_load_config(path) {
        Ok(Some(config)) => {
            log::debug!("[WAVE_CONFIG] Loaded {:?}", path);
            config
        }
        Ok(None) => {
            log::debug!("[WAVE_CONFIG] No config at {:?}, using defaults", path);
            T::default()
        }
        Err(e) => {
            log::warn!("[WAVE_CONFIG] {:#}, using defaults", e);
            T::default()
        }
    }
}

/// Save configuration to a YAML file, creating parent directories
pub fn save_config<T>(config: &T, path: &Path) -> Result<()>
where
    T: Serialize,
{
    let yaml = serde_yaml::to_string(config).context("Config is not representable as YAML")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("Failed to create {:?}", parent))?;
    }
    std::fs::write(path, yaml).with_context(|| format!("Failed to write {:?}", path))?;

    log::debug!("[WAVE_CONFIG] Saved {:?}", path);
    Ok(())
}

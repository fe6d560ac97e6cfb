//! Wavecache Core - Shared primitives for waveform rendering caches
//!
//! This crate holds the boundary contracts the waveform caches are written
//! against: colors and geometry, the time/pixel zoom mapping, renderer and
//! painter traits, gain envelopes and YAML configuration.

pub mod config;
pub mod envelope;
pub mod graphics;
pub mod types;
pub mod zoom;

pub use types::*;
pub use zoom::ZoomInfo;

//! Rasterization tier
//!
//! Each element holds one renderer image whose columns are painted as
//! vertical color bands derived from the numeric tier's min/max/RMS.

mod cache;
mod color_function;
mod params;

pub use cache::{Selection, WaveBitmapCache, WaveBitmapCacheElement, WaveBitmapRasterizer};
pub use color_function::{ColorFunction, COLOR_FUNCTION_STOPS};
pub use params::WavePaintParameters;

//! Renderer-agnostic graphics contracts
//!
//! Concrete backends (Direct2D, OpenGL, software) live outside this crate.
//! The waveform caches only need to create images on the active renderer,
//! blit them through a painter, and compare renderer identities so that
//! renderer-specific resources are never shared across backends.

mod error;
mod geometry;
mod image;
mod painter;
mod renderer;

pub use error::{GraphicsError, GraphicsResult};
pub use geometry::{Point, Rect, Size};
pub use image::{ImageFormat, ImageHandle, PainterImage, Rgb};
pub use painter::Painter;
pub use renderer::{Renderer, RendererId, RendererPriority};

//! Renderer identity and image factory

use std::fmt;

use super::{GraphicsResult, ImageFormat, ImageHandle};

/// Priority used when picking a renderer without an explicit preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RendererPriority {
    Preferred,
    PreferredFallback,
    #[default]
    Fallback,
    Disabled,
}

/// Identifies a renderer backend
///
/// Images created by one renderer can only be drawn by painters of a
/// renderer with an equal id. Equality ignores the priority.
#[derive(Debug, Clone)]
pub struct RendererId {
    name: &'static str,
    id: usize,
    priority: RendererPriority,
}

impl RendererId {
    const INVALID: usize = usize::MAX;

    pub const fn new(name: &'static str, id: usize, priority: RendererPriority) -> Self {
        Self { name, id, priority }
    }

    /// The id of "no renderer yet"
    pub const fn invalid() -> Self {
        Self {
            name: "",
            id: Self::INVALID,
            priority: RendererPriority::Fallback,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.id != Self::INVALID
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn priority(&self) -> RendererPriority {
        self.priority
    }
}

impl Default for RendererId {
    fn default() -> Self {
        Self::invalid()
    }
}

impl PartialEq for RendererId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name
    }
}

impl Eq for RendererId {}

impl fmt::Display for RendererId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}#{}", self.name, self.id)
        } else {
            write!(f, "<invalid renderer>")
        }
    }
}

/// A rendering backend able to allocate image resources
pub trait Renderer {
    fn id(&self) -> RendererId;

    /// Create an image, optionally initialized from tightly packed rows
    ///
    /// `data`, when present, must hold exactly
    /// `format.bytes_per_pixel() * width * height` bytes. Without data the
    /// image content is unspecified.
    fn create_image(
        &self,
        format: ImageFormat,
        width: u32,
        height: u32,
        data: Option<&[u8]>,
    ) -> GraphicsResult<ImageHandle>;
}

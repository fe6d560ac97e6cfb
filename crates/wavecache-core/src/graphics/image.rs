//! Renderer-owned images

use std::fmt;
use std::rc::Rc;

use super::{GraphicsError, GraphicsResult, RendererId};
use crate::types::Color;

/// Pixel layout of image data handed to a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Rgb888,
    Rgba8888,
}

impl ImageFormat {
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            ImageFormat::Rgb888 => 3,
            ImageFormat::Rgba8888 => 4,
        }
    }

    /// Check that `data` matches this format for the given size
    ///
    /// Backends call this before uploading pixels.
    pub fn validate(self, width: u32, height: u32, data: Option<&[u8]>) -> GraphicsResult<()> {
        if width == 0 || height == 0 {
            return Err(GraphicsError::InvalidImageSize { width, height });
        }

        if let Some(data) = data {
            let expected = self.bytes_per_pixel() * width as usize * height as usize;
            if data.len() != expected {
                return Err(GraphicsError::PixelDataMismatch {
                    format: self,
                    width,
                    height,
                    expected,
                    actual: data.len(),
                });
            }
        }

        Ok(())
    }
}

/// A packed RGB888 pixel
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl From<Color> for Rgb {
    #[inline]
    fn from(color: Color) -> Self {
        Self {
            r: color.red,
            g: color.green,
            b: color.blue,
        }
    }
}

/// An image living in renderer memory
pub trait PainterImage: fmt::Debug {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn renderer_id(&self) -> RendererId;
}

/// Shared handle to a renderer image. Dropping the last handle releases it.
pub type ImageHandle = Rc<dyn PainterImage>;

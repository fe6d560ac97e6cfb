//! Immediate-mode drawing surface

use std::rc::Rc;

use super::{PainterImage, Rect, Renderer, RendererId};

/// Draws renderer images onto a target
///
/// Only the operations needed to blit cached waveform bitmaps are part of
/// this contract.
pub trait Painter {
    /// The renderer that owns this painter's resources
    fn renderer(&self) -> Rc<dyn Renderer>;

    fn renderer_id(&self) -> RendererId {
        self.renderer().id()
    }

    /// Draw the `source` region of `image` into `dest`
    fn draw_image(&mut self, image: &dyn PainterImage, dest: Rect, source: Rect);

    /// Restrict subsequent drawing to `rect`, or lift the restriction
    fn set_clip_rect(&mut self, rect: Option<Rect>);
}

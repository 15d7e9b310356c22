use crate::foundation::core::{Color, PixelRect};
use crate::foundation::error::FiguraResult;
use crate::model::anchor::{AlignKind, align_offset};
use crate::model::figure::{TextAlign, TextFigure};
use crate::render::surface::Surface;

/// Text shaping and drawing collaborator.
pub trait TextRenderer {
    /// Size of `text` set at `size_px`, as `(width, height)`.
    fn measure(&self, text: &str, size_px: u16) -> (i32, i32);

    /// Draw `text` into `rect` of `target`.
    fn draw(
        &self,
        target: &mut Surface,
        rect: PixelRect,
        text: &str,
        size_px: u16,
        color: Color,
    ) -> FiguraResult<()>;
}

/// Renderer without fonts: measures zero width and draws nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoText;

impl TextRenderer for NoText {
    fn measure(&self, _text: &str, size_px: u16) -> (i32, i32) {
        (0, i32::from(size_px))
    }

    fn draw(&self, _: &mut Surface, _: PixelRect, _: &str, _: u16, _: Color) -> FiguraResult<()> {
        Ok(())
    }
}

/// Box the measured text occupies inside `rect`: aligned horizontally,
/// centred vertically, clipped to `rect`.
pub(crate) fn text_box(
    renderer: &dyn TextRenderer,
    rect: PixelRect,
    text: &str,
    fig: &TextFigure,
) -> PixelRect {
    let (tw, th) = renderer.measure(text, fig.size_px);
    let (tw, th) = (tw.clamp(0, rect.w), th.clamp(0, rect.h));
    let align = match fig.align {
        TextAlign::Start => AlignKind::Start,
        TextAlign::Center => AlignKind::Center,
        TextAlign::End => AlignKind::End,
    };
    PixelRect::new(
        rect.x + align_offset(rect.w, tw, align),
        rect.y + align_offset(rect.h, th, AlignKind::Center),
        tw,
        th,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;

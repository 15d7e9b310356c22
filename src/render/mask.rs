use crate::effects::blend::{BlendMode, apply_region};
use crate::effects::filters::apply_filter_chain;
use crate::foundation::core::{Color, PixelRect};
use crate::foundation::error::FiguraResult;
use crate::foundation::math::mul_div255_u8;
use crate::model::figure::Figure;
use crate::model::mask::{Mask, MaskRegion};
use crate::render::painter::Painter;
use crate::render::surface::Surface;

/// Pixel class of a rendered silhouette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Coverage {
    Shape,
    Background,
    /// Partially covered, with the residual coverage in 1/255 units.
    Boundary(u8),
}

impl Coverage {
    /// Black is shape, white is background, anything else is boundary.
    pub(crate) fn classify(c: Color) -> Self {
        match c.luma() {
            0 => Self::Shape,
            255 => Self::Background,
            l => Self::Boundary(255 - l),
        }
    }
}

fn apply_class(dst: Color, mask: &Mask, class: Coverage) -> Color {
    let apply =
        |region: &MaskRegion, alpha: u8| apply_region(dst, region.color, alpha, region.policy);
    match class {
        Coverage::Shape => apply(&mask.shape, mask.shape.alpha),
        Coverage::Background => apply(&mask.background, mask.background.alpha),
        Coverage::Boundary(cov) => apply(
            &mask.boundary,
            mul_div255_u8(u16::from(mask.boundary.alpha), u16::from(cov)),
        ),
    }
}

impl Painter<'_> {
    /// Mask path: the figure only contributes its silhouette, which decides
    /// how each region policy rewrites the target (with the mask's background
    /// figure painted over it).
    pub(crate) fn paint_masked(
        &mut self,
        target: &mut Surface,
        rect: PixelRect,
        figure: &Figure,
        mask: &Mask,
        depth: u32,
    ) -> FiguraResult<()> {
        tracing::trace!(?rect, "painting through mask");
        let mut shape = self.scratch(rect.w, rect.h)?;
        let local = shape.bounds();
        shape.fill(Color::WHITE);
        let silhouette = figure.silhouette();
        self.detached(|p| p.paint_direct(&mut shape, local, &silhouette, depth))?;
        if let Some(filter) = &figure.filter {
            apply_filter_chain(&mut shape, local, filter)?;
        }
        if let Some(filter) = &mask.filter {
            apply_filter_chain(&mut shape, local, filter)?;
        }

        let mut result = self.scratch(rect.w, rect.h)?;
        result.draw(target, -rect.x, -rect.y, BlendMode::Replace);
        if let Some(bg) = mask.background_figure.as_deref() {
            self.paint_detached(&mut result, local, bg, depth + 1)?;
        }

        let clip = rect.intersect(target.bounds());
        for y in clip.y..clip.bottom() {
            for x in clip.x..clip.right() {
                let (lx, ly) = (x - rect.x, y - rect.y);
                let class = Coverage::classify(shape.pixel(lx, ly));
                target.set_pixel(x, y, apply_class(result.pixel(lx, ly), mask, class));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/mask.rs"]
mod tests;

use crate::animation::ease::progress;
use crate::effects::blend::BlendMode;
use crate::effects::filters::apply_filter_chain;
use crate::foundation::core::PixelRect;
use crate::foundation::error::FiguraResult;
use crate::foundation::math::mul_div255_u8;
use crate::model::figure::Figure;
use crate::model::style::{AnimationKind, Area, Layer, Style};
use crate::render::painter::Painter;
use crate::render::surface::Surface;
use crate::render::surface_pool::SurfacePool;

/// The four nested box-model rectangles of a style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BoxAreas {
    pub(crate) margin: PixelRect,
    pub(crate) border: PixelRect,
    pub(crate) padding: PixelRect,
    pub(crate) content: PixelRect,
}

impl BoxAreas {
    pub(crate) fn new(rect: PixelRect, style: &Style) -> Self {
        let border = rect.inset(style.margin);
        let padding = border.inset(style.border);
        Self {
            margin: rect,
            border,
            padding,
            content: padding.inset(style.padding),
        }
    }

    pub(crate) fn get(&self, area: Area) -> PixelRect {
        match area {
            Area::Margin => self.margin,
            Area::Border => self.border,
            Area::Padding => self.padding,
            Area::Content => self.content,
        }
    }
}

/// Combined effect of a style's animations at one instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct AnimationState {
    pub(crate) alpha: u8,
    pub(crate) dx: i32,
    pub(crate) dy: i32,
}

impl AnimationState {
    /// Fades multiply, translations add up.
    pub(crate) fn at(style: &Style, time_ms: u64) -> Self {
        let mut state = Self {
            alpha: 255,
            dx: 0,
            dy: 0,
        };
        for anim in style.animations.iter().flatten() {
            let t = progress(anim.ease, time_ms, anim.delay_ms, anim.duration_ms);
            match anim.kind {
                AnimationKind::Fade { from, to } => {
                    let a = f64::from(from) + (f64::from(to) - f64::from(from)) * t;
                    let a = a.round().clamp(0.0, 255.0) as u16;
                    state.alpha = mul_div255_u8(u16::from(state.alpha), a);
                }
                AnimationKind::Translate { dx, dy } => {
                    state.dx += (f64::from(dx) * t).round() as i32;
                    state.dy += (f64::from(dy) * t).round() as i32;
                }
            }
        }
        state
    }
}

impl Painter<'_> {
    /// Paint `style` into `rect` of `target`.
    ///
    /// Backgrounds, then the content figure, then foregrounds. Style filters
    /// and fades render through a scratch surface composited onto the target.
    #[tracing::instrument(level = "debug", skip(self, target, style))]
    pub fn draw_style(
        &mut self,
        target: &mut Surface,
        rect: PixelRect,
        style: &Style,
    ) -> FiguraResult<()> {
        if rect.is_empty() {
            return Ok(());
        }
        let anim = AnimationState::at(style, self.opts.time_ms);
        let rect = rect.offset(anim.dx, anim.dy);
        let has_filters = style.filters.iter().any(Option::is_some);
        if !has_filters && anim.alpha == 255 {
            return self.paint_layers(target, rect, style, false);
        }

        tracing::trace!(?rect, alpha = anim.alpha, "compositing style through scratch surface");
        let mut scratch = self.scratch(rect.w, rect.h)?;
        let local = scratch.bounds();
        self.paint_layers(&mut scratch, local, style, true)?;
        for filter in style.filters.iter().flatten() {
            apply_filter_chain(&mut scratch, local, filter)?;
        }
        if anim.alpha < 255 {
            for y in 0..local.h {
                for x in 0..local.w {
                    let c = scratch.pixel(x, y);
                    let a = mul_div255_u8(u16::from(c.a), u16::from(anim.alpha));
                    scratch.set_pixel(x, y, c.with_alpha(a));
                }
            }
        }
        target.draw(&scratch, rect.x, rect.y, BlendMode::Normal);
        Ok(())
    }

    fn paint_layers(
        &mut self,
        target: &mut Surface,
        rect: PixelRect,
        style: &Style,
        detached: bool,
    ) -> FiguraResult<()> {
        let areas = BoxAreas::new(rect, style);
        let mut paint = |painter: &mut Self, r: PixelRect, figure: &Figure| {
            if detached {
                painter.paint_detached(target, r, figure, 0)
            } else {
                painter.paint_at(target, r, figure, 0)
            }
        };
        for Layer { figure, area } in style.backgrounds.iter().flatten() {
            paint(self, areas.get(*area), figure)?;
        }
        if let Some(content) = &style.content {
            paint(self, areas.content, content)?;
        }
        for Layer { figure, area } in style.foregrounds.iter().flatten() {
            paint(self, areas.get(*area), figure)?;
        }
        Ok(())
    }
}

/// Paint `style` with a throwaway pool, flushing postponed figures before
/// returning.
pub fn draw_style(target: &mut Surface, rect: PixelRect, style: &Style) -> FiguraResult<()> {
    let pool = SurfacePool::default();
    let mut painter = Painter::new(&pool);
    painter.draw_style(target, rect, style)?;
    painter.flush_postponed(target)
}

#[cfg(test)]
#[path = "../../tests/unit/render/style.rs"]
mod tests;

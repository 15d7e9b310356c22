use std::collections::VecDeque;

use crate::effects::blend::BlendMode;
use crate::effects::filters::apply_filter_chain;
use crate::foundation::core::PixelRect;
use crate::foundation::error::{FiguraError, FiguraResult};
use crate::model::anchor::{AnchorResolver, BoxResolver};
use crate::model::figure::{
    BorderFigure, Figure, FigureFlags, FigureKind, PerfFlags, RepeaterFigure, TextFigure,
};
use crate::model::filter::Filter;
use crate::render::border;
use crate::render::raster::{self, Canvas, Paint};
use crate::render::surface::{PixelFormat, Surface, SurfaceDesc};
use crate::render::surface_pool::{PooledSurface, SurfaceCache, SurfacePool};
use crate::render::text::{NoText, TextRenderer, text_box};
use crate::transform::scale::{Scaler, scale};

/// Milliseconds per gradient step of an animated figure.
const ANIMATION_STEP_MS: u64 = 16;

/// Painter configuration.
#[derive(Debug, Clone, Copy)]
pub struct PainterOpts {
    /// Maximum sub-figure nesting depth.
    pub max_depth: u32,
    /// Clock used by animated figures and style animations.
    pub time_ms: u64,
    /// Sampler used to fit repeater tiles into their cells.
    pub repeat_scaler: Scaler,
}

impl Default for PainterOpts {
    fn default() -> Self {
        Self {
            max_depth: 64,
            time_ms: 0,
            repeat_scaler: Scaler::Bilinear,
        }
    }
}

/// Paints figures and styles onto surfaces.
///
/// Scratch surfaces come from the borrowed [`SurfaceCache`]; every one of them
/// is returned before a paint call finishes, successful or not.
pub struct Painter<'c> {
    cache: &'c dyn SurfaceCache,
    resolver: Box<dyn BoxResolver + 'c>,
    text: Box<dyn TextRenderer + 'c>,
    pub(crate) opts: PainterOpts,
    postponed: VecDeque<(PixelRect, Figure, u32)>,
    flushing: bool,
}

impl<'c> Painter<'c> {
    /// Painter with the default anchor resolver and no text support.
    pub fn new(cache: &'c dyn SurfaceCache) -> Self {
        Self {
            cache,
            resolver: Box::new(AnchorResolver),
            text: Box::new(NoText),
            opts: PainterOpts::default(),
            postponed: VecDeque::new(),
            flushing: false,
        }
    }

    /// Replace the options.
    pub fn with_opts(mut self, opts: PainterOpts) -> Self {
        self.opts = opts;
        self
    }

    /// Replace the anchor resolver.
    pub fn with_resolver(mut self, resolver: impl BoxResolver + 'c) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Replace the text collaborator.
    pub fn with_text_renderer(mut self, text: impl TextRenderer + 'c) -> Self {
        self.text = Box::new(text);
        self
    }

    /// Current options.
    pub fn opts(&self) -> &PainterOpts {
        &self.opts
    }

    /// Number of figures waiting for [`Painter::flush_postponed`].
    pub fn postponed_len(&self) -> usize {
        self.postponed.len()
    }

    /// Paint `figure` into `rect` of `target`.
    ///
    /// Empty rectangles are a no-op. Figures flagged `POSTPONE` are queued
    /// until [`Painter::flush_postponed`].
    #[tracing::instrument(
        level = "debug",
        skip(self, target, figure),
        fields(kind = ?figure.tag())
    )]
    pub fn paint(
        &mut self,
        target: &mut Surface,
        rect: PixelRect,
        figure: &Figure,
    ) -> FiguraResult<()> {
        self.paint_at(target, rect, figure, 0)
    }

    /// Paint every queued figure in the order it was postponed.
    ///
    /// On error the remaining queue is dropped.
    pub fn flush_postponed(&mut self, target: &mut Surface) -> FiguraResult<()> {
        if self.postponed.is_empty() {
            return Ok(());
        }
        tracing::debug!(queued = self.postponed.len(), "flushing postponed figures");
        let was_flushing = std::mem::replace(&mut self.flushing, true);
        let mut result = Ok(());
        while let Some((rect, figure, depth)) = self.postponed.pop_front() {
            result = self.paint_at(target, rect, &figure, depth);
            if result.is_err() {
                self.postponed.clear();
                break;
            }
        }
        self.flushing = was_flushing;
        result
    }

    pub(crate) fn paint_at(
        &mut self,
        target: &mut Surface,
        rect: PixelRect,
        figure: &Figure,
        depth: u32,
    ) -> FiguraResult<()> {
        if rect.is_empty() {
            return Ok(());
        }
        if depth > self.opts.max_depth {
            return Err(FiguraError::structure(format!(
                "figure nesting exceeds {} levels",
                self.opts.max_depth
            )));
        }
        if figure.flags().contains(FigureFlags::POSTPONE) && !self.flushing {
            tracing::debug!(kind = ?figure.tag(), ?rect, "postponing figure");
            self.postponed.push_back((rect, figure.clone(), depth));
            return Ok(());
        }

        if let Some(mask) = figure.mask.as_deref() {
            self.paint_masked(target, rect, figure, mask, depth)?;
        } else if let Some(filter) = &figure.filter {
            self.paint_filtered(target, rect, figure, filter, depth)?;
        } else {
            self.paint_direct(target, rect, figure, depth)?;
        }

        if figure.perf().contains(PerfFlags::SKIP_CHILDREN) || figure.children.is_empty() {
            return Ok(());
        }
        self.paint_children(target, rect, figure, depth)
    }

    /// Paint into a surface that is not the caller's target: postponement
    /// does not apply there, since the queue is flushed onto the target.
    pub(crate) fn paint_detached(
        &mut self,
        target: &mut Surface,
        rect: PixelRect,
        figure: &Figure,
        depth: u32,
    ) -> FiguraResult<()> {
        self.detached(|p| p.paint_at(target, rect, figure, depth))
    }

    /// Run `f` with postponement disabled.
    pub(crate) fn detached<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> FiguraResult<T>,
    ) -> FiguraResult<T> {
        let was_flushing = std::mem::replace(&mut self.flushing, true);
        let result = f(self);
        self.flushing = was_flushing;
        result
    }

    pub(crate) fn scratch(&self, w: i32, h: i32) -> FiguraResult<PooledSurface<'c>> {
        PooledSurface::acquire(self.cache, SurfaceDesc::rgba8(w.max(0) as u32, h.max(0) as u32))
    }

    /// In place, the filter also sees whatever was already under the figure's
    /// rect; the scratch path filters the figure's own pixels only.
    fn paint_filtered(
        &mut self,
        target: &mut Surface,
        rect: PixelRect,
        figure: &Figure,
        filter: &Filter,
        depth: u32,
    ) -> FiguraResult<()> {
        let in_place = target.format() == PixelFormat::Rgba8
            && !figure.perf().contains(PerfFlags::NO_IN_PLACE);
        if in_place {
            tracing::trace!(?rect, "filtering target in place");
            self.paint_direct(target, rect, figure, depth)?;
            return apply_filter_chain(target, rect, filter);
        }

        tracing::trace!(?rect, "filtering in scratch surface");
        let mut scratch = self.scratch(rect.w, rect.h)?;
        let local = scratch.bounds();
        self.detached(|p| p.paint_direct(&mut scratch, local, figure, depth))?;
        apply_filter_chain(&mut scratch, local, filter)?;
        target.draw(&scratch, rect.x, rect.y, BlendMode::Normal);
        Ok(())
    }

    /// Kind-specific rasterization, without mask, filter or children.
    pub(crate) fn paint_direct(
        &mut self,
        target: &mut Surface,
        rect: PixelRect,
        figure: &Figure,
        depth: u32,
    ) -> FiguraResult<()> {
        match &figure.kind {
            FigureKind::Empty => return Ok(()),
            FigureKind::Border(b) => return self.paint_border(target, rect, figure, b, depth),
            FigureKind::Repeater(r) => return self.paint_repeater(target, rect, figure, r, depth),
            FigureKind::Text(t) => return self.paint_text(target, rect, figure, t),
            _ => {}
        }

        let flags = figure.flags();
        let filled = flags.contains(FigureFlags::FILLED);
        let shift = if flags.contains(FigureFlags::ANIMATED) {
            (self.opts.time_ms / ANIMATION_STEP_MS) as u32
        } else {
            0
        };
        let radius = match &figure.kind {
            FigureKind::Rectangle(r) => r.radius,
            _ => 0,
        };
        let paint = Paint::for_figure(figure, rect, radius, shift);
        let c = &mut Canvas::new(target, rect, figure);

        match &figure.kind {
            FigureKind::Rectangle(r) => raster::rectangle(c, &paint, filled, r.radius, r.stroke),
            FigureKind::Triangle(t) => raster::triangle(c, &paint, filled, t.direction),
            FigureKind::Ellipse(e) => raster::ellipse(c, &paint, filled, e),
            FigureKind::Line(l) => raster::line(c, &paint, l),
            FigureKind::Lines(l) => raster::lines(c, &paint, l),
            FigureKind::Grid(g) => raster::grid(c, &paint, g),
            FigureKind::PixelField(p) => raster::pixel_field(c, &paint, p),
            FigureKind::Cross(x) => raster::cross(c, &paint, x.thickness),
            FigureKind::Superlines(s) => raster::superlines(c, &paint, s),
            FigureKind::Losange => raster::losange(c, &paint, filled),
            FigureKind::Checkerboard(k) => raster::checkerboard(c, &paint, k),
            FigureKind::Subdivision(s) => raster::subdivision(c, &paint, s),
            FigureKind::Empty
            | FigureKind::Border(_)
            | FigureKind::Repeater(_)
            | FigureKind::Text(_) => {}
        }
        Ok(())
    }

    fn paint_border(
        &mut self,
        target: &mut Surface,
        rect: PixelRect,
        figure: &Figure,
        b: &BorderFigure,
        depth: u32,
    ) -> FiguraResult<()> {
        let corners = figure.flags().contains(FigureFlags::BORDER_CORNERS);
        for (slot, r, slot_figure) in border::layout(rect, b, corners)? {
            tracing::trace!(?slot, ?r, "painting border slot");
            self.paint_at(target, r, slot_figure, depth + 1)?;
        }
        Ok(())
    }

    /// Tile the rectangle with a whole number of cells per axis, fitting the
    /// rendered tile into each cell with the configured scaler.
    fn paint_repeater(
        &mut self,
        target: &mut Surface,
        rect: PixelRect,
        figure: &Figure,
        r: &RepeaterFigure,
        depth: u32,
    ) -> FiguraResult<()> {
        if r.tile_w <= 0 || r.tile_h <= 0 {
            return Ok(());
        }
        let cols = ((rect.w + r.tile_w / 2) / r.tile_w).max(1);
        let rows = ((rect.h + r.tile_h / 2) / r.tile_h).max(1);
        let scaler = if figure.perf().contains(PerfFlags::NEAREST) {
            Scaler::Nearest
        } else {
            self.opts.repeat_scaler
        };
        let mode = raster::write_mode(figure);

        let mut tile = self.scratch(r.tile_w, r.tile_h)?;
        let local = tile.bounds();
        self.paint_detached(&mut tile, local, &r.tile, depth + 1)?;

        // Cells differ by at most one pixel per axis, so keep the last fit.
        let mut fitted: Option<Surface> = None;
        for row in 0..rows {
            let y0 = rect.y + row * rect.h / rows;
            let y1 = rect.y + (row + 1) * rect.h / rows;
            for col in 0..cols {
                let x0 = rect.x + col * rect.w / cols;
                let x1 = rect.x + (col + 1) * rect.w / cols;
                let (cw, ch) = ((x1 - x0) as u32, (y1 - y0) as u32);
                if cw == tile.width() && ch == tile.height() {
                    target.draw(&tile, x0, y0, mode);
                    continue;
                }
                let stale = fitted
                    .as_ref()
                    .is_none_or(|s| s.width() != cw || s.height() != ch);
                if stale {
                    fitted = Some(scale(&tile, cw, ch, scaler)?);
                }
                if let Some(s) = &fitted {
                    target.draw(s, x0, y0, mode);
                }
            }
        }
        Ok(())
    }

    fn paint_text(
        &mut self,
        target: &mut Surface,
        rect: PixelRect,
        figure: &Figure,
        t: &TextFigure,
    ) -> FiguraResult<()> {
        let Some(text) = t.text.as_deref() else {
            return Ok(());
        };
        let r = text_box(self.text.as_ref(), rect, text, t);
        if r.is_empty() {
            return Ok(());
        }
        self.text.draw(target, r, text, t.size_px, figure.color())
    }

    fn paint_children(
        &mut self,
        target: &mut Surface,
        rect: PixelRect,
        figure: &Figure,
        depth: u32,
    ) -> FiguraResult<()> {
        if !figure.flags().contains(FigureFlags::CLIP) {
            for child in &figure.children {
                let r = self.child_rect(child, rect);
                self.paint_at(target, r, child, depth + 1)?;
            }
            return Ok(());
        }

        let mut scratch = self.scratch(rect.w, rect.h)?;
        let local = scratch.bounds();
        for child in &figure.children {
            let r = self.child_rect(child, local);
            self.paint_detached(&mut scratch, r, child, depth + 1)?;
        }
        target.draw(&scratch, rect.x, rect.y, BlendMode::Normal);
        Ok(())
    }

    fn child_rect(&self, child: &Figure, parent: PixelRect) -> PixelRect {
        match &child.anchor {
            Some(anchor) => self.resolver.resolve(anchor, parent),
            None => parent,
        }
    }
}

/// Paint `figure` at `(x, y, w, h)` with a throwaway pool, flushing postponed
/// figures before returning. Absent figures and empty rectangles are a no-op.
pub fn paint_figure(
    target: &mut Surface,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    figure: Option<&Figure>,
) -> FiguraResult<()> {
    let Some(figure) = figure else {
        return Ok(());
    };
    let pool = SurfacePool::default();
    let mut painter = Painter::new(&pool);
    painter.paint(target, PixelRect::new(x, y, w, h), figure)?;
    painter.flush_postponed(target)
}

#[cfg(test)]
#[path = "../../tests/unit/render/painter.rs"]
mod tests;

use crate::effects::blend::BlendMode;
use crate::effects::gradient::GradientSampler;
use crate::foundation::core::{Color, PixelRect};
use crate::foundation::math::hash_u32;
use crate::model::figure::{
    CheckerFigure, Direction, EllipseFigure, Figure, FigureFlags, GridFigure, LineFigure,
    LinesFigure, Orientation, PerfFlags, PixelFieldFigure, SubdivisionFigure, SuperlinesFigure,
};
use crate::render::surface::Surface;

/// Color source of a figure: its header color or its gradient.
pub(crate) enum Paint<'a> {
    Solid(Color),
    Gradient(GradientSampler<'a>),
}

impl<'a> Paint<'a> {
    pub(crate) fn for_figure(figure: &'a Figure, rect: PixelRect, radius: i32, shift: u32) -> Self {
        match &figure.gradient {
            Some(g) => Paint::Gradient(
                GradientSampler::new(figure.color(), g, rect.w, rect.h, radius).with_shift(shift),
            ),
            None => Paint::Solid(figure.color()),
        }
    }

    /// Color at local `(x, y)`; `None` leaves the pixel alone.
    pub(crate) fn at(&self, x: i32, y: i32) -> Option<Color> {
        match self {
            Paint::Solid(c) => Some(*c),
            Paint::Gradient(g) => g.sample(x, y),
        }
    }
}

/// Write mode of a figure's own pixels.
pub(crate) fn write_mode(figure: &Figure) -> BlendMode {
    if figure.perf().contains(PerfFlags::OPAQUE)
        || !figure.flags().contains(FigureFlags::ALPHA_BLEND)
    {
        BlendMode::Replace
    } else {
        BlendMode::Normal
    }
}

/// Local-coordinate writer over a rectangle of a surface, honoring flips.
pub(crate) struct Canvas<'s> {
    target: &'s mut Surface,
    rect: PixelRect,
    mode: BlendMode,
    flip_h: bool,
    flip_v: bool,
}

impl<'s> Canvas<'s> {
    pub(crate) fn new(target: &'s mut Surface, rect: PixelRect, figure: &Figure) -> Self {
        let flags = figure.flags();
        Self {
            target,
            rect,
            mode: write_mode(figure),
            flip_h: flags.contains(FigureFlags::FLIP_H),
            flip_v: flags.contains(FigureFlags::FLIP_V),
        }
    }

    pub(crate) fn w(&self) -> i32 {
        self.rect.w
    }

    pub(crate) fn h(&self) -> i32 {
        self.rect.h
    }

    /// Write `c` at local `(x, y)`; ignored outside the rectangle.
    pub(crate) fn put(&mut self, x: i32, y: i32, c: Color) {
        if x < 0 || y < 0 || x >= self.rect.w || y >= self.rect.h {
            return;
        }
        let x = if self.flip_h { self.rect.w - 1 - x } else { x };
        let y = if self.flip_v { self.rect.h - 1 - y } else { y };
        let (gx, gy) = (self.rect.x + x, self.rect.y + y);
        match self.mode {
            BlendMode::Replace => self.target.set_pixel(gx, gy, c),
            mode => self.target.blend(gx, gy, c, mode),
        }
    }

    /// Shade local `(x, y)` with `paint`.
    pub(crate) fn shade(&mut self, paint: &Paint<'_>, x: i32, y: i32) {
        if let Some(c) = paint.at(x, y) {
            self.put(x, y, c);
        }
    }

    /// Shade every local pixel of `r` (clipped to the canvas).
    pub(crate) fn shade_rect(&mut self, paint: &Paint<'_>, r: PixelRect) {
        let r = r.intersect(PixelRect::new(0, 0, self.rect.w, self.rect.h));
        for y in r.y..r.bottom() {
            for x in r.x..r.right() {
                self.shade(paint, x, y);
            }
        }
    }
}

/// Shade the pixels `inside` selects, or only its 1px outline when not filled.
fn fill_shape(
    canvas: &mut Canvas<'_>,
    paint: &Paint<'_>,
    filled: bool,
    inside: impl Fn(i32, i32) -> bool,
) {
    for y in 0..canvas.h() {
        for x in 0..canvas.w() {
            if !inside(x, y) {
                continue;
            }
            let edge = !inside(x - 1, y)
                || !inside(x + 1, y)
                || !inside(x, y - 1)
                || !inside(x, y + 1);
            if filled || edge {
                canvas.shade(paint, x, y);
            }
        }
    }
}

fn in_rounded_rect(x: i32, y: i32, w: i32, h: i32, radius: i32) -> bool {
    if x < 0 || y < 0 || x >= w || y >= h {
        return false;
    }
    let r = radius.min(w / 2).min(h / 2);
    if r <= 0 {
        return true;
    }
    let cx = if x < r {
        r
    } else if x >= w - r {
        w - r
    } else {
        return true;
    };
    let cy = if y < r {
        r
    } else if y >= h - r {
        h - r
    } else {
        return true;
    };
    let dx = f64::from(x) + 0.5 - f64::from(cx);
    let dy = f64::from(y) + 0.5 - f64::from(cy);
    dx * dx + dy * dy <= f64::from(r * r)
}

pub(crate) fn rectangle(
    canvas: &mut Canvas<'_>,
    paint: &Paint<'_>,
    filled: bool,
    radius: i32,
    stroke: i32,
) {
    let (w, h) = (canvas.w(), canvas.h());
    if stroke > 0 {
        let inner_r = (radius - stroke).max(0);
        fill_shape(canvas, paint, true, |x, y| {
            in_rounded_rect(x, y, w, h, radius)
                && !in_rounded_rect(x - stroke, y - stroke, w - 2 * stroke, h - 2 * stroke, inner_r)
        });
        if filled {
            let inner = PixelRect::new(stroke, stroke, w - 2 * stroke, h - 2 * stroke);
            fill_shape(canvas, paint, true, |x, y| {
                inner.contains(x, y)
                    && in_rounded_rect(x - stroke, y - stroke, inner.w, inner.h, inner_r)
            });
        }
    } else if radius <= 0 && filled {
        canvas.shade_rect(paint, PixelRect::new(0, 0, w, h));
    } else {
        fill_shape(canvas, paint, filled, |x, y| in_rounded_rect(x, y, w, h, radius));
    }
}

pub(crate) fn triangle(
    canvas: &mut Canvas<'_>,
    paint: &Paint<'_>,
    filled: bool,
    direction: Direction,
) {
    let (w, h) = (f64::from(canvas.w()), f64::from(canvas.h()));
    let (iw, ih) = (canvas.w(), canvas.h());
    fill_shape(canvas, paint, filled, |x, y| {
        if x < 0 || y < 0 || x >= iw || y >= ih {
            return false;
        }
        let (xc, yc) = (f64::from(x) + 0.5, f64::from(y) + 0.5);
        // Distance from the apex along the axis, and half-width of the base there.
        let (along, len, across, span) = match direction {
            Direction::Up => (yc, h, xc - w / 2.0, w / 2.0),
            Direction::Down => (h - yc, h, xc - w / 2.0, w / 2.0),
            Direction::Left => (xc, w, yc - h / 2.0, h / 2.0),
            Direction::Right => (w - xc, w, yc - h / 2.0, h / 2.0),
        };
        across.abs() <= span * along / len
    });
}

pub(crate) fn losange(canvas: &mut Canvas<'_>, paint: &Paint<'_>, filled: bool) {
    let (w, h) = (f64::from(canvas.w()), f64::from(canvas.h()));
    let (iw, ih) = (canvas.w(), canvas.h());
    fill_shape(canvas, paint, filled, |x, y| {
        if x < 0 || y < 0 || x >= iw || y >= ih {
            return false;
        }
        let u = (f64::from(x) + 0.5 - w / 2.0).abs() / (w / 2.0);
        let v = (f64::from(y) + 0.5 - h / 2.0).abs() / (h / 2.0);
        u + v <= 1.0
    });
}

fn in_arc(deg: f64, start: i16, sweep: i16) -> bool {
    let (start, sweep) = if sweep < 0 {
        (i32::from(start) + i32::from(sweep), -i32::from(sweep))
    } else {
        (i32::from(start), i32::from(sweep))
    };
    if sweep >= 360 {
        return true;
    }
    (deg - f64::from(start)).rem_euclid(360.0) <= f64::from(sweep)
}

pub(crate) fn ellipse(canvas: &mut Canvas<'_>, paint: &Paint<'_>, filled: bool, e: &EllipseFigure) {
    let (w, h) = (f64::from(canvas.w()), f64::from(canvas.h()));
    let (iw, ih) = (canvas.w(), canvas.h());
    let (cx, cy, rx, ry) = (w / 2.0, h / 2.0, w / 2.0, h / 2.0);
    let stroke = f64::from(e.stroke.max(0));
    let inside = |x: i32, y: i32| {
        if x < 0 || y < 0 || x >= iw || y >= ih {
            return false;
        }
        let dx = f64::from(x) + 0.5 - cx;
        let dy = f64::from(y) + 0.5 - cy;
        if (dx / rx).powi(2) + (dy / ry).powi(2) > 1.0 {
            return false;
        }
        if stroke > 0.0 {
            let (irx, iry) = (rx - stroke, ry - stroke);
            if irx > 0.0 && iry > 0.0 && (dx / irx).powi(2) + (dy / iry).powi(2) <= 1.0 {
                return false;
            }
        }
        in_arc((-dy).atan2(dx).to_degrees(), e.start_deg, e.sweep_deg)
    };
    fill_shape(canvas, paint, filled || stroke > 0.0, inside);
}

pub(crate) fn line(canvas: &mut Canvas<'_>, paint: &Paint<'_>, l: &LineFigure) {
    let (w, h) = (canvas.w(), canvas.h());
    let map = |pm: u16, extent: i32| f64::from(pm.min(1000)) * f64::from(extent - 1) / 1000.0 + 0.5;
    let (x0, y0) = (map(l.from.0, w), map(l.from.1, h));
    let (x1, y1) = (map(l.to.0, w), map(l.to.1, h));
    let half = f64::from(l.thickness.max(1)) / 2.0;
    let (dx, dy) = (x1 - x0, y1 - y0);
    let len2 = dx * dx + dy * dy;
    for y in 0..h {
        for x in 0..w {
            let (px, py) = (f64::from(x) + 0.5, f64::from(y) + 0.5);
            let t = if len2 > 0.0 {
                (((px - x0) * dx + (py - y0) * dy) / len2).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let (qx, qy) = (x0 + t * dx, y0 + t * dy);
            if (px - qx).hypot(py - qy) <= half {
                canvas.shade(paint, x, y);
            }
        }
    }
}

fn band_start(i: u32, count: u32, extent: i32, t: i32) -> i32 {
    if count <= 1 {
        return (extent - t) / 2;
    }
    (i64::from(i) * i64::from(extent - t) / i64::from(count - 1)) as i32
}

pub(crate) fn lines(canvas: &mut Canvas<'_>, paint: &Paint<'_>, l: &LinesFigure) {
    let t = l.thickness.max(1);
    let (w, h) = (canvas.w(), canvas.h());
    for i in 0..l.count {
        let r = match l.orientation {
            Orientation::Horizontal => PixelRect::new(0, band_start(i, l.count, h, t), w, t),
            Orientation::Vertical => PixelRect::new(band_start(i, l.count, w, t), 0, t, h),
        };
        canvas.shade_rect(paint, r);
    }
}

pub(crate) fn grid(canvas: &mut Canvas<'_>, paint: &Paint<'_>, g: &GridFigure) {
    let t = g.thickness.max(1);
    let (w, h) = (canvas.w(), canvas.h());
    for j in 1..g.cols {
        let x = (i64::from(j) * i64::from(w) / i64::from(g.cols)) as i32 - t / 2;
        canvas.shade_rect(paint, PixelRect::new(x, 0, t, h));
    }
    for i in 1..g.rows {
        let y = (i64::from(i) * i64::from(h) / i64::from(g.rows)) as i32 - t / 2;
        canvas.shade_rect(paint, PixelRect::new(0, y, w, t));
    }
}

pub(crate) fn cross(canvas: &mut Canvas<'_>, paint: &Paint<'_>, thickness: i32) {
    let t = thickness.max(1);
    let (w, h) = (canvas.w(), canvas.h());
    canvas.shade_rect(paint, PixelRect::new(0, (h - t) / 2, w, t));
    // Vertical bar minus the overlap, so blended crosses stay even.
    let bar = PixelRect::new((w - t) / 2, 0, t, h);
    let hb = PixelRect::new(0, (h - t) / 2, w, t);
    for y in bar.y..bar.bottom() {
        for x in bar.x..bar.right() {
            if !hb.contains(x, y) {
                canvas.shade(paint, x, y);
            }
        }
    }
}

pub(crate) fn superlines(canvas: &mut Canvas<'_>, paint: &Paint<'_>, s: &SuperlinesFigure) {
    if s.spacing <= 0 {
        return;
    }
    let t = s.thickness.max(1);
    for y in 0..canvas.h() {
        for x in 0..canvas.w() {
            let k = if s.rising { x + y } else { x - y };
            if k.rem_euclid(s.spacing) < t {
                canvas.shade(paint, x, y);
            }
        }
    }
}

pub(crate) fn checkerboard(canvas: &mut Canvas<'_>, paint: &Paint<'_>, c: &CheckerFigure) {
    if c.cell <= 0 {
        return;
    }
    for y in 0..canvas.h() {
        for x in 0..canvas.w() {
            if (x / c.cell + y / c.cell) % 2 == 0 {
                canvas.shade(paint, x, y);
            } else {
                canvas.put(x, y, c.alternate);
            }
        }
    }
}

pub(crate) fn pixel_field(canvas: &mut Canvas<'_>, paint: &Paint<'_>, p: &PixelFieldFigure) {
    for y in 0..canvas.h() {
        for x in 0..canvas.w() {
            let hv = hash_u32(p.seed, x as u32, y as u32);
            if (hv & 0xFF) >= u32::from(p.density) {
                continue;
            }
            if p.palette.is_empty() {
                canvas.shade(paint, x, y);
            } else {
                let c = p.palette[((hv >> 8) as usize) % p.palette.len()];
                canvas.put(x, y, c);
            }
        }
    }
}

pub(crate) fn subdivision(canvas: &mut Canvas<'_>, paint: &Paint<'_>, s: &SubdivisionFigure) {
    let root = PixelRect::new(0, 0, canvas.w(), canvas.h());
    subdivide(canvas, paint, s, root, s.depth, 0);
}

fn subdivide(
    canvas: &mut Canvas<'_>,
    paint: &Paint<'_>,
    s: &SubdivisionFigure,
    r: PixelRect,
    depth: u8,
    node: u32,
) {
    if r.is_empty() {
        return;
    }
    let hv = hash_u32(s.seed, node, u32::from(depth));
    if depth == 0 || (r.w < 2 && r.h < 2) {
        if s.palette.is_empty() {
            canvas.shade_rect(paint, r);
        } else {
            let c = s.palette[(hv as usize) % s.palette.len()];
            for y in r.y..r.bottom() {
                for x in r.x..r.right() {
                    canvas.put(x, y, c);
                }
            }
        }
        return;
    }
    // Split the longer side between 30% and 70%.
    let pct = 30 + (hv % 41) as i32;
    let (a, b) = if r.w >= r.h {
        let cut = (r.w * pct / 100).clamp(1, r.w - 1);
        (
            PixelRect::new(r.x, r.y, cut, r.h),
            PixelRect::new(r.x + cut, r.y, r.w - cut, r.h),
        )
    } else {
        let cut = (r.h * pct / 100).clamp(1, r.h - 1);
        (
            PixelRect::new(r.x, r.y, r.w, cut),
            PixelRect::new(r.x, r.y + cut, r.w, r.h - cut),
        )
    };
    let child = node.wrapping_mul(2);
    subdivide(canvas, paint, s, a, depth - 1, child.wrapping_add(1));
    subdivide(canvas, paint, s, b, depth - 1, child.wrapping_add(2));
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;

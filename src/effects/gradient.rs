use crate::foundation::core::Color;
use crate::model::gradient::{ChannelMask, Gradient, GradientShape};

/// Yields one interpolated color per gradient step, then `None`.
#[derive(Clone, Debug)]
pub struct ColorIterator<'a> {
    primary: Color,
    gradient: &'a Gradient,
    count: u32,
    next: u32,
}

/// Iterate `step_count` colors of `gradient`, starting from `primary`.
pub fn color_iterator(primary: Color, gradient: &Gradient, step_count: u32) -> ColorIterator<'_> {
    ColorIterator {
        primary,
        gradient,
        count: step_count,
        next: 0,
    }
}

impl ColorIterator<'_> {
    /// Total number of steps.
    pub fn step_count(&self) -> u32 {
        self.count
    }

    /// Color of step `i`, `None` past the last step.
    pub fn color_at(&self, i: u32) -> Option<Color> {
        if i >= self.count {
            return None;
        }
        let g = self.gradient;
        let n = self.count;

        let mut t = if n <= 1 {
            0.0
        } else {
            f64::from(i) / f64::from(n - 1)
        };
        if g.reverse {
            t = 1.0 - t;
        }

        let stop = if let Some(f) = &g.function {
            let step = if g.reverse { n - 1 - i } else { i };
            f.call(step, n)
        } else {
            match g.tertiary {
                None => mix(self.primary, g.secondary, t),
                Some(_) if t <= 0.5 => mix(self.primary, g.secondary, t * 2.0),
                Some(tertiary) => mix(g.secondary, tertiary, (t - 0.5) * 2.0),
            }
        };
        let mut c = keep_channels(stop, self.primary, g.channels);

        if let Some(a) = g.artifact
            && a.period > 0
            && i % a.period < a.length
        {
            c = a.color;
        }
        Some(c)
    }
}

impl Iterator for ColorIterator<'_> {
    type Item = Color;

    fn next(&mut self) -> Option<Color> {
        let c = self.color_at(self.next)?;
        self.next += 1;
        Some(c)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.count.saturating_sub(self.next) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for ColorIterator<'_> {}

fn mix(a: Color, b: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let ch = |a: u8, b: u8| -> u8 {
        let v = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
        v.round().clamp(0.0, 255.0) as u8
    };
    Color::rgba(ch(a.r, b.r), ch(a.g, b.g), ch(a.b, b.b), ch(a.a, b.a))
}

fn keep_channels(c: Color, primary: Color, mask: ChannelMask) -> Color {
    Color::rgba(
        if mask.contains(ChannelMask::R) { c.r } else { primary.r },
        if mask.contains(ChannelMask::G) { c.g } else { primary.g },
        if mask.contains(ChannelMask::B) { c.b } else { primary.b },
        if mask.contains(ChannelMask::A) { c.a } else { primary.a },
    )
}

#[derive(Clone, Copy)]
struct Sides {
    top: bool,
    bottom: bool,
    left: bool,
    right: bool,
}

const fn sides(top: bool, bottom: bool, left: bool, right: bool) -> Option<Sides> {
    Some(Sides {
        top,
        bottom,
        left,
        right,
    })
}

fn side_set(shape: GradientShape) -> Option<Sides> {
    use GradientShape as S;
    match shape {
        S::Square => sides(true, true, true, true),
        S::Top => sides(true, false, false, false),
        S::Bottom => sides(false, true, false, false),
        S::Left => sides(false, false, true, false),
        S::Right => sides(false, false, false, true),
        S::TopBottom => sides(true, true, false, false),
        S::LeftRight => sides(false, false, true, true),
        S::TopLeft => sides(true, false, true, false),
        S::TopRight => sides(true, false, false, true),
        S::BottomLeft => sides(false, true, true, false),
        S::BottomRight => sides(false, true, false, true),
        S::TopBottomLeft => sides(true, true, true, false),
        S::TopBottomRight => sides(true, true, false, true),
        S::TopLeftRight => sides(true, false, true, true),
        S::BottomLeftRight => sides(false, true, true, true),
        _ => None,
    }
}

fn axis_count(near: bool, far: bool, extent: i32, radius: i32) -> Option<i32> {
    match (near, far) {
        (true, true) => Some(extent / 2),
        (true, false) | (false, true) => Some(extent - radius),
        (false, false) => None,
    }
}

fn shape_steps(shape: GradientShape, w: i32, h: i32, radius: i32) -> i32 {
    use GradientShape as S;
    if let Some(s) = side_set(shape) {
        if matches!(shape, S::Square) {
            return w.min(h) / 2;
        }
        let v = axis_count(s.top, s.bottom, h, radius);
        let hz = axis_count(s.left, s.right, w, radius);
        return match (v, hz) {
            (Some(a), Some(b)) => a.min(b),
            (Some(a), None) | (None, Some(a)) => a,
            (None, None) => 1,
        };
    }
    match shape {
        S::RoundedSquare | S::Diamond | S::Ellipse => w.min(h) / 2,
        S::CenterHorizontal => h / 2,
        S::CenterVertical => w / 2,
        S::CenterCross => w.min(h) / 2,
        S::DiagonalTopLeft
        | S::DiagonalTopRight
        | S::DiagonalBottomLeft
        | S::DiagonalBottomRight => w + h - 1,
        S::EllipseTop | S::EllipseBottom => (w / 2).min(h),
        S::EllipseLeft | S::EllipseRight => w.min(h / 2),
        _ => w.min(h),
    }
}

/// Number of geometric steps `shapes` need over a `w` x `h` rectangle.
///
/// Several shapes take the maximum; the result is never below 1.
pub fn step_count(shapes: &[GradientShape], w: i32, h: i32, radius: i32) -> u32 {
    shapes
        .iter()
        .map(|&s| shape_steps(s, w, h, radius.max(0)))
        .max()
        .unwrap_or(1)
        .max(1) as u32
}

/// Geometric step covering pixel `(x, y)` of a `w` x `h` rectangle.
///
/// Step 0 lies on the shape's origin (edges for side shapes, the rim for
/// ellipses, the centre line for bands). Results may exceed the step count;
/// callers clamp. Partial ellipses return `None` outside their silhouette.
pub fn step_index(
    shape: GradientShape,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    radius: i32,
) -> Option<u32> {
    use GradientShape as S;
    let dt = y;
    let db = h - 1 - y;
    let dl = x;
    let dr = w - 1 - x;

    if let Some(s) = side_set(shape) {
        let mut d = i32::MAX;
        if s.top {
            d = d.min(dt);
        }
        if s.bottom {
            d = d.min(db);
        }
        if s.left {
            d = d.min(dl);
        }
        if s.right {
            d = d.min(dr);
        }
        return Some(d.max(0) as u32);
    }

    let (fw, fh) = (f64::from(w), f64::from(h));
    let (px, py) = (f64::from(x) + 0.5, f64::from(y) + 0.5);
    let count = f64::from(shape_steps(shape, w, h, radius).max(1));

    let idx = match shape {
        S::RoundedSquare => {
            let r = radius.max(0);
            let edge = dt.min(db).min(dl).min(dr);
            let cx = r - dl.min(dr);
            let cy = r - dt.min(db);
            if cx > 0 && cy > 0 {
                let dist = f64::from(cx).hypot(f64::from(cy)).round() as i32;
                (r - dist).max(0)
            } else {
                edge
            }
        }
        S::CenterHorizontal => (2 * y - (h - 1)).abs() / 2,
        S::CenterVertical => (2 * x - (w - 1)).abs() / 2,
        S::CenterCross => ((2 * y - (h - 1)).abs() / 2).min((2 * x - (w - 1)).abs() / 2),
        S::Diamond => {
            let u = (2.0 * px - fw).abs() / fw;
            let v = (2.0 * py - fh).abs() / fh;
            ((1.0 - (u + v)).max(0.0) * count) as i32
        }
        S::DiagonalTopLeft => dl + dt,
        S::DiagonalTopRight => dr + dt,
        S::DiagonalBottomLeft => dl + db,
        S::DiagonalBottomRight => dr + db,
        S::Ellipse => {
            let (cx, cy) = (fw / 2.0, fh / 2.0);
            return Some(ellipse_step(px, py, cx, cy, cx, cy, count).unwrap_or(0));
        }
        S::EllipseTop => return ellipse_step(px, py, fw / 2.0, fh, fw / 2.0, fh, count),
        S::EllipseBottom => return ellipse_step(px, py, fw / 2.0, 0.0, fw / 2.0, fh, count),
        S::EllipseLeft => return ellipse_step(px, py, fw, fh / 2.0, fw, fh / 2.0, count),
        S::EllipseRight => return ellipse_step(px, py, 0.0, fh / 2.0, fw, fh / 2.0, count),
        S::EllipseTopLeft => return ellipse_step(px, py, fw, fh, fw, fh, count),
        S::EllipseTopRight => return ellipse_step(px, py, 0.0, fh, fw, fh, count),
        S::EllipseBottomLeft => return ellipse_step(px, py, fw, 0.0, fw, fh, count),
        S::EllipseBottomRight => return ellipse_step(px, py, 0.0, 0.0, fw, fh, count),
        _ => 0,
    };
    Some(idx.max(0) as u32)
}

// Rim is step 0, the centre is the last step; outside the ellipse is `None`.
fn ellipse_step(px: f64, py: f64, cx: f64, cy: f64, rx: f64, ry: f64, count: f64) -> Option<u32> {
    if rx <= 0.0 || ry <= 0.0 {
        return None;
    }
    let nx = (px - cx) / rx;
    let ny = (py - cy) / ry;
    let r = (nx * nx + ny * ny).sqrt();
    if r > 1.0 {
        return None;
    }
    Some(((1.0 - r) * count) as u32)
}

/// Per-pixel gradient lookup over a fixed rectangle.
pub(crate) struct GradientSampler<'a> {
    shapes: &'a [GradientShape],
    w: i32,
    h: i32,
    radius: i32,
    geo_steps: u32,
    colors: Vec<Color>,
    shift: u32,
}

impl<'a> GradientSampler<'a> {
    pub(crate) fn new(
        figure_color: Color,
        gradient: &'a Gradient,
        w: i32,
        h: i32,
        radius: i32,
    ) -> Self {
        let geo_steps = step_count(&gradient.shapes, w, h, radius);
        let n = gradient.steps.unwrap_or(geo_steps).max(1);
        let colors = color_iterator(gradient.primary_or(figure_color), gradient, n).collect();
        Self {
            shapes: &gradient.shapes,
            w,
            h,
            radius,
            geo_steps,
            colors,
            shift: 0,
        }
    }

    /// Rotate the color steps by `shift` (animated gradients).
    pub(crate) fn with_shift(mut self, shift: u32) -> Self {
        self.shift = shift;
        self
    }

    /// Color of `(x, y)`, `None` where no shape covers the pixel.
    pub(crate) fn sample(&self, x: i32, y: i32) -> Option<Color> {
        let geo = self
            .shapes
            .iter()
            .filter_map(|&s| step_index(s, x, y, self.w, self.h, self.radius))
            .min()?;
        let geo = geo.min(self.geo_steps - 1);
        self.color_for_step(geo, self.geo_steps)
    }

    /// Color of geometric step `geo` out of `of`, mapped onto the color steps.
    pub(crate) fn color_for_step(&self, geo: u32, of: u32) -> Option<Color> {
        let n = self.colors.len() as u64;
        let of = u64::from(of.max(1));
        let i = (u64::from(geo) * n / of).min(n.saturating_sub(1));
        let i = (i + u64::from(self.shift)) % n.max(1);
        self.colors.get(i as usize).copied()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/gradient.rs"]
mod tests;

use crate::foundation::core::{Color, Point};
use crate::foundation::error::{FiguraError, FiguraResult};
use crate::render::surface::{Surface, SurfaceDesc};
use crate::transform::scale::weighted;

/// Source sampling used by [`skew`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[allow(missing_docs)]
pub enum Sampling {
    Nearest,
    #[default]
    Bilinear,
}

/// Value used for source coordinates outside the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum EdgePolicy {
    /// All channels zero.
    Zero,
    /// Nearest edge pixel.
    Clamp,
    /// Tile the source.
    Wrap,
    /// Nearest edge color with zero alpha, so filtering keeps edge hues.
    #[default]
    Transparent,
    /// A fixed color.
    Fill(Color),
}

/// Options for [`skew`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Skewer {
    /// Source sampling.
    pub sampling: Sampling,
    /// Out-of-range policy.
    pub edge: EdgePolicy,
}

// Square-to-quad projective map: (u, v) -> ((a u + b v + c) / w, (d u + e v + f) / w)
// with w = g u + h v + 1.
#[derive(Clone, Copy, Debug)]
struct Projective {
    m: [[f64; 3]; 3],
}

impl Projective {
    fn square_to_quad(q: &[Point; 4]) -> FiguraResult<Self> {
        let [p0, p1, p2, p3] = *q;
        let sx = p0.x - p1.x + p2.x - p3.x;
        let sy = p0.y - p1.y + p2.y - p3.y;

        let m = if sx.abs() < 1e-9 && sy.abs() < 1e-9 {
            [
                [p1.x - p0.x, p2.x - p1.x, p0.x],
                [p1.y - p0.y, p2.y - p1.y, p0.y],
                [0.0, 0.0, 1.0],
            ]
        } else {
            let dx1 = p1.x - p2.x;
            let dx2 = p3.x - p2.x;
            let dy1 = p1.y - p2.y;
            let dy2 = p3.y - p2.y;
            let den = dx1 * dy2 - dx2 * dy1;
            if den.abs() < 1e-9 {
                return Err(FiguraError::validation("degenerate skew quadrilateral"));
            }
            let g = (sx * dy2 - dx2 * sy) / den;
            let h = (dx1 * sy - sx * dy1) / den;
            [
                [p1.x - p0.x + g * p1.x, p3.x - p0.x + h * p3.x, p0.x],
                [p1.y - p0.y + g * p1.y, p3.y - p0.y + h * p3.y, p0.y],
                [g, h, 1.0],
            ]
        };
        Ok(Self { m })
    }

    fn inverse(&self) -> FiguraResult<Self> {
        let m = &self.m;
        let cof = |r0: usize, r1: usize, c0: usize, c1: usize| {
            m[r0][c0] * m[r1][c1] - m[r0][c1] * m[r1][c0]
        };
        let adj = [
            [cof(1, 2, 1, 2), -cof(0, 2, 1, 2), cof(0, 1, 1, 2)],
            [-cof(1, 2, 0, 2), cof(0, 2, 0, 2), -cof(0, 1, 0, 2)],
            [cof(1, 2, 0, 1), -cof(0, 2, 0, 1), cof(0, 1, 0, 1)],
        ];
        let det = m[0][0] * adj[0][0] + m[0][1] * adj[1][0] + m[0][2] * adj[2][0];
        if det.abs() < 1e-9 {
            return Err(FiguraError::validation("degenerate skew quadrilateral"));
        }
        Ok(Self { m: adj })
    }

    fn apply(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let m = &self.m;
        let w = m[2][0] * x + m[2][1] * y + m[2][2];
        if w.abs() < 1e-12 {
            return None;
        }
        Some((
            (m[0][0] * x + m[0][1] * y + m[0][2]) / w,
            (m[1][0] * x + m[1][1] * y + m[1][2]) / w,
        ))
    }
}

/// Warp `src` onto the quadrilateral `corners` (TL, TR, BR, BL).
///
/// The result covers the quadrilateral's bounding box, whose top-left corner
/// becomes the output origin. Each output pixel centre is mapped back into the
/// source; coordinates outside it follow `skewer.edge`.
#[tracing::instrument(level = "trace", skip(src))]
pub fn skew(src: &Surface, corners: [Point; 4], skewer: Skewer) -> FiguraResult<Surface> {
    if src.width() == 0 || src.height() == 0 {
        return Err(FiguraError::validation("cannot skew an empty surface"));
    }
    let min_x = corners.iter().map(|p| p.x).fold(f64::INFINITY, f64::min).floor();
    let min_y = corners.iter().map(|p| p.y).fold(f64::INFINITY, f64::min).floor();
    let max_x = corners.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max).ceil();
    let max_y = corners.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max).ceil();
    let (out_w, out_h) = (max_x - min_x, max_y - min_y);
    let max = f64::from(u16::MAX);
    if !(out_w >= 1.0 && out_h >= 1.0) || out_w > max || out_h > max {
        return Err(FiguraError::validation(format!(
            "skew quadrilateral bounding box {out_w}x{out_h} is unusable"
        )));
    }

    let local = corners.map(|p| Point::new(p.x - min_x, p.y - min_y));
    let inv = Projective::square_to_quad(&local)?.inverse()?;

    let mut out = Surface::with_desc(SurfaceDesc {
        width: out_w as u32,
        height: out_h as u32,
        format: src.format(),
    });
    let (sw, sh) = (f64::from(src.width()), f64::from(src.height()));
    for y in 0..out_h as i32 {
        for x in 0..out_w as i32 {
            let Some((u, v)) = inv.apply(f64::from(x) + 0.5, f64::from(y) + 0.5) else {
                continue;
            };
            let c = match skewer.sampling {
                Sampling::Nearest => fetch(
                    src,
                    (u * sw).floor() as i32,
                    (v * sh).floor() as i32,
                    skewer.edge,
                ),
                Sampling::Bilinear => bilinear(src, u * sw - 0.5, v * sh - 0.5, skewer.edge),
            };
            out.set_pixel(x, y, c);
        }
    }
    Ok(out)
}

fn fetch(src: &Surface, x: i32, y: i32, edge: EdgePolicy) -> Color {
    let (w, h) = (src.width() as i32, src.height() as i32);
    if x >= 0 && y >= 0 && x < w && y < h {
        return src.pixel(x, y);
    }
    match edge {
        EdgePolicy::Zero => Color::TRANSPARENT,
        EdgePolicy::Clamp => src.pixel(x.clamp(0, w - 1), y.clamp(0, h - 1)),
        EdgePolicy::Wrap => src.pixel(x.rem_euclid(w), y.rem_euclid(h)),
        EdgePolicy::Transparent => src.pixel(x.clamp(0, w - 1), y.clamp(0, h - 1)).with_alpha(0),
        EdgePolicy::Fill(c) => c,
    }
}

fn bilinear(src: &Surface, fx: f64, fy: f64, edge: EdgePolicy) -> Color {
    let x0 = fx.floor();
    let y0 = fy.floor();
    let wx = ((fx - x0) * 256.0).round() as u32;
    let wy = ((fy - y0) * 256.0).round() as u32;
    let (x0, y0) = (x0 as i32, y0 as i32);

    // A full weight lands on the next pixel; keep the tap count at four.
    let (x0, wx) = if wx >= 256 { (x0 + 1, 0) } else { (x0, wx) };
    let (y0, wy) = if wy >= 256 { (y0 + 1, 0) } else { (y0, wy) };

    let taps = [
        (fetch(src, x0, y0, edge), (256 - wx) * (256 - wy)),
        (fetch(src, x0 + 1, y0, edge), wx * (256 - wy)),
        (fetch(src, x0, y0 + 1, edge), (256 - wx) * wy),
        (fetch(src, x0 + 1, y0 + 1, edge), wx * wy),
    ];
    weighted(taps.iter().map(|&(c, w)| (c, f64::from(w))), 65536.0)
}

#[cfg(test)]
#[path = "../../tests/unit/transform/skew.rs"]
mod tests;

use crate::foundation::core::Color;
use crate::foundation::error::{FiguraError, FiguraResult};
use crate::render::surface::{Surface, SurfaceDesc};

/// Resampling filter used by [`scale`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Scaler {
    /// Nearest source pixel.
    Nearest,
    /// 2x2 taps with 8-bit fixed-point weights.
    #[default]
    Bilinear,
    /// 4x4 Catmull-Rom taps.
    Bicubic,
}

/// Resample `src` to `new_w` x `new_h`.
///
/// Exact integer ratios on both axes take the nearest-neighbour path whatever
/// the scaler.
pub fn scale(src: &Surface, new_w: u32, new_h: u32, scaler: Scaler) -> FiguraResult<Surface> {
    if new_w == 0 || new_h == 0 {
        return Err(FiguraError::validation(format!(
            "cannot scale to {new_w}x{new_h}"
        )));
    }
    let (w, h) = (src.width(), src.height());
    if w == 0 || h == 0 {
        return Err(FiguraError::validation("cannot scale an empty surface"));
    }
    if (w, h) == (new_w, new_h) {
        return Ok(src.clone());
    }

    let integer_ratio = (new_w % w == 0 && new_h % h == 0) || (w % new_w == 0 && h % new_h == 0);
    let scaler = if integer_ratio { Scaler::Nearest } else { scaler };

    let mut out = Surface::with_desc(SurfaceDesc {
        width: new_w,
        height: new_h,
        format: src.format(),
    });
    let sx = f64::from(w) / f64::from(new_w);
    let sy = f64::from(h) / f64::from(new_h);

    for y in 0..new_h as i32 {
        for x in 0..new_w as i32 {
            let c = match scaler {
                Scaler::Nearest => {
                    let px = ((2 * i64::from(x) + 1) * i64::from(w) / (2 * i64::from(new_w))) as i32;
                    let py = ((2 * i64::from(y) + 1) * i64::from(h) / (2 * i64::from(new_h))) as i32;
                    src.pixel(px, py)
                }
                Scaler::Bilinear => {
                    let fx = (f64::from(x) + 0.5) * sx - 0.5;
                    let fy = (f64::from(y) + 0.5) * sy - 0.5;
                    sample_bilinear(src, fx, fy)
                }
                Scaler::Bicubic => {
                    let fx = (f64::from(x) + 0.5) * sx - 0.5;
                    let fy = (f64::from(y) + 0.5) * sy - 0.5;
                    sample_bicubic(src, fx, fy)
                }
            };
            out.set_pixel(x, y, c);
        }
    }
    Ok(out)
}

/// Bilinear sample at fractional `(fx, fy)`, clamped to the surface.
///
/// Weights are 8-bit fixed point and the taps are alpha-weighted.
pub(crate) fn sample_bilinear(src: &Surface, fx: f64, fy: f64) -> Color {
    let max_x = f64::from(src.width().saturating_sub(1));
    let max_y = f64::from(src.height().saturating_sub(1));
    let fx = fx.clamp(0.0, max_x);
    let fy = fy.clamp(0.0, max_y);

    let x0 = fx.floor() as i32;
    let y0 = fy.floor() as i32;
    let x1 = (x0 + 1).min(max_x as i32);
    let y1 = (y0 + 1).min(max_y as i32);
    let wx = ((fx - f64::from(x0)) * 256.0).round() as u32;
    let wy = ((fy - f64::from(y0)) * 256.0).round() as u32;

    let taps = [
        (src.pixel(x0, y0), (256 - wx) * (256 - wy)),
        (src.pixel(x1, y0), wx * (256 - wy)),
        (src.pixel(x0, y1), (256 - wx) * wy),
        (src.pixel(x1, y1), wx * wy),
    ];
    weighted(taps.iter().map(|&(c, w)| (c, f64::from(w))), 65536.0)
}

fn catmull_rom(t: f64) -> f64 {
    let t = t.abs();
    if t < 1.0 {
        1.5 * t * t * t - 2.5 * t * t + 1.0
    } else if t < 2.0 {
        -0.5 * t * t * t + 2.5 * t * t - 4.0 * t + 2.0
    } else {
        0.0
    }
}

fn sample_bicubic(src: &Surface, fx: f64, fy: f64) -> Color {
    let max_x = src.width() as i32 - 1;
    let max_y = src.height() as i32 - 1;
    let x0 = fx.floor() as i32;
    let y0 = fy.floor() as i32;

    let mut taps = [(Color::TRANSPARENT, 0.0); 16];
    let mut total = 0.0;
    for (j, dy) in (-1..=2).enumerate() {
        let wy = catmull_rom(fy - f64::from(y0 + dy));
        for (i, dx) in (-1..=2).enumerate() {
            let wxy = catmull_rom(fx - f64::from(x0 + dx)) * wy;
            let c = src.pixel((x0 + dx).clamp(0, max_x), (y0 + dy).clamp(0, max_y));
            taps[j * 4 + i] = (c, wxy);
            total += wxy;
        }
    }
    weighted(taps.into_iter(), total)
}

// Alpha-weighted average; color channels are divided by the accumulated alpha.
pub(crate) fn weighted(taps: impl Iterator<Item = (Color, f64)>, total: f64) -> Color {
    if total <= 0.0 {
        return Color::TRANSPARENT;
    }
    let mut acc = [0.0f64; 4];
    for (c, w) in taps {
        let a = f64::from(c.a) * w;
        acc[0] += f64::from(c.r) * a;
        acc[1] += f64::from(c.g) * a;
        acc[2] += f64::from(c.b) * a;
        acc[3] += a;
    }
    if acc[3] <= 0.0 {
        return Color::TRANSPARENT;
    }
    let ch = |v: f64| v.round().clamp(0.0, 255.0) as u8;
    Color::rgba(
        ch(acc[0] / acc[3]),
        ch(acc[1] / acc[3]),
        ch(acc[2] / acc[3]),
        ch(acc[3] / total),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/transform/scale.rs"]
mod tests;

use crate::foundation::core::Color;
use crate::foundation::math::{from_unit, mul_div255_u8, to_unit};

/// Per-pixel compositing mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum BlendMode {
    /// Source replaces destination, alpha included.
    Replace,
    /// Alpha-weighted source-over.
    #[default]
    Normal,
    /// `s * d`.
    Multiply,
    /// `s + d - s * d`.
    Screen,
    /// Hard light with source and destination swapped.
    Overlay,
    /// `min(s, d)`.
    Darken,
    /// `max(s, d)`.
    Lighten,
    /// Brighten destination by source.
    ColorDodge,
    /// Darken destination by source.
    ColorBurn,
    /// Multiply or screen depending on source.
    HardLight,
    /// Soft variant of hard light.
    SoftLight,
    /// `|d - s|`.
    Difference,
    /// `d + s - 2 * d * s`.
    Exclusion,
    /// Saturating add.
    Add,
    /// Saturating `d - s`.
    Subtract,
}

/// How a mask region writes its configured color into the destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum RegionPolicy {
    /// Leave the destination untouched.
    Keep,
    /// Keep destination color, replace its alpha.
    AlphaOnly,
    /// Write the configured color and alpha outright.
    Replace,
    /// Blend the configured color (with its alpha) using the mode.
    Computed(BlendMode),
}

/// Composite `src` over `dst` with `mode`.
pub fn blend_pixel(dst: Color, src: Color, mode: BlendMode) -> Color {
    match mode {
        BlendMode::Replace => src,
        BlendMode::Normal => source_over(dst, src),
        other => match separable_fn(other) {
            Some(f) => blend_separable(dst, src, f),
            None => source_over(dst, src),
        },
    }
}

/// Apply a mask region policy with the region's color and effective alpha.
pub fn apply_region(dst: Color, color: Color, alpha: u8, policy: RegionPolicy) -> Color {
    match policy {
        RegionPolicy::Keep => dst,
        RegionPolicy::AlphaOnly => dst.with_alpha(alpha),
        RegionPolicy::Replace => color.with_alpha(alpha),
        RegionPolicy::Computed(mode) => blend_pixel(dst, color.with_alpha(alpha), mode),
    }
}

/// Pick the separable blend kernel once per operation.
pub(crate) fn separable_fn(mode: BlendMode) -> Option<fn(f32, f32) -> f32> {
    let f: fn(f32, f32) -> f32 = match mode {
        BlendMode::Replace | BlendMode::Normal => return None,
        BlendMode::Multiply => |s: f32, d: f32| s * d,
        BlendMode::Screen => |s: f32, d: f32| s + d - s * d,
        BlendMode::Overlay => |s: f32, d: f32| {
            if d <= 0.5 {
                2.0 * s * d
            } else {
                1.0 - 2.0 * (1.0 - s) * (1.0 - d)
            }
        },
        BlendMode::Darken => |s: f32, d: f32| s.min(d),
        BlendMode::Lighten => |s: f32, d: f32| s.max(d),
        BlendMode::ColorDodge => |s: f32, d: f32| {
            if s >= 1.0 {
                1.0
            } else {
                (d / (1.0 - s)).min(1.0)
            }
        },
        BlendMode::ColorBurn => |s: f32, d: f32| {
            if s <= 0.0 {
                0.0
            } else {
                1.0 - ((1.0 - d) / s).min(1.0)
            }
        },
        BlendMode::HardLight => |s: f32, d: f32| {
            if s <= 0.5 {
                2.0 * s * d
            } else {
                1.0 - 2.0 * (1.0 - s) * (1.0 - d)
            }
        },
        BlendMode::SoftLight => |s: f32, d: f32| {
            if s <= 0.5 {
                d - (1.0 - 2.0 * s) * d * (1.0 - d)
            } else {
                let g = if d <= 0.25 {
                    ((16.0 * d - 12.0) * d + 4.0) * d
                } else {
                    d.sqrt()
                };
                d + (2.0 * s - 1.0) * (g - d)
            }
        },
        BlendMode::Difference => |s: f32, d: f32| (d - s).abs(),
        BlendMode::Exclusion => |s: f32, d: f32| d + s - 2.0 * d * s,
        BlendMode::Add => |s: f32, d: f32| (s + d).min(1.0),
        BlendMode::Subtract => |s: f32, d: f32| (d - s).max(0.0),
    };
    Some(f)
}

fn source_over(dst: Color, src: Color) -> Color {
    if src.a == 0 {
        return dst;
    }
    if src.a == 255 || dst.a == 0 {
        return src;
    }

    let sa = u32::from(src.a);
    let da = u32::from(mul_div255_u8(u16::from(dst.a), 255 - u16::from(src.a)));
    let out_a = sa + da;

    let mix = |s: u8, d: u8| -> u8 {
        let v = (u32::from(s) * sa + u32::from(d) * da + out_a / 2) / out_a;
        v.min(255) as u8
    };

    Color::rgba(
        mix(src.r, dst.r),
        mix(src.g, dst.g),
        mix(src.b, dst.b),
        out_a.min(255) as u8,
    )
}

#[inline(always)]
pub(crate) fn blend_separable<F>(dst: Color, src: Color, blend_fn: F) -> Color
where
    F: Fn(f32, f32) -> f32,
{
    if src.a == 0 {
        return dst;
    }

    // Straight-alpha source-over with the blend term weighted by the overlap:
    // co = sa*(1-da)*sc + sa*da*B(sc,dc) + (1-sa)*da*dc
    let sa = to_unit(src.a);
    let da = to_unit(dst.a);
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Color::TRANSPARENT;
    }

    let channel = |s: u8, d: u8| -> u8 {
        let sc = to_unit(s);
        let dc = to_unit(d);
        let b = blend_fn(sc, dc).clamp(0.0, 1.0);
        let co = sa * (1.0 - da) * sc + sa * da * b + (1.0 - sa) * da * dc;
        from_unit(co / out_a)
    };

    Color::rgba(
        channel(src.r, dst.r),
        channel(src.g, dst.g),
        channel(src.b, dst.b),
        from_unit(out_a),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blend.rs"]
mod tests;

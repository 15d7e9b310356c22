use crate::effects::blend::blend_pixel;
use crate::foundation::core::{Color, PixelRect, Side};
use crate::foundation::error::FiguraResult;
use crate::foundation::math::{lerp_u8, mul_div255_u8};
use crate::model::filter::{Filter, FilterKind};
use crate::render::surface::Surface;
use crate::transform::scale::{Scaler, scale};

/// Run every link of `filter` over `region` of `surface`, head first.
///
/// The region is clipped to the surface; neighbourhood filters only look at
/// pixels inside it.
#[tracing::instrument(level = "trace", skip(surface, filter), fields(links = filter.link_count()))]
pub fn apply_filter_chain(
    surface: &mut Surface,
    region: PixelRect,
    filter: &Filter,
) -> FiguraResult<()> {
    let region = region.intersect(surface.bounds());
    if region.is_empty() {
        return Ok(());
    }
    for kind in filter.iter() {
        apply_filter(surface, region, kind)?;
    }
    Ok(())
}

fn map_pixels(
    surface: &mut Surface,
    region: PixelRect,
    mut f: impl FnMut(i32, i32, Color) -> Color,
) {
    for y in region.y..region.bottom() {
        for x in region.x..region.right() {
            let c = surface.pixel(x, y);
            surface.set_pixel(x, y, f(x, y, c));
        }
    }
}

fn apply_filter(surface: &mut Surface, region: PixelRect, kind: &FilterKind) -> FiguraResult<()> {
    match *kind {
        FilterKind::Grayscale => map_pixels(surface, region, |_, _, c| {
            let l = c.luma();
            Color::rgba(l, l, l, c.a)
        }),
        FilterKind::Sepia => map_pixels(surface, region, |_, _, c| {
            let (r, g, b) = (f32::from(c.r), f32::from(c.g), f32::from(c.b));
            let ch = |v: f32| v.round().clamp(0.0, 255.0) as u8;
            Color::rgba(
                ch(0.393 * r + 0.769 * g + 0.189 * b),
                ch(0.349 * r + 0.686 * g + 0.168 * b),
                ch(0.272 * r + 0.534 * g + 0.131 * b),
                c.a,
            )
        }),
        FilterKind::AlphaSet(a) => map_pixels(surface, region, |_, _, c| c.with_alpha(a)),
        FilterKind::AlphaToColor(to) => map_pixels(surface, region, |_, _, c| {
            if c.a == 0 { c } else { to.with_alpha(c.a) }
        }),
        FilterKind::Directional { side, from, to } => {
            let (len, vertical) = match side {
                Side::Top | Side::Bottom => (region.h, true),
                Side::Left | Side::Right => (region.w, false),
            };
            map_pixels(surface, region, |x, y, c| {
                let pos = if vertical { y - region.y } else { x - region.x };
                let pos = match side {
                    Side::Top | Side::Left => pos,
                    Side::Bottom | Side::Right => len - 1 - pos,
                };
                let t = if len <= 1 { 0 } else { pos * 255 / (len - 1) };
                let m = lerp_u8(from, to, t as u8);
                c.with_alpha(mul_div255_u8(u16::from(c.a), u16::from(m)))
            });
        }
        FilterKind::TouchAdjacency { color } => {
            let snap = surface.copy_region(region);
            let visible = |x: i32, y: i32| snap.pixel(x - region.x, y - region.y).a > 0;
            map_pixels(surface, region, |x, y, c| {
                let touching = visible(x - 1, y)
                    || visible(x + 1, y)
                    || visible(x, y - 1)
                    || visible(x, y + 1);
                if c.a == 0 && touching {
                    color
                } else {
                    c
                }
            });
        }
        FilterKind::Stick { dx, dy, color } => {
            let snap = surface.copy_region(region);
            map_pixels(surface, region, |x, y, c| {
                let src = snap.pixel(x - dx - region.x, y - dy - region.y);
                if c.a == 0 && src.a > 0 { color } else { c }
            });
        }
        FilterKind::HorizontalAverage { radius } => {
            if radius == 0 {
                return Ok(());
            }
            let r = radius.min(i32::MAX as u32) as i32;
            let snap = surface.copy_region(region);
            map_pixels(surface, region, |x, y, _| {
                let lx = x - region.x;
                let ly = y - region.y;
                let x0 = (lx - r).max(0);
                let x1 = (lx + r).min(region.w - 1);
                let mut acc = [0u32; 4];
                for sx in x0..=x1 {
                    let p = snap.pixel(sx, ly).to_array();
                    for (a, v) in acc.iter_mut().zip(p) {
                        *a += u32::from(v);
                    }
                }
                let n = (x1 - x0 + 1) as u32;
                Color::from_array(acc.map(|a| ((a + n / 2) / n) as u8))
            });
        }
        FilterKind::ChannelModify { mul, add } => map_pixels(surface, region, |_, _, c| {
            let px = c.to_array();
            let mut out = [0u8; 4];
            for i in 0..4 {
                let v = i32::from(px[i]) * i32::from(mul[i]) / 256 + i32::from(add[i]);
                out[i] = v.clamp(0, 255) as u8;
            }
            Color::from_array(out)
        }),
        FilterKind::SelfBlend { dx, dy, mode } => {
            let snap = surface.copy_region(region);
            map_pixels(surface, region, |x, y, c| {
                let sx = x - dx - region.x;
                let sy = y - dy - region.y;
                if sx < 0 || sy < 0 || sx >= region.w || sy >= region.h {
                    return c;
                }
                blend_pixel(c, snap.pixel(sx, sy), mode)
            });
        }
        FilterKind::BilinearSmooth { factor } => {
            if factor <= 1 {
                return Ok(());
            }
            let (w, h) = (region.w as u32, region.h as u32);
            let snap = surface.copy_region(region);
            let small = scale(&snap, (w / factor).max(1), (h / factor).max(1), Scaler::Bilinear)?;
            let back = scale(&small, w, h, Scaler::Bilinear)?;
            map_pixels(surface, region, |x, y, _| back.pixel(x - region.x, y - region.y));
        }
        FilterKind::PixelRepeat { size } => {
            if size <= 1 {
                return Ok(());
            }
            let s = size.min(i32::MAX as u32) as i32;
            let snap = surface.copy_region(region);
            map_pixels(surface, region, |x, y, _| {
                let lx = (x - region.x) / s * s;
                let ly = (y - region.y) / s * s;
                snap.pixel(lx, ly)
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/filters.rs"]
mod tests;

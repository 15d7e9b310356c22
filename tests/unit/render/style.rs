use super::*;
use crate::animation::ease::Ease;
use crate::foundation::core::{Color, Tblr};
use crate::model::figure::FigureFlags;
use crate::model::filter::{Filter, FilterKind};
use crate::model::style::StyleAnimation;
use crate::render::painter::PainterOpts;

const RED: Color = Color::rgb(255, 0, 0);
const GREEN: Color = Color::rgb(0, 255, 0);
const BLUE: Color = Color::rgb(0, 0, 255);

fn boxed() -> Style {
    Style::new()
        .with_margin(Tblr::uniform(1))
        .with_border(Tblr::uniform(2))
        .with_padding(Tblr::uniform(3))
}

fn painter_at(pool: &SurfacePool, time_ms: u64) -> Painter<'_> {
    Painter::new(pool).with_opts(PainterOpts {
        time_ms,
        ..PainterOpts::default()
    })
}

#[test]
fn box_areas_nest() {
    let a = BoxAreas::new(PixelRect::new(0, 0, 20, 20), &boxed());
    assert_eq!(a.margin, PixelRect::new(0, 0, 20, 20));
    assert_eq!(a.border, PixelRect::new(1, 1, 18, 18));
    assert_eq!(a.padding, PixelRect::new(3, 3, 14, 14));
    assert_eq!(a.content, PixelRect::new(6, 6, 8, 8));
    assert_eq!(a.get(Area::from_bits(2)), a.content);
}

#[test]
fn animation_state_eases_fade_and_translate() {
    let style = Style::new()
        .with_animation(StyleAnimation::new(
            AnimationKind::Fade { from: 0, to: 255 },
            100,
            Ease::Linear,
        ))
        .unwrap()
        .with_animation(StyleAnimation::new(
            AnimationKind::Translate { dx: 10, dy: -4 },
            100,
            Ease::Linear,
        ))
        .unwrap();
    let s = AnimationState::at(&style, 50);
    assert_eq!((s.alpha, s.dx, s.dy), (128, 5, -2));
    assert_eq!(AnimationState::at(&style, 1_000).alpha, 255);
    assert_eq!(AnimationState::at(&Style::new(), 0).alpha, 255);
}

#[test]
fn layers_paint_backgrounds_content_then_foregrounds() {
    let pool = SurfacePool::default();
    let mut p = Painter::new(&pool);
    let style = boxed()
        .with_background(Layer::new(Figure::rectangle(RED), Area::Margin))
        .unwrap()
        .with_content(Figure::rectangle(BLUE))
        .with_foreground(Layer::new(
            Figure::rectangle(GREEN).with_anchor(crate::model::anchor::Anchor::centered(2, 2)),
            Area::Content,
        ))
        .unwrap();
    let mut s = Surface::new(20, 20);
    let r = s.bounds();
    p.draw_style(&mut s, r, &style).unwrap();
    assert_eq!(s.pixel(0, 0), RED);
    assert_eq!(s.pixel(6, 6), BLUE);
    assert_eq!(s.pixel(10, 10), GREEN);
    assert_eq!(pool.stats().alloc_surfaces, 0);
}

#[test]
fn style_filters_run_in_scratch() {
    let pool = SurfacePool::default();
    let mut p = Painter::new(&pool);
    let style = Style::new()
        .with_content(Figure::rectangle(RED))
        .with_filter(Filter::new(FilterKind::AlphaSet(100)))
        .unwrap();
    let mut s = Surface::new(4, 4);
    let r = s.bounds();
    p.draw_style(&mut s, r, &style).unwrap();
    assert_eq!(s.pixel(2, 2), RED.with_alpha(100));
    let stats = pool.stats();
    assert_eq!(stats.alloc_surfaces, 1);
    assert_eq!(stats.outstanding, 0);
}

#[test]
fn fade_scales_alpha() {
    let pool = SurfacePool::default();
    let mut p = painter_at(&pool, 50);
    let style = Style::new()
        .with_content(Figure::rectangle(RED))
        .with_animation(StyleAnimation::new(
            AnimationKind::Fade { from: 255, to: 0 },
            100,
            Ease::Linear,
        ))
        .unwrap();
    let mut s = Surface::new(2, 2);
    let r = s.bounds();
    p.draw_style(&mut s, r, &style).unwrap();
    assert_eq!(s.pixel(0, 0), RED.with_alpha(128));
}

#[test]
fn translate_offsets_the_whole_style() {
    let pool = SurfacePool::default();
    let mut p = painter_at(&pool, 0);
    let style = Style::new()
        .with_content(Figure::rectangle(RED))
        .with_animation(StyleAnimation::new(
            AnimationKind::Translate { dx: 2, dy: 0 },
            0,
            Ease::Linear,
        ))
        .unwrap();
    let mut s = Surface::new(6, 2);
    p.draw_style(&mut s, PixelRect::new(0, 0, 2, 2), &style)
        .unwrap();
    assert_eq!(s.pixel(1, 0), Color::TRANSPARENT);
    assert_eq!(s.pixel(2, 0), RED);
    assert_eq!(s.pixel(4, 0), Color::TRANSPARENT);
}

#[test]
fn free_draw_style_flushes_postponed_layers() {
    let style = Style::new().with_content(Figure::rectangle(RED).with_flag(FigureFlags::POSTPONE));
    let mut s = Surface::new(2, 2);
    let r = s.bounds();
    draw_style(&mut s, r, &style).unwrap();
    assert_eq!(s.pixel(1, 1), RED);
}

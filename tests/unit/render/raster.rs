use super::*;
use crate::model::gradient::{Gradient, GradientShape};

const RED: Color = Color::rgb(255, 0, 0);

fn painted(s: &Surface) -> usize {
    (0..s.height() as i32)
        .flat_map(|y| (0..s.width() as i32).map(move |x| (x, y)))
        .filter(|&(x, y)| s.pixel(x, y).a > 0)
        .count()
}

fn with_canvas(w: u32, h: u32, fig: &Figure, f: impl FnOnce(&mut Canvas<'_>)) -> Surface {
    let mut s = Surface::new(w, h);
    let rect = s.bounds();
    let mut canvas = Canvas::new(&mut s, rect, fig);
    f(&mut canvas);
    s
}

#[test]
fn write_mode_follows_flags() {
    let f = Figure::rectangle(RED);
    assert_eq!(write_mode(&f), BlendMode::Normal);
    assert_eq!(write_mode(&f.clone().with_perf(PerfFlags::OPAQUE)), BlendMode::Replace);
    assert_eq!(write_mode(&f.without_flag(FigureFlags::ALPHA_BLEND)), BlendMode::Replace);
}

#[test]
fn filled_rectangle_covers_everything() {
    let fig = Figure::rectangle(RED);
    let s = with_canvas(5, 4, &fig, |c| rectangle(c, &Paint::Solid(RED), true, 0, 0));
    assert_eq!(painted(&s), 20);
}

#[test]
fn stroked_rectangle_leaves_hole() {
    let fig = Figure::rectangle(RED);
    let s = with_canvas(6, 6, &fig, |c| rectangle(c, &Paint::Solid(RED), false, 0, 1));
    assert_eq!(painted(&s), 36 - 16);
    assert_eq!(s.pixel(2, 2), Color::TRANSPARENT);
}

#[test]
fn rounded_rectangle_cuts_corners() {
    let fig = Figure::rectangle(RED);
    let s = with_canvas(10, 10, &fig, |c| rectangle(c, &Paint::Solid(RED), true, 4, 0));
    assert_eq!(s.pixel(0, 0), Color::TRANSPARENT);
    assert_eq!(s.pixel(5, 0), RED);
    assert_eq!(s.pixel(5, 5), RED);
}

#[test]
fn triangle_up_has_apex_on_top() {
    let fig = Figure::rectangle(RED);
    let s = with_canvas(9, 9, &fig, |c| triangle(c, &Paint::Solid(RED), true, Direction::Up));
    assert_eq!(s.pixel(0, 0), Color::TRANSPARENT);
    assert_eq!(s.pixel(4, 1), RED);
    assert_eq!(s.pixel(0, 8), RED);
}

#[test]
fn flip_v_mirrors_triangle() {
    let fig = Figure::rectangle(RED).with_flag(FigureFlags::FLIP_V);
    let s = with_canvas(9, 9, &fig, |c| triangle(c, &Paint::Solid(RED), true, Direction::Up));
    assert_eq!(s.pixel(0, 0), RED);
    assert_eq!(s.pixel(0, 8), Color::TRANSPARENT);
}

#[test]
fn half_arc_paints_upper_half() {
    let fig = Figure::ellipse(RED);
    let e = EllipseFigure {
        start_deg: 0,
        sweep_deg: 180,
        stroke: 0,
    };
    let s = with_canvas(10, 10, &fig, |c| ellipse(c, &Paint::Solid(RED), true, &e));
    assert_eq!(s.pixel(5, 2), RED);
    assert_eq!(s.pixel(5, 8), Color::TRANSPARENT);
}

#[test]
fn ring_leaves_centre_empty() {
    let fig = Figure::ellipse(RED);
    let e = EllipseFigure {
        start_deg: 0,
        sweep_deg: 360,
        stroke: 2,
    };
    let s = with_canvas(12, 12, &fig, |c| ellipse(c, &Paint::Solid(RED), true, &e));
    assert_eq!(s.pixel(6, 6), Color::TRANSPARENT);
    assert_eq!(s.pixel(6, 0), RED);
}

#[test]
fn horizontal_line_spans_width() {
    let fig = Figure::rectangle(RED);
    let l = LineFigure {
        from: (0, 500),
        to: (1000, 500),
        thickness: 1,
    };
    let s = with_canvas(8, 5, &fig, |c| line(c, &Paint::Solid(RED), &l));
    assert_eq!(painted(&s), 8);
    assert_eq!(s.pixel(7, 2), RED);
}

#[test]
fn lines_and_grid_place_bands() {
    let fig = Figure::rectangle(RED);
    let l = LinesFigure {
        count: 3,
        orientation: Orientation::Horizontal,
        thickness: 1,
    };
    let s = with_canvas(4, 9, &fig, |c| lines(c, &Paint::Solid(RED), &l));
    assert_eq!(painted(&s), 12);
    assert_eq!(s.pixel(0, 0), RED);
    assert_eq!(s.pixel(0, 4), RED);
    assert_eq!(s.pixel(0, 8), RED);

    let g = GridFigure {
        cols: 2,
        rows: 2,
        thickness: 1,
    };
    let s = with_canvas(6, 6, &fig, |c| grid(c, &Paint::Solid(RED), &g));
    assert_eq!(painted(&s), 11);
}

#[test]
fn cross_bars_overlap_once() {
    let fig = Figure::rectangle(RED.with_alpha(128));
    let s = with_canvas(5, 5, &fig, |c| cross(c, &Paint::Solid(RED.with_alpha(128)), 1));
    assert_eq!(painted(&s), 9);
    assert_eq!(s.pixel(2, 2), s.pixel(0, 2));
}

#[test]
fn checkerboard_alternates_cells() {
    let fig = Figure::rectangle(RED);
    let c = CheckerFigure {
        cell: 2,
        alternate: Color::WHITE,
    };
    let s = with_canvas(4, 4, &fig, |cv| checkerboard(cv, &Paint::Solid(RED), &c));
    assert_eq!(s.pixel(1, 1), RED);
    assert_eq!(s.pixel(2, 0), Color::WHITE);
    assert_eq!(s.pixel(3, 3), RED);
}

#[test]
fn superlines_hatch_by_spacing() {
    let fig = Figure::rectangle(RED);
    let sl = SuperlinesFigure {
        spacing: 4,
        thickness: 1,
        rising: true,
    };
    let s = with_canvas(8, 8, &fig, |c| superlines(c, &Paint::Solid(RED), &sl));
    assert_eq!(s.pixel(0, 0), RED);
    assert_eq!(s.pixel(3, 1), RED);
    assert_eq!(s.pixel(1, 0), Color::TRANSPARENT);
    assert_eq!(painted(&s), 16);
}

#[test]
fn pixel_field_is_deterministic_and_density_bound() {
    let fig = Figure::rectangle(RED);
    let p = PixelFieldFigure {
        seed: 7,
        density: 128,
        palette: vec![],
    };
    let a = with_canvas(16, 16, &fig, |c| pixel_field(c, &Paint::Solid(RED), &p));
    let b = with_canvas(16, 16, &fig, |c| pixel_field(c, &Paint::Solid(RED), &p));
    assert_eq!(a, b);
    let n = painted(&a);
    assert!(n > 64 && n < 192, "{n}");

    let none = PixelFieldFigure { density: 0, ..p };
    let s = with_canvas(16, 16, &fig, |c| pixel_field(c, &Paint::Solid(RED), &none));
    assert_eq!(painted(&s), 0);
}

#[test]
fn subdivision_covers_rect_with_palette() {
    let fig = Figure::rectangle(RED);
    let sd = SubdivisionFigure {
        depth: 4,
        seed: 3,
        palette: vec![Color::WHITE, Color::BLACK],
    };
    let s = with_canvas(16, 12, &fig, |c| subdivision(c, &Paint::Solid(RED), &sd));
    assert_eq!(painted(&s), 16 * 12);
}

#[test]
fn losange_touches_edge_midpoints() {
    let fig = Figure::rectangle(RED);
    let s = with_canvas(9, 9, &fig, |c| losange(c, &Paint::Solid(RED), true));
    assert_eq!(s.pixel(4, 0), RED);
    assert_eq!(s.pixel(0, 4), RED);
    assert_eq!(s.pixel(0, 0), Color::TRANSPARENT);
}

#[test]
fn gradient_paint_follows_shape() {
    let fig = Figure::rectangle(RED).with_gradient(
        Gradient::new(Color::rgb(0, 0, 255), GradientShape::Top).with_steps(2),
    );
    let rect = PixelRect::new(0, 0, 2, 4);
    let paint = Paint::for_figure(&fig, rect, 0, 0);
    assert_eq!(paint.at(0, 0), Some(RED));
    assert_eq!(paint.at(0, 3), Some(Color::rgb(0, 0, 255)));
    let shifted = Paint::for_figure(&fig, rect, 0, 1);
    assert_eq!(shifted.at(0, 0), Some(Color::rgb(0, 0, 255)));
}

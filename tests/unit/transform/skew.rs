use super::*;

fn gradient_surface(w: u32, h: u32) -> Surface {
    let mut s = Surface::new(w, h);
    for y in 0..h as i32 {
        for x in 0..w as i32 {
            s.set_pixel(x, y, Color::rgba((x * 30) as u8, (y * 40) as u8, 7, 255));
        }
    }
    s
}

fn rect_corners(w: f64, h: f64) -> [Point; 4] {
    [
        Point::new(0.0, 0.0),
        Point::new(w, 0.0),
        Point::new(w, h),
        Point::new(0.0, h),
    ]
}

#[test]
fn identity_reproduces_source_exactly() {
    let src = gradient_surface(6, 5);
    for sampling in [Sampling::Nearest, Sampling::Bilinear] {
        let skewer = Skewer {
            sampling,
            edge: EdgePolicy::Clamp,
        };
        let out = skew(&src, rect_corners(6.0, 5.0), skewer).unwrap();
        assert_eq!(out, src, "{sampling:?}");
    }
}

#[test]
fn offset_quad_uses_its_bounding_box() {
    let src = gradient_surface(4, 4);
    let corners = rect_corners(4.0, 4.0).map(|p| Point::new(p.x + 10.0, p.y + 3.0));
    let out = skew(&src, corners, Skewer::default()).unwrap();
    assert_eq!((out.width(), out.height()), (4, 4));
    assert_eq!(out.pixel(2, 1), src.pixel(2, 1));
}

#[test]
fn horizontal_mirror_through_corner_order() {
    let src = gradient_surface(4, 2);
    let corners = [
        Point::new(4.0, 0.0),
        Point::new(0.0, 0.0),
        Point::new(0.0, 2.0),
        Point::new(4.0, 2.0),
    ];
    let skewer = Skewer {
        sampling: Sampling::Nearest,
        edge: EdgePolicy::Clamp,
    };
    let out = skew(&src, corners, skewer).unwrap();
    assert_eq!(out.pixel(0, 0), src.pixel(3, 0));
    assert_eq!(out.pixel(3, 1), src.pixel(0, 1));
}

#[test]
fn degenerate_quad_is_rejected() {
    let src = gradient_surface(2, 2);
    let line = [
        Point::new(0.0, 0.0),
        Point::new(5.0, 5.0),
        Point::new(10.0, 10.0),
        Point::new(2.0, 2.0),
    ];
    assert!(matches!(
        skew(&src, line, Skewer::default()),
        Err(FiguraError::Validation(_))
    ));
    let flat = [Point::new(0.0, 1.0); 4];
    assert!(skew(&src, flat, Skewer::default()).is_err());
}

#[test]
fn trapezoid_leaves_outside_to_edge_policy() {
    let mut src = Surface::new(4, 4);
    src.fill(Color::WHITE);
    let corners = [
        Point::new(3.0, 0.0),
        Point::new(5.0, 0.0),
        Point::new(8.0, 8.0),
        Point::new(0.0, 8.0),
    ];
    let fill = Color::rgb(1, 2, 3);
    let out = skew(
        &src,
        corners,
        Skewer {
            sampling: Sampling::Nearest,
            edge: EdgePolicy::Fill(fill),
        },
    )
    .unwrap();
    assert_eq!((out.width(), out.height()), (8, 8));
    assert_eq!(out.pixel(0, 0), fill);
    assert_eq!(out.pixel(4, 6), Color::WHITE);
}

#[test]
fn edge_policies_resolve_out_of_range_taps() {
    let src = gradient_surface(3, 3);
    assert_eq!(fetch(&src, -1, 0, EdgePolicy::Zero), Color::TRANSPARENT);
    assert_eq!(fetch(&src, -1, 0, EdgePolicy::Clamp), src.pixel(0, 0));
    assert_eq!(fetch(&src, 4, 1, EdgePolicy::Wrap), src.pixel(1, 1));
    assert_eq!(
        fetch(&src, 1, 9, EdgePolicy::Transparent),
        src.pixel(1, 2).with_alpha(0)
    );
}

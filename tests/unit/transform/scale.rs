use super::*;

fn checker(n: u32) -> Surface {
    let mut s = Surface::new(n, n);
    for y in 0..n as i32 {
        for x in 0..n as i32 {
            let c = if (x + y) % 2 == 0 { Color::WHITE } else { Color::BLACK };
            s.set_pixel(x, y, c);
        }
    }
    s
}

fn close(a: Color, b: Color, tol: u8) -> bool {
    a.to_array()
        .iter()
        .zip(b.to_array())
        .all(|(&x, y)| x.abs_diff(y) <= tol)
}

#[test]
fn zero_target_is_rejected() {
    let s = Surface::new(2, 2);
    assert!(matches!(
        scale(&s, 0, 3, Scaler::Bilinear),
        Err(FiguraError::Validation(_))
    ));
}

#[test]
fn same_size_is_a_copy() {
    let s = checker(3);
    assert_eq!(scale(&s, 3, 3, Scaler::Bicubic).unwrap(), s);
}

#[test]
fn integer_upscale_replicates_pixels() {
    let s = checker(2);
    let up = scale(&s, 4, 4, Scaler::Bilinear).unwrap();
    assert_eq!(up.pixel(0, 0), Color::WHITE);
    assert_eq!(up.pixel(1, 1), Color::WHITE);
    assert_eq!(up.pixel(2, 0), Color::BLACK);
    assert_eq!(up.pixel(3, 3), Color::WHITE);
}

#[test]
fn checkerboard_round_trip_is_close() {
    let s = checker(4);
    for scaler in [Scaler::Nearest, Scaler::Bilinear, Scaler::Bicubic] {
        let up = scale(&s, 8, 8, scaler).unwrap();
        let back = scale(&up, 4, 4, scaler).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                assert!(close(back.pixel(x, y), s.pixel(x, y), 8), "{scaler:?} at {x},{y}");
            }
        }
    }
}

#[test]
fn bilinear_fractional_mixes_neighbours() {
    let mut s = Surface::new(2, 1);
    s.set_pixel(0, 0, Color::rgb(0, 0, 0));
    s.set_pixel(1, 0, Color::rgb(200, 200, 200));
    let out = scale(&s, 3, 1, Scaler::Bilinear).unwrap();
    assert_eq!(out.pixel(0, 0), Color::rgb(0, 0, 0));
    assert_eq!(out.pixel(1, 0), Color::rgb(100, 100, 100));
    assert_eq!(out.pixel(2, 0), Color::rgb(200, 200, 200));
}

#[test]
fn transparent_taps_do_not_darken() {
    let mut s = Surface::new(2, 1);
    s.set_pixel(1, 0, Color::rgb(200, 0, 0));
    let out = scale(&s, 3, 1, Scaler::Bilinear).unwrap();
    let mid = out.pixel(1, 0);
    assert_eq!((mid.r, mid.g, mid.b), (200, 0, 0));
    assert!(mid.a > 100 && mid.a < 155);
}

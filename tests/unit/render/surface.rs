use super::*;

#[test]
fn new_surface_is_transparent() {
    let s = Surface::new(3, 2);
    assert_eq!(s.data().len(), 24);
    assert!(s.data().iter().all(|&b| b == 0));
    assert_eq!(s.bounds(), PixelRect::new(0, 0, 3, 2));
}

#[test]
fn out_of_range_access_is_ignored() {
    let mut s = Surface::new(2, 2);
    s.set_pixel(-1, 0, Color::WHITE);
    s.set_pixel(2, 0, Color::WHITE);
    assert_eq!(s.pixel(5, 5), Color::TRANSPARENT);
    assert!(s.data().iter().all(|&b| b == 0));
}

#[test]
fn gray_surface_stores_luma() {
    let mut s = Surface::with_desc(SurfaceDesc {
        width: 1,
        height: 1,
        format: PixelFormat::Gray8,
    });
    s.set_pixel(0, 0, Color::WHITE);
    assert_eq!(s.data(), &[255]);
    assert_eq!(s.pixel(0, 0), Color::WHITE);
}

#[test]
fn rgba8_buffer_length_is_validated() {
    assert!(Surface::from_rgba8(2, 2, vec![0; 16]).is_ok());
    let err = Surface::from_rgba8(2, 2, vec![0; 15]).unwrap_err();
    assert!(matches!(err, FiguraError::Validation(_)));
}

#[test]
fn fill_rect_clips_to_bounds() {
    let mut s = Surface::new(4, 4);
    s.fill_rect(PixelRect::new(2, 2, 10, 10), Color::WHITE);
    assert_eq!(s.pixel(3, 3), Color::WHITE);
    assert_eq!(s.pixel(1, 1), Color::TRANSPARENT);
}

#[test]
fn copy_region_and_draw_round_trip() {
    let mut s = Surface::new(4, 4);
    s.set_pixel(1, 2, Color::rgb(10, 20, 30));
    let part = s.copy_region(PixelRect::new(1, 1, 2, 2));
    assert_eq!(part.pixel(0, 1), Color::rgb(10, 20, 30));

    let mut t = Surface::new(4, 4);
    t.draw(&part, 1, 1, BlendMode::Replace);
    assert_eq!(t, s);
}

#[test]
fn image_conversion_round_trips() {
    let mut s = Surface::new(2, 1);
    s.set_pixel(1, 0, Color::rgba(1, 2, 3, 4));
    let img = s.to_rgba_image().unwrap();
    assert_eq!(img.get_pixel(1, 0).0, [1, 2, 3, 4]);
    assert_eq!(Surface::from_rgba_image(&img), s);
}

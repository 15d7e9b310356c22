use super::*;
use crate::foundation::core::Color;

#[test]
fn area_selector_round_trips_two_bits() {
    for bits in 0..4u8 {
        assert_eq!(Area::from_bits(bits).bits(), bits);
    }
    assert_eq!(Area::from_bits(0b110), Area::Content);
    assert_eq!(Area::from_bits(1), Area::Border);
    assert_eq!(Area::from_bits(3), Area::Padding);
}

#[test]
fn layers_fill_slots_in_order() {
    let s = Style::new()
        .with_background(Layer::new(Figure::rectangle(Color::BLACK), Area::Margin))
        .unwrap()
        .with_background(Layer::new(Figure::rectangle(Color::WHITE), Area::Content))
        .unwrap();
    assert_eq!(s.backgrounds[0].as_ref().unwrap().area, Area::Margin);
    assert_eq!(s.backgrounds[1].as_ref().unwrap().area, Area::Content);
    assert!(s.backgrounds[2].is_none());
}

#[test]
fn full_slots_are_rejected() {
    let mut s = Style::new();
    for _ in 0..LAYER_SLOTS {
        s = s
            .with_foreground(Layer::new(Figure::empty(), Area::Margin))
            .unwrap();
    }
    let err = s
        .with_foreground(Layer::new(Figure::empty(), Area::Margin))
        .unwrap_err();
    assert!(matches!(err, FiguraError::Validation(_)));
}

#[test]
fn all_mask_selects_every_slot() {
    let m = StyleMergeMask::all();
    assert_eq!(m.backgrounds, 0b1111);
    assert_eq!(m.filters, 0b1_1111);
    assert_eq!(m.animations, 0b111);
    assert_eq!(StyleMergeMask::empty(), StyleMergeMask::default());
}

#[test]
fn style_serializes_as_plain_data() {
    let s = Style::new()
        .with_margin(Tblr::uniform(2))
        .with_content(Figure::rectangle(Color::rgb(1, 2, 3)));
    let json = serde_json::to_string(&s).unwrap();
    let back: Style = serde_json::from_str(&json).unwrap();
    assert_eq!(back, s);
}

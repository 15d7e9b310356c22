use super::*;
use crate::foundation::core::Tblr;
use crate::model::filter::FilterKind;
use crate::model::gradient::GradientShape;

#[test]
fn flag_helpers_set_and_clear_single_bits() {
    let f = FigureFlags::empty()
        .with(FigureFlags::CLIP)
        .with(FigureFlags::FLIP_H);
    assert!(f.contains(FigureFlags::CLIP));
    assert!(f.contains(FigureFlags::FLIP_H));
    assert!(!f.contains(FigureFlags::FLIP_V));
    assert_eq!(f.without(FigureFlags::CLIP), FigureFlags::FLIP_H);
    assert_eq!(f.bits(), (1 << 6) | (1 << 4));
}

#[test]
fn flag_constants_are_distinct_bits() {
    let all = [
        FigureFlags::POSTPONE,
        FigureFlags::FILLED,
        FigureFlags::BORDER_CORNERS,
        FigureFlags::ANIMATED,
        FigureFlags::FLIP_H,
        FigureFlags::FLIP_V,
        FigureFlags::CLIP,
        FigureFlags::ALPHA_BLEND,
    ];
    let mut acc = 0u8;
    for f in all {
        assert_eq!(f.bits().count_ones(), 1);
        assert_eq!(acc & f.bits(), 0);
        acc |= f.bits();
    }
    assert_eq!(acc, 0xFF);
}

#[test]
fn child_presence_follows_options() {
    let f = Figure::rectangle(Color::WHITE);
    assert!(!f.has_gradient() && !f.has_filter() && !f.has_mask() && !f.has_anchor());

    let f = f
        .with_gradient(Gradient::new(Color::BLACK, GradientShape::Top))
        .with_anchor(Anchor::centered(2, 2));
    assert!(f.has_gradient());
    assert!(f.has_anchor());
    assert!(!f.has_filter());
}

#[test]
fn tag_matches_kind() {
    assert_eq!(Figure::rectangle(Color::BLACK).tag(), KindTag::Rectangle);
    assert_eq!(Figure::ellipse(Color::BLACK).tag(), KindTag::Ellipse);
    assert_eq!(Figure::text(Color::BLACK, "x", 8).tag(), KindTag::Text);
    assert_eq!(
        Figure::border(Tblr::uniform(1), Figure::empty()).tag(),
        KindTag::Border
    );
    assert_eq!(FigureKind::Losange.tag(), KindTag::Losange);
}

#[test]
fn silhouette_strips_decoration() {
    let f = Figure::rectangle(Color::rgb(9, 9, 9))
        .with_flag(FigureFlags::ANIMATED | FigureFlags::POSTPONE)
        .with_gradient(Gradient::new(Color::WHITE, GradientShape::Square))
        .with_mask(Mask::clip())
        .with_child(Figure::ellipse(Color::WHITE));
    let s = f.silhouette();
    assert_eq!(s.color(), Color::BLACK);
    assert!(!s.flags().contains(FigureFlags::ANIMATED));
    assert!(!s.flags().contains(FigureFlags::POSTPONE));
    assert!(s.flags().contains(FigureFlags::FILLED));
    assert!(!s.has_gradient() && !s.has_mask());
    assert_eq!(s.children.len(), 1);
    assert_eq!(s.children[0].color(), Color::BLACK);
}

#[test]
fn silhouette_blackens_nested_figures() {
    let slot = Figure::rectangle(Color::WHITE).with_flag(FigureFlags::POSTPONE);
    let s = Figure::border(Tblr::uniform(1), slot).silhouette();
    let FigureKind::Border(b) = &s.kind else {
        panic!("kind changed");
    };
    let edge = b.edge.as_deref().unwrap();
    assert_eq!(edge.color(), Color::BLACK);
    assert!(!edge.flags().contains(FigureFlags::POSTPONE));

    let tile = Figure::ellipse(Color::WHITE).with_filter(Filter::new(FilterKind::Grayscale));
    let s = Figure::repeater(tile, 2, 2).silhouette();
    let FigureKind::Repeater(r) = &s.kind else {
        panic!("kind changed");
    };
    assert_eq!(r.tile.color(), Color::BLACK);
    assert!(!r.tile.has_filter());
}

#[test]
fn figure_serializes_as_plain_data() {
    let f = Figure::rounded_rectangle(Color::rgba(1, 2, 3, 4), 3)
        .with_child(Figure::triangle(Color::WHITE, Direction::Left));
    let json = serde_json::to_string(&f).unwrap();
    let back: Figure = serde_json::from_str(&json).unwrap();
    assert_eq!(back, f);
}

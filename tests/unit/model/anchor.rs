use super::*;

const PARENT: PixelRect = PixelRect::new(10, 20, 100, 50);

#[test]
fn default_anchor_is_incomplete_and_fills_parent() {
    let a = Anchor::default();
    assert!(a.is_incomplete());
    assert_eq!(AnchorResolver.resolve(&a, PARENT), PARENT);
}

#[test]
fn complete_anchor_is_not_incomplete() {
    assert!(!Anchor::centered(4, 4).is_incomplete());
    let mut a = Anchor::centered(4, 4);
    a.height = Dim::Unspecified;
    assert!(a.is_incomplete());
}

#[test]
fn center_places_box_in_middle() {
    let r = AnchorResolver.resolve(&Anchor::centered(20, 10), PARENT);
    assert_eq!(r, PixelRect::new(50, 40, 20, 10));
}

#[test]
fn end_alignment_and_percent_sizes() {
    let a = Anchor::new(HAlign::Right, VAlign::Bottom, Dim::Percent(250), Dim::Percent(500));
    let r = AnchorResolver.resolve(&a, PARENT);
    assert_eq!(r, PixelRect::new(85, 45, 25, 25));
}

#[test]
fn fill_ignores_dimension() {
    let a = Anchor::new(HAlign::Fill, VAlign::Top, Dim::Px(3), Dim::Px(7));
    let r = AnchorResolver.resolve(&a, PARENT);
    assert_eq!(r, PixelRect::new(10, 20, 100, 7));
}

#[test]
fn oversized_box_starts_at_parent_origin() {
    let r = AnchorResolver.resolve(&Anchor::centered(500, 500), PARENT);
    assert_eq!((r.x, r.y), (PARENT.x, PARENT.y));
}

#[test]
fn merge_over_prefers_specified_override_values() {
    let root = Anchor::new(HAlign::Left, VAlign::Top, Dim::Px(5), Dim::Px(6));
    let over = Anchor {
        horizontal: HAlign::Right,
        height: Dim::Percent(100),
        ..Anchor::default()
    };
    let m = Anchor::merge_over(&root, &over);
    assert_eq!(
        m,
        Anchor::new(HAlign::Right, VAlign::Top, Dim::Px(5), Dim::Percent(100))
    );
}

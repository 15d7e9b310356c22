use super::*;

#[test]
fn then_appends_at_the_tail() {
    let f = Filter::new(FilterKind::Grayscale)
        .then(FilterKind::AlphaSet(9))
        .then(FilterKind::Sepia);
    let kinds: Vec<_> = f.iter().copied().collect();
    assert_eq!(
        kinds,
        vec![FilterKind::Grayscale, FilterKind::AlphaSet(9), FilterKind::Sepia]
    );
    assert_eq!(f.link_count(), 3);
    assert_eq!(Filter::new(FilterKind::Sepia).link_count(), 1);
}

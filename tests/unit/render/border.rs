use super::*;
use crate::foundation::core::{Color, Tblr};

fn border() -> BorderFigure {
    BorderFigure {
        insets: Tblr::uniform(2),
        edge: Some(Box::new(Figure::rectangle(Color::BLACK))),
        ..BorderFigure::default()
    }
}

fn assert_partitions_frame(slots: &Slots<'_>, rect: PixelRect, inner: PixelRect) {
    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            let hits = slots.iter().filter(|(_, r, _)| r.contains(x, y)).count();
            let expected = usize::from(!inner.contains(x, y));
            assert_eq!(hits, expected, "pixel {x},{y}");
        }
    }
}

#[test]
fn edges_without_corners() {
    let rect = PixelRect::new(0, 0, 10, 10);
    let b = border();
    let slots = layout(rect, &b, false).unwrap();
    let rects: Vec<_> = slots.iter().map(|(s, r, _)| (*s, *r)).collect();
    assert_eq!(
        rects,
        vec![
            (Slot::Top, PixelRect::new(0, 0, 10, 2)),
            (Slot::Bottom, PixelRect::new(0, 8, 10, 2)),
            (Slot::Left, PixelRect::new(0, 2, 2, 6)),
            (Slot::Right, PixelRect::new(8, 2, 2, 6)),
        ]
    );
    assert_partitions_frame(&slots, rect, rect.inset(b.insets));
}

#[test]
fn corners_shrink_top_and_bottom() {
    let rect = PixelRect::new(5, 5, 10, 10);
    let b = border();
    let slots = layout(rect, &b, true).unwrap();
    assert_eq!(slots.len(), 8);
    assert_eq!(slots[0].1, PixelRect::new(7, 5, 6, 2));
    assert_eq!(slots[1].1, PixelRect::new(7, 13, 6, 2));
    for (_, r, _) in &slots[4..] {
        assert_eq!((r.w, r.h), (2, 2));
    }
    assert_partitions_frame(&slots, rect, rect.inset(b.insets));
}

#[test]
fn specific_slot_figures_win() {
    let mut b = border();
    b.sides.left = Some(Box::new(Figure::ellipse(Color::WHITE)));
    let slots = layout(PixelRect::new(0, 0, 10, 10), &b, false).unwrap();
    assert_eq!(slots[2].2, &Figure::ellipse(Color::WHITE));
    assert_eq!(slots[0].2, &Figure::rectangle(Color::BLACK));
}

#[test]
fn missing_figure_is_structure_error() {
    let b = BorderFigure {
        insets: Tblr::uniform(1),
        ..BorderFigure::default()
    };
    let err = layout(PixelRect::new(0, 0, 4, 4), &b, false).unwrap_err();
    assert!(matches!(err, FiguraError::Structure(_)));
}

#[test]
fn zero_insets_need_no_figure() {
    let b = BorderFigure {
        insets: Tblr::new(1, 0, 0, 0),
        sides: crate::model::figure::BorderSides {
            top: Some(Box::new(Figure::rectangle(Color::BLACK))),
            ..Default::default()
        },
        ..BorderFigure::default()
    };
    let slots = layout(PixelRect::new(0, 0, 4, 4), &b, true).unwrap();
    assert_eq!(slots.len(), 1);
}

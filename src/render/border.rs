use smallvec::SmallVec;

use crate::foundation::core::PixelRect;
use crate::foundation::error::{FiguraError, FiguraResult};
use crate::model::figure::{BorderFigure, Figure};

/// Border slot names, used in error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

pub(crate) type Slots<'a> = SmallVec<[(Slot, PixelRect, &'a Figure); 8]>;

/// Lay out the edge (and corner) rectangles of a border inside `rect`.
///
/// Without corners the top and bottom edges span the full width and the side
/// edges fill the height between them. With corners, top and bottom shrink by
/// the side insets and the four corner rectangles are added. Empty slots are
/// skipped; a non-empty slot without a figure is a structure error.
pub(crate) fn layout<'a>(
    rect: PixelRect,
    border: &'a BorderFigure,
    corners: bool,
) -> FiguraResult<Slots<'a>> {
    let t = border.insets;
    let (x, y, w, h) = (rect.x, rect.y, rect.w, rect.h);
    let mid_h = h - t.top - t.bottom;
    let (hx, hw) = if corners {
        (x + t.left, w - t.left - t.right)
    } else {
        (x, w)
    };

    let mut rects = vec![
        (Slot::Top, PixelRect::new(hx, y, hw, t.top)),
        (Slot::Bottom, PixelRect::new(hx, y + h - t.bottom, hw, t.bottom)),
        (Slot::Left, PixelRect::new(x, y + t.top, t.left, mid_h)),
        (Slot::Right, PixelRect::new(x + w - t.right, y + t.top, t.right, mid_h)),
    ];
    if corners {
        rects.extend([
            (Slot::TopLeft, PixelRect::new(x, y, t.left, t.top)),
            (Slot::TopRight, PixelRect::new(x + w - t.right, y, t.right, t.top)),
            (Slot::BottomLeft, PixelRect::new(x, y + h - t.bottom, t.left, t.bottom)),
            (
                Slot::BottomRight,
                PixelRect::new(x + w - t.right, y + h - t.bottom, t.right, t.bottom),
            ),
        ]);
    }

    let mut out = Slots::new();
    for (slot, r) in rects {
        if r.is_empty() {
            continue;
        }
        let specific = match slot {
            Slot::Top => &border.sides.top,
            Slot::Bottom => &border.sides.bottom,
            Slot::Left => &border.sides.left,
            Slot::Right => &border.sides.right,
            Slot::TopLeft => &border.corners.top_left,
            Slot::TopRight => &border.corners.top_right,
            Slot::BottomLeft => &border.corners.bottom_left,
            Slot::BottomRight => &border.corners.bottom_right,
        };
        let figure = specific
            .as_deref()
            .or(border.edge.as_deref())
            .ok_or_else(|| FiguraError::structure(format!("border {slot:?} slot has no figure")))?;
        out.push((slot, r, figure));
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/border.rs"]
mod tests;

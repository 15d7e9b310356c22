use crate::foundation::core::PixelRect;

/// Horizontal placement inside the parent rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[allow(missing_docs)]
pub enum HAlign {
    Left,
    Center,
    Right,
    Fill,
    #[default]
    Undefined,
}

/// Vertical placement inside the parent rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[allow(missing_docs)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
    Fill,
    #[default]
    Undefined,
}

/// One extent of an anchored box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Dim {
    /// Absolute size in pixels.
    Px(i32),
    /// Fraction of the parent extent, in per-mille.
    Percent(u16),
    /// Inherit the parent extent.
    #[default]
    Unspecified,
}

impl Dim {
    fn resolve(self, parent: i32) -> i32 {
        match self {
            Self::Px(v) => v,
            Self::Percent(pm) => (i64::from(parent) * i64::from(pm) / 1000) as i32,
            Self::Unspecified => parent,
        }
    }
}

/// Placement of a figure inside its parent rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Anchor {
    /// Horizontal alignment.
    pub horizontal: HAlign,
    /// Vertical alignment.
    pub vertical: VAlign,
    /// Box width.
    pub width: Dim,
    /// Box height.
    pub height: Dim,
}

impl Anchor {
    /// Anchor with every value specified.
    pub const fn new(horizontal: HAlign, vertical: VAlign, width: Dim, height: Dim) -> Self {
        Self {
            horizontal,
            vertical,
            width,
            height,
        }
    }

    /// Centered box of a fixed pixel size.
    pub const fn centered(w: i32, h: i32) -> Self {
        Self::new(HAlign::Center, VAlign::Center, Dim::Px(w), Dim::Px(h))
    }

    /// Return `true` when any of the four values is unspecified.
    pub fn is_incomplete(&self) -> bool {
        self.horizontal == HAlign::Undefined
            || self.vertical == VAlign::Undefined
            || self.width == Dim::Unspecified
            || self.height == Dim::Unspecified
    }

    /// Values specified in `over` win, unspecified ones fall back to `root`.
    pub fn merge_over(root: &Anchor, over: &Anchor) -> Anchor {
        Anchor {
            horizontal: match over.horizontal {
                HAlign::Undefined => root.horizontal,
                h => h,
            },
            vertical: match over.vertical {
                VAlign::Undefined => root.vertical,
                v => v,
            },
            width: match over.width {
                Dim::Unspecified => root.width,
                d => d,
            },
            height: match over.height {
                Dim::Unspecified => root.height,
                d => d,
            },
        }
    }
}

/// Maps an anchor to a concrete rectangle inside a parent.
pub trait BoxResolver {
    /// Resolve `anchor` against `parent`.
    fn resolve(&self, anchor: &Anchor, parent: PixelRect) -> PixelRect;
}

/// Default resolver: unspecified sizes and `Fill` take the parent extent,
/// alignment places the box inside the parent. Undefined alignment is start.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnchorResolver;

impl BoxResolver for AnchorResolver {
    fn resolve(&self, anchor: &Anchor, parent: PixelRect) -> PixelRect {
        let (x, w) = match anchor.horizontal {
            HAlign::Fill => (parent.x, parent.w),
            h => {
                let w = anchor.width.resolve(parent.w);
                let align = match h {
                    HAlign::Center => AlignKind::Center,
                    HAlign::Right => AlignKind::End,
                    _ => AlignKind::Start,
                };
                (parent.x + align_offset(parent.w, w, align), w)
            }
        };
        let (y, h) = match anchor.vertical {
            VAlign::Fill => (parent.y, parent.h),
            v => {
                let h = anchor.height.resolve(parent.h);
                let align = match v {
                    VAlign::Center => AlignKind::Center,
                    VAlign::Bottom => AlignKind::End,
                    _ => AlignKind::Start,
                };
                (parent.y + align_offset(parent.h, h, align), h)
            }
        };
        PixelRect::new(x, y, w, h)
    }
}

pub(crate) enum AlignKind {
    Start,
    Center,
    End,
}

pub(crate) fn align_offset(container: i32, content: i32, align: AlignKind) -> i32 {
    let rem = (container - content).max(0);
    match align {
        AlignKind::Start => 0,
        AlignKind::Center => rem / 2,
        AlignKind::End => rem,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/anchor.rs"]
mod tests;

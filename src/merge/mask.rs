use crate::model::figure::{FigureFlags, PerfFlags};

/// A kind-specific field addressable in a [`FieldSet`].
pub trait FieldId: Copy {
    /// Bit index of the field (`0..32`).
    fn index(self) -> u8;

    /// Single-bit mask of the field.
    fn bit(self) -> u32 {
        1 << self.index()
    }
}

macro_rules! field_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[allow(missing_docs)]
        #[repr(u8)]
        pub enum $name {
            $($variant),+
        }

        impl FieldId for $name {
            fn index(self) -> u8 {
                self as u8
            }
        }
    };
}

field_enum!(
    /// Mergeable rectangle fields.
    RectField { Radius, Stroke }
);
field_enum!(
    /// Mergeable border fields; slot fields select whole slot figures.
    BorderField {
        Insets,
        Edge,
        Top,
        Bottom,
        Left,
        Right,
        TopLeft,
        TopRight,
        BottomLeft,
        BottomRight,
    }
);
field_enum!(
    /// Mergeable triangle fields.
    TriangleField { Direction }
);
field_enum!(
    /// Mergeable ellipse fields.
    EllipseField { Start, Sweep, Stroke }
);
field_enum!(
    /// Mergeable line fields.
    LineField { From, To, Thickness }
);
field_enum!(
    /// Mergeable parallel-lines fields.
    LinesField { Count, Orientation, Thickness }
);
field_enum!(
    /// Mergeable grid fields.
    GridField { Cols, Rows, Thickness }
);
field_enum!(
    /// Mergeable pixel-field fields.
    PixelsField { Seed, Density, Palette }
);
field_enum!(
    /// Mergeable text fields. The literal text follows its own rule.
    TextField { Size, Align }
);
field_enum!(
    /// Mergeable repeater fields.
    RepeaterField { TileW, TileH, Tile }
);
field_enum!(
    /// Mergeable cross fields.
    CrossField { Thickness }
);
field_enum!(
    /// Mergeable hatching fields.
    SuperlinesField { Spacing, Thickness, Rising }
);
field_enum!(
    /// Mergeable checkerboard fields.
    CheckerField { Cell, Alternate }
);
field_enum!(
    /// Mergeable subdivision fields.
    SubdivisionField { Depth, Seed, Palette }
);

/// Bit set of kind-specific fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FieldSet(pub u32);

impl FieldSet {
    /// No field.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every field of every kind.
    pub const fn all() -> Self {
        Self(u32::MAX)
    }

    /// Copy with `field` added.
    pub fn with<F: FieldId>(self, field: F) -> Self {
        Self(self.0 | field.bit())
    }

    /// Add `field`.
    pub fn insert<F: FieldId>(&mut self, field: F) {
        self.0 |= field.bit();
    }

    /// Return `true` when `field` is selected.
    pub fn contains<F: FieldId>(self, field: F) -> bool {
        self.0 & field.bit() != 0
    }
}

/// Selects which parts of an override replace the root during a merge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct MergeMask {
    /// Adopt the override's kind and payload wholesale.
    pub replace_kind: bool,
    /// Take the override's header color.
    pub color: bool,
    /// Per-bit selection of [`FigureFlags`].
    pub flags: u8,
    /// Per-bit selection of [`PerfFlags`].
    pub perf: u8,
    /// Kind-specific fields.
    pub fields: FieldSet,
    /// Take the override's sub-figures.
    pub children: bool,
    /// Take (or merge with) the override's anchor.
    pub anchor: bool,
}

impl MergeMask {
    /// Select nothing.
    pub const fn empty() -> Self {
        Self {
            replace_kind: false,
            color: false,
            flags: 0,
            perf: 0,
            fields: FieldSet::empty(),
            children: false,
            anchor: false,
        }
    }

    /// Select every field of the root's kind (the kind itself is kept).
    pub const fn all() -> Self {
        Self {
            replace_kind: false,
            color: true,
            flags: u8::MAX,
            perf: u8::MAX,
            fields: FieldSet::all(),
            children: true,
            anchor: true,
        }
    }

    /// Also select `field`.
    pub fn with_field<F: FieldId>(mut self, field: F) -> Self {
        self.fields.insert(field);
        self
    }

    /// Also select the given behavior flag bits.
    pub fn with_flags(mut self, flags: FigureFlags) -> Self {
        self.flags |= flags.bits();
        self
    }

    /// Also select the given performance bits.
    pub fn with_perf(mut self, perf: PerfFlags) -> Self {
        self.perf |= perf.bits();
        self
    }

    /// Select the header color.
    pub fn with_color(mut self) -> Self {
        self.color = true;
        self
    }

    /// Adopt the override's kind.
    pub fn with_replace_kind(mut self) -> Self {
        self.replace_kind = true;
        self
    }

    /// Select sub-figures.
    pub fn with_children(mut self) -> Self {
        self.children = true;
        self
    }

    /// Select the anchor.
    pub fn with_anchor(mut self) -> Self {
        self.anchor = true;
        self
    }
}

/// Per-bit merge: mask bit set takes `over`, clear keeps `root`.
pub(crate) fn merge_bits(root: u8, over: u8, mask: u8) -> u8 {
    (root & !mask) | (over & mask)
}

#[cfg(test)]
#[path = "../../tests/unit/merge/mask.rs"]
mod tests;

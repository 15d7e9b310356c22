use crate::foundation::core::{Color, Tblr};
use crate::merge::mask::MergeMask;
use crate::model::anchor::Anchor;
use crate::model::filter::Filter;
use crate::model::gradient::Gradient;
use crate::model::mask::Mask;

macro_rules! flag_byte {
    (
        $(#[$meta:meta])*
        $name:ident { $( $(#[$fmeta:meta])* $flag:ident = $bit:expr ),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
        )]
        pub struct $name(pub u8);

        impl $name {
            $( $(#[$fmeta])* pub const $flag: Self = Self(1 << $bit); )*

            /// No bit set.
            pub const fn empty() -> Self {
                Self(0)
            }

            /// Raw byte.
            pub const fn bits(self) -> u8 {
                self.0
            }

            /// Return `true` when every bit of `other` is set.
            pub const fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            /// Copy with the bits of `other` set.
            pub const fn with(self, other: Self) -> Self {
                Self(self.0 | other.0)
            }

            /// Copy with the bits of `other` cleared.
            pub const fn without(self, other: Self) -> Self {
                Self(self.0 & !other.0)
            }
        }

        impl std::ops::BitOr for $name {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }
    };
}

flag_byte! {
    /// Behavior bits shared by every figure kind.
    FigureFlags {
        /// Defer painting to the postponed pass.
        POSTPONE = 0,
        /// Fill the interior (rectangles, ellipses, triangles, losanges).
        FILLED = 1,
        /// Border figures paint four corner slots in addition to the edges.
        BORDER_CORNERS = 2,
        /// The figure is driven by an animation.
        ANIMATED = 3,
        /// Mirror horizontally.
        FLIP_H = 4,
        /// Mirror vertically.
        FLIP_V = 5,
        /// Clip sub-figures to the figure's rectangle.
        CLIP = 6,
        /// Composite with source-over instead of replacing pixels.
        ALPHA_BLEND = 7,
    }
}

flag_byte! {
    /// Rendering hints that do not change the painted result.
    PerfFlags {
        /// Pixels are written without blending.
        OPAQUE = 0,
        /// Never filter the target in place, always use a scratch surface.
        NO_IN_PLACE = 1,
        /// Use nearest-neighbour sampling when tiles are resampled.
        NEAREST = 2,
        /// Do not recurse into sub-figures.
        SKIP_CHILDREN = 3,
    }
}

/// Header shared by every figure kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FigureHeader {
    /// Primary color.
    pub color: Color,
    /// Behavior flags.
    pub flags: FigureFlags,
    /// Performance hints.
    pub perf: PerfFlags,
}

/// Kind discriminant without payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[allow(missing_docs)]
pub enum KindTag {
    Empty,
    Rectangle,
    Border,
    Triangle,
    Ellipse,
    Line,
    Lines,
    Grid,
    PixelField,
    Text,
    Repeater,
    Cross,
    Superlines,
    Losange,
    Checkerboard,
    Subdivision,
}

/// Kind-specific payload of a figure.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum FigureKind {
    /// Paints nothing itself; a container for sub-figures.
    Empty,
    /// Filled, rounded or stroked rectangle.
    Rectangle(RectFigure),
    /// Frame made of edge (and optional corner) figures.
    Border(BorderFigure),
    /// Isosceles triangle pointing in a direction.
    Triangle(TriangleFigure),
    /// Ellipse or elliptic arc.
    Ellipse(EllipseFigure),
    /// Single straight line.
    Line(LineFigure),
    /// Evenly spaced parallel lines.
    Lines(LinesFigure),
    /// Grid of cell separators.
    Grid(GridFigure),
    /// Seeded random pixels.
    PixelField(PixelFieldFigure),
    /// Text, rendered by the text collaborator.
    Text(TextFigure),
    /// Tiled sub-figure.
    Repeater(RepeaterFigure),
    /// Horizontal and vertical bar through the center.
    Cross(CrossFigure),
    /// Diagonal hatching.
    Superlines(SuperlinesFigure),
    /// Diamond touching the middle of each edge.
    Losange,
    /// Two-color checkerboard.
    Checkerboard(CheckerFigure),
    /// Recursive seeded subdivision pattern.
    Subdivision(SubdivisionFigure),
}

impl FigureKind {
    /// Payload-free discriminant.
    pub fn tag(&self) -> KindTag {
        match self {
            Self::Empty => KindTag::Empty,
            Self::Rectangle(_) => KindTag::Rectangle,
            Self::Border(_) => KindTag::Border,
            Self::Triangle(_) => KindTag::Triangle,
            Self::Ellipse(_) => KindTag::Ellipse,
            Self::Line(_) => KindTag::Line,
            Self::Lines(_) => KindTag::Lines,
            Self::Grid(_) => KindTag::Grid,
            Self::PixelField(_) => KindTag::PixelField,
            Self::Text(_) => KindTag::Text,
            Self::Repeater(_) => KindTag::Repeater,
            Self::Cross(_) => KindTag::Cross,
            Self::Superlines(_) => KindTag::Superlines,
            Self::Losange => KindTag::Losange,
            Self::Checkerboard(_) => KindTag::Checkerboard,
            Self::Subdivision(_) => KindTag::Subdivision,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Rectangle payload.
pub struct RectFigure {
    /// Corner radius in pixels (0 = square corners).
    pub radius: i32,
    /// Outline thickness in pixels (0 = no outline).
    pub stroke: i32,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Border payload: a frame laid out by TBLR insets.
pub struct BorderFigure {
    /// Frame thickness per side.
    pub insets: Tblr,
    /// Figure used for every slot without a dedicated figure.
    pub edge: Option<Box<Figure>>,
    /// Per-edge figures.
    pub sides: BorderSides,
    /// Per-corner figures (painted when `BORDER_CORNERS` is set).
    pub corners: BorderCorners,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[allow(missing_docs)]
pub struct BorderSides {
    pub top: Option<Box<Figure>>,
    pub bottom: Option<Box<Figure>>,
    pub left: Option<Box<Figure>>,
    pub right: Option<Box<Figure>>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[allow(missing_docs)]
pub struct BorderCorners {
    pub top_left: Option<Box<Figure>>,
    pub top_right: Option<Box<Figure>>,
    pub bottom_left: Option<Box<Figure>>,
    pub bottom_right: Option<Box<Figure>>,
}

/// Direction a triangle points to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[allow(missing_docs)]
pub enum Direction {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Triangle payload.
pub struct TriangleFigure {
    /// Apex direction.
    pub direction: Direction,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Ellipse payload. Angles are degrees, counter-clockwise from 3 o'clock.
pub struct EllipseFigure {
    /// Arc start angle.
    pub start_deg: i16,
    /// Arc sweep; `>= 360` is a full ellipse.
    pub sweep_deg: i16,
    /// Ring thickness in pixels (0 = solid when filled).
    pub stroke: i32,
}

impl Default for EllipseFigure {
    fn default() -> Self {
        Self {
            start_deg: 0,
            sweep_deg: 360,
            stroke: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Line payload. Endpoints are per-mille of the target rectangle.
pub struct LineFigure {
    /// Start point `(x, y)` in 0..=1000.
    pub from: (u16, u16),
    /// End point `(x, y)` in 0..=1000.
    pub to: (u16, u16),
    /// Thickness in pixels.
    pub thickness: i32,
}

/// Line orientation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[allow(missing_docs)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Parallel lines payload.
pub struct LinesFigure {
    /// Number of lines.
    pub count: u32,
    /// Line orientation.
    pub orientation: Orientation,
    /// Thickness in pixels.
    pub thickness: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Grid payload.
pub struct GridFigure {
    /// Column count.
    pub cols: u32,
    /// Row count.
    pub rows: u32,
    /// Separator thickness in pixels.
    pub thickness: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Seeded pixel field payload.
pub struct PixelFieldFigure {
    /// Procedural seed.
    pub seed: u64,
    /// Probability of a pixel being painted, in 1/255 units.
    pub density: u8,
    /// Colors picked per pixel; empty uses the header color.
    pub palette: Vec<Color>,
}

/// Horizontal text alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[allow(missing_docs)]
pub enum TextAlign {
    #[default]
    Start,
    Center,
    End,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Text payload.
pub struct TextFigure {
    /// Literal text, if defined.
    pub text: Option<String>,
    /// Font size in pixels.
    pub size_px: u16,
    /// Alignment inside the rectangle.
    pub align: TextAlign,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Repeater payload.
pub struct RepeaterFigure {
    /// Tile width in pixels.
    pub tile_w: i32,
    /// Tile height in pixels.
    pub tile_h: i32,
    /// Figure painted in each tile.
    pub tile: Box<Figure>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Cross payload.
pub struct CrossFigure {
    /// Bar thickness in pixels.
    pub thickness: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Diagonal hatching payload.
pub struct SuperlinesFigure {
    /// Distance between line starts, in pixels.
    pub spacing: i32,
    /// Line thickness in pixels.
    pub thickness: i32,
    /// Lines rise to the right when set, fall otherwise.
    pub rising: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Checkerboard payload.
pub struct CheckerFigure {
    /// Cell size in pixels.
    pub cell: i32,
    /// Color of the odd cells.
    pub alternate: Color,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Recursive subdivision payload.
pub struct SubdivisionFigure {
    /// Maximum recursion depth.
    pub depth: u8,
    /// Procedural seed.
    pub seed: u64,
    /// Leaf colors; empty uses the header color.
    pub palette: Vec<Color>,
}

/// A declarative visual primitive.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Figure {
    /// Shared header.
    pub header: FigureHeader,
    /// Kind-specific payload.
    pub kind: FigureKind,
    /// Optional gradient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient: Option<Gradient>,
    /// Optional filter chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    /// Optional mask.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<Box<Mask>>,
    /// Optional anchor inside the parent rectangle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Anchor>,
    /// Sub-figures painted after this one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Figure>,
    /// Fields this figure replaces when used as a merge override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_mask: Option<MergeMask>,
}

impl Figure {
    /// Create a figure with default flags.
    pub fn new(kind: FigureKind, color: Color) -> Self {
        Self {
            header: FigureHeader {
                color,
                flags: FigureFlags::FILLED | FigureFlags::ALPHA_BLEND,
                perf: PerfFlags::empty(),
            },
            kind,
            gradient: None,
            filter: None,
            mask: None,
            anchor: None,
            children: Vec::new(),
            merge_mask: None,
        }
    }

    /// Figure that only hosts sub-figures.
    pub fn empty() -> Self {
        Self::new(FigureKind::Empty, Color::TRANSPARENT)
    }

    /// Filled rectangle.
    pub fn rectangle(color: Color) -> Self {
        Self::new(FigureKind::Rectangle(RectFigure::default()), color)
    }

    /// Filled rectangle with rounded corners.
    pub fn rounded_rectangle(color: Color, radius: i32) -> Self {
        Self::new(
            FigureKind::Rectangle(RectFigure { radius, stroke: 0 }),
            color,
        )
    }

    /// Full filled ellipse.
    pub fn ellipse(color: Color) -> Self {
        Self::new(FigureKind::Ellipse(EllipseFigure::default()), color)
    }

    /// Triangle pointing in `direction`.
    pub fn triangle(color: Color, direction: Direction) -> Self {
        Self::new(FigureKind::Triangle(TriangleFigure { direction }), color)
    }

    /// Border using `edge` for every slot.
    pub fn border(insets: Tblr, edge: Figure) -> Self {
        Self::new(
            FigureKind::Border(BorderFigure {
                insets,
                edge: Some(Box::new(edge)),
                ..BorderFigure::default()
            }),
            Color::TRANSPARENT,
        )
    }

    /// Text figure.
    pub fn text(color: Color, text: impl Into<String>, size_px: u16) -> Self {
        Self::new(
            FigureKind::Text(TextFigure {
                text: Some(text.into()),
                size_px,
                align: TextAlign::Start,
            }),
            color,
        )
    }

    /// Repeater tiling `tile` every `tile_w` x `tile_h` pixels.
    pub fn repeater(tile: Figure, tile_w: i32, tile_h: i32) -> Self {
        Self::new(
            FigureKind::Repeater(RepeaterFigure {
                tile_w,
                tile_h,
                tile: Box::new(tile),
            }),
            Color::TRANSPARENT,
        )
    }

    /// Payload-free kind discriminant.
    pub fn tag(&self) -> KindTag {
        self.kind.tag()
    }

    /// Primary color.
    pub fn color(&self) -> Color {
        self.header.color
    }

    /// Behavior flags.
    pub fn flags(&self) -> FigureFlags {
        self.header.flags
    }

    /// Performance hints.
    pub fn perf(&self) -> PerfFlags {
        self.header.perf
    }

    /// Presence of the gradient child.
    pub fn has_gradient(&self) -> bool {
        self.gradient.is_some()
    }

    /// Presence of the filter child.
    pub fn has_filter(&self) -> bool {
        self.filter.is_some()
    }

    /// Presence of the mask child.
    pub fn has_mask(&self) -> bool {
        self.mask.is_some()
    }

    /// Presence of the anchor child.
    pub fn has_anchor(&self) -> bool {
        self.anchor.is_some()
    }

    /// Replace the header color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.header.color = color;
        self
    }

    /// Replace all behavior flags.
    pub fn with_flags(mut self, flags: FigureFlags) -> Self {
        self.header.flags = flags;
        self
    }

    /// Set additional behavior flags.
    pub fn with_flag(mut self, flag: FigureFlags) -> Self {
        self.header.flags = self.header.flags.with(flag);
        self
    }

    /// Clear behavior flags.
    pub fn without_flag(mut self, flag: FigureFlags) -> Self {
        self.header.flags = self.header.flags.without(flag);
        self
    }

    /// Set performance hints.
    pub fn with_perf(mut self, perf: PerfFlags) -> Self {
        self.header.perf = perf;
        self
    }

    /// Attach a gradient (replacing any previous one).
    pub fn with_gradient(mut self, gradient: Gradient) -> Self {
        self.gradient = Some(gradient);
        self
    }

    /// Attach a filter chain.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Attach a mask.
    pub fn with_mask(mut self, mask: Mask) -> Self {
        self.mask = Some(Box::new(mask));
        self
    }

    /// Attach an anchor.
    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Append a sub-figure.
    pub fn with_child(mut self, child: Figure) -> Self {
        self.children.push(child);
        self
    }

    /// Declare the merge mask used when this figure is an override.
    pub fn with_merge_mask(mut self, mask: MergeMask) -> Self {
        self.merge_mask = Some(mask);
        self
    }

    /// Black-on-nothing copy used to classify mask pixels.
    ///
    /// Nested figures (border slots, repeater tiles, children) are blackened
    /// too, so everything the figure paints counts as shape.
    pub(crate) fn silhouette(&self) -> Self {
        let mut s = self.clone();
        s.blacken();
        s
    }

    fn blacken(&mut self) {
        self.header.color = Color::BLACK;
        self.header.flags = self
            .header
            .flags
            .without(FigureFlags::ANIMATED)
            .without(FigureFlags::POSTPONE);
        self.gradient = None;
        self.filter = None;
        self.mask = None;
        match &mut self.kind {
            FigureKind::Border(BorderFigure {
                edge,
                sides,
                corners,
                ..
            }) => {
                let slots = [
                    edge,
                    &mut sides.top,
                    &mut sides.bottom,
                    &mut sides.left,
                    &mut sides.right,
                    &mut corners.top_left,
                    &mut corners.top_right,
                    &mut corners.bottom_left,
                    &mut corners.bottom_right,
                ];
                for slot in slots.into_iter().flatten() {
                    slot.blacken();
                }
            }
            FigureKind::Repeater(r) => r.tile.blacken(),
            FigureKind::PixelField(p) => p.palette.clear(),
            FigureKind::Subdivision(d) => d.palette.clear(),
            FigureKind::Checkerboard(c) if c.alternate.a != 0 => c.alternate = Color::BLACK,
            _ => {}
        }
        for child in &mut self.children {
            child.blacken();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/figure.rs"]
mod tests;

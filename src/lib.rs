//! Figura is a declarative 2D figure and style engine.
//!
//! Small records ([`Figure`], [`Gradient`], [`Filter`], [`Mask`], [`Anchor`],
//! [`Style`]) are composed with field-level overrides and painted onto a
//! [`Surface`]:
//!
//! - Compose records with [`merge_over`] / [`merge_over_with`] and [`style_merge_over`]
//! - Paint with a [`Painter`] (or the one-shot [`paint_figure`] / [`draw_style`])
//! - Resample and warp pixels with [`scale`] and [`skew`]
//!
//! Scratch buffers come from a [`SurfaceCache`]; [`SurfacePool`] is the
//! in-crate implementation and reports leaks through [`SurfacePoolStats`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod effects;
pub(crate) mod merge;
pub(crate) mod model;
pub(crate) mod render;
pub(crate) mod transform;

pub use crate::foundation::core::{Color, PixelRect, Point, Side, Tblr};
pub use crate::foundation::error::{FiguraError, FiguraResult};

pub use crate::animation::ease::Ease;
pub use crate::effects::blend::{BlendMode, RegionPolicy, apply_region, blend_pixel};
pub use crate::effects::filters::apply_filter_chain;
pub use crate::effects::gradient::{ColorIterator, color_iterator, step_count, step_index};
pub use crate::merge::figure::{merge_over, merge_over_opt, merge_over_with};
pub use crate::merge::mask::{
    BorderField, CheckerField, CrossField, EllipseField, FieldId, FieldSet, GridField, LineField,
    LinesField, MergeMask, PixelsField, RectField, RepeaterField, SubdivisionField,
    SuperlinesField, TextField, TriangleField,
};
pub use crate::merge::style::style_merge_over;
pub use crate::model::anchor::{Anchor, AnchorResolver, BoxResolver, Dim, HAlign, VAlign};
pub use crate::model::figure::{
    BorderCorners, BorderFigure, BorderSides, CheckerFigure, CrossFigure, Direction,
    EllipseFigure, Figure, FigureFlags, FigureHeader, FigureKind, GridFigure, KindTag,
    LineFigure, LinesFigure, Orientation, PerfFlags, PixelFieldFigure, RectFigure,
    RepeaterFigure, SubdivisionFigure, SuperlinesFigure, TextAlign, TextFigure, TriangleFigure,
};
pub use crate::model::filter::{Filter, FilterKind};
pub use crate::model::gradient::{Artifact, ChannelMask, ColorFunction, Gradient, GradientShape};
pub use crate::model::mask::{Mask, MaskRegion};
pub use crate::model::style::{
    ANIMATION_SLOTS, AnimationKind, Area, FILTER_SLOTS, LAYER_SLOTS, Layer, Style,
    StyleAnimation, StyleMergeMask,
};
pub use crate::render::painter::{Painter, PainterOpts, paint_figure};
pub use crate::render::style::draw_style;
pub use crate::render::surface::{PixelFormat, Surface, SurfaceDesc};
pub use crate::render::surface_pool::{
    PooledSurface, SurfaceCache, SurfacePool, SurfacePoolOpts, SurfacePoolStats,
};
pub use crate::render::text::{NoText, TextRenderer};
pub use crate::transform::scale::{Scaler, scale};
pub use crate::transform::skew::{EdgePolicy, Sampling, Skewer, skew};

use crate::foundation::error::{FiguraError, FiguraResult};
use crate::merge::mask::{
    BorderField, CheckerField, CrossField, EllipseField, FieldId, FieldSet, GridField, LineField,
    LinesField, MergeMask, PixelsField, RectField, RepeaterField, SubdivisionField,
    SuperlinesField, TextField, TriangleField, merge_bits,
};
use crate::model::anchor::Anchor;
use crate::model::figure::{
    BorderCorners, BorderFigure, BorderSides, CheckerFigure, CrossFigure, EllipseFigure, Figure,
    FigureFlags, FigureHeader, FigureKind, GridFigure, LineFigure, LinesFigure, PerfFlags,
    PixelFieldFigure, RectFigure, RepeaterFigure, SubdivisionFigure, SuperlinesFigure, TextFigure,
    TriangleFigure,
};

/// Compose `over` onto `root` using the override's declared merge mask
/// (an empty mask when it declares none).
pub fn merge_over(root: &Figure, over: &Figure) -> FiguraResult<Figure> {
    let mask = over.merge_mask.unwrap_or_default();
    merge_over_with(root, over, &mask)
}

/// Compose `over` onto `root`, reading field selection from `mask`.
///
/// Gradient, filter and mask children are taken wholesale from `over` when it
/// has them. A text override's literal wins over the root's whatever the mask
/// says. Kinds must match unless `mask.replace_kind` is set; a replaced kind
/// keeps only root's masked color and flags, everything else comes from
/// `over`.
#[tracing::instrument(level = "trace", skip_all, fields(root = ?root.tag(), over = ?over.tag()))]
pub fn merge_over_with(root: &Figure, over: &Figure, mask: &MergeMask) -> FiguraResult<Figure> {
    let kind = if mask.replace_kind {
        over.kind.clone()
    } else {
        merge_kind(&root.kind, &over.kind, mask.fields)?
    };

    let header = FigureHeader {
        color: if mask.color {
            over.header.color
        } else {
            root.header.color
        },
        flags: FigureFlags(merge_bits(
            root.header.flags.bits(),
            over.header.flags.bits(),
            mask.flags,
        )),
        perf: PerfFlags(merge_bits(
            root.header.perf.bits(),
            over.header.perf.bits(),
            mask.perf,
        )),
    };

    if mask.replace_kind {
        tracing::trace!("replacing kind wholesale");
        return Ok(Figure {
            header,
            kind,
            merge_mask: root.merge_mask,
            ..over.clone()
        });
    }

    let anchor = match (&root.anchor, &over.anchor, mask.anchor) {
        (Some(r), Some(o), true) => Some(Anchor::merge_over(r, o)),
        (r, o, true) => o.or(*r),
        (r, _, false) => *r,
    };

    Ok(Figure {
        header,
        kind,
        gradient: over.gradient.clone().or_else(|| root.gradient.clone()),
        filter: over.filter.clone().or_else(|| root.filter.clone()),
        mask: over.mask.clone().or_else(|| root.mask.clone()),
        anchor,
        children: if mask.children {
            over.children.clone()
        } else {
            root.children.clone()
        },
        merge_mask: root.merge_mask,
    })
}

/// Optional composition: an absent side yields the other one.
pub fn merge_over_opt(
    root: Option<&Figure>,
    over: Option<&Figure>,
) -> FiguraResult<Option<Figure>> {
    match (root, over) {
        (Some(r), Some(o)) => merge_over(r, o).map(Some),
        (Some(x), None) | (None, Some(x)) => Ok(Some(x.clone())),
        (None, None) => Ok(None),
    }
}

fn pick<T: Clone, F: FieldId>(fields: FieldSet, field: F, root: &T, over: &T) -> T {
    if fields.contains(field) {
        over.clone()
    } else {
        root.clone()
    }
}

fn merge_kind(root: &FigureKind, over: &FigureKind, f: FieldSet) -> FiguraResult<FigureKind> {
    let kind = match (root, over) {
        (FigureKind::Empty, FigureKind::Empty) => FigureKind::Empty,
        (FigureKind::Losange, FigureKind::Losange) => FigureKind::Losange,
        (FigureKind::Rectangle(r), FigureKind::Rectangle(o)) => FigureKind::Rectangle(RectFigure {
            radius: pick(f, RectField::Radius, &r.radius, &o.radius),
            stroke: pick(f, RectField::Stroke, &r.stroke, &o.stroke),
        }),
        (FigureKind::Border(r), FigureKind::Border(o)) => FigureKind::Border(BorderFigure {
            insets: pick(f, BorderField::Insets, &r.insets, &o.insets),
            edge: pick(f, BorderField::Edge, &r.edge, &o.edge),
            sides: BorderSides {
                top: pick(f, BorderField::Top, &r.sides.top, &o.sides.top),
                bottom: pick(f, BorderField::Bottom, &r.sides.bottom, &o.sides.bottom),
                left: pick(f, BorderField::Left, &r.sides.left, &o.sides.left),
                right: pick(f, BorderField::Right, &r.sides.right, &o.sides.right),
            },
            corners: BorderCorners {
                top_left: pick(
                    f,
                    BorderField::TopLeft,
                    &r.corners.top_left,
                    &o.corners.top_left,
                ),
                top_right: pick(
                    f,
                    BorderField::TopRight,
                    &r.corners.top_right,
                    &o.corners.top_right,
                ),
                bottom_left: pick(
                    f,
                    BorderField::BottomLeft,
                    &r.corners.bottom_left,
                    &o.corners.bottom_left,
                ),
                bottom_right: pick(
                    f,
                    BorderField::BottomRight,
                    &r.corners.bottom_right,
                    &o.corners.bottom_right,
                ),
            },
        }),
        (FigureKind::Triangle(r), FigureKind::Triangle(o)) => FigureKind::Triangle(TriangleFigure {
            direction: pick(f, TriangleField::Direction, &r.direction, &o.direction),
        }),
        (FigureKind::Ellipse(r), FigureKind::Ellipse(o)) => FigureKind::Ellipse(EllipseFigure {
            start_deg: pick(f, EllipseField::Start, &r.start_deg, &o.start_deg),
            sweep_deg: pick(f, EllipseField::Sweep, &r.sweep_deg, &o.sweep_deg),
            stroke: pick(f, EllipseField::Stroke, &r.stroke, &o.stroke),
        }),
        (FigureKind::Line(r), FigureKind::Line(o)) => FigureKind::Line(LineFigure {
            from: pick(f, LineField::From, &r.from, &o.from),
            to: pick(f, LineField::To, &r.to, &o.to),
            thickness: pick(f, LineField::Thickness, &r.thickness, &o.thickness),
        }),
        (FigureKind::Lines(r), FigureKind::Lines(o)) => FigureKind::Lines(LinesFigure {
            count: pick(f, LinesField::Count, &r.count, &o.count),
            orientation: pick(f, LinesField::Orientation, &r.orientation, &o.orientation),
            thickness: pick(f, LinesField::Thickness, &r.thickness, &o.thickness),
        }),
        (FigureKind::Grid(r), FigureKind::Grid(o)) => FigureKind::Grid(GridFigure {
            cols: pick(f, GridField::Cols, &r.cols, &o.cols),
            rows: pick(f, GridField::Rows, &r.rows, &o.rows),
            thickness: pick(f, GridField::Thickness, &r.thickness, &o.thickness),
        }),
        (FigureKind::PixelField(r), FigureKind::PixelField(o)) => {
            FigureKind::PixelField(PixelFieldFigure {
                seed: pick(f, PixelsField::Seed, &r.seed, &o.seed),
                density: pick(f, PixelsField::Density, &r.density, &o.density),
                palette: pick(f, PixelsField::Palette, &r.palette, &o.palette),
            })
        }
        (FigureKind::Text(r), FigureKind::Text(o)) => FigureKind::Text(TextFigure {
            // Root first, then override: an override literal always wins.
            text: o.text.clone().or_else(|| r.text.clone()),
            size_px: pick(f, TextField::Size, &r.size_px, &o.size_px),
            align: pick(f, TextField::Align, &r.align, &o.align),
        }),
        (FigureKind::Repeater(r), FigureKind::Repeater(o)) => {
            FigureKind::Repeater(RepeaterFigure {
                tile_w: pick(f, RepeaterField::TileW, &r.tile_w, &o.tile_w),
                tile_h: pick(f, RepeaterField::TileH, &r.tile_h, &o.tile_h),
                tile: pick(f, RepeaterField::Tile, &r.tile, &o.tile),
            })
        }
        (FigureKind::Cross(r), FigureKind::Cross(o)) => FigureKind::Cross(CrossFigure {
            thickness: pick(f, CrossField::Thickness, &r.thickness, &o.thickness),
        }),
        (FigureKind::Superlines(r), FigureKind::Superlines(o)) => {
            FigureKind::Superlines(SuperlinesFigure {
                spacing: pick(f, SuperlinesField::Spacing, &r.spacing, &o.spacing),
                thickness: pick(f, SuperlinesField::Thickness, &r.thickness, &o.thickness),
                rising: pick(f, SuperlinesField::Rising, &r.rising, &o.rising),
            })
        }
        (FigureKind::Checkerboard(r), FigureKind::Checkerboard(o)) => {
            FigureKind::Checkerboard(CheckerFigure {
                cell: pick(f, CheckerField::Cell, &r.cell, &o.cell),
                alternate: pick(f, CheckerField::Alternate, &r.alternate, &o.alternate),
            })
        }
        (FigureKind::Subdivision(r), FigureKind::Subdivision(o)) => {
            FigureKind::Subdivision(SubdivisionFigure {
                depth: pick(f, SubdivisionField::Depth, &r.depth, &o.depth),
                seed: pick(f, SubdivisionField::Seed, &r.seed, &o.seed),
                palette: pick(f, SubdivisionField::Palette, &r.palette, &o.palette),
            })
        }
        (r, o) => {
            return Err(FiguraError::KindMismatch {
                root: r.tag(),
                over: o.tag(),
            });
        }
    };
    Ok(kind)
}

#[cfg(test)]
#[path = "../../tests/unit/merge/figure.rs"]
mod tests;

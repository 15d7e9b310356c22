use crate::effects::blend::BlendMode;
use crate::foundation::core::{Color, Side};

/// One buffer-wide pixel operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FilterKind {
    /// Replace color channels with their luma.
    Grayscale,
    /// Force every alpha to the value.
    AlphaSet(u8),
    /// Recolor visible pixels, keeping their alpha.
    AlphaToColor(Color),
    /// Alpha multiplier ramp from `from` at `side` to `to` at the opposite side.
    Directional {
        /// Side where the ramp starts.
        side: Side,
        /// Multiplier at `side`, in 1/255 units.
        from: u8,
        /// Multiplier at the opposite side.
        to: u8,
    },
    /// Paint transparent pixels that touch an opaque one (4-neighbourhood).
    TouchAdjacency {
        /// Outline color.
        color: Color,
    },
    /// Hard shadow: transparent pixels whose `(-dx, -dy)` neighbour is visible.
    Stick {
        /// Shadow offset along x.
        dx: i32,
        /// Shadow offset along y.
        dy: i32,
        /// Shadow color.
        color: Color,
    },
    /// Classic sepia tone matrix.
    Sepia,
    /// Box blur along rows.
    HorizontalAverage {
        /// Half window in pixels.
        radius: u32,
    },
    /// Per-channel `c * mul / 256 + add`, saturating.
    ChannelModify {
        /// RGBA multipliers in 1/256 units.
        mul: [u16; 4],
        /// RGBA offsets.
        add: [i16; 4],
    },
    /// Blend a shifted copy of the buffer onto itself.
    SelfBlend {
        /// Copy offset along x.
        dx: i32,
        /// Copy offset along y.
        dy: i32,
        /// Blend mode of the copy.
        mode: BlendMode,
    },
    /// Downscale by `factor` then upscale bilinearly.
    BilinearSmooth {
        /// Reduction factor (`<= 1` is a no-op).
        factor: u32,
    },
    /// Pixelate into `size` x `size` blocks.
    PixelRepeat {
        /// Block size (`<= 1` is a no-op).
        size: u32,
    },
}

/// Singly linked filter chain, applied head first.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Filter {
    /// Operation of this link.
    pub kind: FilterKind,
    /// Next link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<Box<Filter>>,
}

impl Filter {
    /// Single-link chain.
    pub fn new(kind: FilterKind) -> Self {
        Self { kind, next: None }
    }

    /// Append `kind` at the end of the chain.
    pub fn then(mut self, kind: FilterKind) -> Self {
        self.push(kind);
        self
    }

    fn push(&mut self, kind: FilterKind) {
        match self.next.as_mut() {
            Some(next) => next.push(kind),
            None => self.next = Some(Box::new(Filter::new(kind))),
        }
    }

    /// Chain links in application order.
    pub fn iter(&self) -> impl Iterator<Item = &FilterKind> {
        std::iter::successors(Some(self), |f| f.next.as_deref()).map(|f| &f.kind)
    }

    /// Number of links.
    pub fn link_count(&self) -> usize {
        self.iter().count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/filter.rs"]
mod tests;

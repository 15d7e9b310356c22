use crate::animation::ease::Ease;
use crate::foundation::core::Tblr;
use crate::foundation::error::{FiguraError, FiguraResult};
use crate::model::figure::Figure;
use crate::model::filter::Filter;

/// Number of background (and foreground) layer slots.
pub const LAYER_SLOTS: usize = 4;
/// Number of style filter slots.
pub const FILTER_SLOTS: usize = 5;
/// Number of animation slots.
pub const ANIMATION_SLOTS: usize = 3;

/// Box-model rectangle a layer paints into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Area {
    /// Whole style rectangle.
    #[default]
    Margin,
    /// Inside the margin.
    Border,
    /// Inside the padding.
    Content,
    /// Inside the border.
    Padding,
}

impl Area {
    /// Decode the 2-bit selector (higher bits are ignored).
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::Margin,
            1 => Self::Border,
            2 => Self::Content,
            _ => Self::Padding,
        }
    }

    /// 2-bit selector.
    pub const fn bits(self) -> u8 {
        match self {
            Self::Margin => 0,
            Self::Border => 1,
            Self::Content => 2,
            Self::Padding => 3,
        }
    }
}

/// A figure painted into one of the style's areas.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Layer {
    /// Painted figure.
    pub figure: Figure,
    /// Target area.
    pub area: Area,
}

impl Layer {
    /// Create a layer.
    pub fn new(figure: Figure, area: Area) -> Self {
        Self { figure, area }
    }
}

/// What a style animation changes over time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AnimationKind {
    /// Alpha multiplier from `from` to `to` (1/255 units).
    Fade {
        /// Multiplier at the start.
        from: u8,
        /// Multiplier at the end.
        to: u8,
    },
    /// Offset of the whole style, reached at the end.
    Translate {
        /// Final x offset in pixels.
        dx: i32,
        /// Final y offset in pixels.
        dy: i32,
    },
}

/// Time-driven change applied when a style is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StyleAnimation {
    /// Effect.
    pub kind: AnimationKind,
    /// Length of the effect.
    pub duration_ms: u32,
    /// Time before the effect starts.
    pub delay_ms: u32,
    /// Progress curve.
    pub ease: Ease,
}

impl StyleAnimation {
    /// Animation without delay.
    pub fn new(kind: AnimationKind, duration_ms: u32, ease: Ease) -> Self {
        Self {
            kind,
            duration_ms,
            delay_ms: 0,
            ease,
        }
    }
}

/// Box-model layered decoration of a rectangle.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Style {
    /// Outer inset.
    pub margin: Tblr,
    /// Border thickness.
    pub border: Tblr,
    /// Inner inset.
    pub padding: Tblr,
    /// Figure painted in the content area.
    pub content: Option<Figure>,
    /// Layers painted before the content.
    pub backgrounds: [Option<Layer>; LAYER_SLOTS],
    /// Layers painted after the content.
    pub foregrounds: [Option<Layer>; LAYER_SLOTS],
    /// Filters run over the drawn style, in slot order.
    pub filters: [Option<Filter>; FILTER_SLOTS],
    /// Active animations.
    pub animations: [Option<StyleAnimation>; ANIMATION_SLOTS],
}

impl Style {
    /// Empty style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the margin.
    pub fn with_margin(mut self, margin: Tblr) -> Self {
        self.margin = margin;
        self
    }

    /// Set the border thickness.
    pub fn with_border(mut self, border: Tblr) -> Self {
        self.border = border;
        self
    }

    /// Set the padding.
    pub fn with_padding(mut self, padding: Tblr) -> Self {
        self.padding = padding;
        self
    }

    /// Set the content figure.
    pub fn with_content(mut self, figure: Figure) -> Self {
        self.content = Some(figure);
        self
    }

    /// Put `layer` in the first free background slot.
    pub fn with_background(mut self, layer: Layer) -> FiguraResult<Self> {
        put_first_free(&mut self.backgrounds, layer, "background")?;
        Ok(self)
    }

    /// Put `layer` in the first free foreground slot.
    pub fn with_foreground(mut self, layer: Layer) -> FiguraResult<Self> {
        put_first_free(&mut self.foregrounds, layer, "foreground")?;
        Ok(self)
    }

    /// Put `filter` in the first free filter slot.
    pub fn with_filter(mut self, filter: Filter) -> FiguraResult<Self> {
        put_first_free(&mut self.filters, filter, "filter")?;
        Ok(self)
    }

    /// Put `animation` in the first free animation slot.
    pub fn with_animation(mut self, animation: StyleAnimation) -> FiguraResult<Self> {
        put_first_free(&mut self.animations, animation, "animation")?;
        Ok(self)
    }
}

fn put_first_free<T>(slots: &mut [Option<T>], value: T, what: &str) -> FiguraResult<()> {
    match slots.iter_mut().find(|s| s.is_none()) {
        Some(slot) => {
            *slot = Some(value);
            Ok(())
        }
        None => Err(FiguraError::validation(format!(
            "all {} {what} slots are taken",
            slots.len()
        ))),
    }
}

/// Field selection for [`crate::style_merge_over`].
///
/// Slot bytes carry one bit per slot, bit `i` selecting slot `i`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct StyleMergeMask {
    /// Take the override's margin.
    pub margin: bool,
    /// Take the override's border thickness.
    pub border: bool,
    /// Take the override's padding.
    pub padding: bool,
    /// Take (or merge with) the override's content figure.
    pub content: bool,
    /// Background slot bits.
    pub backgrounds: u8,
    /// Foreground slot bits.
    pub foregrounds: u8,
    /// Filter slot bits.
    pub filters: u8,
    /// Animation slot bits.
    pub animations: u8,
}

impl StyleMergeMask {
    /// Select nothing.
    pub const fn empty() -> Self {
        Self {
            margin: false,
            border: false,
            padding: false,
            content: false,
            backgrounds: 0,
            foregrounds: 0,
            filters: 0,
            animations: 0,
        }
    }

    /// Select everything.
    pub const fn all() -> Self {
        Self {
            margin: true,
            border: true,
            padding: true,
            content: true,
            backgrounds: (1 << LAYER_SLOTS) - 1,
            foregrounds: (1 << LAYER_SLOTS) - 1,
            filters: (1 << FILTER_SLOTS) - 1,
            animations: (1 << ANIMATION_SLOTS) - 1,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/style.rs"]
mod tests;

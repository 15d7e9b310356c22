use std::fmt;
use std::sync::Arc;

use smallvec::{SmallVec, smallvec};

use crate::foundation::core::Color;

/// Geometric layout of gradient steps over a rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[allow(missing_docs)]
pub enum GradientShape {
    Square,
    Top,
    Bottom,
    Left,
    Right,
    TopBottom,
    LeftRight,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    TopBottomLeft,
    TopBottomRight,
    TopLeftRight,
    BottomLeftRight,
    RoundedSquare,
    CenterHorizontal,
    CenterVertical,
    CenterCross,
    Diamond,
    DiagonalTopLeft,
    DiagonalTopRight,
    DiagonalBottomLeft,
    DiagonalBottomRight,
    Ellipse,
    EllipseTop,
    EllipseBottom,
    EllipseLeft,
    EllipseRight,
    EllipseTopLeft,
    EllipseTopRight,
    EllipseBottomLeft,
    EllipseBottomRight,
}

impl GradientShape {
    /// Every shape, in declaration order.
    pub const ALL: [GradientShape; 33] = [
        Self::Square,
        Self::Top,
        Self::Bottom,
        Self::Left,
        Self::Right,
        Self::TopBottom,
        Self::LeftRight,
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
        Self::TopBottomLeft,
        Self::TopBottomRight,
        Self::TopLeftRight,
        Self::BottomLeftRight,
        Self::RoundedSquare,
        Self::CenterHorizontal,
        Self::CenterVertical,
        Self::CenterCross,
        Self::Diamond,
        Self::DiagonalTopLeft,
        Self::DiagonalTopRight,
        Self::DiagonalBottomLeft,
        Self::DiagonalBottomRight,
        Self::Ellipse,
        Self::EllipseTop,
        Self::EllipseBottom,
        Self::EllipseLeft,
        Self::EllipseRight,
        Self::EllipseTopLeft,
        Self::EllipseTopRight,
        Self::EllipseBottomLeft,
        Self::EllipseBottomRight,
    ];
}

/// Channels a gradient interpolates. Excluded channels keep the primary's value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ChannelMask(pub u8);

impl ChannelMask {
    /// Red channel.
    pub const R: Self = Self(1 << 0);
    /// Green channel.
    pub const G: Self = Self(1 << 1);
    /// Blue channel.
    pub const B: Self = Self(1 << 2);
    /// Alpha channel.
    pub const A: Self = Self(1 << 3);
    /// Every channel.
    pub const ALL: Self = Self(0b1111);

    /// Return `true` when every bit of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Default for ChannelMask {
    fn default() -> Self {
        Self::ALL
    }
}

impl std::ops::BitOr for ChannelMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Periodic override: steps with `i % period < length` yield `color`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Artifact {
    /// Repetition period in steps.
    pub period: u32,
    /// Overridden steps at the start of each period.
    pub length: u32,
    /// Color of the overridden steps.
    pub color: Color,
}

/// Step-indexed color source `(step, count) -> Color`.
///
/// Equality is identity of the shared function.
#[derive(Clone)]
pub struct ColorFunction(pub Arc<dyn Fn(u32, u32) -> Color + Send + Sync>);

impl ColorFunction {
    /// Wrap a closure.
    pub fn new(f: impl Fn(u32, u32) -> Color + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Evaluate for `step` of `count`.
    pub fn call(&self, step: u32, count: u32) -> Color {
        (self.0)(step, count)
    }
}

impl PartialEq for ColorFunction {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ColorFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ColorFunction(..)")
    }
}

/// Multi-stop gradient attached to a figure.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Gradient {
    /// First stop; `None` uses the figure's color.
    pub primary: Option<Color>,
    /// Second stop.
    pub secondary: Color,
    /// Optional third stop.
    pub tertiary: Option<Color>,
    /// Geometric shapes; more than one combines them.
    pub shapes: SmallVec<[GradientShape; 2]>,
    /// Fixed step count; `None` derives it from the geometry.
    pub steps: Option<u32>,
    /// Run the stops backwards.
    pub reverse: bool,
    /// Interpolated channels.
    pub channels: ChannelMask,
    /// Periodic override.
    pub artifact: Option<Artifact>,
    /// Replaces stop interpolation when present.
    #[serde(skip)]
    pub function: Option<ColorFunction>,
}

impl Gradient {
    /// Gradient from the figure color to `secondary` over `shape`.
    pub fn new(secondary: Color, shape: GradientShape) -> Self {
        Self {
            primary: None,
            secondary,
            tertiary: None,
            shapes: smallvec![shape],
            steps: None,
            reverse: false,
            channels: ChannelMask::ALL,
            artifact: None,
            function: None,
        }
    }

    /// Set an explicit primary stop.
    pub fn with_primary(mut self, primary: Color) -> Self {
        self.primary = Some(primary);
        self
    }

    /// Add a third stop.
    pub fn with_tertiary(mut self, tertiary: Color) -> Self {
        self.tertiary = Some(tertiary);
        self
    }

    /// Combine with another shape.
    pub fn with_shape(mut self, shape: GradientShape) -> Self {
        self.shapes.push(shape);
        self
    }

    /// Force a step count.
    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Reverse stop order.
    pub fn reversed(mut self) -> Self {
        self.reverse = !self.reverse;
        self
    }

    /// Restrict interpolated channels.
    pub fn with_channels(mut self, channels: ChannelMask) -> Self {
        self.channels = channels;
        self
    }

    /// Add a periodic override.
    pub fn with_artifact(mut self, artifact: Artifact) -> Self {
        self.artifact = Some(artifact);
        self
    }

    /// Replace stop interpolation with `function`.
    pub fn with_function(mut self, function: ColorFunction) -> Self {
        self.function = Some(function);
        self
    }

    /// Primary stop, falling back to the figure color.
    pub fn primary_or(&self, figure_color: Color) -> Color {
        self.primary.unwrap_or(figure_color)
    }
}

use crate::effects::blend::RegionPolicy;
use crate::foundation::core::Color;
use crate::model::figure::Figure;
use crate::model::filter::Filter;

/// How one pixel class of a mask is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MaskRegion {
    /// Region color.
    pub color: Color,
    /// Region alpha (boundary pixels scale it by coverage).
    pub alpha: u8,
    /// Write policy.
    pub policy: RegionPolicy,
}

impl MaskRegion {
    /// Region that leaves pixels untouched.
    pub const KEEP: Self = Self::new(Color::TRANSPARENT, 0, RegionPolicy::Keep);

    /// Create a region.
    pub const fn new(color: Color, alpha: u8, policy: RegionPolicy) -> Self {
        Self {
            color,
            alpha,
            policy,
        }
    }
}

/// Silhouette-driven compositing of a figure's area.
///
/// The figure is rendered as a black silhouette; each pixel of the area is
/// then classified as shape, boundary or background and written according to
/// the matching region.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Mask {
    /// Pixels outside the silhouette.
    pub background: MaskRegion,
    /// Partially covered pixels.
    pub boundary: MaskRegion,
    /// Pixels inside the silhouette.
    pub shape: MaskRegion,
    /// Filter applied to the silhouette only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    /// Figure painted under the regions before they are applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_figure: Option<Box<Figure>>,
}

impl Mask {
    /// Mask with explicit regions.
    pub fn new(shape: MaskRegion, boundary: MaskRegion, background: MaskRegion) -> Self {
        Self {
            background,
            boundary,
            shape,
            filter: None,
            background_figure: None,
        }
    }

    /// Cut the area out to the silhouette: outside becomes transparent,
    /// boundary alpha follows coverage, the inside is kept.
    pub fn clip() -> Self {
        Self::new(
            MaskRegion::KEEP,
            MaskRegion::new(Color::TRANSPARENT, 255, RegionPolicy::AlphaOnly),
            MaskRegion::new(Color::TRANSPARENT, 0, RegionPolicy::AlphaOnly),
        )
    }

    /// Filter the silhouette.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Paint `figure` under the regions.
    pub fn with_background_figure(mut self, figure: Figure) -> Self {
        self.background_figure = Some(Box::new(figure));
        self
    }
}

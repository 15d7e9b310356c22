/// Curve applied to the normalized progress of a style animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Constant speed.
    #[default]
    Linear,
    /// Starts slow (`t²`).
    In,
    /// Ends slow (`t(2 - t)`).
    Out,
    /// Slow at both ends (smoothstep).
    InOut,
    /// Holds the start value until the animation ends.
    Step,
}

/// Eased progress in `[0, 1]` of an animation at `time_ms`.
///
/// Before `delay_ms` the progress is 0; a zero duration jumps straight to 1.
pub(crate) fn progress(ease: Ease, time_ms: u64, delay_ms: u32, duration_ms: u32) -> f64 {
    let Some(elapsed) = time_ms.checked_sub(u64::from(delay_ms)) else {
        return 0.0;
    };
    if duration_ms == 0 {
        return 1.0;
    }
    let t = (elapsed as f64 / f64::from(duration_ms)).min(1.0);
    match ease {
        Ease::Linear => t,
        Ease::In => t * t,
        Ease::Out => t * (2.0 - t),
        Ease::InOut => t * t * (3.0 - 2.0 * t),
        Ease::Step if t < 1.0 => 0.0,
        Ease::Step => 1.0,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;

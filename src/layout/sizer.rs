use crate::foundation::core::Canvas;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Landscape or portrait output, which drives the wrap heuristics.
pub enum AspectClass {
    /// Landscape (width >= height).
    Wide,
    /// Portrait.
    Tall,
}

impl AspectClass {
    /// Classify a canvas.
    pub fn from_canvas(canvas: Canvas) -> Self {
        if canvas.width >= canvas.height {
            Self::Wide
        } else {
            Self::Tall
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Wrap-ratio decision table for the secondary line.
pub struct WrapPolicy {
    /// Ratio on wide canvases.
    pub wide_ratio: f64,
    /// Ratio on tall canvases when the secondary line is long.
    pub tall_long_ratio: f64,
    /// Ratio on tall canvases otherwise.
    pub tall_short_ratio: f64,
    /// Secondary lines strictly longer than this many chars count as long.
    pub long_secondary_chars: usize,
}

impl Default for WrapPolicy {
    fn default() -> Self {
        Self {
            wide_ratio: 0.60,
            tall_long_ratio: 0.92,
            tall_short_ratio: 0.80,
            long_secondary_chars: 40,
        }
    }
}

impl WrapPolicy {
    /// Ratio of the usable width the secondary line should at least occupy.
    pub fn wrap_ratio(&self, aspect: AspectClass, secondary_len: usize) -> f64 {
        match aspect {
            AspectClass::Wide => self.wide_ratio,
            AspectClass::Tall if secondary_len > self.long_secondary_chars => self.tall_long_ratio,
            AspectClass::Tall => self.tall_short_ratio,
        }
    }
}

/// Canvas width minus padding on both sides, never negative.
pub fn usable_width(canvas_width: f64, padding: f64) -> f64 {
    (canvas_width - 2.0 * padding).max(0.0)
}

/// Container width for the secondary line.
///
/// `measured` is the primary line's natural width; `None` (not measured yet)
/// and `0` both fall back to the usable width. The result never exceeds the
/// usable width and never drops below the measured width.
pub fn target_width(
    policy: &WrapPolicy,
    measured: Option<f64>,
    canvas_width: f64,
    padding: f64,
    aspect: AspectClass,
    secondary_len: usize,
) -> f64 {
    let usable_max = usable_width(canvas_width, padding);
    let measured = measured
        .filter(|w| w.is_finite() && *w > 0.0)
        .unwrap_or(usable_max);
    let heuristic = (usable_max * policy.wrap_ratio(aspect, secondary_len)).round();
    usable_max.min(measured.max(heuristic))
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Per-cue layout result.
pub struct LayoutMetrics {
    /// Measured primary-line width, if measurement has resolved.
    pub measured_width: Option<f64>,
    /// Usable width after padding.
    pub usable_width: f64,
    /// Secondary-line container width (rounded to whole pixels).
    pub target_width: f64,
}

impl LayoutMetrics {
    /// Compute metrics for one cue.
    pub fn compute(
        policy: &WrapPolicy,
        measured: Option<f64>,
        canvas_width: f64,
        padding: f64,
        aspect: AspectClass,
        secondary_len: usize,
    ) -> Self {
        Self {
            measured_width: measured,
            usable_width: usable_width(canvas_width, padding),
            target_width: target_width(
                policy,
                measured,
                canvas_width,
                padding,
                aspect,
                secondary_len,
            )
            .round(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/sizer.rs"]
mod tests;

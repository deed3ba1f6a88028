use crate::animation::ease::Ease;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Behavior for inputs outside the interpolation input range.
pub enum Extrapolate {
    /// Hold the boundary output value.
    #[default]
    Clamp,
    /// Continue the linear mapping past the boundary (easing is not applied
    /// outside the range).
    Extend,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Options for [`interpolate`].
pub struct InterpolateOpts {
    /// Easing applied to normalized progress inside the range.
    pub ease: Ease,
    /// Extrapolation below the input range.
    pub left: Extrapolate,
    /// Extrapolation above the input range.
    pub right: Extrapolate,
}

impl InterpolateOpts {
    /// Clamp both sides and apply `ease`.
    pub fn clamped(ease: Ease) -> Self {
        Self {
            ease,
            left: Extrapolate::Clamp,
            right: Extrapolate::Clamp,
        }
    }
}

/// Map `input` from `input_range` onto `output_range`.
///
/// A degenerate input range (`end <= start`) behaves as a step at `start`.
pub fn interpolate(
    input: f64,
    input_range: [f64; 2],
    output_range: [f64; 2],
    opts: InterpolateOpts,
) -> f64 {
    let [in0, in1] = input_range;
    let [out0, out1] = output_range;

    if in1 <= in0 {
        return if input < in0 { out0 } else { out1 };
    }

    let t = (input - in0) / (in1 - in0);
    let eased = if t < 0.0 {
        match opts.left {
            Extrapolate::Clamp => 0.0,
            Extrapolate::Extend => t,
        }
    } else if t > 1.0 {
        match opts.right {
            Extrapolate::Clamp => 1.0,
            Extrapolate::Extend => t,
        }
    } else {
        opts.ease.apply(t)
    };

    out0 + (out1 - out0) * eased
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interpolate.rs"]
mod tests;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Easing curve applied to normalized progress in `[0, 1]`.
pub enum Ease {
    /// Identity mapping.
    Linear,
    /// The standard CSS `ease`, `cubic-bezier(0.42, 0, 1, 1)`.
    Standard,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in-out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in-out.
    InOutCubic,
    /// Arbitrary cubic bezier with control points `(x1, y1)` and `(x2, y2)`.
    Bezier {
        /// First control point x, in `[0, 1]`.
        x1: f64,
        /// First control point y.
        y1: f64,
        /// Second control point x, in `[0, 1]`.
        x2: f64,
        /// Second control point y.
        y2: f64,
    },
}

impl Default for Ease {
    fn default() -> Self {
        Self::Standard
    }
}

impl Ease {
    /// Map progress `t` through the curve. Input is clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Standard => CubicBezier::new(0.42, 0.0, 1.0, 1.0).solve(t),
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::Bezier { x1, y1, x2, y2 } => CubicBezier::new(x1, y1, x2, y2).solve(t),
        }
    }
}

/// Cubic bezier timing curve anchored at `(0,0)` and `(1,1)`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl CubicBezier {
    const NEWTON_ITERATIONS: usize = 8;
    const NEWTON_MIN_SLOPE: f64 = 1e-3;
    const SUBDIVISION_PRECISION: f64 = 1e-7;
    const SUBDIVISION_MAX_ITERATIONS: usize = 32;

    pub(crate) fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1: x1.clamp(0.0, 1.0),
            y1,
            x2: x2.clamp(0.0, 1.0),
            y2,
        }
    }

    fn coord(t: f64, p1: f64, p2: f64) -> f64 {
        let a = 1.0 - 3.0 * p2 + 3.0 * p1;
        let b = 3.0 * p2 - 6.0 * p1;
        let c = 3.0 * p1;
        ((a * t + b) * t + c) * t
    }

    fn slope(t: f64, p1: f64, p2: f64) -> f64 {
        let a = 1.0 - 3.0 * p2 + 3.0 * p1;
        let b = 3.0 * p2 - 6.0 * p1;
        let c = 3.0 * p1;
        3.0 * a * t * t + 2.0 * b * t + c
    }

    /// Parameter `s` with `x(s) == x`.
    fn param_for_x(self, x: f64) -> f64 {
        let mut s = x;
        for _ in 0..Self::NEWTON_ITERATIONS {
            let d = Self::slope(s, self.x1, self.x2);
            if d.abs() < Self::NEWTON_MIN_SLOPE {
                break;
            }
            let err = Self::coord(s, self.x1, self.x2) - x;
            if err.abs() < Self::SUBDIVISION_PRECISION {
                return s;
            }
            s -= err / d;
        }
        if (0.0..=1.0).contains(&s)
            && (Self::coord(s, self.x1, self.x2) - x).abs() < Self::SUBDIVISION_PRECISION
        {
            return s;
        }

        // Newton stalled or left the unit interval; bisect.
        let (mut lo, mut hi) = (0.0, 1.0);
        s = x;
        for _ in 0..Self::SUBDIVISION_MAX_ITERATIONS {
            let cur = Self::coord(s, self.x1, self.x2);
            if (cur - x).abs() < Self::SUBDIVISION_PRECISION {
                break;
            }
            if cur < x {
                lo = s;
            } else {
                hi = s;
            }
            s = 0.5 * (lo + hi);
        }
        s
    }

    pub(crate) fn solve(self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        if self.x1 == self.y1 && self.x2 == self.y2 {
            return x;
        }
        Self::coord(self.param_for_x(x), self.y1, self.y2)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;

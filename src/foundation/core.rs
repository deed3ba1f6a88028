use crate::foundation::error::{CuecastError, CuecastResult};

pub use kurbo::{Point, Rect, Size, Vec2};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
/// Zero-based frame number on the output timeline.
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Half-open frame range `[start, end)`.
pub struct FrameRange {
    /// Inclusive start frame.
    pub start: FrameIndex,
    /// Exclusive end frame.
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> CuecastResult<Self> {
        if start.0 > end.0 {
            return Err(CuecastError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Build a range from a start frame and a length in frames.
    pub fn from_start_len(start: FrameIndex, len: u64) -> Self {
        Self {
            start,
            end: FrameIndex(start.0.saturating_add(len)),
        }
    }

    /// Number of frames covered.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// True when the range covers no frames.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// True when `f` lies inside `[start, end)`.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }

    /// True when the two ranges share at least one frame.
    pub fn overlaps(self, other: FrameRange) -> bool {
        self.start.0 < other.end.0 && other.start.0 < self.end.0
    }

    /// Iterate every frame in the range.
    pub fn frames(self) -> impl Iterator<Item = FrameIndex> {
        (self.start.0..self.end.0).map(FrameIndex)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Rational frame rate `num / den` frames per second.
pub struct Fps {
    /// Numerator.
    pub num: u32,
    /// Denominator.
    pub den: u32, // must be > 0
}

impl Fps {
    /// Build a frame rate, rejecting zero numerator or denominator.
    pub fn new(num: u32, den: u32) -> CuecastResult<Self> {
        if den == 0 {
            return Err(CuecastError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(CuecastError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Integer frame rate (`n / 1`).
    pub fn integer(n: u32) -> CuecastResult<Self> {
        Self::new(n, 1)
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Length of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert a frame count to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * f64::from(self.den) / f64::from(self.num)
    }

    /// `round(secs * fps)` as a signed frame count.
    ///
    /// Non-finite input maps to 0.
    pub fn secs_to_frames_round(self, secs: f64) -> i64 {
        let v = secs * self.as_f64();
        if !v.is_finite() {
            return 0;
        }
        v.round() as i64
    }

    /// `ceil(secs * fps)`, clamped at 0.
    pub fn secs_to_frames_ceil(self, secs: f64) -> u64 {
        let v = secs * self.as_f64();
        if !v.is_finite() {
            return 0;
        }
        v.ceil().max(0.0) as u64
    }

    /// `max(0, round(secs * fps))`, the conversion used for padding amounts.
    pub fn secs_to_frames_nonneg(self, secs: f64) -> u64 {
        self.secs_to_frames_round(secs).max(0) as u64
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Output canvas dimensions in pixels.
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Canvas size as a `kurbo` size.
    pub fn size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

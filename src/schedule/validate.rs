use crate::{
    foundation::error::{CuecastError, CuecastResult},
    schedule::cue::Cue,
};

#[derive(thiserror::Error, Clone, Debug, PartialEq)]
/// A broken cue-list precondition.
pub enum CueViolation {
    /// `start` or `end` is NaN or infinite.
    #[error("cue {index}: non-finite time (start={start}, end={end})")]
    NonFiniteTime {
        /// Offending cue.
        index: usize,
        /// Its start time.
        start: f64,
        /// Its end time.
        end: f64,
    },
    /// `start < 0`.
    #[error("cue {index}: negative start {start}s")]
    NegativeStart {
        /// Offending cue.
        index: usize,
        /// Its start time.
        start: f64,
    },
    /// `end < start`.
    #[error("cue {index}: end {end}s is before start {start}s")]
    NegativeDuration {
        /// Offending cue.
        index: usize,
        /// Its start time.
        start: f64,
        /// Its end time.
        end: f64,
    },
    /// `start` is earlier than the previous cue's start.
    #[error("cue {index}: start {start}s precedes previous start {previous_start}s")]
    Unsorted {
        /// Offending cue.
        index: usize,
        /// Previous cue's start.
        previous_start: f64,
        /// This cue's start.
        start: f64,
    },
    /// `start` is earlier than the previous cue's end.
    #[error("cue {index}: start {start}s overlaps previous end {previous_end}s")]
    Overlap {
        /// Offending cue.
        index: usize,
        /// Previous cue's end.
        previous_end: f64,
        /// This cue's start.
        start: f64,
    },
}

impl CueViolation {
    /// Index of the offending cue.
    pub fn index(&self) -> usize {
        match self {
            Self::NonFiniteTime { index, .. }
            | Self::NegativeStart { index, .. }
            | Self::NegativeDuration { index, .. }
            | Self::Unsorted { index, .. }
            | Self::Overlap { index, .. } => *index,
        }
    }
}

/// Report every precondition the scheduler relies on that `cues` breaks.
///
/// Pure and non-failing: an empty result means the list is well formed.
pub fn validate_cues(cues: &[Cue]) -> Vec<CueViolation> {
    let mut out = Vec::new();

    for (index, cue) in cues.iter().enumerate() {
        if !cue.start.is_finite() || !cue.end.is_finite() {
            out.push(CueViolation::NonFiniteTime {
                index,
                start: cue.start,
                end: cue.end,
            });
            continue;
        }
        if cue.start < 0.0 {
            out.push(CueViolation::NegativeStart {
                index,
                start: cue.start,
            });
        }
        if cue.end < cue.start {
            out.push(CueViolation::NegativeDuration {
                index,
                start: cue.start,
                end: cue.end,
            });
        }

        let Some(prev) = index.checked_sub(1).map(|p| &cues[p]) else {
            continue;
        };
        if !prev.start.is_finite() || !prev.end.is_finite() {
            continue;
        }
        if cue.start < prev.start {
            out.push(CueViolation::Unsorted {
                index,
                previous_start: prev.start,
                start: cue.start,
            });
        } else if cue.start < prev.end {
            out.push(CueViolation::Overlap {
                index,
                previous_end: prev.end,
                start: cue.start,
            });
        }
    }

    out
}

/// Fail with a validation error listing every violation, if any.
pub fn ensure_valid_cues(cues: &[Cue]) -> CuecastResult<()> {
    let violations = validate_cues(cues);
    if violations.is_empty() {
        return Ok(());
    }
    let msg = violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    Err(CuecastError::validation(msg))
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/validate.rs"]
mod tests;

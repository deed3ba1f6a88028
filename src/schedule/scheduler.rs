use crate::{
    foundation::core::{Fps, FrameIndex, FrameRange},
    schedule::config::TimingConfig,
    schedule::cue::Cue,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One cue placed on the frame timeline.
pub struct ScheduledInterval {
    /// Index of the cue in the input list.
    pub cue_index: usize,
    /// First frame the cue is on screen.
    pub from_frame: FrameIndex,
    /// Frames on screen, always `>= 1`.
    pub duration_frames: u64,
    /// First cue of the list (never fades in).
    pub is_first: bool,
    /// Last cue of the list (extended fade-out).
    pub is_last: bool,
    /// The cue itself.
    pub cue: Cue,
}

impl ScheduledInterval {
    /// Covered frames `[from, from + duration)`.
    pub fn range(&self) -> FrameRange {
        FrameRange::from_start_len(self.from_frame, self.duration_frames)
    }

    /// Signed frame offset of `frame` relative to `from_frame`.
    pub fn local_frame(&self, frame: FrameIndex) -> i64 {
        frame.0 as i64 - self.from_frame.0 as i64
    }
}

/// Place every cue on the frame timeline.
///
/// Cues must be sorted by start and non-overlapping. Malformed input is not
/// rejected; it yields overlapping intervals instead.
#[tracing::instrument(skip(cues, config), fields(cues = cues.len()))]
pub fn schedule(cues: &[Cue], fps: Fps, config: &TimingConfig) -> Vec<ScheduledInterval> {
    let Some(first) = cues.first() else {
        return Vec::new();
    };

    let first_start_frames = if config.pre_roll {
        start_frames(first, fps)
    } else {
        0
    };
    let gap_frames = config.gap_frames(fps);
    let outro_frames = config.outro_frames(fps);
    let last_index = cues.len() - 1;

    let out: Vec<ScheduledInterval> = cues
        .iter()
        .enumerate()
        .map(|(i, cue)| {
            let is_first = i == 0;
            let is_last = i == last_index;

            let from = if is_first && config.pre_roll {
                0
            } else {
                start_frames(cue, fps)
            };

            let base = fps.secs_to_frames_round(cue.duration_secs()).max(1) as u64;
            let mut duration = base + if is_first { first_start_frames } else { 0 };
            if is_last {
                duration += outro_frames;
            } else {
                duration = duration.saturating_sub(gap_frames).max(1);
            }

            ScheduledInterval {
                cue_index: i,
                from_frame: FrameIndex(from),
                duration_frames: duration,
                is_first,
                is_last,
                cue: cue.clone(),
            }
        })
        .collect();

    tracing::debug!(
        intervals = out.len(),
        gap_frames,
        outro_frames,
        first_start_frames,
        "cue schedule built"
    );
    out
}

/// Total rendered length: `ceil((last.end + outro) * fps)`, or 0 without cues.
pub fn total_duration_frames(cues: &[Cue], fps: Fps, config: &TimingConfig) -> u64 {
    cues.last().map_or(0, |last| {
        fps.secs_to_frames_ceil(last.end + config.outro_seconds)
    })
}

/// Interval covering `frame`, if any.
///
/// Binary search over `from_frame`; assumes the schedule came from a sorted
/// cue list.
pub fn interval_at(schedule: &[ScheduledInterval], frame: FrameIndex) -> Option<&ScheduledInterval> {
    let idx = schedule.partition_point(|iv| iv.from_frame <= frame);
    if idx == 0 {
        return None;
    }
    let iv = &schedule[idx - 1];
    iv.range().contains(frame).then_some(iv)
}

fn start_frames(cue: &Cue, fps: Fps) -> u64 {
    fps.secs_to_frames_nonneg(cue.start)
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/scheduler.rs"]
mod tests;

use crate::{
    animation::interpolate::{InterpolateOpts, interpolate},
    foundation::core::FrameIndex,
    schedule::config::FadeParams,
    schedule::scheduler::ScheduledInterval,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Fade window lengths for one interval, in frames.
pub struct FadeWindows {
    /// Frames spent fading in from the interval start.
    pub fade_in: u64,
    /// Frames spent fading out before the interval end.
    pub fade_out: u64,
}

impl FadeWindows {
    /// Resolve window lengths for an interval of `duration` frames.
    ///
    /// Each nominal length is capped at `floor(duration / 2)`. The first cue
    /// never fades in. The last cue's fade-out grows by the outro extension and
    /// may span the whole interval.
    pub fn for_interval(duration: u64, is_first: bool, is_last: bool, params: &FadeParams) -> Self {
        let half = duration / 2;
        let fade_in = if is_first {
            0
        } else {
            params.fade_in_frames.min(half)
        };
        let base_fade_out = params.fade_out_frames.min(half);
        let fade_out = if is_last {
            (base_fade_out + params.outro_frames).min(duration)
        } else {
            base_fade_out
        };
        Self { fade_in, fade_out }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Where a frame falls in an interval's fade lifecycle.
pub enum FadePhase {
    /// Before the interval starts.
    BeforeFadeIn,
    /// Inside the fade-in window.
    FadingIn,
    /// Fully visible.
    Steady,
    /// Inside the fade-out window.
    FadingOut,
    /// At or past the interval end.
    Done,
}

/// Opacity in `[0, 1]` at `frame` (relative to the interval start).
///
/// Total over all inputs; frames outside `[0, duration]` clamp to the
/// boundary values.
pub fn opacity_at(
    frame: i64,
    duration: u64,
    is_first: bool,
    is_last: bool,
    params: &FadeParams,
) -> f64 {
    let w = FadeWindows::for_interval(duration, is_first, is_last, params);
    let opts = InterpolateOpts::clamped(params.ease);
    let f = frame as f64;
    let d = duration as f64;

    let fade_in = if w.fade_in > 0 {
        interpolate(f, [0.0, w.fade_in as f64], [0.0, 1.0], opts)
    } else {
        1.0
    };
    let fade_out = if w.fade_out > 0 {
        interpolate(f, [d - w.fade_out as f64, d], [1.0, 0.0], opts)
    } else {
        1.0
    };

    (fade_in * fade_out).clamp(0.0, 1.0)
}

/// Lifecycle phase at `frame` (relative to the interval start).
pub fn fade_phase(
    frame: i64,
    duration: u64,
    is_first: bool,
    is_last: bool,
    params: &FadeParams,
) -> FadePhase {
    let w = FadeWindows::for_interval(duration, is_first, is_last, params);
    let d = duration as i64;
    if frame < 0 {
        FadePhase::BeforeFadeIn
    } else if frame >= d {
        FadePhase::Done
    } else if frame < w.fade_in as i64 {
        FadePhase::FadingIn
    } else if w.fade_out > 0 && frame >= d - w.fade_out as i64 {
        FadePhase::FadingOut
    } else {
        FadePhase::Steady
    }
}

/// Opacity of a scheduled interval at a global timeline frame.
pub fn interval_opacity(iv: &ScheduledInterval, frame: FrameIndex, params: &FadeParams) -> f64 {
    opacity_at(
        iv.local_frame(frame),
        iv.duration_frames,
        iv.is_first,
        iv.is_last,
        params,
    )
}

/// Lifecycle phase of a scheduled interval at a global timeline frame.
pub fn interval_phase(iv: &ScheduledInterval, frame: FrameIndex, params: &FadeParams) -> FadePhase {
    fade_phase(
        iv.local_frame(frame),
        iv.duration_frames,
        iv.is_first,
        iv.is_last,
        params,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/fade/opacity.rs"]
mod tests;

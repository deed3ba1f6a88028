use crate::{animation::ease::Ease, foundation::core::Fps};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Timing policy shared by the scheduler and the fade engine.
///
/// Absent JSON fields fall back to [`TimingConfig::default`].
pub struct TimingConfig {
    /// Pull the first cue back to frame 0, absorbing its start offset.
    pub pre_roll: bool,
    /// Blank carved out at the end of every non-final cue, in seconds.
    pub gap_seconds: f64,
    /// Extra time appended to the final cue, in seconds.
    pub outro_seconds: f64,
    /// Nominal fade-in length in frames.
    pub fade_in_frames: u32,
    /// Nominal fade-out length in frames.
    pub fade_out_frames: u32,
    /// Curve applied inside both fade windows.
    pub ease: Ease,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            pre_roll: true,
            gap_seconds: 0.1,
            outro_seconds: 2.0,
            fade_in_frames: 14,
            fade_out_frames: 18,
            ease: Ease::Standard,
        }
    }
}

impl TimingConfig {
    /// Gap length at `fps`.
    pub fn gap_frames(&self, fps: Fps) -> u64 {
        fps.secs_to_frames_nonneg(self.gap_seconds)
    }

    /// Outro extension at `fps`.
    pub fn outro_frames(&self, fps: Fps) -> u64 {
        fps.secs_to_frames_nonneg(self.outro_seconds)
    }

    /// Frame-domain fade parameters at `fps`.
    pub fn fade_params(&self, fps: Fps) -> FadeParams {
        FadeParams {
            fade_in_frames: u64::from(self.fade_in_frames),
            fade_out_frames: u64::from(self.fade_out_frames),
            outro_frames: self.outro_frames(fps),
            ease: self.ease,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Fade parameters resolved to frames.
pub struct FadeParams {
    /// Nominal fade-in length.
    pub fade_in_frames: u64,
    /// Nominal fade-out length.
    pub fade_out_frames: u64,
    /// Extra fade-out length granted to the last cue.
    pub outro_frames: u64,
    /// Curve applied inside both fade windows.
    pub ease: Ease,
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/config.rs"]
mod tests;

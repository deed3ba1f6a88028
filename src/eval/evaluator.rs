use rayon::prelude::*;

use crate::{
    composition::model::{CaptionComposition, TextDirection},
    fade::opacity::{FadePhase, interval_opacity, interval_phase},
    foundation::core::{FrameIndex, FrameRange, Rect},
    foundation::error::{CuecastError, CuecastResult},
    layout::measure::{SharedSlot, TextMeasurer, lock_slot},
    layout::sizer::LayoutMetrics,
    schedule::scheduler::ScheduledInterval,
};

#[derive(Clone, Debug, serde::Serialize)]
/// Everything the host draws for one frame.
pub struct EvaluatedFrame {
    /// Evaluated frame index.
    pub frame: FrameIndex,
    /// Visible captions in cue order.
    pub captions: Vec<EvaluatedCaption>,
    /// Logo placement, if the composition has a logo.
    pub logo: Option<LogoPlacement>,
    /// Soundtrack position, if the composition has audio.
    pub audio: Option<AudioCue>,
}

#[derive(Clone, Debug, serde::Serialize)]
/// One caption block on screen.
pub struct EvaluatedCaption {
    /// Index into the composition's cue list.
    pub cue_index: usize,
    /// Frame offset inside the cue's interval.
    pub local_frame: u64,
    /// Block opacity in `[0, 1]`.
    pub opacity: f64,
    /// Fade lifecycle phase.
    pub phase: FadePhase,
    /// Primary line.
    pub primary: CaptionLine,
    /// Secondary line, omitted when the cue has none.
    pub secondary: Option<CaptionLine>,
    /// Secondary-line sizing.
    pub layout: LayoutMetrics,
}

#[derive(Clone, Debug, serde::Serialize)]
/// A single line of caption text with its box constraints.
pub struct CaptionLine {
    /// Text content.
    pub text: String,
    /// Base direction.
    pub direction: TextDirection,
    /// Font size in pixels.
    pub font_size_px: f32,
    /// For the primary line this is the max width; for the secondary line the
    /// fixed container width.
    pub width_px: f64,
}

#[derive(Clone, Debug, serde::Serialize)]
/// Logo rectangle in canvas pixels.
pub struct LogoPlacement {
    /// Image source path.
    pub source: String,
    /// Destination rectangle.
    pub rect: Rect,
    /// Constant opacity.
    pub opacity: f64,
}

#[derive(Clone, Debug, serde::Serialize)]
/// Soundtrack position for a frame.
pub struct AudioCue {
    /// Audio source path.
    pub source: String,
    /// Playback time in seconds, or `None` before the track starts.
    pub time_s: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Measured primary-line widths, indexed by cue.
pub struct PrimaryWidths(Vec<Option<f64>>);

impl PrimaryWidths {
    /// No cue measured yet; layout falls back everywhere.
    pub fn unmeasured() -> Self {
        Self::default()
    }

    /// Widths from explicit values.
    pub fn from_vec(widths: Vec<Option<f64>>) -> Self {
        Self(widths)
    }

    /// Snapshot the current value of each measurement slot.
    pub fn from_slots(slots: &[SharedSlot]) -> Self {
        Self(slots.iter().map(|s| lock_slot(s).current()).collect())
    }

    /// Measure every cue's primary line synchronously.
    pub fn measure_all(
        comp: &CaptionComposition,
        measurer: &mut dyn TextMeasurer,
    ) -> CuecastResult<Self> {
        let style = comp
            .typography
            .primary_text_style(f64::from(comp.canvas.width));
        let widths = comp
            .cues
            .iter()
            .map(|cue| measurer.measure_width(&cue.primary_text, &style).map(Some))
            .collect::<CuecastResult<Vec<_>>>()?;
        Ok(Self(widths))
    }

    /// Width for cue `index`, if measured.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied().flatten()
    }

    /// Record the width for cue `index`.
    pub fn set(&mut self, index: usize, width: Option<f64>) {
        if self.0.len() <= index {
            self.0.resize(index + 1, None);
        }
        self.0[index] = width;
    }
}

/// Stateless evaluator from a scheduled composition to per-frame draw state.
pub struct Evaluator;

impl Evaluator {
    #[tracing::instrument(skip(comp, schedule, widths))]
    /// Evaluate one frame.
    pub fn eval_frame(
        comp: &CaptionComposition,
        schedule: &[ScheduledInterval],
        frame: FrameIndex,
        widths: &PrimaryWidths,
    ) -> CuecastResult<EvaluatedFrame> {
        if frame.0 >= comp.duration().0 {
            return Err(CuecastError::evaluation("frame is out of bounds"));
        }

        let fade = comp.timing.fade_params(comp.fps);
        let captions = schedule
            .iter()
            .filter(|iv| iv.range().contains(frame))
            .map(|iv| {
                let (primary, secondary, layout) = caption_lines(comp, iv, widths);
                EvaluatedCaption {
                    cue_index: iv.cue_index,
                    local_frame: frame.0 - iv.from_frame.0,
                    opacity: interval_opacity(iv, frame, &fade),
                    phase: interval_phase(iv, frame, &fade),
                    primary,
                    secondary,
                    layout,
                }
            })
            .collect();

        let logo = comp.logo.as_ref().map(|logo| LogoPlacement {
            source: logo.source.clone(),
            rect: logo.rect(comp.canvas),
            opacity: logo.opacity,
        });

        let audio = comp.audio.as_ref().map(|track| AudioCue {
            source: track.source.clone(),
            time_s: frame
                .0
                .checked_sub(track.start_frame.0)
                .map(|delta| comp.fps.frames_to_secs(delta)),
        });

        Ok(EvaluatedFrame {
            frame,
            captions,
            logo,
            audio,
        })
    }

    /// Evaluate every frame in `range`, in order.
    ///
    /// Frames are independent, so with `parallel` set they are evaluated on a
    /// rayon pool; results are identical to sequential evaluation.
    #[tracing::instrument(skip(comp, schedule, widths))]
    pub fn eval_frames(
        comp: &CaptionComposition,
        schedule: &[ScheduledInterval],
        range: FrameRange,
        widths: &PrimaryWidths,
        parallel: bool,
    ) -> CuecastResult<Vec<EvaluatedFrame>> {
        if parallel {
            (range.start.0..range.end.0)
                .into_par_iter()
                .map(|f| Self::eval_frame(comp, schedule, FrameIndex(f), widths))
                .collect()
        } else {
            range
                .frames()
                .map(|f| Self::eval_frame(comp, schedule, f, widths))
                .collect()
        }
    }
}

fn caption_lines(
    comp: &CaptionComposition,
    iv: &ScheduledInterval,
    widths: &PrimaryWidths,
) -> (CaptionLine, Option<CaptionLine>, LayoutMetrics) {
    let typo = &comp.typography;
    let canvas_width = f64::from(comp.canvas.width);
    let layout = LayoutMetrics::compute(
        &typo.wrap,
        widths.get(iv.cue_index),
        canvas_width,
        typo.padding_px,
        comp.aspect(),
        iv.cue.secondary_len(),
    );

    let primary = CaptionLine {
        text: iv.cue.primary_text.clone(),
        direction: typo.primary.direction,
        font_size_px: typo.primary.font_size_px,
        width_px: layout.usable_width,
    };
    let secondary = iv.cue.secondary().map(|text| CaptionLine {
        text: text.to_string(),
        direction: typo.secondary.direction,
        font_size_px: typo.secondary.font_size_px,
        width_px: layout.target_width,
    });
    (primary, secondary, layout)
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;

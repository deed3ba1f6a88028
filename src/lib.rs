//! Cuecast turns timed caption cues into a deterministic per-frame caption timeline.
//!
//! Given a list of cues (`start`/`end` seconds, primary text and an optional secondary
//! line), cuecast lays them onto a video-frame timeline and answers, for any frame, which
//! caption is visible, at what opacity, and how wide its wrapped lines should be.
//!
//! # Pipeline overview
//!
//! 1. **Schedule**: `[Cue] + Fps -> [ScheduledInterval]` (seconds to non-overlapping frame spans)
//! 2. **Fade**: `ScheduledInterval + FrameIndex -> opacity` (eased fade in/out per interval)
//! 3. **Size**: measured primary width + aspect + secondary length -> wrap width
//! 4. **Evaluate**: `CaptionComposition + FrameIndex -> EvaluatedFrame`
//!
//! Text measurement is an explicit, asynchronous-by-shape protocol: each cue owns a
//! [`MeasurementSlot`] that starts pending, is resolved by a [`TextMeasurer`], and is
//! invalidated again when a [`ResizeObserver`] reports a container resize. Until a slot
//! resolves, layout falls back to the full usable width.
//!
//! The core is pure and deterministic: scheduling, fading and sizing depend only on their
//! inputs. IO (cue files, fonts, logo probing) lives at the edges.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod animation;
mod assets;
mod composition;
mod eval;
mod fade;
mod foundation;
mod layout;
mod schedule;

pub use animation::ease::Ease;
pub use animation::interpolate::{Extrapolate, InterpolateOpts, interpolate};
pub use assets::probe::{probe_image_file, probe_image_size, read_font_file};
pub use composition::model::{
    AudioTrack, CaptionComposition, LineStyle, LogoOverlay, OutputPreset, TextDirection,
    Typography,
};
pub use eval::evaluator::{
    AudioCue, CaptionLine, EvaluatedCaption, EvaluatedFrame, Evaluator, LogoPlacement,
    PrimaryWidths,
};
pub use eval::session::{CaptionSession, SessionOpts};
pub use fade::opacity::{
    FadePhase, FadeWindows, fade_phase, interval_opacity, interval_phase, opacity_at,
};
pub use foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Point, Rect, Size, Vec2};
pub use foundation::error::{CuecastError, CuecastResult};
pub use layout::measure::{
    FixedAdvanceMeasurer, MeasureTicket, MeasurementSlot, ParleyMeasurer, ResizeObserver,
    ResizeSubscription, SharedSlot, TextMeasurer, TextStyle, lock_slot, measure_pending,
};
pub use layout::sizer::{AspectClass, LayoutMetrics, WrapPolicy, target_width, usable_width};
pub use schedule::config::{FadeParams, TimingConfig};
pub use schedule::cue::{Cue, parse_cues_json, read_cues_json};
pub use schedule::scheduler::{ScheduledInterval, interval_at, schedule, total_duration_frames};
pub use schedule::validate::{CueViolation, ensure_valid_cues, validate_cues};

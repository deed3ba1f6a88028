use crate::{
    foundation::core::{Canvas, Fps, FrameIndex, Rect},
    foundation::error::{CuecastError, CuecastResult},
    layout::measure::TextStyle,
    layout::sizer::{AspectClass, WrapPolicy, usable_width},
    schedule::config::TimingConfig,
    schedule::cue::Cue,
    schedule::scheduler::{ScheduledInterval, schedule, total_duration_frames},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Fixed output targets.
pub enum OutputPreset {
    /// 1920x1080 at 60 fps.
    Landscape1920x1080,
    /// 1080x1920 at 60 fps.
    Portrait1080x1920,
}

impl OutputPreset {
    /// Stable composition identifier.
    pub fn id(self) -> &'static str {
        match self {
            Self::Landscape1920x1080 => "Landscape1920x1080",
            Self::Portrait1080x1920 => "Portrait1080x1920",
        }
    }

    /// Output canvas.
    pub fn canvas(self) -> Canvas {
        match self {
            Self::Landscape1920x1080 => Canvas {
                width: 1920,
                height: 1080,
            },
            Self::Portrait1080x1920 => Canvas {
                width: 1080,
                height: 1920,
            },
        }
    }

    /// Output frame rate (60 fps for both presets).
    pub fn fps(self) -> Fps {
        Fps { num: 60, den: 1 }
    }

    /// Aspect class of the canvas.
    pub fn aspect(self) -> AspectClass {
        AspectClass::from_canvas(self.canvas())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Base text direction of a caption line.
pub enum TextDirection {
    /// Right-to-left (primary line).
    Rtl,
    /// Left-to-right (secondary line).
    Ltr,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Styling of one caption line.
pub struct LineStyle {
    /// CSS-style font family list handed to the host.
    pub font_family: String,
    /// Font size in pixels.
    pub font_size_px: f32,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
    /// Base direction.
    pub direction: TextDirection,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Caption typography for one aspect class.
pub struct Typography {
    /// Padding around the caption block on every side.
    pub padding_px: f64,
    /// Primary line style.
    pub primary: LineStyle,
    /// Space between primary and secondary lines.
    pub primary_gap_px: f64,
    /// Secondary line style.
    pub secondary: LineStyle,
    /// Secondary-line wrap heuristics.
    pub wrap: WrapPolicy,
}

impl Typography {
    /// Typography used by the fixed presets.
    pub fn for_aspect(aspect: AspectClass) -> Self {
        let wide = aspect == AspectClass::Wide;
        Self {
            padding_px: 48.0,
            primary: LineStyle {
                font_family: "qpc-hafs, serif".to_string(),
                font_size_px: if wide { 90.0 } else { 100.0 },
                line_height: 1.25,
                direction: TextDirection::Rtl,
            },
            primary_gap_px: if wide { 28.0 } else { 36.0 },
            secondary: LineStyle {
                font_family: "\"Alegreya Sans SC\", sans-serif".to_string(),
                font_size_px: 55.0,
                line_height: 1.25,
                direction: TextDirection::Ltr,
            },
            wrap: WrapPolicy::default(),
        }
    }

    /// Measurement style for the primary line on a canvas of `canvas_width`.
    pub fn primary_text_style(&self, canvas_width: f64) -> TextStyle {
        TextStyle {
            font_size_px: self.primary.font_size_px,
            max_width_px: Some(usable_width(canvas_width, self.padding_px) as f32),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Static logo composited at the bottom center for the whole duration.
pub struct LogoOverlay {
    /// Image source path (resolved by the host).
    pub source: String,
    /// Displayed width in pixels.
    pub width_px: f64,
    /// Distance from the canvas bottom edge.
    pub bottom_px: f64,
    /// Constant opacity.
    pub opacity: f64,
    /// Intrinsic `(width, height)` if known; otherwise the logo is placed as a square.
    #[serde(default)]
    pub intrinsic_size: Option<(u32, u32)>,
}

impl LogoOverlay {
    /// Logo sized for the aspect class (500 px wide, 700 px tall).
    pub fn for_aspect(source: impl Into<String>, aspect: AspectClass) -> Self {
        Self {
            source: source.into(),
            width_px: match aspect {
                AspectClass::Wide => 500.0,
                AspectClass::Tall => 700.0,
            },
            bottom_px: 5.0,
            opacity: 1.0,
            intrinsic_size: None,
        }
    }

    /// Displayed height, preserving the intrinsic aspect ratio when known.
    pub fn height_px(&self) -> f64 {
        self.height_for(self.intrinsic_size)
    }

    /// Bottom-centered rectangle on `canvas`, using the stored intrinsic size.
    pub fn rect(&self, canvas: Canvas) -> Rect {
        self.placement(canvas, self.intrinsic_size)
    }

    /// Bottom-centered rectangle on `canvas` for an image of `intrinsic` size.
    pub fn placement(&self, canvas: Canvas, intrinsic: Option<(u32, u32)>) -> Rect {
        let size = canvas.size();
        let x0 = (size.width - self.width_px) / 2.0;
        let y1 = size.height - self.bottom_px;
        Rect::new(x0, y1 - self.height_for(intrinsic), x0 + self.width_px, y1)
    }

    fn height_for(&self, intrinsic: Option<(u32, u32)>) -> f64 {
        match intrinsic {
            Some((w, h)) if w > 0 => self.width_px * f64::from(h) / f64::from(w),
            _ => self.width_px,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Audio played from the start of the output.
pub struct AudioTrack {
    /// Audio source path (resolved by the host).
    pub source: String,
    /// Timeline frame at which playback starts.
    pub start_frame: FrameIndex,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Everything needed to answer per-frame caption queries.
pub struct CaptionComposition {
    /// Composition identifier.
    pub id: String,
    /// Output canvas.
    pub canvas: Canvas,
    /// Timeline frame rate.
    pub fps: Fps,
    /// Caption cues, sorted by start.
    pub cues: Vec<Cue>,
    /// Scheduling and fade policy.
    #[serde(default)]
    pub timing: TimingConfig,
    /// Caption typography.
    pub typography: Typography,
    /// Optional soundtrack.
    #[serde(default)]
    pub audio: Option<AudioTrack>,
    /// Optional logo overlay.
    #[serde(default)]
    pub logo: Option<LogoOverlay>,
}

impl CaptionComposition {
    /// Composition for one of the fixed presets.
    pub fn new(preset: OutputPreset, cues: Vec<Cue>) -> Self {
        Self {
            id: preset.id().to_string(),
            canvas: preset.canvas(),
            fps: preset.fps(),
            cues,
            timing: TimingConfig::default(),
            typography: Typography::for_aspect(preset.aspect()),
            audio: None,
            logo: None,
        }
    }

    /// Override the frame rate.
    pub fn with_fps(mut self, fps: Fps) -> Self {
        self.fps = fps;
        self
    }

    /// Override the timing policy.
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Attach a soundtrack starting at frame 0.
    pub fn with_audio(mut self, source: impl Into<String>) -> Self {
        self.audio = Some(AudioTrack {
            source: source.into(),
            start_frame: FrameIndex(0),
        });
        self
    }

    /// Attach the bottom-centered logo sized for this canvas.
    pub fn with_logo(mut self, source: impl Into<String>) -> Self {
        self.logo = Some(LogoOverlay::for_aspect(source, self.aspect()));
        self
    }

    /// Aspect class of the canvas.
    pub fn aspect(&self) -> AspectClass {
        AspectClass::from_canvas(self.canvas)
    }

    /// Total frames: `ceil((last.end + outro) * fps)`.
    pub fn duration(&self) -> FrameIndex {
        FrameIndex(total_duration_frames(&self.cues, self.fps, &self.timing))
    }

    /// Schedule the cues at this composition's frame rate.
    pub fn schedule(&self) -> Vec<ScheduledInterval> {
        schedule(&self.cues, self.fps, &self.timing)
    }

    /// Structural checks. Cue ordering is not checked here.
    pub fn validate(&self) -> CuecastResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(CuecastError::validation("canvas width/height must be > 0"));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        if !self.timing.gap_seconds.is_finite() || !self.timing.outro_seconds.is_finite() {
            return Err(CuecastError::validation(
                "timing gap_seconds/outro_seconds must be finite",
            ));
        }
        if !self.typography.padding_px.is_finite() || self.typography.padding_px < 0.0 {
            return Err(CuecastError::validation(
                "typography padding_px must be finite and >= 0",
            ));
        }
        if let Some(logo) = &self.logo {
            if !logo.width_px.is_finite() || logo.width_px <= 0.0 {
                return Err(CuecastError::validation("logo width_px must be > 0"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;

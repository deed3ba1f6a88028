use std::io::Read;

use crate::foundation::error::{CuecastError, CuecastResult};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A timestamped caption unit.
///
/// Cue lists are expected sorted by `start` and non-overlapping. Nothing in the
/// scheduler enforces that; see [`crate::validate_cues`].
pub struct Cue {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Primary (right-to-left) caption line.
    #[serde(alias = "arabic")]
    pub primary_text: String,
    /// Optional secondary (left-to-right translation) line.
    #[serde(
        default,
        alias = "translation",
        skip_serializing_if = "Option::is_none"
    )]
    pub secondary_text: Option<String>,
}

impl Cue {
    /// Cue with primary text only.
    pub fn new(start: f64, end: f64, primary_text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            primary_text: primary_text.into(),
            secondary_text: None,
        }
    }

    /// Attach a secondary line.
    pub fn with_secondary(mut self, text: impl Into<String>) -> Self {
        self.secondary_text = Some(text.into());
        self
    }

    /// Secondary line, treating an empty string as absent.
    pub fn secondary(&self) -> Option<&str> {
        self.secondary_text.as_deref().filter(|s| !s.is_empty())
    }

    /// Secondary line length in characters (0 when absent).
    pub fn secondary_len(&self) -> usize {
        self.secondary().map_or(0, |s| s.chars().count())
    }

    /// Wall-clock length in seconds (negative for malformed cues).
    pub fn duration_secs(&self) -> f64 {
        self.end - self.start
    }
}

/// Parse a JSON array of cues.
pub fn parse_cues_json(json: &str) -> CuecastResult<Vec<Cue>> {
    Ok(serde_json::from_str(json)?)
}

/// Read a JSON array of cues from any reader.
pub fn read_cues_json(reader: impl Read) -> CuecastResult<Vec<Cue>> {
    serde_json::from_reader(reader).map_err(|e| CuecastError::serde(format!("cue list: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/cue.rs"]
mod tests;

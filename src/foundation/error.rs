/// Convenience result type used across cuecast.
pub type CuecastResult<T> = Result<T, CuecastError>;

/// Top-level error taxonomy used by library APIs.
///
/// Scheduling, fades and layout sizing are total functions and never produce
/// these; errors only come from the outer surfaces (cue files, measurement,
/// frame queries).
#[derive(thiserror::Error, Debug)]
pub enum CuecastError {
    /// Invalid user-provided cue or composition data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Text measurement failed (font registration or shaping).
    #[error("measurement error: {0}")]
    Measurement(String),

    /// Errors while evaluating timeline state for a frame.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CuecastError {
    /// Build a [`CuecastError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CuecastError::Measurement`] value.
    pub fn measurement(msg: impl Into<String>) -> Self {
        Self::Measurement(msg.into())
    }

    /// Build a [`CuecastError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`CuecastError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for CuecastError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

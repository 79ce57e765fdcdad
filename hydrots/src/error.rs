//! Error types for the regularization engine.

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Error type for engine operations
///
/// Only conditions that must abort a call before any processing are errors.
/// An undeterminable cadence is a normal outcome (`Cadence::Insufficient`),
/// and a wide pivot over conflicting cadences completes with a flag
/// (`WidePivot::consistent`) rather than failing: one malformed series must
/// not abort a batch over many independent series.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Series '{series}' has {actual} values but the time axis has {expected}")]
    LengthMismatch {
        series: String,
        expected: usize,
        actual: usize,
    },

    #[error("Time axis mixes date-only and instant timestamps")]
    MixedAxisKinds,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<String> for EngineError {
    fn from(s: String) -> Self {
        EngineError::InvalidArgument(s)
    }
}

impl From<&str> for EngineError {
    fn from(s: &str) -> Self {
        EngineError::InvalidArgument(s.to_string())
    }
}

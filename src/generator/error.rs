//! Generator error type.

use derive_more::{Display, Error};
use tracing::instrument;

/// Number generation failed after all retries.
#[derive(Debug, Clone, Display, Error)]
#[display("Generator error: {} at {}:{}", message, file, line)]
pub struct GeneratorError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GeneratorError {
    /// Creates a new generator error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<reqwest::Error> for GeneratorError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        Self::new(format!("HTTP error: {}", err))
    }
}

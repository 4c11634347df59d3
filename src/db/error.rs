//! Storage error types.

use derive_more::{Display, Error};
use std::sync::PoisonError;
use tracing::instrument;

/// Failure reading or writing a stored session, with location tracking.
///
/// Covers SQLite driver errors, snapshot (de)serialization and records that
/// decode but violate session invariants.
#[derive(Debug, Clone, Display, Error)]
#[display("Storage error: {} at {}:{}", message, file, line)]
pub struct DbError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DbError {
    /// Creates a new storage error with caller location tracking.
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

    /// A stored record that decoded but cannot be a valid session.
    #[track_caller]
    pub fn corrupt(id: &str, reason: impl std::fmt::Display) -> Self {
        Self::new(format!("Corrupt record '{}': {}", id, reason))
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(format!("SQLite query failed: {}", err))
    }
}

impl From<diesel::ConnectionError> for DbError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(format!("SQLite connection failed: {}", err))
    }
}

impl From<serde_json::Error> for DbError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Snapshot encoding failed: {}", err))
    }
}

impl<T> From<PoisonError<T>> for DbError {
    #[track_caller]
    fn from(err: PoisonError<T>) -> Self {
        Self::new(format!("Session store lock poisoned: {}", err))
    }
}

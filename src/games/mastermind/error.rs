//! Error types for guesses and session operations.

use super::GameStatus;
use crate::db::RepositoryError;
use crate::generator::GeneratorError;
use derive_more::{Display, Error, From};
use tracing::instrument;

/// Malformed guess input.
///
/// Always recoverable: a rejected guess never consumes an attempt.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum GuessError {
    /// Nothing was entered.
    #[display("Input cannot be empty")]
    Empty,

    /// Something other than digits and spaces was entered.
    #[display("Input must contain only numbers, got '{input}'")]
    NonNumeric {
        /// The rejected input.
        input: String,
    },

    /// Wrong number of digits.
    #[display("Guess must be {expected} numbers long, got {actual}")]
    InvalidLength {
        /// Required length.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },

    /// A digit outside the configured range.
    #[display("Number {value} must be between {min} and {max}")]
    OutOfRange {
        /// The offending value.
        value: u32,
        /// Smallest allowed value.
        min: u32,
        /// Largest allowed value.
        max: u32,
    },
}

/// Pattern generation failed; no session was created.
#[derive(Debug, Clone, Display, Error)]
#[display("Failed to initialize game: {} at {}:{}", message, file, line)]
pub struct GameInitError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GameInitError {
    /// Creates a new initialization error with caller location tracking.
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

impl From<GeneratorError> for GameInitError {
    #[track_caller]
    fn from(err: GeneratorError) -> Self {
        Self::new(format!("Generator error: {}", err.message))
    }
}

/// Errors surfaced by the session coordinator.
#[derive(Debug, Display, Error, From)]
pub enum GameError {
    /// The secret pattern could not be generated.
    #[from]
    #[display("{_0}")]
    Init(GameInitError),

    /// The guess was rejected before scoring.
    #[from]
    #[display("Invalid guess: {_0}")]
    Guess(GuessError),

    /// The session has already finished.
    #[display("Game is already over ({status})")]
    GameOver {
        /// The terminal status.
        status: GameStatus,
    },

    /// No persisted session with this id.
    #[display("No game found with ID: {id}")]
    NotFound {
        /// The requested id.
        id: String,
    },

    /// A game id that is not a valid identifier.
    #[display("Invalid game ID format: '{id}'")]
    InvalidGameId {
        /// The rejected id.
        id: String,
    },

    /// Saving or loading the session failed.
    #[from]
    #[display("Persistence failure: {_0}")]
    Persistence(RepositoryError),
}

//! Session coordinator.
//!
//! A [`Game`] owns one [`Session`] and the repository it is persisted to.
//! Status only moves forward:
//!
//! - `InProgress` → `Won` when a guess matches every position
//! - `InProgress` → `Lost` when the attempt budget runs out
//!
//! Every successful creation and guess writes exactly one snapshot.

use super::{
    CodePattern, Feedback, GameConfig, GameError, GameLogic, GameStatus, Guess, GuessError,
    GuessRecord, Session,
};
use crate::db::{GameRepository, RepositoryError};
use crate::generator::NumberGenerator;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// A Mastermind game bound to its persistence.
#[derive(Debug)]
pub struct Game<R> {
    repository: R,
    session: Session,
}

impl<R: GameRepository> Game<R> {
    /// Starts a new session and persists it.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Init`] if no pattern could be generated (nothing
    /// is persisted), or [`GameError::Persistence`] if the first save fails.
    #[instrument(skip(repository, generator))]
    pub fn create_new<G: NumberGenerator + ?Sized>(
        repository: R,
        generator: &G,
        config: GameConfig,
    ) -> Result<Self, GameError> {
        let pattern = GameLogic::generate_pattern(generator, &config)?;
        let session = Session::new(Uuid::new_v4().to_string(), config, pattern);

        repository.save(&session)?;
        info!(session_id = %session.id(), "New game created");

        Ok(Self {
            repository,
            session,
        })
    }

    /// Resumes a persisted session.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NotFound`] if `id` has no record, or
    /// [`GameError::Persistence`] if the record cannot be read.
    #[instrument(skip(repository))]
    pub fn load_existing(repository: R, id: &str) -> Result<Self, GameError> {
        let session = repository.load(id).map_err(|e| match e {
            RepositoryError::NotFound { id } => {
                warn!(session_id = %id, "Game not found");
                GameError::NotFound { id }
            }
            other => GameError::Persistence(other),
        })?;

        info!(
            session_id = %session.id(),
            status = %session.status(),
            attempts = session.attempts(),
            "Game loaded"
        );
        Ok(Self {
            repository,
            session,
        })
    }

    /// Scores `guess`, advances the status, and persists the result.
    ///
    /// The in-memory session only changes once the save succeeds.
    ///
    /// # Errors
    ///
    /// - [`GameError::GameOver`] if the session is already won or lost
    /// - [`GameError::Guess`] if the guess length differs from the pattern
    /// - [`GameError::Persistence`] if the snapshot could not be written
    #[instrument(skip(self), fields(session_id = %self.session.id()))]
    pub fn submit_guess(&mut self, guess: Guess) -> Result<Feedback, GameError> {
        let status = *self.session.status();
        if status.is_terminal() {
            warn!(status = %status, "Guess submitted to finished game");
            return Err(GameError::GameOver { status });
        }

        let expected = *self.session.config().pattern_length();
        if guess.len() != expected {
            warn!(expected, actual = guess.len(), "Guess length mismatch");
            return Err(GuessError::InvalidLength {
                expected,
                actual: guess.len(),
            }
            .into());
        }

        let feedback = GameLogic::score(&guess, self.session.frequency(), self.session.pattern());
        let attempts = self.session.attempts() + 1;
        let next_status = if feedback.is_winning(expected) {
            GameStatus::Won
        } else if attempts >= *self.session.config().max_attempts() {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        };

        let mut candidate = self.session.clone();
        candidate.record(guess, feedback, next_status);
        self.repository.save(&candidate)?;
        self.session = candidate;

        info!(
            attempts,
            numbers_correct = feedback.numbers_correct(),
            positions_correct = feedback.positions_correct(),
            status = %next_status,
            "Guess processed"
        );
        Ok(feedback)
    }

    /// Guesses left before the session is lost.
    pub fn remaining_attempts(&self) -> u32 {
        self.session.remaining_attempts()
    }
}

impl<R> Game<R> {
    /// The underlying session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Session identifier.
    pub fn id(&self) -> &str {
        self.session.id()
    }

    /// Current status.
    pub fn status(&self) -> GameStatus {
        *self.session.status()
    }

    /// Whether the session has reached a terminal status.
    pub fn is_over(&self) -> bool {
        self.status().is_terminal()
    }

    /// Scored guesses in submission order.
    pub fn history(&self) -> &[GuessRecord] {
        self.session.history()
    }

    /// Rules in effect for this session.
    pub fn config(&self) -> &GameConfig {
        self.session.config()
    }

    /// The secret pattern, or `None` while the game is still being played.
    pub fn pattern(&self) -> Option<&CodePattern> {
        self.is_over().then(|| self.session.pattern())
    }

    /// Consumes the game, returning its session.
    pub fn into_session(self) -> Session {
        self.session
    }
}

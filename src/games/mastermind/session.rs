//! Session state and its persisted form.

use super::{
    CodePattern, Feedback, GameConfig, GameLogic, GameStatus, Guess, GuessRecord,
    PatternFrequency,
};
use crate::db::{DbError, HistoryEntry, SessionRecord};
use chrono::{NaiveDateTime, Utc};
use derive_getters::Getters;
use tracing::{debug, instrument, warn};

/// Unique identifier for a session (a UUID v4 string).
pub type SessionId = String;

/// One complete game from creation to a terminal status.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct Session {
    id: SessionId,
    config: GameConfig,
    pattern: CodePattern,
    frequency: PatternFrequency,
    status: GameStatus,
    attempts: u32,
    history: Vec<GuessRecord>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl Session {
    /// Starts a fresh session around `pattern`.
    #[instrument(skip(pattern))]
    pub(super) fn new(id: SessionId, config: GameConfig, pattern: CodePattern) -> Self {
        let frequency = GameLogic::frequency_of(&pattern);
        let now = Utc::now().naive_utc();
        Self {
            id,
            config,
            pattern,
            frequency,
            status: GameStatus::InProgress,
            attempts: 0,
            history: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Guesses left before the session is lost.
    pub fn remaining_attempts(&self) -> u32 {
        self.config.max_attempts().saturating_sub(self.attempts)
    }

    /// Appends a scored guess and moves to `status`.
    #[instrument(skip(self, guess), fields(session_id = %self.id))]
    pub(super) fn record(&mut self, guess: Guess, feedback: Feedback, status: GameStatus) {
        self.history.push(GuessRecord::new(guess, feedback));
        self.attempts += 1;
        self.status = status;
        self.updated_at = Utc::now().naive_utc();
        debug!(attempts = self.attempts, status = %status, "Guess recorded");
    }
}

impl From<&Session> for SessionRecord {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id.clone(),
            pattern: session.pattern.digits().to_vec(),
            status: session.status,
            attempts: session.attempts,
            history: session
                .history
                .iter()
                .map(|record| HistoryEntry {
                    guess: record.guess().digits().to_vec(),
                    numbers_correct: *record.feedback().numbers_correct(),
                    positions_correct: *record.feedback().positions_correct(),
                })
                .collect(),
            created_at: session.created_at,
            updated_at: session.updated_at,
            config: session.config,
        }
    }
}

impl TryFrom<SessionRecord> for Session {
    type Error = DbError;

    /// Rebuilds a session, re-deriving the frequency table from the pattern.
    #[instrument(skip(record), fields(session_id = %record.id))]
    fn try_from(record: SessionRecord) -> Result<Self, Self::Error> {
        let config = GameConfig::new(
            *record.config.pattern_length(),
            *record.config.min_number(),
            *record.config.max_number(),
            *record.config.max_attempts(),
        )
        .map_err(|e| DbError::corrupt(&record.id, e.message))?;

        if record.pattern.len() != *config.pattern_length() {
            warn!("Stored pattern length does not match config");
            return Err(DbError::corrupt(
                &record.id,
                format!(
                    "pattern has {} digits, config expects {}",
                    record.pattern.len(),
                    config.pattern_length()
                ),
            ));
        }
        if record.history.len() != record.attempts as usize {
            warn!("Stored attempts do not match history");
            return Err(DbError::corrupt(
                &record.id,
                format!(
                    "{} attempts but {} history entries",
                    record.attempts,
                    record.history.len()
                ),
            ));
        }

        if let Some(bad) = record.pattern.iter().find(|d| !config.in_range(**d)) {
            warn!("Stored pattern digit out of range");
            return Err(DbError::corrupt(
                &record.id,
                format!(
                    "pattern digit {} outside {}..={}",
                    bad,
                    config.min_number(),
                    config.max_number()
                ),
            ));
        }
        check_status(&record, &config)?;

        let pattern = CodePattern::new(record.pattern);
        let frequency = GameLogic::frequency_of(&pattern);
        let history = record
            .history
            .into_iter()
            .map(|entry| {
                GuessRecord::new(
                    Guess::new(entry.guess),
                    Feedback::new(entry.numbers_correct, entry.positions_correct),
                )
            })
            .collect();

        Ok(Self {
            id: record.id,
            config,
            pattern,
            frequency,
            status: record.status,
            attempts: record.attempts,
            history,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

/// Checks that the stored status is the one the history leads to.
fn check_status(record: &SessionRecord, config: &GameConfig) -> Result<(), DbError> {
    let max_attempts = *config.max_attempts();
    let won_last = record
        .history
        .last()
        .is_some_and(|entry| entry.positions_correct == *config.pattern_length());

    let reason = match record.status {
        _ if record.attempts > max_attempts => Some(format!(
            "{} attempts exceed the limit of {}",
            record.attempts, max_attempts
        )),
        GameStatus::InProgress if won_last => Some("winning guess recorded".to_string()),
        GameStatus::InProgress if record.attempts >= max_attempts => {
            Some("no attempts left".to_string())
        }
        GameStatus::Won if !won_last => Some("last guess is not a winning guess".to_string()),
        GameStatus::Lost if won_last || record.attempts < max_attempts => {
            Some("attempts remain or last guess won".to_string())
        }
        _ => None,
    };

    match reason {
        Some(reason) => {
            warn!(status = %record.status, "Stored status inconsistent with history");
            Err(DbError::corrupt(
                &record.id,
                format!("status {} but {}", record.status, reason),
            ))
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn played_session() -> Session {
        let mut session = Session::new(
            "id-1".to_string(),
            GameConfig::default(),
            CodePattern::new(vec![0, 1, 2, 3]),
        );
        session.record(
            Guess::new(vec![1, 2, 3, 4]),
            Feedback::new(3, 0),
            GameStatus::InProgress,
        );
        session
    }

    #[test]
    fn new_session_starts_in_progress() {
        let session = Session::new(
            "id-0".to_string(),
            GameConfig::default(),
            CodePattern::new(vec![3, 3, 1, 0]),
        );
        assert_eq!(*session.status(), GameStatus::InProgress);
        assert_eq!(*session.attempts(), 0);
        assert!(session.history().is_empty());
        assert_eq!(session.frequency().count(3), 2);
        assert_eq!(session.remaining_attempts(), 10);
    }

    #[test]
    fn record_round_trip_preserves_state() {
        let session = played_session();
        let restored = Session::try_from(SessionRecord::from(&session)).unwrap();
        assert_eq!(restored, session);
    }

    #[test]
    fn record_with_mismatched_attempts_rejected() {
        let mut record = SessionRecord::from(&played_session());
        record.attempts = 5;
        assert!(Session::try_from(record).is_err());
    }

    #[test]
    fn record_with_wrong_pattern_length_rejected() {
        let mut record = SessionRecord::from(&played_session());
        record.pattern.pop();
        assert!(Session::try_from(record).is_err());
    }

    fn single_attempt_session(status: GameStatus) -> Session {
        let mut session = Session::new(
            "id-2".to_string(),
            GameConfig::new(4, 0, 7, 1).unwrap(),
            CodePattern::new(vec![0, 1, 2, 3]),
        );
        session.record(Guess::new(vec![7, 7, 7, 7]), Feedback::new(0, 0), status);
        session
    }

    #[test]
    fn record_with_out_of_range_pattern_rejected() {
        let mut record = SessionRecord::from(&played_session());
        record.pattern = vec![9, 9, 9, 9];
        let err = Session::try_from(record).unwrap_err();
        assert!(err.message.contains("outside 0..=7"));
    }

    #[test]
    fn in_progress_record_without_attempts_left_rejected() {
        let record = SessionRecord::from(&single_attempt_session(GameStatus::InProgress));
        let err = Session::try_from(record).unwrap_err();
        assert!(err.message.contains("no attempts left"));
    }

    #[test]
    fn won_record_without_winning_guess_rejected() {
        let mut record = SessionRecord::from(&played_session());
        record.status = GameStatus::Won;
        assert!(Session::try_from(record).is_err());
    }

    #[test]
    fn finished_records_load() {
        let lost = SessionRecord::from(&single_attempt_session(GameStatus::Lost));
        assert_eq!(*Session::try_from(lost).unwrap().status(), GameStatus::Lost);

        let mut won = played_session();
        won.record(
            Guess::new(vec![0, 1, 2, 3]),
            Feedback::new(4, 4),
            GameStatus::Won,
        );
        let restored = Session::try_from(SessionRecord::from(&won)).unwrap();
        assert_eq!(*restored.status(), GameStatus::Won);
    }
}

//! Persisted session shapes.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

use crate::db::{DbError, schema};
use crate::games::mastermind::{GameConfig, GameStatus};

/// Serialization-level snapshot of a session.
///
/// This is the shape written by every repository; the frequency table is
/// not part of it and is re-derived on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Session id.
    pub id: String,
    /// Secret pattern digits.
    pub pattern: Vec<u32>,
    /// Lifecycle status.
    pub status: GameStatus,
    /// Scored guesses so far.
    pub attempts: u32,
    /// Scored guesses in submission order.
    pub history: Vec<HistoryEntry>,
    /// Creation time (UTC).
    pub created_at: NaiveDateTime,
    /// Last write time (UTC).
    pub updated_at: NaiveDateTime,
    /// Session rules.
    pub config: GameConfig,
}

/// One scored guess in a [`SessionRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Guessed digits.
    pub guess: Vec<u32>,
    /// Correct digits regardless of position.
    pub numbers_correct: usize,
    /// Correct digits in the correct position.
    pub positions_correct: usize,
}

/// Row in the `games` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, Identifiable)]
#[diesel(table_name = schema::games)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct GameRow {
    id: String,
    pattern: String,
    status: String,
    attempts: i32,
    history: String,
    config: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl GameRow {
    /// Flattens a record into columns, JSON-encoding the nested parts.
    #[instrument(skip(record), fields(session_id = %record.id))]
    pub(crate) fn from_record(record: &SessionRecord) -> Result<Self, DbError> {
        let attempts = i32::try_from(record.attempts).map_err(|_| {
            DbError::new(format!("Attempt count {} too large", record.attempts))
        })?;
        Ok(Self {
            id: record.id.clone(),
            pattern: serde_json::to_string(&record.pattern)?,
            status: record.status.to_string(),
            attempts,
            history: serde_json::to_string(&record.history)?,
            config: serde_json::to_string(&record.config)?,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }

    /// Decodes the row back into a record.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub(crate) fn into_record(self) -> Result<SessionRecord, DbError> {
        let attempts = stored_attempts(&self.id, self.attempts)?;
        Ok(SessionRecord {
            status: parse_status(&self.status)?,
            pattern: serde_json::from_str(&self.pattern)?,
            history: serde_json::from_str(&self.history)?,
            config: serde_json::from_str(&self.config)?,
            attempts,
            id: self.id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }

    /// Lightweight listing view of this row.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub(crate) fn summary(&self) -> Result<GameSummary, DbError> {
        let config: GameConfig = serde_json::from_str(&self.config)?;
        Ok(GameSummary {
            id: self.id.clone(),
            status: parse_status(&self.status)?,
            attempts: stored_attempts(&self.id, self.attempts)?,
            max_attempts: *config.max_attempts(),
            updated_at: self.updated_at,
        })
    }
}

/// Converts the stored attempt column, rejecting negative counts.
fn stored_attempts(id: &str, attempts: i32) -> Result<u32, DbError> {
    u32::try_from(attempts)
        .map_err(|_| DbError::corrupt(id, format!("negative attempt count {}", attempts)))
}

/// Parses a stored status string.
#[instrument]
fn parse_status(s: &str) -> Result<GameStatus, DbError> {
    GameStatus::from_str(s).map_err(|_| DbError::new(format!("Invalid status: '{}'", s)))
}

/// Listing entry for a persisted session.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct GameSummary {
    id: String,
    status: GameStatus,
    attempts: u32,
    max_attempts: u32,
    updated_at: NaiveDateTime,
}

impl From<&SessionRecord> for GameSummary {
    fn from(record: &SessionRecord) -> Self {
        Self {
            id: record.id.clone(),
            status: record.status,
            attempts: record.attempts,
            max_attempts: *record.config.max_attempts(),
            updated_at: record.updated_at,
        }
    }
}

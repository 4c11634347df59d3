//! SQLite-backed session repository.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument, warn};

use crate::db::{
    DbError, GameRepository, GameRow, GameSummary, RepositoryError, SessionRecord, schema,
};
use crate::games::mastermind::Session;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Session repository persisting to a SQLite database file.
///
/// A connection is opened per operation, so `":memory:"` would lose data
/// between calls; use
/// [`InMemoryGameRepository`](crate::InMemoryGameRepository) instead.
#[derive(Debug, Clone)]
pub struct SqliteGameRepository {
    db_path: String,
}

impl SqliteGameRepository {
    /// Opens the database at `db_path`, creating the schema if needed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        info!(path = %db_path, "Creating SqliteGameRepository");
        let repository = Self { db_path };

        let mut conn = repository.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Failed to run migrations: {}", e)))?;
        debug!(count = applied.len(), "Migrations applied");

        Ok(repository)
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Lists stored sessions, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Load`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list_games(&self) -> Result<Vec<GameSummary>, RepositoryError> {
        debug!("Listing games");
        let mut conn = self.connection().map_err(RepositoryError::Load)?;

        let rows = schema::games::table
            .order(schema::games::updated_at.desc())
            .select(GameRow::as_select())
            .load::<GameRow>(&mut conn)
            .map_err(|e| RepositoryError::Load(e.into()))?;

        let summaries = rows
            .iter()
            .map(GameRow::summary)
            .collect::<Result<Vec<_>, _>>()
            .map_err(RepositoryError::Load)?;

        info!(count = summaries.len(), "Games listed");
        Ok(summaries)
    }
}

impl GameRepository for SqliteGameRepository {
    #[instrument(skip(self, session), fields(session_id = %session.id()))]
    fn save(&self, session: &Session) -> Result<(), RepositoryError> {
        debug!("Saving game");
        let row = GameRow::from_record(&SessionRecord::from(session))
            .map_err(RepositoryError::Save)?;
        let mut conn = self.connection().map_err(RepositoryError::Save)?;

        diesel::replace_into(schema::games::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| {
                warn!(error = %e, "Save failed");
                RepositoryError::Save(e.into())
            })?;

        info!(status = %session.status(), attempts = session.attempts(), "Game saved");
        Ok(())
    }

    #[instrument(skip(self))]
    fn load(&self, id: &str) -> Result<Session, RepositoryError> {
        debug!(session_id = %id, "Loading game");
        let mut conn = self.connection().map_err(RepositoryError::Load)?;

        let row = schema::games::table
            .find(id)
            .select(GameRow::as_select())
            .first::<GameRow>(&mut conn)
            .optional()
            .map_err(|e| RepositoryError::Load(e.into()))?
            .ok_or_else(|| {
                debug!(session_id = %id, "Game not found");
                RepositoryError::NotFound { id: id.to_string() }
            })?;

        let session = row
            .into_record()
            .and_then(Session::try_from)
            .map_err(RepositoryError::Load)?;

        info!(session_id = %id, "Game loaded");
        Ok(session)
    }
}

//! Persistence boundary for sessions.

use derive_more::{Display, Error};

use crate::db::DbError;
use crate::games::mastermind::Session;

/// Persistence failure, split by what was being attempted.
#[derive(Debug, Clone, Display, Error)]
pub enum RepositoryError {
    /// No record exists for the id.
    #[display("No game found with ID: {id}")]
    NotFound {
        /// The requested id.
        id: String,
    },

    /// Writing the snapshot failed; it must be treated as not written.
    #[display("Cannot save the game: {_0}")]
    Save(DbError),

    /// Reading or decoding the snapshot failed.
    #[display("Cannot load the game: {_0}")]
    Load(DbError),
}

/// Stores and retrieves session snapshots.
pub trait GameRepository {
    /// Inserts or replaces the snapshot keyed by the session id.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Save`] if the write fails.
    fn save(&self, session: &Session) -> Result<(), RepositoryError>;

    /// Reads the snapshot for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if nothing is stored under `id`,
    /// or [`RepositoryError::Load`] if the stored data cannot be decoded.
    fn load(&self, id: &str) -> Result<Session, RepositoryError>;
}

impl<T: GameRepository + ?Sized> GameRepository for &T {
    fn save(&self, session: &Session) -> Result<(), RepositoryError> {
        (**self).save(session)
    }

    fn load(&self, id: &str) -> Result<Session, RepositoryError> {
        (**self).load(id)
    }
}

impl<T: GameRepository + ?Sized> GameRepository for Box<T> {
    fn save(&self, session: &Session) -> Result<(), RepositoryError> {
        (**self).save(session)
    }

    fn load(&self, id: &str) -> Result<Session, RepositoryError> {
        (**self).load(id)
    }
}

//! In-process session repository.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, instrument};

use crate::db::{DbError, GameRepository, GameSummary, RepositoryError, SessionRecord};
use crate::games::mastermind::{Session, SessionId};

/// Keeps serialized session snapshots in a shared map.
///
/// Clones share the same storage. Snapshots are stored as JSON so a load
/// goes through the same decoding path as the SQLite repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGameRepository {
    store: Arc<Mutex<HashMap<SessionId, String>>>,
}

impl InMemoryGameRepository {
    /// Creates an empty repository.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating InMemoryGameRepository");
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<SessionId, String>>, DbError> {
        Ok(self.store.lock()?)
    }

    /// Number of stored sessions.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the store lock is poisoned.
    #[instrument(skip(self))]
    pub fn len(&self) -> Result<usize, DbError> {
        Ok(self.lock()?.len())
    }

    /// Whether no sessions are stored.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the store lock is poisoned.
    #[instrument(skip(self))]
    pub fn is_empty(&self) -> Result<bool, DbError> {
        Ok(self.lock()?.is_empty())
    }

    /// Lists stored sessions, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Load`] if a snapshot cannot be decoded.
    #[instrument(skip(self))]
    pub fn list_games(&self) -> Result<Vec<GameSummary>, RepositoryError> {
        let store = self.lock().map_err(RepositoryError::Load)?;
        let mut summaries = store
            .values()
            .map(|json| {
                serde_json::from_str::<SessionRecord>(json)
                    .map(|record| GameSummary::from(&record))
                    .map_err(|e| RepositoryError::Load(e.into()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        summaries.sort_by(|a, b| b.updated_at().cmp(a.updated_at()));
        debug!(count = summaries.len(), "Games listed");
        Ok(summaries)
    }
}

impl GameRepository for InMemoryGameRepository {
    #[instrument(skip(self, session), fields(session_id = %session.id()))]
    fn save(&self, session: &Session) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(&SessionRecord::from(session))
            .map_err(|e| RepositoryError::Save(e.into()))?;
        let mut store = self.lock().map_err(RepositoryError::Save)?;
        store.insert(session.id().clone(), json);
        debug!("Game saved");
        Ok(())
    }

    #[instrument(skip(self))]
    fn load(&self, id: &str) -> Result<Session, RepositoryError> {
        let json = self
            .lock()
            .map_err(RepositoryError::Load)?
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound { id: id.to_string() })?;

        let record: SessionRecord =
            serde_json::from_str(&json).map_err(|e| RepositoryError::Load(e.into()))?;
        let session = Session::try_from(record).map_err(RepositoryError::Load)?;
        debug!("Game loaded");
        Ok(session)
    }
}

//! Session persistence: the repository boundary and its implementations.

mod error;
mod memory;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only
mod sqlite;

pub use error::DbError;
pub use memory::InMemoryGameRepository;
pub(crate) use models::GameRow;
pub use models::{GameSummary, HistoryEntry, SessionRecord};
pub use repository::{GameRepository, RepositoryError};
pub use sqlite::SqliteGameRepository;

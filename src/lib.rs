//! Strictly Mastermind library - a type-safe code-breaking game
//!
//! A hidden numeric pattern is generated and the player submits guesses,
//! each scored as (correct numbers, correct positions), until the pattern is
//! cracked or the attempt budget runs out.
//!
//! # Architecture
//!
//! - **Games**: pure scoring rules ([`GameLogic`]) and the session
//!   coordinator ([`Game`]) with its `InProgress → Won | Lost` state machine
//! - **Generator**: where secret patterns come from ([`NumberGenerator`])
//! - **Db**: where sessions are persisted ([`GameRepository`])
//! - **Console**: line-based interactive play
//!
//! # Example
//!
//! ```no_run
//! use strictly_mastermind::{
//!     Difficulty, Game, InMemoryGameRepository, InputValidator, LocalGenerator,
//! };
//!
//! # fn example() -> Result<(), strictly_mastermind::GameError> {
//! let repository = InMemoryGameRepository::new();
//! let generator = LocalGenerator::new();
//! let mut game = Game::create_new(&repository, &generator, Difficulty::Normal.config())?;
//!
//! let guess = InputValidator::new(*game.config()).validate_guess("0123")?;
//! let feedback = game.submit_guess(guess)?;
//! println!("{feedback}, {} attempts left", game.remaining_attempts());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod app_config;
mod console;
mod db;
mod games;
mod generator;

// Crate-level exports - Configuration
pub use app_config::{AppConfig, ConfigError, DB_PATH_ENV, GeneratorSource, StorageBackend};

// Crate-level exports - Console
pub use console::{Console, ConsoleError};

// Crate-level exports - Persistence
pub use db::{
    DbError, GameRepository, GameSummary, HistoryEntry, InMemoryGameRepository, RepositoryError,
    SessionRecord, SqliteGameRepository,
};

// Crate-level exports - Game types
pub use games::mastermind::{
    CodePattern, Difficulty, Feedback, Game, GameConfig, GameError, GameInitError, GameLogic,
    GameStatus, Guess, GuessError, GuessRecord, InputValidator, PatternFrequency, Session,
    SessionId,
};

// Crate-level exports - Number generation
pub use generator::{
    DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, FallbackPolicy, GeneratorError, LocalGenerator,
    NumberGenerator, RandomOrgGenerator,
};

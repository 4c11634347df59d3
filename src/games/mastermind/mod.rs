mod config;
mod error;
mod game;
mod logic;
mod session;
mod types;
mod validation;

pub use config::{Difficulty, GameConfig};
pub use error::{GameError, GameInitError, GuessError};
pub use game::Game;
pub use logic::GameLogic;
pub use session::{Session, SessionId};
pub use types::{CodePattern, Feedback, GameStatus, Guess, GuessRecord, PatternFrequency};
pub use validation::InputValidator;

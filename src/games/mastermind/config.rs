//! Per-session rules: pattern shape and attempt budget.

use crate::app_config::ConfigError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Difficulty tier used to pick a [`GameConfig`] at session creation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Difficulty {
    /// Four digits from 0 to 7, ten attempts.
    #[default]
    Normal,
    /// Five digits from 0 to 9, eight attempts.
    Hard,
}

impl Difficulty {
    /// Returns the rules for this tier.
    #[instrument]
    pub fn config(self) -> GameConfig {
        match self {
            Self::Normal => GameConfig {
                pattern_length: 4,
                min_number: 0,
                max_number: 7,
                max_attempts: 10,
            },
            Self::Hard => GameConfig {
                pattern_length: 5,
                min_number: 0,
                max_number: 9,
                max_attempts: 8,
            },
        }
    }
}

/// Rules fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    /// Number of digits in the pattern and in every guess.
    pattern_length: usize,
    /// Smallest allowed digit value (inclusive).
    min_number: u32,
    /// Largest allowed digit value (inclusive).
    max_number: u32,
    /// Guesses allowed before the session is lost.
    max_attempts: u32,
}

impl GameConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the pattern is empty, the range is inverted,
    /// or no attempts are allowed.
    #[instrument]
    pub fn new(
        pattern_length: usize,
        min_number: u32,
        max_number: u32,
        max_attempts: u32,
    ) -> Result<Self, ConfigError> {
        if pattern_length == 0 {
            warn!("Rejected empty pattern length");
            return Err(ConfigError::new("Pattern length must be at least 1".to_string()));
        }
        if min_number > max_number {
            warn!("Rejected inverted digit range");
            return Err(ConfigError::new(format!(
                "Minimum number {} exceeds maximum number {}",
                min_number, max_number
            )));
        }
        if max_attempts == 0 {
            warn!("Rejected zero attempt budget");
            return Err(ConfigError::new("Max attempts must be at least 1".to_string()));
        }
        debug!("Game config validated");
        Ok(Self {
            pattern_length,
            min_number,
            max_number,
            max_attempts,
        })
    }

    /// Whether `value` lies within `[min_number, max_number]`.
    pub fn in_range(&self, value: u32) -> bool {
        (self.min_number..=self.max_number).contains(&value)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Difficulty::default().config()
    }
}

impl From<Difficulty> for GameConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}

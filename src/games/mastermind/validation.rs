//! Raw input checks performed before a [`Guess`] is constructed.

use super::{GameConfig, GameError, Guess, GuessError};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Converts raw player input into validated values.
#[derive(Debug, Clone, Copy)]
pub struct InputValidator {
    config: GameConfig,
}

impl InputValidator {
    /// Creates a validator for the given rules.
    #[instrument]
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    /// Parses and validates a guess.
    ///
    /// Accepts contiguous digits (`"0123"`) or whitespace-separated numbers
    /// (`"0 1 2 3"`).
    ///
    /// # Errors
    ///
    /// Returns the first [`GuessError`] found, checking emptiness, then
    /// characters, then length, then range.
    #[instrument(skip(self))]
    pub fn validate_guess(&self, raw: &str) -> Result<Guess, GuessError> {
        let input = raw.trim();
        if input.is_empty() {
            warn!("Empty input received");
            return Err(GuessError::Empty);
        }

        if !input.chars().all(|c| c.is_ascii_digit() || c.is_whitespace()) {
            warn!("Non-numeric input received");
            return Err(GuessError::NonNumeric {
                input: input.to_string(),
            });
        }

        let digits: Vec<u32> = if input.contains(char::is_whitespace) {
            input
                .split_whitespace()
                .map(|token| {
                    token.parse::<u32>().map_err(|_| GuessError::NonNumeric {
                        input: input.to_string(),
                    })
                })
                .collect::<Result<_, _>>()?
        } else {
            input.chars().filter_map(|c| c.to_digit(10)).collect()
        };

        let expected = *self.config.pattern_length();
        if digits.len() != expected {
            warn!(expected, actual = digits.len(), "Invalid guess length");
            return Err(GuessError::InvalidLength {
                expected,
                actual: digits.len(),
            });
        }

        if let Some(value) = digits.iter().copied().find(|d| !self.config.in_range(*d)) {
            warn!(value, "Guess digit out of range");
            return Err(GuessError::OutOfRange {
                value,
                min: *self.config.min_number(),
                max: *self.config.max_number(),
            });
        }

        debug!("Guess input validated");
        Ok(Guess::new(digits))
    }

    /// Checks that `raw` is a well-formed session id.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidGameId`] unless `raw` parses as a UUID.
    #[instrument]
    pub fn validate_game_id(raw: &str) -> Result<String, GameError> {
        let id = raw.trim();
        Uuid::parse_str(id)
            .map(|uuid| uuid.to_string())
            .map_err(|_| {
                warn!("Invalid game id");
                GameError::InvalidGameId { id: id.to_string() }
            })
    }
}

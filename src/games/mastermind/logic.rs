//! Pattern generation and guess scoring.
//!
//! Everything here is stateless: scoring depends only on the guess, the
//! pattern, and its frequency table.

use super::{CodePattern, Feedback, GameConfig, GameInitError, Guess, PatternFrequency};
use crate::generator::NumberGenerator;
use tracing::{debug, error, info, instrument};

/// Stateless Mastermind rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameLogic;

impl GameLogic {
    /// Asks `generator` for a new secret pattern.
    ///
    /// # Errors
    ///
    /// Returns [`GameInitError`] if the generator fails or hands back digits
    /// that do not fit `config`.
    #[instrument(skip(generator))]
    pub fn generate_pattern<G: NumberGenerator + ?Sized>(
        generator: &G,
        config: &GameConfig,
    ) -> Result<CodePattern, GameInitError> {
        let digits = generator.generate(config).map_err(|e| {
            error!(error = %e, "Failed to generate code pattern");
            GameInitError::from(e)
        })?;

        if digits.len() != *config.pattern_length() {
            error!(
                expected = config.pattern_length(),
                actual = digits.len(),
                "Generator returned wrong pattern length"
            );
            return Err(GameInitError::new(format!(
                "Generator returned {} digits, expected {}",
                digits.len(),
                config.pattern_length()
            )));
        }
        if let Some(bad) = digits.iter().find(|d| !config.in_range(**d)) {
            error!(value = bad, "Generator returned out-of-range digit");
            return Err(GameInitError::new(format!(
                "Generator returned {}, outside {}..={}",
                bad,
                config.min_number(),
                config.max_number()
            )));
        }

        info!("Code pattern generated");
        Ok(CodePattern::new(digits))
    }

    /// Counts how often each digit occurs in `pattern`.
    #[instrument(skip(pattern))]
    pub fn frequency_of(pattern: &CodePattern) -> PatternFrequency {
        let frequency = PatternFrequency::from_digits(pattern.digits());
        debug!(distinct = frequency.distinct(), "Pattern frequency derived");
        frequency
    }

    /// Scores `guess` against `pattern`.
    ///
    /// Positions are counted by direct comparison. Numbers are counted by
    /// walking the guess in order against a copy of `frequency`, consuming one
    /// occurrence per credited digit, so a pattern digit is never credited
    /// twice. Both counts include exact matches.
    #[instrument(skip_all)]
    pub fn score(guess: &Guess, frequency: &PatternFrequency, pattern: &CodePattern) -> Feedback {
        let positions_correct = guess
            .digits()
            .iter()
            .zip(pattern.digits())
            .filter(|(g, p)| g == p)
            .count();

        let mut remaining = frequency.clone();
        let numbers_correct = guess
            .digits()
            .iter()
            .filter(|digit| remaining.take(**digit))
            .count();

        debug!(numbers_correct, positions_correct, "Guess scored");
        Feedback::new(numbers_correct, positions_correct)
    }
}

//! Core domain types for Mastermind.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::instrument;

/// Writes digits separated by single spaces.
fn write_digits(f: &mut fmt::Formatter<'_>, digits: &[u32]) -> fmt::Result {
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{}", digit)?;
    }
    Ok(())
}

/// The secret sequence the player is trying to guess.
///
/// Generated once per session and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodePattern(Vec<u32>);

impl CodePattern {
    /// Wraps a generated digit sequence.
    pub fn new(digits: Vec<u32>) -> Self {
        Self(digits)
    }

    /// Returns the digits in order.
    pub fn digits(&self) -> &[u32] {
        &self.0
    }

    /// Number of digits in the pattern.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the pattern has no digits.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CodePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_digits(f, &self.0)
    }
}

/// Occurrence count of each digit value in a [`CodePattern`].
///
/// Derived once per session and used as the scoring baseline. Scoring works
/// on a private copy, so the session's frequency table never changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternFrequency(BTreeMap<u32, u32>);

impl PatternFrequency {
    /// Counts occurrences of each digit in `digits`.
    pub fn from_digits(digits: &[u32]) -> Self {
        let mut counts = BTreeMap::new();
        for digit in digits {
            *counts.entry(*digit).or_insert(0) += 1;
        }
        Self(counts)
    }

    /// How many times `digit` appears in the pattern.
    pub fn count(&self, digit: u32) -> u32 {
        self.0.get(&digit).copied().unwrap_or(0)
    }

    /// Number of distinct digit values.
    pub fn distinct(&self) -> usize {
        self.0.len()
    }

    /// Consumes one occurrence of `digit` if any remain.
    pub(super) fn take(&mut self, digit: u32) -> bool {
        match self.0.get_mut(&digit) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                true
            }
            _ => false,
        }
    }
}

/// One player-submitted candidate sequence.
///
/// Constructed from already-validated input; see
/// [`InputValidator`](super::InputValidator) for the checks that precede it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Guess(Vec<u32>);

impl Guess {
    /// Creates a guess from validated digits.
    #[instrument]
    pub fn new(digits: Vec<u32>) -> Self {
        Self(digits)
    }

    /// Returns the guessed digits in order.
    pub fn digits(&self) -> &[u32] {
        &self.0
    }

    /// Number of guessed digits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the guess has no digits.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Guess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_digits(f, &self.0)
    }
}

/// Score for a single guess.
///
/// `positions_correct <= numbers_correct <= pattern length` always holds for
/// feedback produced by [`GameLogic::score`](super::GameLogic::score).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, new)]
pub struct Feedback {
    /// Digits with the right value, regardless of position.
    numbers_correct: usize,
    /// Digits with the right value in the right position.
    positions_correct: usize,
}

impl Feedback {
    /// A guess wins when every position matches.
    #[instrument]
    pub fn is_winning(&self, pattern_length: usize) -> bool {
        self.positions_correct == pattern_length
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} correct numbers and {} correct positions",
            self.numbers_correct, self.positions_correct
        )
    }
}

/// A scored guess, as kept in the session history.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct GuessRecord {
    guess: Guess,
    feedback: Feedback,
}

/// Lifecycle state of a session.
///
/// `InProgress` is initial; `Won` and `Lost` are terminal.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GameStatus {
    /// Accepting guesses.
    InProgress,
    /// The pattern was guessed.
    Won,
    /// The attempt budget ran out.
    Lost,
}

impl GameStatus {
    /// Whether no further guesses are accepted.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

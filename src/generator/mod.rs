//! Secret pattern sources.

mod error;
mod local;
mod random_org;

pub use error::GeneratorError;
pub use local::LocalGenerator;
pub use random_org::{DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, FallbackPolicy, RandomOrgGenerator};

use crate::games::mastermind::GameConfig;

/// Produces the digits of a secret pattern.
///
/// Implementations return exactly `config.pattern_length()` values, each in
/// `[config.min_number(), config.max_number()]`.
pub trait NumberGenerator {
    /// Generates a digit sequence for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError`] once the implementation's own retry budget
    /// is exhausted.
    fn generate(&self, config: &GameConfig) -> Result<Vec<u32>, GeneratorError>;
}

impl<T: NumberGenerator + ?Sized> NumberGenerator for &T {
    fn generate(&self, config: &GameConfig) -> Result<Vec<u32>, GeneratorError> {
        (**self).generate(config)
    }
}

impl<T: NumberGenerator + ?Sized> NumberGenerator for Box<T> {
    fn generate(&self, config: &GameConfig) -> Result<Vec<u32>, GeneratorError> {
        (**self).generate(config)
    }
}

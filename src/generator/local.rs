//! In-process pseudo-random generator.

use super::{GeneratorError, NumberGenerator};
use crate::games::mastermind::GameConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use tracing::{debug, instrument};

/// Draws uniform digits from a local RNG.
///
/// Used directly when no network source is wanted, and as the fallback of
/// [`RandomOrgGenerator`](super::RandomOrgGenerator) when that is enabled.
#[derive(Debug)]
pub struct LocalGenerator {
    rng: Mutex<StdRng>,
}

impl LocalGenerator {
    /// Creates a generator seeded from the operating system.
    #[instrument]
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Creates a generator with a fixed seed for reproducible patterns.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for LocalGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl NumberGenerator for LocalGenerator {
    #[instrument(skip(self))]
    fn generate(&self, config: &GameConfig) -> Result<Vec<u32>, GeneratorError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| GeneratorError::new(format!("RNG lock poisoned: {}", e)))?;

        let digits: Vec<u32> = (0..*config.pattern_length())
            .map(|_| rng.random_range(*config.min_number()..=*config.max_number()))
            .collect();

        debug!(count = digits.len(), "Generated local pattern");
        Ok(digits)
    }
}

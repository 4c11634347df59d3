//! Random.org integer API client.

use super::{GeneratorError, LocalGenerator, NumberGenerator};
use crate::games::mastermind::GameConfig;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Public endpoint of the Random.org integer generator.
pub const DEFAULT_BASE_URL: &str = "https://www.random.org/integers/";

/// Attempts made against the API before giving up.
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// What to do once every API attempt has failed.
///
/// Falling back changes where the secret's randomness comes from, so it is
/// opt-in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FallbackPolicy {
    /// Surface a [`GeneratorError`].
    #[default]
    Disabled,
    /// Draw the pattern from a [`LocalGenerator`] instead.
    LocalRandom,
}

/// Generates patterns through Random.org with bounded retries.
#[derive(Debug)]
pub struct RandomOrgGenerator {
    client: Client,
    base_url: String,
    max_retries: u32,
    fallback: FallbackPolicy,
    local: LocalGenerator,
}

impl RandomOrgGenerator {
    /// Creates a generator for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError`] if the HTTP client cannot be built.
    #[instrument]
    pub fn new(
        base_url: String,
        max_retries: u32,
        timeout: Duration,
        fallback: FallbackPolicy,
    ) -> Result<Self, GeneratorError> {
        info!("Creating Random.org generator");
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            max_retries: max_retries.max(1),
            fallback,
            local: LocalGenerator::new(),
        })
    }

    /// Builds the request URL for `config`.
    #[instrument(skip(self))]
    pub fn request_url(&self, config: &GameConfig) -> String {
        let params = [
            ("num", config.pattern_length().to_string()),
            ("min", config.min_number().to_string()),
            ("max", config.max_number().to_string()),
            ("col", config.pattern_length().to_string()),
            ("base", "10".to_string()),
            ("format", "plain".to_string()),
            ("rnd", "new".to_string()),
        ];
        let query = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.base_url, query)
    }

    /// Parses a plain-format response body.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError`] if the body is not exactly
    /// `pattern_length` integers within range.
    #[instrument(skip(body))]
    pub fn parse_response(body: &str, config: &GameConfig) -> Result<Vec<u32>, GeneratorError> {
        let digits = body
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<u32>()
                    .map_err(|e| GeneratorError::new(format!("Bad value '{}': {}", token, e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if digits.len() != *config.pattern_length() {
            return Err(GeneratorError::new(format!(
                "Expected {} values, got {}",
                config.pattern_length(),
                digits.len()
            )));
        }
        if let Some(bad) = digits.iter().find(|d| !config.in_range(**d)) {
            return Err(GeneratorError::new(format!("Value {} out of range", bad)));
        }
        Ok(digits)
    }

    /// Makes a single API call.
    #[instrument(skip(self))]
    fn fetch(&self, config: &GameConfig) -> Result<Vec<u32>, GeneratorError> {
        let url = self.request_url(config);
        debug!(url = %url, "Requesting integers");
        let body = self.client.get(&url).send()?.error_for_status()?.text()?;
        Self::parse_response(&body, config)
    }
}

impl NumberGenerator for RandomOrgGenerator {
    #[instrument(skip(self), fields(max_retries = self.max_retries, fallback = %self.fallback))]
    fn generate(&self, config: &GameConfig) -> Result<Vec<u32>, GeneratorError> {
        let mut last_error = None;

        for attempt in 1..=self.max_retries {
            match self.fetch(config) {
                Ok(digits) => {
                    info!(attempt, "Generated pattern from Random.org");
                    return Ok(digits);
                }
                Err(e) => {
                    warn!(attempt, max = self.max_retries, error = %e, "Random.org request failed");
                    last_error = Some(e);
                }
            }
        }

        let reason = last_error
            .map(|e| e.message)
            .unwrap_or_else(|| "no attempts made".to_string());

        match self.fallback {
            FallbackPolicy::LocalRandom => {
                warn!(reason = %reason, "Using local fallback generator");
                self.local.generate(config).map_err(|fallback| {
                    GeneratorError::new(format!(
                        "API and fallback generation failed. API: {}, fallback: {}",
                        reason, fallback.message
                    ))
                })
            }
            FallbackPolicy::Disabled => {
                error!(reason = %reason, "Random.org retries exhausted");
                Err(GeneratorError::new(format!(
                    "Random.org unavailable after {} attempts: {}",
                    self.max_retries, reason
                )))
            }
        }
    }
}

//! Application configuration loaded from TOML.

use crate::games::mastermind::Difficulty;
use crate::generator::{DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, FallbackPolicy};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Environment variable overriding [`AppConfig::db_path`].
pub const DB_PATH_ENV: &str = "MASTERMIND_DB";

/// Where sessions are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StorageBackend {
    /// SQLite database file at `db_path`.
    #[default]
    Sqlite,
    /// Process memory; sessions vanish on exit.
    Memory,
}

/// Where secret patterns come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GeneratorSource {
    /// Random.org HTTP API.
    #[default]
    RandomOrg,
    /// Local pseudo-random generator.
    Local,
}

/// Top-level application settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct AppConfig {
    /// Difficulty used for new games.
    #[serde(default)]
    difficulty: Difficulty,

    /// Persistence backend.
    #[serde(default)]
    storage: StorageBackend,

    /// SQLite database path.
    #[serde(default = "default_db_path")]
    db_path: String,

    /// Pattern source.
    #[serde(default)]
    generator: GeneratorSource,

    /// Random.org endpoint.
    #[serde(default = "default_random_org_url")]
    random_org_url: String,

    /// Random.org attempts before giving up.
    #[serde(default = "default_max_retries")]
    max_retries: u32,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    request_timeout_secs: u64,

    /// Behaviour once Random.org retries are exhausted.
    #[serde(default)]
    fallback: FallbackPolicy,
}

#[instrument]
fn default_db_path() -> String {
    "mastermind.db".to_string()
}

#[instrument]
fn default_random_org_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

#[instrument]
fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

#[instrument]
fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            storage: StorageBackend::default(),
            db_path: default_db_path(),
            generator: GeneratorSource::default(),
            random_org_url: default_random_org_url(),
            max_retries: default_max_retries(),
            request_timeout_secs: default_request_timeout_secs(),
            fallback: FallbackPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            storage = %config.storage,
            generator = %config.generator,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not valid configuration.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads `path` if it exists, otherwise returns defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but is invalid.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies the [`DB_PATH_ENV`] override, if set.
    #[instrument(skip(self))]
    pub fn with_env_overrides(self) -> Self {
        match std::env::var(DB_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => {
                debug!(path = %path, "Database path overridden from environment");
                self.with_db_path(path)
            }
            _ => self,
        }
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Project configuration file
pub const CONFIG_FILE: &str = "scryfall.yaml";

/// Optional local overrides, merged over [`CONFIG_FILE`]
pub const LOCAL_CONFIG_FILE: &str = "scryfall.local.yaml";

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "SCRYFALL_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("API base URL cannot be empty")]
    EmptyBaseUrl,

    #[error("User agent cannot be empty")]
    EmptyUserAgent,

    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Invalid max_per_window: {0}. Must be at least 1")]
    InvalidCapacity(usize),

    #[error("Invalid window_ms: {0}. Must be positive")]
    InvalidWindow(u64),

    #[error("Invalid max_retries: {0}. Cannot be 0")]
    InvalidMaxRetries(u32),

    #[error(
        "Invalid backoff configuration: initial_backoff_ms ({0}) must not exceed max_backoff_ms ({1})"
    )]
    InvalidBackoff(u64, u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. `scryfall.yaml` in the working directory
    /// 3. `scryfall.local.yaml` in the working directory
    /// 4. Environment variables (`SCRYFALL_*`, `__` separates nested keys)
    pub fn load() -> Result<Config> {
        let figment = Self::defaults()
            .merge(Yaml::file(CONFIG_FILE))
            .merge(Yaml::file(LOCAL_CONFIG_FILE));

        Self::extract(figment.merge(Self::env()))
    }

    /// Load configuration from a specific file, still honoring environment overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let figment = Self::defaults()
            .merge(Yaml::file(path))
            .merge(Self::env());

        Self::extract(figment)
            .with_context(|| format!("Failed to load config from {}", path.display()))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.api.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        if config.api.user_agent.trim().is_empty() {
            return Err(ConfigError::EmptyUserAgent);
        }

        if config.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.api.timeout_secs));
        }

        if config.rate_limit.max_per_window == 0 {
            return Err(ConfigError::InvalidCapacity(config.rate_limit.max_per_window));
        }

        if config.rate_limit.window_ms == 0 {
            return Err(ConfigError::InvalidWindow(config.rate_limit.window_ms));
        }

        if config.retry.max_retries == 0 {
            return Err(ConfigError::InvalidMaxRetries(config.retry.max_retries));
        }

        if config.retry.initial_backoff_ms > config.retry.max_backoff_ms {
            return Err(ConfigError::InvalidBackoff(
                config.retry.initial_backoff_ms,
                config.retry.max_backoff_ms,
            ));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        Ok(())
    }

    fn defaults() -> Figment {
        Figment::new().merge(Serialized::defaults(Config::default()))
    }

    fn env() -> Env {
        Env::prefixed(ENV_PREFIX).split("__")
    }

    fn extract(figment: Figment) -> Result<Config> {
        let config: Config = figment
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }
}

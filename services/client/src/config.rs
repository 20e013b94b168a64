//! services/client/src/config.rs
//!
//! Defines the client's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use cocktail_core::logic::DEFAULT_MAX_CONCURRENT_LOOKUPS;
use cocktail_core::normalize::DEFAULT_INGREDIENT_IMAGE_BASE;
use cocktail_core::LogicOptions;
use std::time::Duration;
use tracing::Level;

pub const DEFAULT_CATALOG_API_URL: &str = "https://www.thecocktaildb.com/api/json/v1/1";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub account_api_url: String,
    pub catalog_api_url: String,
    pub ingredient_image_base: String,
    pub max_concurrent_lookups: usize,
    pub http_timeout: Duration,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // --- Remote Services ---
        let account_api_url = lookup("ACCOUNT_API_URL")
            .ok_or_else(|| ConfigError::MissingVar("ACCOUNT_API_URL".to_string()))?;
        let catalog_api_url =
            lookup("CATALOG_API_URL").unwrap_or_else(|| DEFAULT_CATALOG_API_URL.to_string());
        let ingredient_image_base = lookup("INGREDIENT_IMAGE_BASE")
            .unwrap_or_else(|| DEFAULT_INGREDIENT_IMAGE_BASE.to_string());

        // --- Fan-out and HTTP Settings ---
        let max_concurrent_lookups = match lookup("CATALOG_MAX_CONCURRENCY") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidValue(
                        "CATALOG_MAX_CONCURRENCY".to_string(),
                        format!("'{}' is not a positive integer", raw),
                    ))
                }
            },
            None => DEFAULT_MAX_CONCURRENT_LOOKUPS,
        };

        let timeout_secs = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::InvalidValue("HTTP_TIMEOUT_SECS".to_string(), e.to_string())
            })?,
            None => 30,
        };

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            account_api_url: account_api_url.trim_end_matches('/').to_string(),
            catalog_api_url: catalog_api_url.trim_end_matches('/').to_string(),
            ingredient_image_base,
            max_concurrent_lookups,
            http_timeout: Duration::from_secs(timeout_secs),
            log_level,
        })
    }

    pub fn logic_options(&self) -> LogicOptions {
        LogicOptions {
            max_concurrent_lookups: self.max_concurrent_lookups,
            ingredient_image_base: self.ingredient_image_base.clone(),
        }
    }
}

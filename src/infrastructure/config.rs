//! Browser configuration management.
//!
//! Configuration is loaded once at startup from environment variables
//! (optionally seeded from a `.env` file). Every variable is optional;
//! unset or empty values fall back to defaults, invalid values are errors.
//!
//! # Environment Variables
//!
//! - `TODO_BROWSER_BASE_URL`: collection service base URL
//!   (default: `https://jsonplaceholder.typicode.com`)
//! - `TODO_BROWSER_TIMEOUT_MS`: per-request timeout in milliseconds (default: 5000)
//! - `TODO_BROWSER_DETAIL_ORDERING`: `last_completed` (default) | `latest_requested`

use std::env::{self, VarError};
use std::time::Duration;

use thiserror::Error;

use crate::browser::DetailOrdering;

/// Default collection service.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

const BASE_URL_VAR: &str = "TODO_BROWSER_BASE_URL";
const TIMEOUT_VAR: &str = "TODO_BROWSER_TIMEOUT_MS";
const DETAIL_ORDERING_VAR: &str = "TODO_BROWSER_DETAIL_ORDERING";

// =============================================================================
// Config Error
// =============================================================================

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable is set to a value that cannot be used.
    #[error("Invalid value for {name}: {message} (got '{value}')")]
    InvalidValue {
        name: String,
        message: String,
        value: String,
    },

    /// A variable could not be read (e.g. it is not valid Unicode).
    #[error("Failed to read {name}: {source}")]
    EnvVarError {
        name: String,
        #[source]
        source: VarError,
    },
}

// =============================================================================
// Browser Config
// =============================================================================

/// Runtime configuration of the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserConfig {
    /// Base URL of the collection service, without trailing `/`.
    pub base_url: String,
    /// Timeout applied to each request.
    pub timeout: Duration,
    /// How out-of-order detail completions are reconciled.
    pub detail_ordering: DetailOrdering,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            detail_ordering: DetailOrdering::default(),
        }
    }
}

impl BrowserConfig {
    /// Loads configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first if present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any variable holds an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name))
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any variable holds an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let base_url = read_optional(&lookup, BASE_URL_VAR)?
            .map(|value| parse_base_url(&value))
            .transpose()?
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_ms = read_optional(&lookup, TIMEOUT_VAR)?
            .map(|value| parse_timeout_ms(&value))
            .transpose()?
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        let detail_ordering = read_optional(&lookup, DETAIL_ORDERING_VAR)?
            .map(|value| {
                value
                    .trim()
                    .parse::<DetailOrdering>()
                    .map_err(|message| invalid(DETAIL_ORDERING_VAR, message, &value))
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            base_url,
            timeout: Duration::from_millis(timeout_ms),
            detail_ordering,
        })
    }
}

/// Reads a variable, treating unset and blank values alike.
fn read_optional<F>(lookup: &F, name: &str) -> Result<Option<String>, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    match lookup(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(source) => Err(ConfigError::EnvVarError {
            name: name.to_string(),
            source,
        }),
    }
}

fn parse_base_url(value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Err(invalid(
            BASE_URL_VAR,
            "must start with http:// or https://",
            value,
        ))
    }
}

fn parse_timeout_ms(value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(0) => Err(invalid(TIMEOUT_VAR, "must be greater than 0", value)),
        Ok(timeout_ms) => Ok(timeout_ms),
        Err(error) => Err(invalid(TIMEOUT_VAR, error.to_string(), value)),
    }
}

fn invalid(name: &str, message: impl Into<String>, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        name: name.to_string(),
        message: message.into(),
        value: value.to_string(),
    }
}

// =============================================================================
// Tests
// =============================================================================

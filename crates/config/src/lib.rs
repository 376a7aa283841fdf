#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for pagesum
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/pagesum/config.toml)
//! - Environment variables
//! - CLI flags
//!
//! The batch inputs themselves (URL list, response cap) live in
//! [`constants`] and are not configurable.

pub mod constants;
pub mod core;

pub use constants::{doc_urls, DOC_URLS, MAX_RESPONSE_BYTES};
pub use self::core::{GeneralConfig, NetworkConfig};

use pagesum_errors::{ConfigError, Error};
use pagesum_types::{ColorChoice, OutputFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub network: NetworkConfig,
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join("pagesum").join("config.toml"))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, if the file contents
    /// contain invalid TOML syntax, or if a network timeout is zero.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        tracing::debug!(path = %path.display(), "loaded configuration file");

        let config: Self = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        config.network.validate()?;
        Ok(config)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Self::default_path()?;

        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        // PAGESUM_OUTPUT
        if let Ok(output) = std::env::var("PAGESUM_OUTPUT") {
            self.general.default_output = match output.as_str() {
                "plain" => OutputFormat::Plain,
                "tty" => OutputFormat::Tty,
                "json" => OutputFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "PAGESUM_OUTPUT".to_string(),
                        value: output,
                    }
                    .into())
                }
            };
        }

        // PAGESUM_COLOR
        if let Ok(color) = std::env::var("PAGESUM_COLOR") {
            self.general.color = match color.as_str() {
                "always" => ColorChoice::Always,
                "auto" => ColorChoice::Auto,
                "never" => ColorChoice::Never,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: "PAGESUM_COLOR".to_string(),
                        value: color,
                    }
                    .into())
                }
            };
        }

        // PAGESUM_TIMEOUT
        if let Ok(timeout) = std::env::var("PAGESUM_TIMEOUT") {
            self.network.timeout = parse_seconds("PAGESUM_TIMEOUT", timeout)?;
        }

        // PAGESUM_CONNECT_TIMEOUT
        if let Ok(timeout) = std::env::var("PAGESUM_CONNECT_TIMEOUT") {
            self.network.connect_timeout = parse_seconds("PAGESUM_CONNECT_TIMEOUT", timeout)?;
        }

        // PAGESUM_USER_AGENT
        if let Ok(agent) = std::env::var("PAGESUM_USER_AGENT") {
            self.network.user_agent = Some(agent);
        }

        Ok(())
    }

    /// Directory for debug log files
    #[must_use]
    pub fn log_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("pagesum")
            .join("logs")
    }
}

/// Parse a positive number of seconds from an environment value
fn parse_seconds(field: &str, value: String) -> Result<u64, Error> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value,
        }
        .into()),
    }
}

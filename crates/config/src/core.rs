//! Configuration sections

use pagesum_errors::{ConfigError, Error};
use pagesum_types::{ColorChoice, OutputFormat};
use serde::{Deserialize, Serialize};

/// General application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    #[serde(default = "default_color_choice")]
    pub color: ColorChoice,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: OutputFormat::Tty,
            color: ColorChoice::Auto,
        }
    }
}

/// Network configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_timeout")]
    pub timeout: u64, // seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64, // seconds
    #[serde(default = "default_pool_idle_timeout")]
    pub pool_idle_timeout: u64, // seconds
    #[serde(default = "default_pool_max_idle_per_host")]
    pub pool_max_idle_per_host: usize,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout: 100,
            connect_timeout: 30,
            pool_idle_timeout: 90,
            pool_max_idle_per_host: 32,
            user_agent: None,
        }
    }
}

impl NetworkConfig {
    /// Reject values that would make every request fail
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero request or connect
    /// timeout.
    pub fn validate(&self) -> Result<(), Error> {
        for (field, value) in [
            ("network.timeout", self.timeout),
            ("network.connect_timeout", self.connect_timeout),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: value.to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}

// Default value functions for serde
fn default_output_format() -> OutputFormat {
    OutputFormat::Tty
}

fn default_color_choice() -> ColorChoice {
    ColorChoice::Auto
}

fn default_timeout() -> u64 {
    100
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_pool_idle_timeout() -> u64 {
    90
}

fn default_pool_max_idle_per_host() -> usize {
    32
}

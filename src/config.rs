use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use validator::Validate;

use crate::temporal::TimezoneInfo;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Decoding configuration with validation
#[derive(Clone, Debug, PartialEq, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Offset from UTC in seconds applied to time and datetime values
    #[validate(range(
        min = -86400,
        max = 86400,
        message = "Timezone offset must be within one day (-86400..=86400 seconds)"
    ))]
    pub timezone_offset: i32,

    /// Zone name reported alongside the offset
    #[validate(length(
        min = 1,
        max = 64,
        message = "Timezone name must be 1 to 64 characters"
    ))]
    pub timezone_name: String,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            timezone_offset: 0,
            timezone_name: "UTC".to_string(),
        }
    }
}

impl DecodeConfig {
    /// Create configuration from environment variables with validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            timezone_offset: parse_env_var("GRAPHWIRE_TIMEZONE_OFFSET", "0")?,
            timezone_name: env_var_or("GRAPHWIRE_TIMEZONE_NAME", "UTC")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from YAML file
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            field: "yaml_file".to_string(),
            value: "file read failed".to_string(),
            source: Box::new(e),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            field: "yaml_content".to_string(),
            value: content,
            source: Box::new(e),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Timezone context attached to every decoded value
    pub fn timezone_info(&self) -> TimezoneInfo {
        TimezoneInfo::new(self.timezone_offset, self.timezone_name.clone())
    }
}

/// Read an environment variable, falling back to `default` only when it is unset
fn env_var_or(key: &str, default: &str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) => Ok(value),
        Err(env::VarError::NotPresent) => Ok(default.to_string()),
        Err(e) => Err(e.into()),
    }
}

/// Parse an environment variable with a default value
fn parse_env_var<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env_var_or(key, default)?;
    value.parse().map_err(|e| ConfigError::Parse {
        field: key.to_string(),
        value,
        source: Box::new(e),
    })
}

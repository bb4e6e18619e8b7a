//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::filter::FilterConfig;
use super::profanity::ProfanityConfig;
use super::validation::{ValidationError, validate};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {}", format_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Filter configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Spam filter and decision policy settings.
    #[serde(default)]
    pub filter: FilterConfig,
    /// Optional remote profanity lookup.
    #[serde(default)]
    pub profanity: ProfanityConfig,
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        validate(&config).map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}

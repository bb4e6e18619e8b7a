//! Configuration validation.
//!
//! Validates configuration at load time to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("filter.gibberish_threshold must be within 0.0-1.0, got {0}")]
    ThresholdOutOfRange(f64),
    #[error("filter.decisive_suspicious_fields must be at least 1")]
    ZeroDecisiveFields,
    #[error("filter.extra_keywords[{0}] is blank")]
    BlankKeyword(usize),
    #[error("profanity.endpoint must be an http(s) URL, got '{0}'")]
    InvalidEndpoint(String),
    #[error("profanity.query_param is required")]
    MissingQueryParam,
    #[error("profanity.timeout_secs must be at least 1")]
    ZeroTimeout,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let filter = &config.filter;
    if !(0.0..=1.0).contains(&filter.gibberish_threshold) {
        errors.push(ValidationError::ThresholdOutOfRange(
            filter.gibberish_threshold,
        ));
    }
    if filter.decisive_suspicious_fields == 0 {
        errors.push(ValidationError::ZeroDecisiveFields);
    }
    for (idx, keyword) in filter.extra_keywords.iter().enumerate() {
        if keyword.trim().is_empty() {
            errors.push(ValidationError::BlankKeyword(idx));
        }
    }

    // The lookup settings only matter when it is turned on.
    let profanity = &config.profanity;
    if profanity.enabled {
        let endpoint = profanity.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            errors.push(ValidationError::InvalidEndpoint(profanity.endpoint.clone()));
        }
        if profanity.query_param.trim().is_empty() {
            errors.push(ValidationError::MissingQueryParam);
        }
        if profanity.timeout_secs == 0 {
            errors.push(ValidationError::ZeroTimeout);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Top-level `Config`, `ConfigError` and loading
//! - [`filter`]: Spam filter and decision policy settings (`FilterConfig`)
//! - [`profanity`]: Remote profanity lookup settings (`ProfanityConfig`)
//! - [`validation`]: Load-time validation (`ValidationError`)

mod defaults;
mod filter;
mod profanity;
mod types;
mod validation;

pub use filter::FilterConfig;
pub use profanity::ProfanityConfig;
pub use types::{Config, ConfigError};
pub use validation::{ValidationError, validate};

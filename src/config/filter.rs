//! Spam filter configuration.

use serde::Deserialize;

use super::defaults::default_true;
use crate::security::default_spam_keywords;

/// Spam filter and decision policy configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    /// Emit the per-entry diagnostic log line for spam verdicts (default: false).
    #[serde(default)]
    pub debug: bool,
    /// Per-field gibberish threshold, 0.0-1.0 (default: 0.6).
    #[serde(default = "default_gibberish_threshold")]
    pub gibberish_threshold: f64,
    /// Number of gibberish fields that is decisive on its own (default: 2).
    #[serde(default = "default_decisive_suspicious_fields")]
    pub decisive_suspicious_fields: usize,
    /// Forms with at most this many eligible fields are flagged on a single
    /// gibberish field (default: 5).
    #[serde(default = "default_short_form_max_fields")]
    pub short_form_max_fields: usize,
    /// Include the built-in blocklist (default: true).
    #[serde(default = "default_true")]
    pub use_default_keywords: bool,
    /// Additional keywords or phrases.
    #[serde(default)]
    pub extra_keywords: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            debug: false,
            gibberish_threshold: default_gibberish_threshold(),
            decisive_suspicious_fields: default_decisive_suspicious_fields(),
            short_form_max_fields: default_short_form_max_fields(),
            use_default_keywords: true,
            extra_keywords: Vec::new(),
        }
    }
}

impl FilterConfig {
    /// Effective blocklist: defaults (unless disabled) followed by extras.
    pub fn keywords(&self) -> Vec<String> {
        let defaults = if self.use_default_keywords {
            default_spam_keywords()
        } else {
            Vec::new()
        };

        defaults
            .into_iter()
            .map(str::to_string)
            .chain(self.extra_keywords.iter().cloned())
            .collect()
    }
}

fn default_gibberish_threshold() -> f64 {
    0.6
}

fn default_decisive_suspicious_fields() -> usize {
    2
}

fn default_short_form_max_fields() -> usize {
    5
}

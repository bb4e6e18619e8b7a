//! Spam decision policy.
//!
//! Combines keyword and gibberish signals across all eligible fields of one
//! submission into a single [`Verdict`]. Fields are scanned in form order:
//!
//! 1. A keyword hit is decisive: scanning stops immediately.
//! 2. Free-text fields are run through the gibberish detector; reaching
//!    `decisive_suspicious_fields` gibberish fields is decisive.
//! 3. Short forms (at most `short_form_max_fields` eligible fields) are
//!    flagged on a single gibberish field.

use serde::Serialize;
use std::fmt;

use super::gibberish::{GibberishDetector, GibberishReport};
use super::keywords::KeywordMatcher;
use crate::config::FilterConfig;
use crate::form::EligibleField;

/// What decided a positive verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpamSignal {
    Keyword,
    Gibberish,
    ShortForm,
    Profanity,
}

impl SpamSignal {
    /// Static label for metrics.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Gibberish => "gibberish",
            Self::ShortForm => "short_form",
            Self::Profanity => "profanity",
        }
    }
}

impl fmt::Display for SpamSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field analyzer output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldAnalysis {
    pub field_id: String,
    /// Matched blocklist literals (empty when nothing matched).
    pub keyword_matches: Vec<String>,
    /// Gibberish report, if the detector ran for this field.
    pub gibberish: Option<GibberishReport>,
}

/// Final decision for one submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Verdict {
    pub is_spam: bool,
    /// Human-readable reasons, in the order they were found.
    pub reasons: Vec<String>,
    /// Number of fields the gibberish detector flagged.
    pub suspicious_fields: usize,
    /// Signal that made the verdict positive.
    pub signal: Option<SpamSignal>,
    /// Analyses of the fields that were actually evaluated.
    pub analyses: Vec<FieldAnalysis>,
}

impl Verdict {
    /// Negative verdict.
    pub fn clean() -> Self {
        Self::default()
    }

    /// Turn this verdict positive, adding the deciding reason.
    pub fn mark_spam(&mut self, signal: SpamSignal, reason: impl Into<String>) {
        self.is_spam = true;
        self.signal = Some(signal);
        self.reasons.push(reason.into());
    }
}

/// Decision policy over per-field keyword and gibberish signals.
#[derive(Debug, Clone)]
pub struct SpamDecisionPolicy {
    matcher: KeywordMatcher,
    detector: GibberishDetector,
    decisive_suspicious_fields: usize,
    short_form_max_fields: usize,
}

impl SpamDecisionPolicy {
    pub fn new(matcher: KeywordMatcher, config: &FilterConfig) -> Self {
        Self {
            matcher,
            detector: GibberishDetector::new(config.gibberish_threshold),
            decisive_suspicious_fields: config.decisive_suspicious_fields.max(1),
            short_form_max_fields: config.short_form_max_fields,
        }
    }

    /// Policy over the keyword list selected by `config`.
    pub fn from_config(config: &FilterConfig) -> Self {
        Self::new(KeywordMatcher::build(config.keywords()), config)
    }

    /// Evaluate the eligible fields of one submission.
    pub fn evaluate(&self, fields: &[EligibleField<'_>]) -> Verdict {
        let mut verdict = Verdict::clean();
        if fields.is_empty() {
            return verdict;
        }

        for field in fields {
            let hits = self.matcher.test(field.value);
            if hits.matched() {
                let reason = format!(
                    "Field {} contains keyword(s): '{}'",
                    field.id,
                    hits.matches.join("', '")
                );
                verdict.analyses.push(FieldAnalysis {
                    field_id: field.id.to_string(),
                    keyword_matches: hits.matches,
                    gibberish: None,
                });
                verdict.mark_spam(SpamSignal::Keyword, reason);
                return verdict;
            }

            if !field.kind.is_free_text() {
                verdict.analyses.push(FieldAnalysis {
                    field_id: field.id.to_string(),
                    keyword_matches: Vec::new(),
                    gibberish: None,
                });
                continue;
            }

            let report = self.detector.analyze(field.value);
            let flagged = report.is_spam;
            if flagged {
                verdict.suspicious_fields += 1;
                let mut reason = format!(
                    "Field {} appears to be random characters/gibberish",
                    field.id
                );
                if !report.reasons.is_empty() {
                    reason.push_str(&format!(" ({})", report.reasons.join(", ")));
                }
                verdict.reasons.push(reason);
            }
            verdict.analyses.push(FieldAnalysis {
                field_id: field.id.to_string(),
                keyword_matches: Vec::new(),
                gibberish: Some(report),
            });

            if flagged && verdict.suspicious_fields >= self.decisive_suspicious_fields {
                verdict.is_spam = true;
                verdict.signal = Some(SpamSignal::Gibberish);
                return verdict;
            }
        }

        if verdict.suspicious_fields >= 1 && fields.len() <= self.short_form_max_fields {
            let reason = format!(
                "Multiple suspicious patterns detected across {} field(s)",
                verdict.suspicious_fields
            );
            verdict.mark_spam(SpamSignal::ShortForm, reason);
        }

        verdict
    }
}

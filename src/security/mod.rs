//! Spam classification for form submissions.
//!
//! Two independent analyzers feed a decision policy:
//! - **Keywords**: compiled blocklist with word-boundary and phrase-separator handling
//! - **Gibberish**: statistical randomness scoring of free-text values
//! - **Policy**: per-field aggregation into a single verdict
//! - **Profanity**: optional remote lookup, fails open
//! - **Registry**: in-process record of entries already judged spam
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  SpamDecisionPolicy                      │
//! ├──────────────────────────────┬───────────────────────────┤
//! │ KeywordMatcher               │ GibberishDetector         │
//! │ \b(words)\b | phrase[\s_-]+  │ ratio/case/words/rep/runs │
//! └──────────────────────────────┴───────────────────────────┘
//!          ProfanityCheck (optional)   SpamEntryRegistry
//! ```

pub mod gibberish;
pub mod keywords;
pub mod policy;
pub mod profanity;
pub mod registry;

pub use gibberish::{GibberishDetector, GibberishReport};
pub use keywords::{KeywordHits, KeywordMatcher, default_spam_keywords};
pub use policy::{FieldAnalysis, SpamDecisionPolicy, SpamSignal, Verdict};
pub use profanity::{HttpProfanityChecker, ProfanityCheck};
pub use registry::SpamEntryRegistry;

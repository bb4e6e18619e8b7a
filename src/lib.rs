//! formguard - heuristic spam classification for form submissions.
//!
//! Decides whether a submitted form entry is spam from two independent
//! signals, keyword blocklist matching and gibberish detection on free-text
//! fields, and applies the verdict through host-provided collaborators.
//!
//! ```text
//! form + entry ─► eligible fields ─► KeywordMatcher ─► GibberishDetector
//!                                          │                 │
//!                                          └──► SpamDecisionPolicy ──► Verdict
//!                                                                        │
//!                    EntryStore::set_status ◄── SubmissionFilter ◄───────┘
//!                    SpamEntryRegistry      ◄──┘        NotificationGate ──► send / cancel
//! ```

pub mod config;
pub mod error;
pub mod form;
pub mod hooks;
pub mod metrics;
pub mod security;
pub mod telemetry;

pub use config::{Config, ConfigError, FilterConfig, ProfanityConfig};
pub use error::{FilterError, FilterResult, StoreError};
pub use form::{Entry, EntryId, EntryStatus, FieldDescriptor, FieldKind, Form};
pub use hooks::{EntryStore, Hooks, InMemoryEntryStore, NotificationGate, SubmissionFilter};
pub use security::{
    GibberishDetector, GibberishReport, KeywordMatcher, ProfanityCheck, SpamDecisionPolicy,
    SpamEntryRegistry, SpamSignal, Verdict,
};

//! Unified error handling for formguard.
//!
//! Classification itself never fails: malformed field data degrades to
//! "not eligible" and remote lookups fail open. The only errors that reach
//! callers come from the entry store collaborator.

use thiserror::Error;

use crate::form::EntryId;

// ============================================================================
// Entry store errors (host collaborator)
// ============================================================================

/// Errors reported by an [`EntryStore`](crate::hooks::EntryStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("entry store unavailable: {0}")]
    Unavailable(String),

    #[error("unknown entry: {0}")]
    UnknownEntry(EntryId),
}

// ============================================================================
// Filter errors (submission processing)
// ============================================================================

/// Errors that can occur while applying a spam verdict.
///
/// The submission itself is already persisted by the host; a failure here
/// only means the spam marking did not happen.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("failed to mark entry {entry_id} as spam: {source}")]
    Store {
        entry_id: EntryId,
        #[source]
        source: StoreError,
    },
}

impl FilterError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Store {
                source: StoreError::Unavailable(_),
                ..
            } => "store_unavailable",
            Self::Store {
                source: StoreError::UnknownEntry(_),
                ..
            } => "unknown_entry",
        }
    }
}

/// Result type for the submission hook.
pub type FilterResult<T> = Result<T, FilterError>;

//! In-process registry of entries already judged spam.
//!
//! Lifecycle: created empty at startup, written by the submission filter on
//! a positive verdict, read by the notification hook. It is never persisted
//! and never shrinks; the authoritative status lives in the entry store, so
//! losing the registry on restart (or not sharing it between worker
//! processes) only costs the fast path.

use dashmap::DashSet;

use crate::form::EntryId;

/// Monotonic set of spam entry ids.
#[derive(Debug, Default)]
pub struct SpamEntryRegistry {
    entries: DashSet<EntryId>,
}

impl SpamEntryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an entry as spam. Returns `true` if it was not already recorded.
    pub fn mark(&self, id: &EntryId) -> bool {
        self.entries.insert(id.clone())
    }

    pub fn is_spam(&self, id: &EntryId) -> bool {
        self.entries.contains(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Entry store collaborator.
//!
//! The filter never writes anything but the entry status, so the host only
//! has to provide this one mutation.

use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::StoreError;
use crate::form::{EntryId, EntryStatus};

/// Host entry store.
pub trait EntryStore: Send + Sync {
    /// Persist a new status for an entry.
    fn set_status(&self, id: &EntryId, status: EntryStatus) -> Result<(), StoreError>;
}

/// Entry store kept in memory; used by the CLI and in tests.
#[derive(Debug, Default)]
pub struct InMemoryEntryStore {
    statuses: DashMap<EntryId, EntryStatus>,
    writes: AtomicUsize,
}

impl InMemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last status written for an entry.
    pub fn status(&self, id: &EntryId) -> Option<EntryStatus> {
        self.statuses.get(id).map(|s| s.value().clone())
    }

    /// Number of status writes performed.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }
}

impl EntryStore for InMemoryEntryStore {
    fn set_status(&self, id: &EntryId, status: EntryStatus) -> Result<(), StoreError> {
        self.statuses.insert(id.clone(), status);
        self.writes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_statuses_and_writes() {
        let store = InMemoryEntryStore::new();
        let id = EntryId::from(3u64);
        assert_eq!(store.status(&id), None);

        store.set_status(&id, EntryStatus::Spam).unwrap();
        assert_eq!(store.status(&id), Some(EntryStatus::Spam));
        assert_eq!(store.writes(), 1);
    }
}

//! Host hook points.
//!
//! The host platform calls two hooks per submission:
//! - **after submission**: once the entry is persisted ([`SubmissionFilter`])
//! - **before notification**: once per notification ([`NotificationGate`])
//!
//! [`Hooks`] wires both to one shared [`SpamEntryRegistry`] so the
//! notification hook sees verdicts reached earlier in the same process.

pub mod notification;
pub mod store;
pub mod submission;

pub use notification::NotificationGate;
pub use store::{EntryStore, InMemoryEntryStore};
pub use submission::SubmissionFilter;

use std::sync::Arc;

use crate::config::Config;
use crate::error::FilterResult;
use crate::form::{Entry, Form};
use crate::security::{HttpProfanityChecker, SpamEntryRegistry, Verdict};

/// Both hook points, sharing one registry.
pub struct Hooks {
    submission: SubmissionFilter,
    notification: NotificationGate,
    registry: Arc<SpamEntryRegistry>,
}

impl Hooks {
    /// Wire the hooks from configuration.
    pub fn from_config(config: &Config, store: Arc<dyn EntryStore>) -> Self {
        let registry = Arc::new(SpamEntryRegistry::new());
        let mut submission = SubmissionFilter::new(&config.filter, store, registry.clone());
        if let Some(checker) = HttpProfanityChecker::from_config(&config.profanity) {
            submission = submission.with_profanity(Arc::new(checker));
        }

        Self::new(submission, registry)
    }

    /// Wire the hooks around an already built filter.
    ///
    /// `registry` must be the registry the filter writes to.
    pub fn new(submission: SubmissionFilter, registry: Arc<SpamEntryRegistry>) -> Self {
        Self {
            notification: NotificationGate::new(registry.clone()),
            submission,
            registry,
        }
    }

    /// Post-submission hook.
    pub async fn after_submission(
        &self,
        entry: &mut Entry,
        form: &Form,
    ) -> FilterResult<Option<Verdict>> {
        self.submission.on_submission(entry, form).await
    }

    /// Pre-notification hook: the notification, or `None` to cancel it.
    pub fn notification<N>(&self, notification: N, form: &Form, entry: &Entry) -> Option<N> {
        self.notification.should_send(notification, form, entry)
    }

    pub fn registry(&self) -> &Arc<SpamEntryRegistry> {
        &self.registry
    }
}

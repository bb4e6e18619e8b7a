//! Pre-notification hook.
//!
//! Must run after the submission filter had its chance to mark the entry:
//! the registry is only written by the filter.

use std::sync::Arc;
use tracing::debug;

use crate::form::{Entry, Form};
use crate::security::SpamEntryRegistry;

/// Cancels notifications for spam entries.
#[derive(Debug, Clone)]
pub struct NotificationGate {
    registry: Arc<SpamEntryRegistry>,
}

impl NotificationGate {
    pub fn new(registry: Arc<SpamEntryRegistry>) -> Self {
        Self { registry }
    }

    /// Pass the notification through, or `None` to cancel sending.
    ///
    /// `form` is part of the host hook contract; the decision only depends on
    /// the entry.
    pub fn should_send<N>(&self, notification: N, _form: &Form, entry: &Entry) -> Option<N> {
        let _span = crate::telemetry::spans::notification(entry.id.as_str()).entered();

        if entry.status.is_spam() || self.registry.is_spam(&entry.id) {
            debug!("Notification suppressed for spam entry");
            crate::metrics::record_notification_suppressed();
            return None;
        }

        Some(notification)
    }
}

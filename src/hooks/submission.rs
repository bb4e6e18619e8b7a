//! Post-submission spam filter.
//!
//! Runs once per persisted entry:
//! 1. Entries already marked spam are left alone.
//! 2. Eligible fields are classified by the decision policy.
//! 3. If the policy found nothing and a profanity checker is configured,
//!    free-text fields are checked remotely (fail open).
//! 4. On a spam verdict the entry status is written to the store, the
//!    diagnostic line is logged (when enabled) and the entry id is recorded
//!    in the registry for the notification hook.

use std::sync::Arc;
use tracing::{Instrument, debug, info};

use super::store::EntryStore;
use crate::config::FilterConfig;
use crate::error::{FilterError, FilterResult};
use crate::form::{EligibleField, Entry, EntryStatus, Form, eligible_fields};
use crate::security::{ProfanityCheck, SpamDecisionPolicy, SpamEntryRegistry, SpamSignal, Verdict};
use crate::telemetry::{FilterTimer, spans};

/// Spam filter bound to its collaborators.
pub struct SubmissionFilter {
    policy: SpamDecisionPolicy,
    profanity: Option<Arc<dyn ProfanityCheck>>,
    store: Arc<dyn EntryStore>,
    registry: Arc<SpamEntryRegistry>,
    debug: bool,
}

impl SubmissionFilter {
    pub fn new(
        config: &FilterConfig,
        store: Arc<dyn EntryStore>,
        registry: Arc<SpamEntryRegistry>,
    ) -> Self {
        Self {
            policy: SpamDecisionPolicy::from_config(config),
            profanity: None,
            store,
            registry,
            debug: config.debug,
        }
    }

    /// Add the remote profanity check as a final signal.
    pub fn with_profanity(mut self, checker: Arc<dyn ProfanityCheck>) -> Self {
        self.profanity = Some(checker);
        self
    }

    /// Classify a submission without side effects.
    pub fn classify(&self, form: &Form, entry: &Entry) -> Verdict {
        self.policy.evaluate(&eligible_fields(form, entry))
    }

    /// Handle a persisted submission.
    ///
    /// Returns `Ok(None)` when the entry was skipped (already spam, or no
    /// eligible fields), otherwise the verdict that was reached. On a spam
    /// verdict `entry.status` is updated after the store write succeeds.
    pub async fn on_submission(
        &self,
        entry: &mut Entry,
        form: &Form,
    ) -> FilterResult<Option<Verdict>> {
        if entry.status.is_spam() {
            debug!(entry_id = %entry.id, "Entry already marked as spam; skipping");
            return Ok(None);
        }

        let span = spans::submission(entry.id.as_str(), form.fields.len());
        let Some(verdict) = self.evaluate(form, entry).instrument(span).await else {
            return Ok(None);
        };

        if verdict.is_spam {
            self.apply_spam(entry, &verdict)?;
        }

        Ok(Some(verdict))
    }

    async fn evaluate(&self, form: &Form, entry: &Entry) -> Option<Verdict> {
        let fields = eligible_fields(form, entry);
        if fields.is_empty() {
            debug!("No eligible fields to check");
            return None;
        }

        let _timer = FilterTimer::start();
        crate::metrics::record_submission_checked();

        let mut verdict = self.policy.evaluate(&fields);
        if !verdict.is_spam {
            self.check_profanity(&fields, &mut verdict).await;
        }
        Some(verdict)
    }

    async fn check_profanity(&self, fields: &[EligibleField<'_>], verdict: &mut Verdict) {
        let Some(checker) = &self.profanity else {
            return;
        };

        for field in fields.iter().filter(|f| f.kind.is_free_text()) {
            if checker.contains_profanity(field.value).await {
                verdict.mark_spam(
                    SpamSignal::Profanity,
                    format!("Field {} contains profanity", field.id),
                );
                return;
            }
        }
    }

    fn apply_spam(&self, entry: &mut Entry, verdict: &Verdict) -> FilterResult<()> {
        if let Err(source) = self.store.set_status(&entry.id, EntryStatus::Spam) {
            let err = FilterError::Store {
                entry_id: entry.id.clone(),
                source,
            };
            crate::metrics::record_filter_error(err.error_code());
            return Err(err);
        }
        entry.status = EntryStatus::Spam;

        let signal = verdict.signal.map_or("unknown", |s| s.as_str());
        if self.debug {
            info!(
                entry_id = %entry.id,
                reasons = %verdict.reasons.join(", "),
                "Spam detected: Entry ID {} - Reasons: {}",
                entry.id,
                verdict.reasons.join(", ")
            );
        } else {
            debug!(entry_id = %entry.id, signal, "Entry marked as spam");
        }

        self.registry.mark(&entry.id);
        crate::metrics::record_spam(signal);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::form::{EntryId, FieldDescriptor, FieldKind};
    use crate::hooks::InMemoryEntryStore;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingStore;

    impl EntryStore for FailingStore {
        fn set_status(&self, _id: &EntryId, _status: EntryStatus) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    /// Flags any text containing "darn" and counts calls.
    #[derive(Default)]
    struct StubProfanity {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ProfanityCheck for StubProfanity {
        async fn contains_profanity(&self, text: &str) -> bool {
            self.calls.fetch_add(1, Ordering::Relaxed);
            text.contains("darn")
        }
    }

    /// Log sink shared with a test subscriber.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    /// Run one keyword-spam submission and return everything logged at debug level.
    async fn logs_for_spam_run(debug: bool) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let config = FilterConfig {
            debug,
            ..FilterConfig::default()
        };
        let filter = SubmissionFilter::new(
            &config,
            Arc::new(InMemoryEntryStore::new()),
            Arc::new(SpamEntryRegistry::new()),
        );
        let mut entry = Entry::new(20u64).with_value("field1", "Buy cheap viagra now");
        filter.on_submission(&mut entry, &form()).await.unwrap();

        logs.contents()
    }

    fn form() -> Form {
        Form::new(vec![
            FieldDescriptor::new("field1", FieldKind::Text),
            FieldDescriptor::new("field2", FieldKind::Name),
            FieldDescriptor::new("field3", FieldKind::Html),
        ])
    }

    fn make_filter(store: Arc<InMemoryEntryStore>) -> (SubmissionFilter, Arc<SpamEntryRegistry>) {
        let registry = Arc::new(SpamEntryRegistry::new());
        let filter = SubmissionFilter::new(&FilterConfig::default(), store, registry.clone());
        (filter, registry)
    }

    #[tokio::test]
    async fn spam_entry_is_marked_and_recorded() {
        let store = Arc::new(InMemoryEntryStore::new());
        let (filter, registry) = make_filter(store.clone());
        let mut entry = Entry::new(10u64)
            .with_value("field1", "Buy cheap viagra now")
            .with_value("field2", "John Smith");

        let verdict = filter.on_submission(&mut entry, &form()).await.unwrap().unwrap();

        assert!(verdict.is_spam);
        assert!(verdict.reasons[0].contains("field1"));
        assert!(verdict.reasons[0].contains("viagra"));
        assert_eq!(entry.status, EntryStatus::Spam);
        assert_eq!(store.status(&entry.id), Some(EntryStatus::Spam));
        assert!(registry.is_spam(&entry.id));
    }

    #[tokio::test]
    async fn clean_entry_has_no_side_effects() {
        let store = Arc::new(InMemoryEntryStore::new());
        let (filter, registry) = make_filter(store.clone());
        let mut entry = Entry::new(11u64)
            .with_value("field1", "Hello, I would like a quote for landscaping.");

        let verdict = filter.on_submission(&mut entry, &form()).await.unwrap().unwrap();

        assert!(!verdict.is_spam);
        assert!(verdict.reasons.is_empty());
        assert_eq!(entry.status, EntryStatus::Normal);
        assert_eq!(store.writes(), 0);
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn repeated_calls_are_idempotent() {
        let store = Arc::new(InMemoryEntryStore::new());
        let (filter, registry) = make_filter(store.clone());
        let mut entry = Entry::new(12u64).with_value("field1", "casino bonus");

        assert!(filter.on_submission(&mut entry, &form()).await.unwrap().is_some());
        assert!(filter.on_submission(&mut entry, &form()).await.unwrap().is_none());

        assert_eq!(store.writes(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn already_spam_entry_is_skipped() {
        let store = Arc::new(InMemoryEntryStore::new());
        let (filter, registry) = make_filter(store.clone());
        let mut entry = Entry::new(13u64).with_value("field1", "casino bonus");
        entry.status = EntryStatus::Spam;

        assert!(filter.on_submission(&mut entry, &form()).await.unwrap().is_none());
        assert_eq!(store.writes(), 0);
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn no_eligible_fields_is_a_noop() {
        let store = Arc::new(InMemoryEntryStore::new());
        let (filter, _) = make_filter(store.clone());
        let mut entry = Entry::new(14u64)
            .with_value("field3", "<b>viagra</b>")
            .with_value("field1", "");

        assert!(filter.on_submission(&mut entry, &form()).await.unwrap().is_none());
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn store_failure_propagates_without_recording() {
        let registry = Arc::new(SpamEntryRegistry::new());
        let filter = SubmissionFilter::new(
            &FilterConfig::default(),
            Arc::new(FailingStore),
            registry.clone(),
        );
        let mut entry = Entry::new(15u64).with_value("field1", "western union transfer");

        let err = filter.on_submission(&mut entry, &form()).await.unwrap_err();

        assert_eq!(err.error_code(), "store_unavailable");
        assert_eq!(entry.status, EntryStatus::Normal);
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn profanity_is_a_final_signal() {
        let store = Arc::new(InMemoryEntryStore::new());
        let (filter, registry) = make_filter(store.clone());
        let checker = Arc::new(StubProfanity::default());
        let filter = filter.with_profanity(checker.clone());
        let mut entry = Entry::new(16u64)
            .with_value("field1", "Well darn, the order never arrived")
            .with_value("field2", "John Smith");

        let verdict = filter.on_submission(&mut entry, &form()).await.unwrap().unwrap();

        assert!(verdict.is_spam);
        assert_eq!(verdict.signal, Some(SpamSignal::Profanity));
        assert_eq!(verdict.reasons, vec!["Field field1 contains profanity".to_string()]);
        assert_eq!(checker.calls.load(Ordering::Relaxed), 1);
        assert!(registry.is_spam(&entry.id));
    }

    #[tokio::test]
    async fn profanity_is_skipped_after_keyword_hit() {
        let store = Arc::new(InMemoryEntryStore::new());
        let (filter, _) = make_filter(store);
        let checker = Arc::new(StubProfanity::default());
        let filter = filter.with_profanity(checker.clone());
        let mut entry = Entry::new(17u64).with_value("field1", "darn good poker site");

        let verdict = filter.on_submission(&mut entry, &form()).await.unwrap().unwrap();

        assert_eq!(verdict.signal, Some(SpamSignal::Keyword));
        assert_eq!(checker.calls.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn diagnostic_line_is_logged_in_debug_mode() {
        let logs = logs_for_spam_run(true).await;

        let line = logs
            .lines()
            .find(|l| l.contains("Spam detected"))
            .expect("diagnostic line missing");
        assert!(line.contains("INFO"), "{line}");
        assert!(
            line.contains("Spam detected: Entry ID 20 - Reasons: Field field1 contains keyword(s): 'viagra'"),
            "{line}"
        );
    }

    #[tokio::test]
    async fn diagnostic_line_is_silent_outside_debug_mode() {
        let logs = logs_for_spam_run(false).await;

        assert!(!logs.contains("Spam detected"), "{logs}");
        let line = logs
            .lines()
            .find(|l| l.contains("Entry marked as spam"))
            .expect("terse spam line missing");
        assert!(line.contains("DEBUG"), "{line}");
        assert!(line.contains("signal=\"keyword\""), "{line}");
    }

    #[test]
    fn classify_has_no_side_effects() {
        let store = Arc::new(InMemoryEntryStore::new());
        let (filter, registry) = make_filter(store.clone());
        let entry = Entry::new(18u64)
            .with_value("field1", "mMjMUEsycpBMqHruCOvQDf")
            .with_value("field2", "xKqZpWvBnTlRjH");

        let verdict = filter.classify(&form(), &entry);

        assert!(verdict.is_spam);
        assert_eq!(verdict.suspicious_fields, 2);
        assert_eq!(store.writes(), 0);
        assert!(registry.is_empty());
    }
}

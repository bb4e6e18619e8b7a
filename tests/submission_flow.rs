//! End-to-end submission flow through both hooks.

use formguard::form::parse_submission;
use formguard::{Config, EntryStatus, Hooks, InMemoryEntryStore, SpamSignal};
use std::sync::Arc;

fn hooks() -> (Hooks, Arc<InMemoryEntryStore>) {
    let store = Arc::new(InMemoryEntryStore::new());
    let hooks = Hooks::from_config(&Config::default(), store.clone());
    (hooks, store)
}

#[tokio::test]
async fn keyword_spam_is_marked_and_notification_cancelled() {
    let (hooks, store) = hooks();
    let (form, mut entry) = parse_submission(
        r#"{
            "form": {"fields": [{"id": "field1", "type": "text"}, {"id": "field2", "type": "name"}]},
            "entry": {"id": 101, "values": {"field1": "Buy cheap viagra now", "field2": "John Smith"}}
        }"#,
    )
    .unwrap();

    let verdict = hooks.after_submission(&mut entry, &form).await.unwrap().unwrap();

    assert!(verdict.is_spam);
    assert_eq!(verdict.signal, Some(SpamSignal::Keyword));
    assert!(verdict.reasons[0].contains("field1"));
    assert!(verdict.reasons[0].contains("viagra"));
    assert_eq!(store.status(&entry.id), Some(EntryStatus::Spam));
    assert!(hooks.registry().is_spam(&entry.id));
    assert_eq!(hooks.notification("notify admin", &form, &entry), None);
}

#[tokio::test]
async fn two_gibberish_fields_are_spam() {
    let (hooks, _) = hooks();
    let (form, mut entry) = parse_submission(
        r#"{
            "form": {"fields": [{"id": "field1", "type": "text"}, {"id": "field2", "type": "text"}]},
            "entry": {"id": 102, "values": {"field1": "mMjMUEsycpBMqHruCOvQDf", "field2": "xKqZpWvBnTlRjH"}}
        }"#,
    )
    .unwrap();

    let verdict = hooks.after_submission(&mut entry, &form).await.unwrap().unwrap();

    assert!(verdict.is_spam);
    assert_eq!(verdict.signal, Some(SpamSignal::Gibberish));
    assert_eq!(verdict.suspicious_fields, 2);
    assert!(
        !verdict
            .reasons
            .iter()
            .any(|r| r.starts_with("Multiple suspicious patterns"))
    );
}

#[tokio::test]
async fn legitimate_submission_is_delivered() {
    let (hooks, store) = hooks();
    let (form, mut entry) = parse_submission(
        r#"{
            "form": {"fields": [{"id": "field1", "type": "textarea"}]},
            "entry": {"id": 103, "values": {"field1": "Hello, I would like a quote for landscaping."}}
        }"#,
    )
    .unwrap();

    let verdict = hooks.after_submission(&mut entry, &form).await.unwrap().unwrap();

    assert!(!verdict.is_spam);
    assert!(verdict.reasons.is_empty());
    assert_eq!(store.writes(), 0);
    assert_eq!(hooks.notification("notify admin", &form, &entry), Some("notify admin"));
}

#[tokio::test]
async fn one_gibberish_field_in_short_form_is_spam() {
    let (hooks, _) = hooks();
    let (form, mut entry) = parse_submission(
        r#"{
            "form": {"fields": [{"id": "1", "type": "text"}, {"id": "2", "type": "email"}]},
            "entry": {"id": 104, "values": {"1": "xKqZpWvBnTlRjH", "2": "someone@example.com"}}
        }"#,
    )
    .unwrap();

    let verdict = hooks.after_submission(&mut entry, &form).await.unwrap().unwrap();

    assert!(verdict.is_spam);
    assert_eq!(verdict.signal, Some(SpamSignal::ShortForm));
    assert_eq!(verdict.suspicious_fields, 1);
}

#[tokio::test]
async fn second_run_on_same_entry_is_a_noop() {
    let (hooks, store) = hooks();
    let (form, mut entry) = parse_submission(
        r#"{
            "form": {"fields": [{"id": "1", "type": "text"}]},
            "entry": {"id": 105, "values": {"1": "claim-your_prize today"}}
        }"#,
    )
    .unwrap();

    assert!(hooks.after_submission(&mut entry, &form).await.unwrap().is_some());
    assert!(hooks.after_submission(&mut entry, &form).await.unwrap().is_none());
    assert_eq!(store.writes(), 1);
    assert_eq!(hooks.registry().len(), 1);
}

#[tokio::test]
async fn layout_and_secret_fields_are_ignored() {
    let (hooks, store) = hooks();
    let (form, mut entry) = parse_submission(
        r#"{
            "form": {"fields": [
                {"id": "1", "type": "html"},
                {"id": "2", "type": "password"},
                {"id": "3", "type": "captcha"},
                {"id": "4"}
            ]},
            "entry": {"id": 106, "values": {"1": "viagra", "2": "xKqZpWvBnTlRjH", "3": "casino", "4": "poker"}}
        }"#,
    )
    .unwrap();

    assert!(hooks.after_submission(&mut entry, &form).await.unwrap().is_none());
    assert_eq!(store.writes(), 0);
}

#[tokio::test]
async fn custom_keywords_from_config() {
    let config = Config::parse(
        r#"
[filter]
use_default_keywords = false
extra_keywords = ["class"]
"#,
    )
    .unwrap();
    let hooks = Hooks::from_config(&config, Arc::new(InMemoryEntryStore::new()));
    let (form, mut classic) = parse_submission(
        r#"{"form": {"fields": [{"id": "1", "type": "text"}]},
            "entry": {"id": 107, "values": {"1": "a classic car for viagra"}}}"#,
    )
    .unwrap();

    let verdict = hooks.after_submission(&mut classic, &form).await.unwrap().unwrap();
    assert!(!verdict.is_spam);

    let (_, mut lawsuit) = parse_submission(
        r#"{"form": {"fields": []},
            "entry": {"id": 108, "values": {"1": "join the class action"}}}"#,
    )
    .unwrap();
    let verdict = hooks.after_submission(&mut lawsuit, &form).await.unwrap().unwrap();
    assert!(verdict.is_spam);
}

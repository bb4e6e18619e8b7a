//! formguard - classify a form submission from the command line.
//!
//! Usage: `formguard <submission.json> [config.toml]`

use anyhow::Context;
use formguard::form::parse_submission;
use formguard::{Config, Hooks, InMemoryEntryStore, metrics};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct Report<'a> {
    entry_id: &'a str,
    status: &'a str,
    skipped: bool,
    is_spam: bool,
    signal: Option<&'a str>,
    suspicious_fields: usize,
    reasons: &'a [String],
    notification_sent: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let submission_path = args
        .next()
        .context("usage: formguard <submission.json> [config.toml]")?;

    let config = match args.next() {
        Some(config_path) => Config::load(&config_path).map_err(|e| {
            error!(path = %config_path, error = %e, "Failed to load config");
            e
        })?,
        None => Config::default(),
    };

    metrics::init();

    let document = std::fs::read_to_string(&submission_path)
        .with_context(|| format!("failed to read {submission_path}"))?;
    let (form, mut entry) = parse_submission(&document)?;

    info!(
        entry_id = %entry.id,
        fields = form.fields.len(),
        profanity = config.profanity.enabled,
        "Checking submission"
    );

    let store = Arc::new(InMemoryEntryStore::new());
    let hooks = Hooks::from_config(&config, store);

    let verdict = hooks.after_submission(&mut entry, &form).await?;
    let notification_sent = hooks.notification((), &form, &entry).is_some();

    let reasons = verdict.as_ref().map(|v| v.reasons.as_slice()).unwrap_or(&[]);
    let report = Report {
        entry_id: entry.id.as_str(),
        status: entry.status.as_str(),
        skipped: verdict.is_none(),
        is_spam: entry.status.is_spam(),
        signal: verdict.as_ref().and_then(|v| v.signal).map(|s| s.as_str()),
        suspicious_fields: verdict.as_ref().map_or(0, |v| v.suspicious_fields),
        reasons,
        notification_sent,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    if config.filter.debug {
        print!("{}", metrics::gather_metrics());
    }

    Ok(())
}

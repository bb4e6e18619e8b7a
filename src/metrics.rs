//! Prometheus metrics collection for formguard.
//!
//! - `formguard_submissions_checked_total` - Submissions run through the filter
//! - `formguard_spam_detected_total{signal}` - Spam verdicts by deciding signal
//! - `formguard_notifications_suppressed_total` - Notifications cancelled for spam entries
//! - `formguard_profanity_failures_total{kind}` - Failed remote profanity lookups
//! - `formguard_filter_errors_total{error}` - Spam marking failures
//! - `formguard_filter_duration_seconds` - Filter latency histogram

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

// ========================================================================
// Counters (monotonic increasing)
// ========================================================================

/// Submissions run through the spam filter.
pub static SUBMISSIONS_CHECKED: OnceLock<IntCounter> = OnceLock::new();

/// Spam verdicts by deciding signal.
pub static SPAM_DETECTED: OnceLock<IntCounterVec> = OnceLock::new();

/// Notifications cancelled because the entry is spam.
pub static NOTIFICATIONS_SUPPRESSED: OnceLock<IntCounter> = OnceLock::new();

/// Remote profanity lookups that failed open.
pub static PROFANITY_FAILURES: OnceLock<IntCounterVec> = OnceLock::new();

/// Failures while applying a spam verdict.
pub static FILTER_ERRORS: OnceLock<IntCounterVec> = OnceLock::new();

// ========================================================================
// Histograms
// ========================================================================

/// Time spent classifying one submission.
pub static FILTER_LATENCY: OnceLock<Histogram> = OnceLock::new();

/// Initialize the Prometheus metrics registry.
///
/// Safe to call more than once; only the first call registers metrics.
pub fn init() {
    let r = registry();

    macro_rules! register {
        ($metric:ident, $init:expr) => {
            if $metric.get().is_none() {
                match $init {
                    Ok(m) => {
                        if let Err(e) = r.register(Box::new(m.clone())) {
                            tracing::warn!(error = %e, concat!("Failed to register metric ", stringify!($metric)));
                        }
                        let _ = $metric.set(m);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, concat!("Failed to create metric ", stringify!($metric)));
                    }
                }
            }
        };
    }

    register!(SUBMISSIONS_CHECKED, IntCounter::new("formguard_submissions_checked_total", "Submissions run through the spam filter"));
    register!(SPAM_DETECTED, IntCounterVec::new(Opts::new("formguard_spam_detected_total", "Spam verdicts by deciding signal"), &["signal"]));
    register!(NOTIFICATIONS_SUPPRESSED, IntCounter::new("formguard_notifications_suppressed_total", "Notifications cancelled for spam entries"));
    register!(PROFANITY_FAILURES, IntCounterVec::new(Opts::new("formguard_profanity_failures_total", "Remote profanity lookups that failed open"), &["kind"]));
    register!(FILTER_ERRORS, IntCounterVec::new(Opts::new("formguard_filter_errors_total", "Spam marking failures by error"), &["error"]));
    register!(FILTER_LATENCY, Histogram::with_opts(
        HistogramOpts::new("formguard_filter_duration_seconds", "Time spent classifying one submission")
            .buckets(vec![0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.1, 1.0, 30.0])));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

// ============================================================================
// Helper functions for metric updates
// ============================================================================

#[inline]
pub fn record_submission_checked() {
    if let Some(c) = SUBMISSIONS_CHECKED.get() {
        c.inc();
    }
}

#[inline]
pub fn record_spam(signal: &str) {
    if let Some(c) = SPAM_DETECTED.get() {
        c.with_label_values(&[signal]).inc();
    }
}

#[inline]
pub fn record_notification_suppressed() {
    if let Some(c) = NOTIFICATIONS_SUPPRESSED.get() {
        c.inc();
    }
}

#[inline]
pub fn record_profanity_failure(kind: &str) {
    if let Some(c) = PROFANITY_FAILURES.get() {
        c.with_label_values(&[kind]).inc();
    }
}

#[inline]
pub fn record_filter_error(error: &str) {
    if let Some(c) = FILTER_ERRORS.get() {
        c.with_label_values(&[error]).inc();
    }
}

#[inline]
pub fn record_filter_latency(duration_secs: f64) {
    if let Some(h) = FILTER_LATENCY.get() {
        h.observe(duration_secs);
    }
}

//! Telemetry utilities for filter timing and tracing spans.

use std::time::Instant;

/// Guard for timing one filter run.
///
/// Records filter latency when dropped.
pub struct FilterTimer {
    start: Instant,
}

impl FilterTimer {
    /// Start timing.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Drop for FilterTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        crate::metrics::record_filter_latency(duration);
    }
}

/// Standardized span constructors.
pub mod spans {
    use tracing::{Span, info_span};

    /// Span for processing one submission.
    pub fn submission(entry_id: &str, fields: usize) -> Span {
        info_span!("submission", entry_id = %entry_id, fields = fields)
    }

    /// Span for a notification decision.
    pub fn notification(entry_id: &str) -> Span {
        info_span!("notification", entry_id = %entry_id)
    }
}

//! Remote profanity lookup.
//!
//! The check is a pluggable capability: the submission filter only sees the
//! [`ProfanityCheck`] trait, so tests can stub it and deployments can leave it
//! out entirely. The HTTP implementation targets services that answer a GET
//! with the literal body `true` or `false`.
//!
//! Every failure (timeout, transport error, non-success status, unexpected
//! body) fails open: the text is reported as clean and the submission
//! pipeline carries on.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::ProfanityConfig;

/// A text-level profanity check.
#[async_trait]
pub trait ProfanityCheck: Send + Sync {
    /// Returns `true` only when the text is known to contain profanity.
    async fn contains_profanity(&self, text: &str) -> bool;
}

/// Profanity check backed by a remote HTTP service.
pub struct HttpProfanityChecker {
    endpoint: String,
    query_param: String,
    timeout: Duration,
    http_client: reqwest::Client,
}

impl HttpProfanityChecker {
    pub fn new(config: &ProfanityConfig) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs);
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("formguard/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        info!(
            endpoint = %config.endpoint,
            timeout_secs = config.timeout_secs,
            "Profanity checker initialized"
        );

        Self {
            endpoint: config.endpoint.clone(),
            query_param: config.query_param.clone(),
            timeout,
            http_client,
        }
    }

    /// Build a checker when the profanity lookup is enabled.
    pub fn from_config(config: &ProfanityConfig) -> Option<Self> {
        config.enabled.then(|| Self::new(config))
    }
}

#[async_trait]
impl ProfanityCheck for HttpProfanityChecker {
    async fn contains_profanity(&self, text: &str) -> bool {
        let request = self
            .http_client
            .get(&self.endpoint)
            .query(&[(self.query_param.as_str(), text)])
            .send();

        let response = match tokio::time::timeout(self.timeout, request).await {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) => {
                warn!(error = %e, "Profanity API request failed");
                crate::metrics::record_profanity_failure("transport");
                return false;
            }
            Err(_) => {
                warn!("Profanity API request timed out");
                crate::metrics::record_profanity_failure("timeout");
                return false;
            }
        };

        if !response.status().is_success() {
            warn!(status = %response.status(), "Profanity API returned an error status");
            crate::metrics::record_profanity_failure("status");
            return false;
        }

        let body = match tokio::time::timeout(self.timeout, response.text()).await {
            Ok(Ok(body)) => body,
            Ok(Err(e)) => {
                warn!(error = %e, "Failed to read profanity API response");
                crate::metrics::record_profanity_failure("transport");
                return false;
            }
            Err(_) => {
                warn!("Profanity API response timed out");
                crate::metrics::record_profanity_failure("timeout");
                return false;
            }
        };

        match body.trim() {
            "true" => true,
            "false" => false,
            other => {
                debug!(body = %other, "Unexpected profanity API response body");
                crate::metrics::record_profanity_failure("body");
                false
            }
        }
    }
}

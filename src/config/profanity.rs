//! Remote profanity lookup configuration.

use serde::Deserialize;

/// Remote profanity check configuration.
///
/// The service is queried with `GET <endpoint>?<query_param>=<text>` and must
/// answer with the literal body `true` or `false`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfanityConfig {
    /// Enable the remote lookup (default: false).
    #[serde(default)]
    pub enabled: bool,
    /// Service endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Query parameter carrying the text (default: "text").
    #[serde(default = "default_query_param")]
    pub query_param: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProfanityConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
            query_param: default_query_param(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_endpoint() -> String {
    "https://www.purgomalum.com/service/containsprofanity".to_string()
}

fn default_query_param() -> String {
    "text".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

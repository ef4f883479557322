//! App configuration
//!
//! Loaded from a JSON document supplied by the host:
//!
//! ```json
//! {
//!   "news": { "apiKey": "...", "keyword": "agriculture" },
//!   "http": { "timeoutSecs": 30, "maxRetries": 1 },
//!   "logFilter": "info"
//! }
//! ```
//!
//! Only `news.apiKey` is required.

use serde::Deserialize;
use std::time::Duration;

use app_core::news::NewsConfig;
use networking::{HttpClientConfig, RetryPolicy};

use crate::Result;

/// HTTP settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpSettings {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Retries after a transient failure
    pub max_retries: usize,
    /// User agent override
    pub user_agent: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_retries: 1,
            user_agent: None,
        }
    }
}

impl HttpSettings {
    /// Build the HTTP client configuration
    pub fn client_config(&self) -> HttpClientConfig {
        let mut config = HttpClientConfig::default()
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_retry(RetryPolicy::new(self.max_retries));
        if let Some(user_agent) = &self.user_agent {
            config = config.with_user_agent(user_agent.clone());
        }
        config
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// News provider
    pub news: NewsConfig,
    /// HTTP client
    #[serde(default)]
    pub http: HttpSettings,
    /// Log filter directives
    #[serde(default)]
    pub log_filter: Option<String>,
}

impl AppConfig {
    /// Configuration with defaults and the given news API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            news: NewsConfig::new(api_key),
            http: HttpSettings::default(),
            log_filter: None,
        }
    }

    /// Parse a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

//! HTTP client
//!
//! A thin wrapper over `reqwest` that applies a bounded timeout, default
//! headers, and the configured [`RetryPolicy`] to every request.

use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::retry::RetryPolicy;
use crate::{NetworkError, Result};

// =============================================================================
// Client Configuration
// =============================================================================

/// Configuration for [`HttpClient`]
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Custom headers to include in all requests
    pub default_headers: HashMap<String, String>,
    /// Retry policy for transient failures
    pub retry: RetryPolicy,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("PlantDiseaseApp/{}", env!("CARGO_PKG_VERSION")),
            default_headers: HashMap::new(),
            retry: RetryPolicy::default(),
        }
    }
}

impl HttpClientConfig {
    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add a default header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set the retry policy
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// A decoded HTTP response
#[derive(Debug, Clone)]
pub struct HttpResponse<T> {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HashMap<String, String>,
    /// Response data
    pub data: T,
}

impl<T> HttpResponse<T> {
    /// Get a header value
    pub fn header(&self, key: &str) -> Option<&String> {
        self.headers.get(key)
    }

    /// Check if the response is successful (2xx status)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// =============================================================================
// Client
// =============================================================================

/// HTTP client with timeout and retry
///
/// # Examples
/// ```no_run
/// use networking::{HttpClient, HttpClientConfig};
///
/// async fn example() -> Result<(), Box<dyn std::error::Error>> {
///     let client = HttpClient::new(HttpClientConfig::default())?;
///     let body = serde_json::json!({"keyword": "agriculture"});
///     let response = client
///         .post_json::<_, serde_json::Value>("https://example.com/search", &body)
///         .await?;
///     println!("status {}", response.status);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new client
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| NetworkError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// POST a JSON body and decode a JSON response
    ///
    /// Transient failures are retried according to the configured policy.
    /// A non-success status is returned as [`NetworkError::Status`].
    pub async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<HttpResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body)?;
        self.config
            .retry
            .run(|| self.send_post(url, payload.clone()))
            .await
    }

    async fn send_post<T>(&self, url: &str, payload: Vec<u8>) -> Result<HttpResponse<T>>
    where
        T: DeserializeOwned,
    {
        let mut req = self
            .client
            .post(url)
            .header("Content-Type", "application/json");

        for (key, value) in &self.config.default_headers {
            req = req.header(key, value);
        }

        tracing::debug!(url, bytes = payload.len(), "POST");
        let response = req.body(payload).send().await?;
        parse_response(response).await
    }
}

async fn parse_response<T>(response: reqwest::Response) -> Result<HttpResponse<T>>
where
    T: DeserializeOwned,
{
    let status = response.status().as_u16();

    let mut headers = HashMap::new();
    for (key, value) in response.headers() {
        if let Ok(value_str) = value.to_str() {
            headers.insert(key.to_string(), value_str.to_string());
        }
    }

    if !response.status().is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(NetworkError::Status { status, body });
    }

    let body = response.text().await?;
    let data: T = serde_json::from_str(&body).map_err(|e| NetworkError::Decode(e.to_string()))?;

    Ok(HttpResponse {
        status,
        headers,
        data,
    })
}

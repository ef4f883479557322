//! Agriculture news feed
//!
//! This module retrieves the news list shown on the News tab: one article
//! search request per screen visit, parsed into an ordered list of
//! [`Article`]s. [`NewsFeed::fetch_feed`] never fails; any error degrades to
//! an empty list and is logged.

use serde::{Deserialize, Deserializer, Serialize};

use networking::{HttpClient, HttpClientConfig, NetworkError};

/// Default article search endpoint
pub const DEFAULT_ENDPOINT: &str = "https://eventregistry.org/api/v1/article/getArticles";

/// Default search keyword
pub const DEFAULT_KEYWORD: &str = "agriculture";

/// Default number of articles per page
pub const DEFAULT_ARTICLES_COUNT: u32 = 100;

/// Errors that can occur during news operations
#[derive(Debug, thiserror::Error)]
pub enum NewsError {
    /// Network, status, or decoding error
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// The provider reported an error in the response body
    #[error("API error: {0}")]
    Api(String),

    /// The response had no `articles` object
    #[error("Response is missing the articles object")]
    MissingResults,

    /// No API key configured
    #[error("No API key configured for the news provider")]
    MissingApiKey,
}

/// Result type for news operations
pub type Result<T> = std::result::Result<T, NewsError>;

// =============================================================================
// Configuration
// =============================================================================

/// News provider configuration
///
/// The API key is supplied by the host at runtime; it is redacted from
/// `Debug` output.
///
/// ```rust
/// use app_core::news::NewsConfig;
///
/// let config: NewsConfig = serde_json::from_str(r#"{"apiKey": "secret"}"#).unwrap();
/// assert_eq!(config.keyword, "agriculture");
/// assert!(!format!("{:?}", config).contains("secret"));
/// ```
#[derive(Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsConfig {
    /// Article search endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Provider API key
    pub api_key: String,
    /// Keyword used by the News tab
    #[serde(default = "default_keyword")]
    pub keyword: String,
    /// Result page to request
    #[serde(default = "default_page")]
    pub articles_page: u32,
    /// Articles per page
    #[serde(default = "default_count")]
    pub articles_count: u32,
    /// Article body length sent to the provider (0 leaves the body out, -1 sends it whole)
    #[serde(default = "default_body_len")]
    pub article_body_len: i32,
    /// Provider data types
    #[serde(default = "default_data_types")]
    pub data_types: Vec<String>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_keyword() -> String {
    DEFAULT_KEYWORD.to_string()
}

fn default_page() -> u32 {
    1
}

fn default_count() -> u32 {
    DEFAULT_ARTICLES_COUNT
}

fn default_body_len() -> i32 {
    0
}

fn default_data_types() -> Vec<String> {
    vec!["news".to_string()]
}

impl NewsConfig {
    /// Create a configuration with the default endpoint and query shape
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: api_key.into(),
            keyword: default_keyword(),
            articles_page: default_page(),
            articles_count: default_count(),
            article_body_len: default_body_len(),
            data_types: default_data_types(),
        }
    }

    /// Set the endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the default keyword
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into();
        self
    }

    /// Set the number of articles requested
    pub fn with_articles_count(mut self, count: u32) -> Self {
        self.articles_count = count;
        self
    }
}

impl std::fmt::Debug for NewsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .field("keyword", &self.keyword)
            .field("articles_page", &self.articles_page)
            .field("articles_count", &self.articles_count)
            .field("article_body_len", &self.article_body_len)
            .field("data_types", &self.data_types)
            .finish()
    }
}

// =============================================================================
// Wire Types
// =============================================================================

/// Article search request body
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleQuery {
    /// Provider action, always `getArticles`
    pub action: String,
    /// Search keyword
    pub keyword: String,
    /// Result page
    pub articles_page: u32,
    /// Articles per page
    pub articles_count: u32,
    /// Sort field
    pub articles_sort_by: String,
    /// Ascending sort (false means newest first)
    pub articles_sort_by_asc: bool,
    /// Body length
    pub articles_article_body_len: i32,
    /// Result type, always `articles`
    pub result_type: String,
    /// Data types to search
    pub data_type: Vec<String>,
    /// Provider API key
    pub api_key: String,
}

impl ArticleQuery {
    /// Build the request for `keyword`, sorted by date descending
    pub fn new(config: &NewsConfig, keyword: impl Into<String>) -> Self {
        Self {
            action: "getArticles".to_string(),
            keyword: keyword.into(),
            articles_page: config.articles_page,
            articles_count: config.articles_count,
            articles_sort_by: "date".to_string(),
            articles_sort_by_asc: false,
            articles_article_body_len: config.article_body_len,
            result_type: "articles".to_string(),
            data_type: config.data_types.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

impl std::fmt::Debug for ArticleQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArticleQuery")
            .field("keyword", &self.keyword)
            .field("articles_page", &self.articles_page)
            .field("articles_count", &self.articles_count)
            .field("articles_sort_by", &self.articles_sort_by)
            .field("articles_sort_by_asc", &self.articles_sort_by_asc)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// A news article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Headline
    #[serde(default, deserialize_with = "nullable_string")]
    pub title: String,

    /// Summary text
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,

    /// Lead image URL
    #[serde(rename = "image", default, deserialize_with = "nullable_string")]
    pub image_url: String,

    /// Link to the full article
    #[serde(default, deserialize_with = "nullable_string")]
    pub url: String,
}

impl Article {
    /// Whether the article has a lead image
    pub fn has_image(&self) -> bool {
        !self.image_url.is_empty()
    }
}

/// Providers send `null` for missing text fields
fn nullable_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
struct ArticleSearchResponse {
    articles: Option<ArticleResults>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArticleResults {
    results: Option<Vec<serde_json::Value>>,
}

impl ArticleResults {
    /// Decode each result on its own; malformed entries are dropped
    fn into_articles(self) -> Vec<Article> {
        let results = self.results.unwrap_or_default();
        let total = results.len();
        let articles: Vec<Article> = results
            .into_iter()
            .filter_map(|value| serde_json::from_value(value).ok())
            .collect();
        if articles.len() < total {
            tracing::warn!(
                skipped = total - articles.len(),
                "Skipped malformed news articles"
            );
        }
        articles
    }
}

// =============================================================================
// Feed Result
// =============================================================================

/// State of the news list for one screen visit
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedResult {
    /// Articles in provider order
    pub articles: Vec<Article>,
    /// Whether the request is still in flight
    pub loading: bool,
}

impl FeedResult {
    /// Initial state: empty and loading
    pub fn loading() -> Self {
        Self {
            articles: Vec::new(),
            loading: true,
        }
    }

    /// Settled state
    pub fn loaded(articles: Vec<Article>) -> Self {
        Self {
            articles,
            loading: false,
        }
    }

    /// Whether there is nothing to show
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Number of articles
    pub fn len(&self) -> usize {
        self.articles.len()
    }
}

// =============================================================================
// News Feed Service
// =============================================================================

/// Article search service
///
/// # Example
///
/// ```no_run
/// # use app_core::news::{NewsConfig, NewsFeed};
/// # use networking::HttpClientConfig;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let feed = NewsFeed::new(NewsConfig::new("api-key"), HttpClientConfig::default())?;
/// let result = feed.fetch_feed("agriculture").await;
/// for article in &result.articles {
///     println!("{}", article.title);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct NewsFeed {
    client: HttpClient,
    config: NewsConfig,
}

impl NewsFeed {
    /// Create a feed service with its own HTTP client
    pub fn new(config: NewsConfig, http: HttpClientConfig) -> Result<Self> {
        let client = HttpClient::new(http)?;
        Ok(Self { client, config })
    }

    /// Create a feed service on an existing HTTP client
    pub fn with_client(client: HttpClient, config: NewsConfig) -> Self {
        Self { client, config }
    }

    /// Get the configuration
    pub fn config(&self) -> &NewsConfig {
        &self.config
    }

    /// Build the request body for `keyword`
    pub fn query(&self, keyword: &str) -> ArticleQuery {
        ArticleQuery::new(&self.config, keyword)
    }

    /// Search articles, surfacing any failure
    pub async fn search(&self, keyword: &str) -> Result<Vec<Article>> {
        if self.config.api_key.is_empty() {
            return Err(NewsError::MissingApiKey);
        }

        let query = self.query(keyword);
        let response = self
            .client
            .post_json::<_, ArticleSearchResponse>(&self.config.endpoint, &query)
            .await?;

        let body = response.data;
        match body.articles {
            Some(articles) => Ok(articles.into_articles()),
            None => Err(body.error.map(NewsError::Api).unwrap_or(NewsError::MissingResults)),
        }
    }

    /// Fetch the feed for one screen visit
    ///
    /// Always settles with a loaded result; failures yield an empty list.
    pub async fn fetch_feed(&self, keyword: &str) -> FeedResult {
        match self.search(keyword).await {
            Ok(articles) => {
                tracing::info!(keyword, count = articles.len(), "Fetched news articles");
                FeedResult::loaded(articles)
            }
            Err(e) => {
                tracing::error!(keyword, error = %e, "Failed to fetch news articles");
                FeedResult::loaded(Vec::new())
            }
        }
    }

    /// Fetch the feed for the configured keyword
    pub async fn fetch_default_feed(&self) -> FeedResult {
        let keyword = self.config.keyword.clone();
        self.fetch_feed(&keyword).await
    }
}

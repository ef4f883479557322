//! Screen models
//!
//! Each screen exposes the text it shows and the actions its buttons
//! trigger. Actions that move elsewhere return a [`NavigationIntent`]
//! for the shell to follow.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use app_core::diagnostics::{Alert, CaptureOutcome, DiagnosticsCapture};
use app_core::news::{Article, FeedResult, NewsFeed};
use app_platform::ImageAsset;

use crate::navigation::{select_article, NavigationIntent, Route};
use crate::theme::{ThemeContext, ThemeName};

// =============================================================================
// Landing
// =============================================================================

/// Welcome screen
#[derive(Debug, Clone, Copy, Default)]
pub struct LandingScreen;

impl LandingScreen {
    /// Button labels in display order
    pub const BUTTONS: [&'static str; 2] = ["Continue as Guest", "View Data Privacy Policy"];

    /// Enter the app without an account
    pub fn continue_as_guest(&self) -> NavigationIntent {
        Route::Main.into()
    }

    /// Open the privacy policy
    pub fn view_privacy_policy(&self) -> NavigationIntent {
        Route::PrivacyPolicy.into()
    }
}

// =============================================================================
// Static Screens
// =============================================================================

/// Home tab
#[derive(Debug, Clone, Copy, Default)]
pub struct HomeScreen;

impl HomeScreen {
    /// Development notice
    pub fn lines(&self) -> [&'static str; 3] {
        [
            "App is currently in development.",
            "Not all functions may work.",
            "Data model has not been implemented into this project so far.",
        ]
    }
}

/// Privacy policy screen
#[derive(Debug, Clone, Copy, Default)]
pub struct PrivacyPolicyScreen;

impl PrivacyPolicyScreen {
    /// Policy text
    pub fn content(&self) -> &'static str {
        "Data Privacy Policy Content Goes Here."
    }
}

// =============================================================================
// News
// =============================================================================

/// News tab
///
/// Mounting starts one fetch. The result is published only while the
/// screen is still mounted; a fetch that settles after [`NewsScreen::unmount`]
/// is dropped.
pub struct NewsScreen {
    state: watch::Receiver<FeedResult>,
    mounted: Arc<Mutex<bool>>,
    task: Option<JoinHandle<()>>,
}

impl NewsScreen {
    /// Mount the screen and start fetching `keyword`
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(feed: NewsFeed, keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        let (tx, rx) = watch::channel(FeedResult::loading());
        let mounted = Arc::new(Mutex::new(true));

        let guard = mounted.clone();
        let task = tokio::spawn(async move {
            let result = feed.fetch_feed(&keyword).await;

            let mounted = guard.lock();
            if *mounted {
                tx.send_replace(result);
            } else {
                tracing::debug!(keyword, "News screen unmounted, discarding feed result");
            }
        });

        Self {
            state: rx,
            mounted,
            task: Some(task),
        }
    }

    /// Current state
    pub fn state(&self) -> FeedResult {
        self.state.borrow().clone()
    }

    /// Whether the spinner is showing
    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// Wait until the fetch settles and return the state
    ///
    /// Returns the current (still loading) state if the result was discarded.
    pub async fn loaded(&self) -> FeedResult {
        let mut rx = self.state.clone();
        let settled = match rx.wait_for(|state| !state.loading).await {
            Ok(state) => Some(state.clone()),
            Err(_) => None,
        };
        settled.unwrap_or_else(|| self.state())
    }

    /// Open the article at `index`
    pub fn select(&self, index: usize) -> Option<NavigationIntent> {
        self.state
            .borrow()
            .articles
            .get(index)
            .map(|article: &Article| select_article(article.url.clone()))
    }

    /// Whether the screen is still mounted
    pub fn is_mounted(&self) -> bool {
        *self.mounted.lock()
    }

    /// Leave the screen; a pending fetch will not update it
    pub fn unmount(&self) {
        *self.mounted.lock() = false;
    }

    /// Wait for the background fetch to finish
    pub async fn settled(&mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "News fetch task failed");
            }
        }
    }
}

impl Drop for NewsScreen {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl std::fmt::Debug for NewsScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsScreen")
            .field("state", &*self.state.borrow())
            .field("mounted", &self.is_mounted())
            .finish()
    }
}

// =============================================================================
// Diagnostics
// =============================================================================

/// Capture screen
///
/// Failed captures queue an alert until it is dismissed.
#[derive(Debug)]
pub struct DiagnosticsScreen {
    capture: DiagnosticsCapture,
    alerts: VecDeque<Alert>,
    last_image: Option<ImageAsset>,
}

impl DiagnosticsScreen {
    /// Button labels in display order
    pub const BUTTONS: [&'static str; 2] = ["Take Picture", "Upload from Gallery"];

    /// Create the screen
    pub fn new(capture: DiagnosticsCapture) -> Self {
        Self {
            capture,
            alerts: VecDeque::new(),
            last_image: None,
        }
    }

    /// "Take Picture" button
    pub async fn take_picture(&mut self) -> CaptureOutcome {
        let outcome = self.capture.take_picture().await;
        self.record(&outcome);
        outcome
    }

    /// "Upload from Gallery" button
    pub async fn upload_from_gallery(&mut self) -> CaptureOutcome {
        let outcome = self.capture.upload_from_gallery().await;
        self.record(&outcome);
        outcome
    }

    fn record(&mut self, outcome: &CaptureOutcome) {
        match outcome {
            CaptureOutcome::Captured(asset) => self.last_image = Some(asset.clone()),
            CaptureOutcome::Failed(alert) => self.alerts.push_back(alert.clone()),
            CaptureOutcome::Cancelled => {}
        }
    }

    /// Alert currently showing
    pub fn pending_alert(&self) -> Option<&Alert> {
        self.alerts.front()
    }

    /// Dismiss the alert currently showing
    pub fn take_alert(&mut self) -> Option<Alert> {
        self.alerts.pop_front()
    }

    /// Most recently captured image
    pub fn last_image(&self) -> Option<&ImageAsset> {
        self.last_image.as_ref()
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Languages offered by the settings picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    /// English
    #[default]
    English,
    /// Spanish
    Spanish,
    /// French
    French,
}

impl Language {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
        }
    }

    /// All languages in display order
    pub fn all() -> [Language; 3] {
        [Language::English, Language::Spanish, Language::French]
    }
}

/// Settings tab
///
/// Nothing here is persisted.
#[derive(Debug)]
pub struct SettingsScreen {
    theme: ThemeContext,
    location_sharing: bool,
    visual_aid: bool,
    language: Language,
}

impl SettingsScreen {
    /// Create the screen
    pub fn new(theme: ThemeContext) -> Self {
        Self {
            theme,
            location_sharing: false,
            visual_aid: false,
            language: Language::English,
        }
    }

    /// Position of the theme switch (on means dark)
    pub fn is_dark_mode(&self) -> bool {
        self.theme.theme() == ThemeName::Dark
    }

    /// Flip the theme switch
    pub fn toggle_theme(&self) -> ThemeName {
        self.theme.toggle()
    }

    /// Flip location sharing
    pub fn toggle_location_sharing(&mut self) -> bool {
        self.location_sharing = !self.location_sharing;
        self.location_sharing
    }

    /// Whether location sharing is on
    pub fn location_sharing(&self) -> bool {
        self.location_sharing
    }

    /// Flip the visual aid
    pub fn toggle_visual_aid(&mut self) -> bool {
        self.visual_aid = !self.visual_aid;
        self.visual_aid
    }

    /// Whether the visual aid is on
    pub fn visual_aid(&self) -> bool {
        self.visual_aid
    }

    /// Language picker; the selection is not applied
    pub fn select_language(&mut self, language: Language) {
        tracing::info!(
            requested = language.label(),
            "Language selection is not supported yet"
        );
    }

    /// Selected language
    pub fn language(&self) -> Language {
        self.language
    }
}

// =============================================================================
// Article
// =============================================================================

/// Reasons an article URL is not loaded
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArticleError {
    /// The route is not an article
    #[error("Route {0} is not an article")]
    NotAnArticle(&'static str),

    /// The URL does not parse
    #[error("Invalid article URL: {0}")]
    InvalidUrl(String),

    /// Only web pages are loaded
    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
}

/// In-app browser for one article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleScreen {
    article_url: String,
}

impl ArticleScreen {
    /// Build the screen from its route
    pub fn from_route(route: &Route) -> Result<Self, ArticleError> {
        match route {
            Route::Article { article_url } => Ok(Self {
                article_url: article_url.clone(),
            }),
            other => Err(ArticleError::NotAnArticle(other.name())),
        }
    }

    /// URL exactly as received
    pub fn article_url(&self) -> &str {
        &self.article_url
    }

    /// URL to load in the web view, if it is a web page
    pub fn load_target(&self) -> Result<url::Url, ArticleError> {
        let url = url::Url::parse(&self.article_url)
            .map_err(|e| ArticleError::InvalidUrl(e.to_string()))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => {
                tracing::warn!(scheme, "Refusing to load article");
                Err(ArticleError::UnsupportedScheme(scheme.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::ARTICLE_URL_PARAM;
    use crate::theme::ThemeProvider;
    use app_platform::{ColorScheme, SimulatedAppearance};

    #[test]
    fn test_landing_actions() {
        let landing = LandingScreen;
        assert_eq!(landing.continue_as_guest().route, Route::Main);
        assert_eq!(landing.view_privacy_policy().route, Route::PrivacyPolicy);
    }

    #[test]
    fn test_static_content() {
        assert_eq!(HomeScreen.lines()[0], "App is currently in development.");
        assert_eq!(
            PrivacyPolicyScreen.content(),
            "Data Privacy Policy Content Goes Here."
        );
    }

    #[test]
    fn test_settings_toggles() {
        let host = SimulatedAppearance::new(Some(ColorScheme::Light));
        let provider = ThemeProvider::new(&host);
        let mut settings = SettingsScreen::new(provider.context());

        assert!(!settings.is_dark_mode());
        assert_eq!(settings.toggle_theme(), ThemeName::Dark);
        assert!(settings.is_dark_mode());
        assert!(!provider.context().is_automatic());

        assert!(settings.toggle_location_sharing());
        assert!(!settings.toggle_location_sharing());
        assert!(settings.toggle_visual_aid());
        assert!(settings.visual_aid());
        assert!(!settings.location_sharing());
    }

    #[test]
    fn test_language_picker_is_inert() {
        let host = SimulatedAppearance::new(None);
        let provider = ThemeProvider::new(&host);
        let mut settings = SettingsScreen::new(provider.context());

        settings.select_language(Language::French);
        assert_eq!(settings.language(), Language::English);
        assert_eq!(
            Language::all().map(|l| l.label()),
            ["English", "Spanish", "French"]
        );
    }

    #[test]
    fn test_article_screen_from_route() {
        let intent = select_article("https://example.com/a");
        let screen = ArticleScreen::from_route(&intent.route).unwrap();
        assert_eq!(screen.article_url(), intent.params()[ARTICLE_URL_PARAM]);
        assert_eq!(screen.load_target().unwrap().as_str(), "https://example.com/a");

        assert_eq!(
            ArticleScreen::from_route(&Route::Main),
            Err(ArticleError::NotAnArticle("Main"))
        );
    }

    #[test]
    fn test_article_scheme_validation() {
        let load = |url: &str| {
            ArticleScreen::from_route(&select_article(url).route)
                .unwrap()
                .load_target()
        };

        assert!(load("http://example.com/news").is_ok());
        assert_eq!(
            load("javascript:alert(1)"),
            Err(ArticleError::UnsupportedScheme("javascript".to_string()))
        );
        assert!(matches!(
            load("file:///etc/passwd"),
            Err(ArticleError::UnsupportedScheme(_))
        ));
        assert!(matches!(load(""), Err(ArticleError::InvalidUrl(_))));
    }
}

//! Navigation for the Plant Disease app
//!
//! The app is a single stack of destinations starting at [`Route::Landing`].
//! [`Route::Main`] hosts four tabs ([`MainTab`]). Screens never mutate the
//! stack directly; they return a [`NavigationIntent`] which the shell hands
//! to [`NavigationState::navigate`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Route Definitions
// =============================================================================

/// Parameters for a route
pub type RouteParams = HashMap<String, String>;

/// Name of the single parameter carried by [`Route::Article`]
pub const ARTICLE_URL_PARAM: &str = "articleUrl";

/// All destinations in the application
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "route", content = "params")]
pub enum Route {
    /// Welcome screen
    #[default]
    Landing,
    /// Tabbed main area
    Main,
    /// Data privacy policy
    PrivacyPolicy,
    /// Capture screen pushed outside the tabs
    Diagnostics,
    /// In-app browser for a news article
    Article {
        /// Article URL, passed through unchanged
        #[serde(rename = "articleUrl")]
        article_url: String,
    },
    /// Unknown path
    NotFound,
}

impl Route {
    /// Destination name
    pub fn name(&self) -> &'static str {
        match self {
            Route::Landing => "Landing",
            Route::Main => "Main",
            Route::PrivacyPolicy => "PrivacyPolicy",
            Route::Diagnostics => "Diagnostics",
            Route::Article { .. } => "Article",
            Route::NotFound => "NotFound",
        }
    }

    /// Header title
    pub fn title(&self) -> &'static str {
        match self {
            Route::Landing => "Welcome",
            Route::Main => "Plant Disease",
            Route::PrivacyPolicy => "Privacy Policy",
            Route::Diagnostics => "Diagnostics",
            Route::Article { .. } => "Article",
            Route::NotFound => "Not Found",
        }
    }

    /// Whether the stack header is shown
    pub fn header_shown(&self) -> bool {
        !matches!(self, Route::Landing | Route::Main)
    }

    /// Parameters carried by this route
    pub fn params(&self) -> RouteParams {
        let mut params = RouteParams::new();
        if let Route::Article { article_url } = self {
            params.insert(ARTICLE_URL_PARAM.to_string(), article_url.clone());
        }
        params
    }

    /// Path form of the route
    pub fn to_path(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::Main => "/main".to_string(),
            Route::PrivacyPolicy => "/privacy-policy".to_string(),
            Route::Diagnostics => "/diagnostics".to_string(),
            Route::Article { article_url } => {
                format!("/article?url={}", urlencoding::encode(article_url))
            }
            Route::NotFound => "/not-found".to_string(),
        }
    }
}

/// Request to move to a destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationIntent {
    /// Target destination
    pub route: Route,
}

impl NavigationIntent {
    /// Create an intent for `route`
    pub fn new(route: Route) -> Self {
        Self { route }
    }

    /// Destination name
    pub fn name(&self) -> &'static str {
        self.route.name()
    }

    /// Destination parameters
    pub fn params(&self) -> RouteParams {
        self.route.params()
    }
}

impl From<Route> for NavigationIntent {
    fn from(route: Route) -> Self {
        Self::new(route)
    }
}

/// Hand an article URL to the article destination
///
/// The URL is passed through as-is; it is validated when the article
/// screen loads it.
pub fn select_article(url: impl Into<String>) -> NavigationIntent {
    NavigationIntent::new(Route::Article {
        article_url: url.into(),
    })
}

// =============================================================================
// Tabs
// =============================================================================

/// Tabs inside [`Route::Main`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MainTab {
    /// Development notice
    #[default]
    Home,
    /// Photo capture
    Diagnostic,
    /// Settings
    Settings,
    /// Agriculture news
    News,
}

impl MainTab {
    /// Icon name
    pub fn icon(&self) -> &'static str {
        match self {
            MainTab::Home => "home",
            MainTab::Diagnostic => "home",
            MainTab::Settings => "cog",
            MainTab::News => "newspaper",
        }
    }

    /// Tab label
    pub fn label(&self) -> &'static str {
        match self {
            MainTab::Home => "Home",
            MainTab::Diagnostic => "Diagnostic",
            MainTab::Settings => "Settings",
            MainTab::News => "News",
        }
    }

    /// All tabs in display order
    pub fn all() -> [MainTab; 4] {
        [
            MainTab::Home,
            MainTab::Diagnostic,
            MainTab::Settings,
            MainTab::News,
        ]
    }
}

// =============================================================================
// Navigation Stack
// =============================================================================

/// A navigation stack entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackEntry {
    /// The route
    pub route: Route,
    /// Unique key for this entry
    pub key: String,
}

impl StackEntry {
    /// Create a new stack entry
    pub fn new(route: Route) -> Self {
        Self {
            route,
            key: uuid::Uuid::new_v4().to_string(),
        }
    }
}

/// Stack of destinations above a fixed root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationStack {
    root: StackEntry,
    pushed: Vec<StackEntry>,
}

impl NavigationStack {
    /// Create a new navigation stack with a root route
    pub fn new(root: Route) -> Self {
        Self {
            root: StackEntry::new(root),
            pushed: Vec::new(),
        }
    }

    /// Push a route onto the stack
    pub fn push(&mut self, route: Route) {
        self.pushed.push(StackEntry::new(route));
    }

    /// Pop the top route (returns true if popped, false if at root)
    pub fn pop(&mut self) -> bool {
        self.pushed.pop().is_some()
    }

    /// Get the current (top) route
    pub fn current(&self) -> &Route {
        &self.current_entry().route
    }

    /// Get the current stack entry
    pub fn current_entry(&self) -> &StackEntry {
        self.pushed.last().unwrap_or(&self.root)
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        !self.pushed.is_empty()
    }

    /// Get stack depth
    pub fn depth(&self) -> usize {
        self.pushed.len() + 1
    }

    /// Routes from bottom to top
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        std::iter::once(&self.root)
            .chain(self.pushed.iter())
            .map(|entry| &entry.route)
    }
}

// =============================================================================
// Navigation State
// =============================================================================

/// Complete navigation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationState {
    stack: NavigationStack,
    active_tab: MainTab,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self {
            stack: NavigationStack::new(Route::Landing),
            active_tab: MainTab::default(),
        }
    }
}

impl NavigationState {
    /// Create a new navigation state at the landing screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the stack
    pub fn stack(&self) -> &NavigationStack {
        &self.stack
    }

    /// Get the current route
    pub fn current_route(&self) -> &Route {
        self.stack.current()
    }

    /// Selected tab inside [`Route::Main`]
    pub fn active_tab(&self) -> MainTab {
        self.active_tab
    }

    /// The tab on screen, if the main area is showing
    pub fn visible_tab(&self) -> Option<MainTab> {
        (self.current_route() == &Route::Main).then_some(self.active_tab)
    }

    /// Follow a navigation intent
    pub fn navigate(&mut self, intent: NavigationIntent) {
        tracing::debug!(route = intent.name(), "Navigate");
        self.stack.push(intent.route);
    }

    /// Go back; returns false at the root
    pub fn go_back(&mut self) -> bool {
        self.stack.pop()
    }

    /// Switch to a tab
    pub fn switch_tab(&mut self, tab: MainTab) {
        if self.active_tab != tab {
            tracing::debug!(tab = tab.label(), "Switch tab");
            self.active_tab = tab;
        }
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        self.stack.can_go_back()
    }

    /// Reset entire navigation state
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// =============================================================================
// Router
// =============================================================================

/// URL Router for parsing paths to routes
pub struct Router {
    patterns: Vec<(&'static str, fn(RouteParams) -> Option<Route>)>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Create a new router with all routes
    pub fn new() -> Self {
        let mut router = Self {
            patterns: Vec::new(),
        };

        router.add_route("/", |_| Some(Route::Landing));
        router.add_route("/main", |_| Some(Route::Main));
        router.add_route("/privacy-policy", |_| Some(Route::PrivacyPolicy));
        router.add_route("/diagnostics", |_| Some(Route::Diagnostics));
        router.add_route("/article", |params| {
            params.get("url").map(|url| Route::Article {
                article_url: url.clone(),
            })
        });

        router
    }

    fn add_route(&mut self, path: &'static str, builder: fn(RouteParams) -> Option<Route>) {
        self.patterns.push((path, builder));
    }

    /// Match a path to a route
    pub fn match_path(&self, path: &str) -> Route {
        let (pathname, query) = match path.split_once('?') {
            Some((pathname, query)) => (pathname, Some(query)),
            None => (path, None),
        };

        let trimmed = pathname.trim_end_matches('/');
        let pathname = if trimmed.is_empty() { "/" } else { trimmed };

        for (pattern, builder) in &self.patterns {
            if *pattern == pathname {
                if let Some(route) = builder(parse_query(query)) {
                    return route;
                }
            }
        }

        Route::NotFound
    }
}

fn parse_query(query: Option<&str>) -> RouteParams {
    let mut params = RouteParams::new();
    if let Some(query) = query {
        for pair in query.split('&') {
            if let Some((key, value)) = pair.split_once('=') {
                if let Ok(decoded) = urlencoding::decode(value) {
                    params.insert(key.to_string(), decoded.into_owned());
                }
            }
        }
    }
    params
}

// =============================================================================
// Tests
// =============================================================================

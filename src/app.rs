//! Application shell
//!
//! Owns the theme provider and the navigation state, and builds each
//! screen when it becomes visible. The news tab starts a fetch every time
//! it is entered and is unmounted when the user switches away.

use std::sync::Arc;

use app_core::diagnostics::DiagnosticsCapture;
use app_core::news::NewsFeed;
use app_platform::{AppearanceProvider, ImagePicker};
use app_ui::navigation::{MainTab, NavigationIntent, NavigationState, Route};
use app_ui::screens::{
    ArticleError, ArticleScreen, DiagnosticsScreen, HomeScreen, LandingScreen,
    PrivacyPolicyScreen, SettingsScreen,
};
use app_ui::theme::{ThemeContext, ThemeProvider};
use app_ui::NewsScreen;

use crate::config::AppConfig;
use crate::Result;

/// The running app
pub struct App {
    config: AppConfig,
    theme: ThemeProvider,
    navigation: NavigationState,
    feed: NewsFeed,
    diagnostics: DiagnosticsScreen,
    settings: SettingsScreen,
    news: Option<NewsScreen>,
}

impl App {
    /// Start the app at the landing screen
    pub fn new(
        config: AppConfig,
        appearance: &dyn AppearanceProvider,
        picker: Arc<dyn ImagePicker>,
    ) -> Result<Self> {
        let theme = ThemeProvider::new(appearance);
        let feed = NewsFeed::new(config.news.clone(), config.http.client_config())?;
        let settings = SettingsScreen::new(theme.context());
        let diagnostics = DiagnosticsScreen::new(DiagnosticsCapture::new(picker));

        tracing::info!(theme = %theme.context().theme(), "App started");
        Ok(Self {
            config,
            theme,
            navigation: NavigationState::new(),
            feed,
            diagnostics,
            settings,
            news: None,
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Theme handle shared with the screens
    pub fn theme(&self) -> ThemeContext {
        self.theme.context()
    }

    /// Navigation state
    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    /// Route on screen
    pub fn current_route(&self) -> &Route {
        self.navigation.current_route()
    }

    /// Follow an intent returned by a screen
    pub fn navigate(&mut self, intent: NavigationIntent) {
        let entering_main = intent.route == Route::Main;
        self.navigation.navigate(intent);
        if entering_main {
            self.on_tab_visible(self.navigation.active_tab());
        }
    }

    /// Back button; returns false at the landing screen
    pub fn go_back(&mut self) -> bool {
        let left_main = self.current_route() == &Route::Main;
        let popped = self.navigation.go_back();
        if !popped {
            return false;
        }
        // the tab may have changed while another screen was on top
        if self.current_route() == &Route::Main {
            self.on_tab_visible(self.navigation.active_tab());
        } else if left_main {
            self.unmount_news();
        }
        true
    }

    /// Landing "Continue as Guest"
    pub fn continue_as_guest(&mut self) {
        self.navigate(LandingScreen.continue_as_guest());
    }

    /// Landing "View Data Privacy Policy"
    pub fn view_privacy_policy(&mut self) {
        self.navigate(LandingScreen.view_privacy_policy());
    }

    /// Select a tab in the main area
    pub fn switch_tab(&mut self, tab: MainTab) {
        self.navigation.switch_tab(tab);
        if self.navigation.visible_tab().is_some() {
            self.on_tab_visible(tab);
        }
    }

    fn on_tab_visible(&mut self, tab: MainTab) {
        if tab == MainTab::News {
            if self.news.is_none() {
                let keyword = self.config.news.keyword.clone();
                self.news = Some(NewsScreen::mount(self.feed.clone(), keyword));
            }
        } else {
            self.unmount_news();
        }
    }

    fn unmount_news(&mut self) {
        if let Some(news) = self.news.take() {
            news.unmount();
        }
    }

    /// Home tab
    pub fn home(&self) -> HomeScreen {
        HomeScreen
    }

    /// Privacy policy screen
    pub fn privacy_policy(&self) -> PrivacyPolicyScreen {
        PrivacyPolicyScreen
    }

    /// News tab, while mounted
    pub fn news(&self) -> Option<&NewsScreen> {
        self.news.as_ref()
    }

    /// Open the news article at `index` in the in-app browser
    pub fn open_article(
        &mut self,
        index: usize,
    ) -> Option<std::result::Result<ArticleScreen, ArticleError>> {
        let intent = self.news.as_ref()?.select(index)?;
        self.navigate(intent);
        Some(ArticleScreen::from_route(self.current_route()))
    }

    /// Diagnostic tab and the stand-alone diagnostics screen
    pub fn diagnostics(&mut self) -> &mut DiagnosticsScreen {
        &mut self.diagnostics
    }

    /// Settings tab
    pub fn settings(&mut self) -> &mut SettingsScreen {
        &mut self.settings
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("theme", &self.theme)
            .field("navigation", &self.navigation)
            .field("news", &self.news)
            .finish_non_exhaustive()
    }
}

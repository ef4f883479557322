//! User interface for the Plant Disease app
//!
//! This crate provides the UI layer: the theme provider shared by all
//! screens, the navigation model, and the screen models themselves.
//!
//! # Modules
//!
//! - [`theme`] - Theme provider, light and dark palettes
//! - [`navigation`] - Routes, tabs, navigation stack and router
//! - [`screens`] - Application screens
//!
//! # Example
//!
//! ```rust
//! use app_platform::{ColorScheme, SimulatedAppearance};
//! use app_ui::navigation::{NavigationState, Route};
//! use app_ui::screens::LandingScreen;
//! use app_ui::theme::{ThemeName, ThemeProvider};
//!
//! let host = SimulatedAppearance::new(Some(ColorScheme::Light));
//! let provider = ThemeProvider::new(&host);
//! assert_eq!(provider.context().theme(), ThemeName::Light);
//!
//! let mut nav = NavigationState::new();
//! nav.navigate(LandingScreen.continue_as_guest());
//! assert_eq!(nav.current_route(), &Route::Main);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod navigation;
pub mod screens;
pub mod theme;

// Re-export commonly used types
pub use theme::{
    dark_theme, get_theme, light_theme, Theme, ThemeColors, ThemeContext, ThemeListener,
    ThemeName, ThemeProvider, ThemeState,
};

pub use navigation::{
    select_article, MainTab, NavigationIntent, NavigationStack, NavigationState, Route,
    RouteParams, Router, StackEntry,
};

pub use screens::{
    ArticleError, ArticleScreen, DiagnosticsScreen, HomeScreen, LandingScreen, Language,
    NewsScreen, PrivacyPolicyScreen, SettingsScreen,
};

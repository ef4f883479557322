//! Theme provider for the Plant Disease app
//!
//! The app has two themes, light and dark. A [`ThemeProvider`] owns the
//! current theme and keeps it in sync with the system appearance until the
//! user picks a theme by hand; from then on the manual choice wins for the
//! lifetime of the provider.
//!
//! Screens receive a [`ThemeContext`] handle and use it to read the theme,
//! subscribe to changes, or override it.
//!
//! # Usage
//!
//! ```rust
//! use app_platform::{ColorScheme, SimulatedAppearance};
//! use app_ui::theme::{ThemeName, ThemeProvider};
//!
//! let host = SimulatedAppearance::new(Some(ColorScheme::Dark));
//! let provider = ThemeProvider::new(&host);
//! let theme = provider.context();
//!
//! assert_eq!(theme.theme(), ThemeName::Dark);
//! assert_eq!(theme.current_theme().colors.background, "#333333");
//!
//! theme.set_theme_manually(ThemeName::Light);
//! host.set_color_scheme(Some(ColorScheme::Dark));
//! assert_eq!(theme.theme(), ThemeName::Light);
//! ```

use parking_lot::{Mutex, ReentrantMutex};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use app_platform::{AppearanceProvider, ColorScheme, Subscription};

// =============================================================================
// Color Types
// =============================================================================

/// A color represented as a hex string (e.g., "#FFFFFF")
pub type Color = String;

// =============================================================================
// Theme Definition
// =============================================================================

/// Theme name enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    /// Light theme
    #[default]
    Light,
    /// Dark theme
    Dark,
}

impl ThemeName {
    /// The other theme
    pub fn opposite(&self) -> Self {
        match self {
            ThemeName::Light => ThemeName::Dark,
            ThemeName::Dark => ThemeName::Light,
        }
    }

    /// Theme for a system preference; no preference means light
    pub fn from_system(scheme: Option<ColorScheme>) -> Self {
        match scheme {
            Some(ColorScheme::Dark) => ThemeName::Dark,
            Some(ColorScheme::Light) | None => ThemeName::Light,
        }
    }
}

impl std::fmt::Display for ThemeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeName::Light => write!(f, "light"),
            ThemeName::Dark => write!(f, "dark"),
        }
    }
}

impl std::str::FromStr for ThemeName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(ThemeName::Light),
            "dark" => Ok(ThemeName::Dark),
            _ => Err(format!("Unknown theme: {}", s)),
        }
    }
}

/// Colors used by the screens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    /// Screen background
    pub background: Color,
    /// Article card background
    pub card: Color,
    /// Primary text
    pub text: Color,
    /// Secondary text (article descriptions)
    pub secondary_text: Color,
    /// Switch track when off
    pub switch_track_off: Color,
    /// Switch track when on
    pub switch_track_on: Color,
    /// Switch thumb
    pub switch_thumb: Color,
}

/// Complete theme definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Theme name
    pub name: ThemeName,
    /// Colors
    pub colors: ThemeColors,
}

impl Theme {
    /// Check if this is the dark theme
    pub fn is_dark(&self) -> bool {
        self.name == ThemeName::Dark
    }
}

/// Create the light theme
pub fn light_theme() -> Theme {
    Theme {
        name: ThemeName::Light,
        colors: ThemeColors {
            background: "#FFFFFF".to_string(),
            card: "#F0F0F0".to_string(),
            text: "#000000".to_string(),
            secondary_text: "#333333".to_string(),
            switch_track_off: "#767577".to_string(),
            switch_track_on: "#81B0FF".to_string(),
            switch_thumb: "#F5DD4B".to_string(),
        },
    }
}

/// Create the dark theme
pub fn dark_theme() -> Theme {
    Theme {
        name: ThemeName::Dark,
        colors: ThemeColors {
            background: "#333333".to_string(),
            card: "#444444".to_string(),
            text: "#FFFFFF".to_string(),
            secondary_text: "#CCCCCC".to_string(),
            switch_track_off: "#767577".to_string(),
            switch_track_on: "#81B0FF".to_string(),
            switch_thumb: "#F4F3F4".to_string(),
        },
    }
}

/// Get a theme by name
pub fn get_theme(name: ThemeName) -> Theme {
    match name {
        ThemeName::Light => light_theme(),
        ThemeName::Dark => dark_theme(),
    }
}

// =============================================================================
// Theme State
// =============================================================================

/// Theme provider state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeState {
    /// Current theme name
    pub theme_name: ThemeName,
    /// Whether the theme follows the system appearance
    pub is_automatic: bool,
}

impl Default for ThemeState {
    fn default() -> Self {
        Self {
            theme_name: ThemeName::Light,
            is_automatic: true,
        }
    }
}

impl ThemeState {
    /// Automatic state starting from the system preference
    pub fn from_system(scheme: Option<ColorScheme>) -> Self {
        Self {
            theme_name: ThemeName::from_system(scheme),
            is_automatic: true,
        }
    }

    /// Apply a system appearance change; returns false when ignored
    pub fn apply_system(&mut self, scheme: Option<ColorScheme>) -> bool {
        if !self.is_automatic {
            return false;
        }
        self.theme_name = ThemeName::from_system(scheme);
        true
    }

    /// Set the theme by hand and stop following the system
    pub fn set_manual(&mut self, theme_name: ThemeName) {
        self.theme_name = theme_name;
        self.is_automatic = false;
    }
}

// =============================================================================
// Theme Context
// =============================================================================

/// Callback invoked with the new theme
pub type ThemeListener = Arc<dyn Fn(ThemeName) + Send + Sync>;

struct ContextInner {
    // Held from a state change through its notification so listeners see
    // changes in the order they were applied. Reentrant for listeners that
    // set the theme themselves.
    change: ReentrantMutex<()>,
    state: Mutex<ThemeState>,
    listeners: Mutex<Vec<(u64, ThemeListener)>>,
    next_id: AtomicU64,
}

impl ContextInner {
    fn notify(&self, theme_name: ThemeName) {
        let listeners: Vec<ThemeListener> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, l)| l.clone())
            .collect();

        for listener in listeners {
            listener(theme_name);
        }
    }

    fn handle_system_change(&self, scheme: Option<ColorScheme>) {
        let _change = self.change.lock();
        let applied = {
            let mut state = self.state.lock();
            state.apply_system(scheme).then_some(state.theme_name)
        };

        match applied {
            Some(theme_name) => {
                tracing::debug!(%theme_name, "Theme follows system appearance");
                self.notify(theme_name);
            }
            None => tracing::trace!(?scheme, "Ignoring system appearance, theme set manually"),
        }
    }
}

/// Shared handle to the current theme
///
/// Cloning is cheap; all clones observe the same state.
#[derive(Clone)]
pub struct ThemeContext {
    inner: Arc<ContextInner>,
}

impl ThemeContext {
    fn new(state: ThemeState) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                change: ReentrantMutex::new(()),
                state: Mutex::new(state),
                listeners: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Current theme name
    pub fn theme(&self) -> ThemeName {
        self.inner.state.lock().theme_name
    }

    /// Snapshot of the provider state
    pub fn state(&self) -> ThemeState {
        *self.inner.state.lock()
    }

    /// Whether the theme still follows the system appearance
    pub fn is_automatic(&self) -> bool {
        self.inner.state.lock().is_automatic
    }

    /// Resolved colors for the current theme
    pub fn current_theme(&self) -> Theme {
        get_theme(self.theme())
    }

    /// Override the theme; system changes are ignored from now on
    pub fn set_theme_manually(&self, theme_name: ThemeName) {
        let _change = self.inner.change.lock();
        self.inner.state.lock().set_manual(theme_name);
        tracing::info!(%theme_name, "Theme set manually");
        self.inner.notify(theme_name);
    }

    /// Switch to the other theme, returning the new one
    pub fn toggle(&self) -> ThemeName {
        let next = self.theme().opposite();
        self.set_theme_manually(next);
        next
    }

    /// Register a listener for theme changes
    ///
    /// Listeners are called synchronously, outside the state lock.
    pub fn subscribe(&self, listener: impl Fn(ThemeName) + Send + Sync + 'static) -> Subscription {
        let listener: ThemeListener = Arc::new(listener);
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners.lock().push((id, listener));

        let weak = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.listeners.lock().retain(|(lid, _)| *lid != id);
            }
        })
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.lock().len()
    }
}

impl std::fmt::Debug for ThemeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeContext")
            .field("state", &self.state())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

// =============================================================================
// Theme Provider
// =============================================================================

/// Owner of the theme state and the system appearance subscription
///
/// The system listener is registered once on creation and removed when the
/// provider is dropped.
pub struct ThemeProvider {
    context: ThemeContext,
    system_subscription: Subscription,
}

impl ThemeProvider {
    /// Create a provider seeded from the host's current appearance
    pub fn new(host: &dyn AppearanceProvider) -> Self {
        let initial = host.color_scheme();
        let context = ThemeContext::new(ThemeState::from_system(initial));

        let weak: Weak<ContextInner> = Arc::downgrade(&context.inner);
        let system_subscription = host.add_change_listener(Arc::new(move |scheme| {
            if let Some(inner) = weak.upgrade() {
                inner.handle_system_change(scheme);
            }
        }));

        tracing::debug!(?initial, theme = %context.theme(), "Theme provider created");
        Self {
            context,
            system_subscription,
        }
    }

    /// Handle passed to screens
    pub fn context(&self) -> ThemeContext {
        self.context.clone()
    }
}

impl Drop for ThemeProvider {
    fn drop(&mut self) {
        self.system_subscription.remove();
        tracing::debug!("Theme provider dropped");
    }
}

impl std::fmt::Debug for ThemeProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeProvider")
            .field("context", &self.context)
            .field("subscribed", &self.system_subscription.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_platform::SimulatedAppearance;
    use std::sync::atomic::AtomicUsize;

    fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }

    // ==========================================================================
    // Theme Definition Tests
    // ==========================================================================

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FFFFFF"), Some((255, 255, 255)));
        assert_eq!(parse_hex_color("81B0FF"), Some((129, 176, 255)));
        assert_eq!(parse_hex_color("#FF"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
    }

    #[test]
    fn test_theme_name_parse_and_display() {
        assert_eq!("DARK".parse::<ThemeName>().unwrap(), ThemeName::Dark);
        assert!("dim".parse::<ThemeName>().is_err());
        assert_eq!(ThemeName::Light.to_string(), "light");
        assert_eq!(ThemeName::Dark.opposite(), ThemeName::Light);
    }

    #[test]
    fn test_theme_name_from_system() {
        assert_eq!(ThemeName::from_system(Some(ColorScheme::Dark)), ThemeName::Dark);
        assert_eq!(ThemeName::from_system(Some(ColorScheme::Light)), ThemeName::Light);
        assert_eq!(ThemeName::from_system(None), ThemeName::Light);
    }

    #[test]
    fn test_palettes() {
        let light = light_theme();
        let dark = dark_theme();
        assert!(!light.is_dark());
        assert!(dark.is_dark());
        assert_eq!(light.colors.card, "#F0F0F0");
        assert_eq!(dark.colors.secondary_text, "#CCCCCC");

        for theme in [light, dark] {
            let c = &theme.colors;
            for color in [
                &c.background,
                &c.card,
                &c.text,
                &c.secondary_text,
                &c.switch_track_off,
                &c.switch_track_on,
                &c.switch_thumb,
            ] {
                assert!(parse_hex_color(color).is_some(), "bad color {color}");
            }
        }
    }

    #[test]
    fn test_theme_state_transitions() {
        let mut state = ThemeState::from_system(Some(ColorScheme::Light));
        assert!(state.is_automatic);

        assert!(state.apply_system(Some(ColorScheme::Dark)));
        assert_eq!(state.theme_name, ThemeName::Dark);

        state.set_manual(ThemeName::Light);
        assert!(!state.is_automatic);
        assert!(!state.apply_system(Some(ColorScheme::Dark)));
        assert_eq!(state.theme_name, ThemeName::Light);
    }

    // ==========================================================================
    // Provider Tests
    // ==========================================================================

    #[test]
    fn test_initial_theme_from_host() {
        let host = SimulatedAppearance::new(Some(ColorScheme::Dark));
        let provider = ThemeProvider::new(&host);
        assert_eq!(provider.context().theme(), ThemeName::Dark);
        assert!(provider.context().is_automatic());

        let host = SimulatedAppearance::new(None);
        let provider = ThemeProvider::new(&host);
        assert_eq!(provider.context().theme(), ThemeName::Light);
    }

    #[test]
    fn test_follows_system_while_automatic() {
        let host = SimulatedAppearance::new(Some(ColorScheme::Light));
        let provider = ThemeProvider::new(&host);
        let theme = provider.context();

        host.set_color_scheme(Some(ColorScheme::Dark));
        assert_eq!(theme.theme(), ThemeName::Dark);

        host.set_color_scheme(None);
        assert_eq!(theme.theme(), ThemeName::Light);
    }

    #[test]
    fn test_manual_choice_wins() {
        let host = SimulatedAppearance::new(Some(ColorScheme::Light));
        let provider = ThemeProvider::new(&host);
        let theme = provider.context();

        theme.set_theme_manually(ThemeName::Dark);
        assert!(!theme.is_automatic());

        host.set_color_scheme(Some(ColorScheme::Light));
        assert_eq!(theme.theme(), ThemeName::Dark);
        assert!(!theme.is_automatic());

        theme.set_theme_manually(ThemeName::Light);
        assert!(!theme.is_automatic());
    }

    #[test]
    fn test_toggle() {
        let host = SimulatedAppearance::new(Some(ColorScheme::Light));
        let provider = ThemeProvider::new(&host);
        let theme = provider.context();

        assert_eq!(theme.toggle(), ThemeName::Dark);
        assert_eq!(theme.current_theme(), dark_theme());
        assert_eq!(theme.toggle(), ThemeName::Light);
        assert!(!theme.is_automatic());
    }

    #[test]
    fn test_subscribers_notified() {
        let host = SimulatedAppearance::new(Some(ColorScheme::Light));
        let provider = ThemeProvider::new(&host);
        let theme = provider.context();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let sub = theme.subscribe(move |name| sink.lock().push(name));

        host.set_color_scheme(Some(ColorScheme::Dark));
        theme.set_theme_manually(ThemeName::Light);
        host.set_color_scheme(Some(ColorScheme::Dark));

        assert_eq!(*seen.lock(), vec![ThemeName::Dark, ThemeName::Light]);

        sub.remove();
        sub.remove();
        theme.set_theme_manually(ThemeName::Dark);
        assert_eq!(seen.lock().len(), 2);
        assert_eq!(theme.listener_count(), 0);
    }

    #[test]
    fn test_listener_may_reenter() {
        let host = SimulatedAppearance::new(Some(ColorScheme::Light));
        let provider = ThemeProvider::new(&host);
        let theme = provider.context();

        let reader = theme.clone();
        let observed = Arc::new(Mutex::new(None));
        let sink = observed.clone();
        let _sub = theme.subscribe(move |_| {
            *sink.lock() = Some(reader.state());
        });

        theme.set_theme_manually(ThemeName::Dark);
        assert_eq!(
            *observed.lock(),
            Some(ThemeState {
                theme_name: ThemeName::Dark,
                is_automatic: false
            })
        );
    }

    #[test]
    fn test_last_notification_matches_final_theme() {
        for _ in 0..200 {
            let host = SimulatedAppearance::new(Some(ColorScheme::Light));
            let provider = ThemeProvider::new(&host);
            let theme = provider.context();

            let last = Arc::new(Mutex::new(None));
            let sink = last.clone();
            let _sub = theme.subscribe(move |name| *sink.lock() = Some(name));

            std::thread::scope(|scope| {
                scope.spawn(|| host.set_color_scheme(Some(ColorScheme::Dark)));
                scope.spawn(|| theme.set_theme_manually(ThemeName::Light));
            });

            assert_eq!(theme.theme(), ThemeName::Light);
            assert_eq!(*last.lock(), Some(theme.theme()));
        }
    }

    #[test]
    fn test_listener_may_set_theme() {
        let host = SimulatedAppearance::new(Some(ColorScheme::Light));
        let provider = ThemeProvider::new(&host);
        let theme = provider.context();

        let writer = theme.clone();
        let _sub = theme.subscribe(move |name| {
            if name == ThemeName::Dark {
                writer.set_theme_manually(ThemeName::Light);
            }
        });

        host.set_color_scheme(Some(ColorScheme::Dark));
        assert_eq!(theme.theme(), ThemeName::Light);
        assert!(!theme.is_automatic());
    }

    #[test]
    fn test_drop_removes_system_listener_once() {
        struct CountingHost {
            inner: SimulatedAppearance,
            removals: Arc<AtomicUsize>,
        }

        impl AppearanceProvider for CountingHost {
            fn color_scheme(&self) -> Option<ColorScheme> {
                self.inner.color_scheme()
            }

            fn add_change_listener(
                &self,
                listener: app_platform::AppearanceListener,
            ) -> Subscription {
                let inner = self.inner.add_change_listener(listener);
                let removals = self.removals.clone();
                Subscription::new(move || {
                    inner.remove();
                    removals.fetch_add(1, Ordering::SeqCst);
                })
            }
        }

        let host = CountingHost {
            inner: SimulatedAppearance::new(None),
            removals: Arc::new(AtomicUsize::new(0)),
        };

        let first = ThemeProvider::new(&host);
        assert_eq!(host.inner.listener_count(), 1);
        drop(first);
        assert_eq!(host.inner.listener_count(), 0);
        assert_eq!(host.removals.load(Ordering::SeqCst), 1);

        let second = ThemeProvider::new(&host);
        assert_eq!(host.inner.listener_count(), 1);
        drop(second);
        assert_eq!(host.removals.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_context_outlives_provider() {
        let host = SimulatedAppearance::new(Some(ColorScheme::Light));
        let provider = ThemeProvider::new(&host);
        let theme = provider.context();
        drop(provider);

        host.set_color_scheme(Some(ColorScheme::Dark));
        assert_eq!(theme.theme(), ThemeName::Light);
        assert_eq!(host.listener_count(), 0);
    }
}

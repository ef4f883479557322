//! System appearance (light/dark color scheme)
//!
//! The operating system reports a preferred color scheme and pushes a
//! notification whenever the user changes it. [`AppearanceProvider`] models
//! both as a query plus a listener registration returning a
//! [`Subscription`].

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Weak};

use crate::subscription::Subscription;

/// Color scheme reported by the operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Light appearance
    Light,
    /// Dark appearance
    Dark,
}

impl std::fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorScheme::Light => write!(f, "light"),
            ColorScheme::Dark => write!(f, "dark"),
        }
    }
}

/// Callback invoked with the new scheme; `None` means the OS has no preference
pub type AppearanceListener = Arc<dyn Fn(Option<ColorScheme>) + Send + Sync>;

/// Host appearance capability
pub trait AppearanceProvider: Send + Sync {
    /// Current system preference, if the OS reports one
    fn color_scheme(&self) -> Option<ColorScheme>;

    /// Register a listener for appearance changes
    ///
    /// The listener is called on every change until the returned
    /// subscription is removed or dropped.
    fn add_change_listener(&self, listener: AppearanceListener) -> Subscription;
}

#[derive(Default)]
struct SimulatedState {
    scheme: Option<ColorScheme>,
    listeners: Vec<(u64, AppearanceListener)>,
    next_id: u64,
}

/// In-process appearance host
///
/// Used on hosts without a native appearance API and in tests. Changing the
/// scheme with [`SimulatedAppearance::set_color_scheme`] notifies every
/// registered listener, the way the OS would.
///
/// # Example
///
/// ```rust
/// use app_platform::{AppearanceProvider, ColorScheme, SimulatedAppearance};
/// use std::sync::Arc;
///
/// let host = SimulatedAppearance::new(Some(ColorScheme::Light));
/// let sub = host.add_change_listener(Arc::new(|scheme| {
///     println!("appearance is now {:?}", scheme);
/// }));
/// host.set_color_scheme(Some(ColorScheme::Dark));
/// assert_eq!(host.listener_count(), 1);
/// drop(sub);
/// assert_eq!(host.listener_count(), 0);
/// ```
#[derive(Clone, Default)]
pub struct SimulatedAppearance {
    state: Arc<Mutex<SimulatedState>>,
}

impl SimulatedAppearance {
    /// Create a host reporting the given preference
    pub fn new(scheme: Option<ColorScheme>) -> Self {
        Self {
            state: Arc::new(Mutex::new(SimulatedState {
                scheme,
                ..Default::default()
            })),
        }
    }

    /// Change the system scheme and notify listeners
    pub fn set_color_scheme(&self, scheme: Option<ColorScheme>) {
        let listeners: Vec<AppearanceListener> = {
            let mut state = self.state.lock();
            state.scheme = scheme;
            state.listeners.iter().map(|(_, l)| l.clone()).collect()
        };

        tracing::debug!(?scheme, listeners = listeners.len(), "system appearance changed");
        for listener in listeners {
            listener(scheme);
        }
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.state.lock().listeners.len()
    }
}

impl AppearanceProvider for SimulatedAppearance {
    fn color_scheme(&self) -> Option<ColorScheme> {
        self.state.lock().scheme
    }

    fn add_change_listener(&self, listener: AppearanceListener) -> Subscription {
        let id = {
            let mut state = self.state.lock();
            let id = state.next_id;
            state.next_id += 1;
            state.listeners.push((id, listener));
            id
        };

        let weak: Weak<Mutex<SimulatedState>> = Arc::downgrade(&self.state);
        Subscription::new(move || {
            if let Some(state) = weak.upgrade() {
                state.lock().listeners.retain(|(lid, _)| *lid != id);
            }
        })
    }
}

impl std::fmt::Debug for SimulatedAppearance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("SimulatedAppearance")
            .field("scheme", &state.scheme)
            .field("listeners", &state.listeners.len())
            .finish()
    }
}

//! Plant Disease app shell
//!
//! Wires the theme provider, navigation, news feed and capture screens
//! into a single [`App`]. Hosts construct it from an [`AppConfig`] plus
//! their appearance and image picker capabilities.
//!
//! # Example
//!
//! ```no_run
//! use plant_disease_app::{App, AppConfig};
//! use app_platform::{ImagePicker, SimulatedAppearance};
//! use std::sync::Arc;
//!
//! # fn example(picker: Arc<dyn ImagePicker>) -> Result<(), plant_disease_app::AppError> {
//! plant_disease_app::logging::init(None)?;
//! let config = AppConfig::from_json(r#"{"news": {"apiKey": "..."}}"#)?;
//! let appearance = SimulatedAppearance::new(None);
//! let mut app = App::new(config, &appearance, picker)?;
//! app.continue_as_guest();
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app;
pub mod config;
pub mod logging;

pub use app::App;
pub use config::{AppConfig, HttpSettings};

/// Errors raised while starting the app
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// News feed could not be created
    #[error("News error: {0}")]
    News(#[from] app_core::news::NewsError),

    /// Logging could not be initialised
    #[error("Logging error: {0}")]
    Logging(String),
}

/// Result type for app operations
pub type Result<T> = std::result::Result<T, AppError>;

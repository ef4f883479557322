//! Log output

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{AppError, Result};

/// Filter used when the host passes none
pub const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber
///
/// `filter` uses `tracing_subscriber` directive syntax, e.g.
/// `"info,networking=debug"`. Fails if the directives do not parse or a
/// subscriber is already installed.
pub fn init(filter: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_new(filter.unwrap_or(DEFAULT_FILTER))
        .map_err(|e| AppError::Logging(e.to_string()))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}

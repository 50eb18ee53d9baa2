//! Structured logging setup for the service lessons.

use std::str::FromStr;

use tracing::{Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::config::AppConfig;

/// Unknown level names fall back to `info`.
pub fn parse_level(name: &str) -> Level {
    Level::from_str(name.trim()).unwrap_or(Level::INFO)
}

/// `RUST_LOG` when set, otherwise the configured level.
pub fn filter(app: &AppConfig) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(parse_level(&app.log_level)).into())
        .from_env_lossy()
}

/// Compact console output in development, JSON lines everywhere else.
pub fn subscriber(app: &AppConfig) -> Box<dyn Subscriber + Send + Sync> {
    let registry = tracing_subscriber::registry().with(filter(app));
    if app.is_development() {
        Box::new(registry.with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        ))
    } else {
        Box::new(registry.with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .json()
                .with_current_span(true),
        ))
    }
}

/// Installs [`subscriber`] globally. Fails if a subscriber is already set.
pub fn init(app: &AppConfig) -> Result<(), TryInitError> {
    subscriber(app).try_init()
}

/// Lesson programs call this; a second initialisation is not an error.
pub fn init_for_lesson(app: &AppConfig) {
    if init(app).is_err() {
        tracing::debug!("subscriber already installed");
    }
}

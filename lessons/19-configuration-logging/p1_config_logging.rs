//! Lesson 19: Configuration and structured logging
//!
//! Configuration comes from defaults, then `config.toml` (in `.` or
//! `./config`), then `APP_*` environment variables. Logging is tracing:
//! compact lines in development, JSON elsewhere.
//!
//! Run with: cargo run --bin lesson_19_config_logging
//! Try:      APP_APP_ENVIRONMENT=production APP_APP_LOG_LEVEL=debug cargo run --bin lesson_19_config_logging

use std::sync::Arc;

use anyhow::Context;
use lesson_course::api::{logging, App, BoxError, Config, Hook};
use lesson_course::{banner, key_points, section};
use tracing::{debug, error, info, info_span, warn};

fn demonstrate_logging(config: &Config) {
    debug!("debug message (hidden unless the level allows it)");
    info!("info message");
    warn!("warning message");

    info!(user = "alice", age = 30, "user logged in");

    let err = std::io::Error::new(std::io::ErrorKind::TimedOut, "sample error");
    error!(error = %err, operation = "database_query", "operation failed");

    let span = info_span!("request", method = "GET", path = "/api/users");
    span.in_scope(|| info!(status = 200, "request processed"));

    info!(app = %config.app.name, env = %config.app.environment, "context fields");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    banner("Configuration and Logging");

    section("Loaded configuration");
    let config = Config::load().context("loading configuration")?;
    println!("{}", toml::to_string_pretty(&config)?);

    logging::init(&config.app).context("installing the tracing subscriber")?;

    section("Lifecycle with logging");
    let config = Arc::new(config);
    let mut app = App::new();
    let on_start = config.clone();
    app.append(
        Hook::new("application")
            .on_start(move || async move {
                info!(port = on_start.server.port, "application starting");
                demonstrate_logging(&on_start);
                Ok::<(), BoxError>(())
            })
            .on_stop(|| async {
                info!("application stopping");
                Ok::<(), BoxError>(())
            }),
    );
    app.run(async {}).await?;

    key_points(&[
        "Layer configuration: defaults, then file, then environment",
        "Reject malformed values at startup instead of guessing",
        "Log with fields, not string formatting, so output stays queryable",
        "RUST_LOG overrides the configured level for quick debugging",
    ]);
    Ok(())
}

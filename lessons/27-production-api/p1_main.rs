//! Lesson 27: Production API service
//!
//! Everything from the previous lessons put together: layered config,
//! structured logging, SQLite with migrations, the users API behind the
//! middleware stack, and lifecycle hooks with graceful shutdown.
//!
//! Run with: cargo run --bin lesson_27_production_api
//! Configure with config.toml or APP_* variables, e.g.
//!   APP_SERVER_PORT=9000 APP_DATABASE_PATH=/tmp/api.db cargo run --bin lesson_27_production_api

use anyhow::Context;
use lesson_course::api::{build_service, logging, server::shutdown_signal, BoundAddr, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;
    logging::init(&config.app).context("installing the tracing subscriber")?;
    tracing::info!(
        app = %config.app.name,
        environment = %config.app.environment,
        "starting"
    );

    let app = build_service(&config).await?;
    let addr = app.resolve::<BoundAddr>()?;
    tracing::info!(addr = %addr.0, "users API at http://{}/api/users", addr.0);

    app.run(shutdown_signal()).await?;
    tracing::info!("stopped");
    Ok(())
}

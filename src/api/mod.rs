//! Building blocks of the HTTP service lessons.
//!
//! Lessons 13 to 36 grow one users API step by step. The pieces live here
//! so every stage, and the tests, share one implementation:
//!
//! - [`config`]: defaults, `config.toml`, `APP_*` environment overrides
//! - [`logging`]: tracing subscriber setup
//! - [`models`] and [`validate`]: request and record types
//! - [`repository`]: in-memory and SQLite storage
//! - [`handlers`] and [`middleware`]: the request path
//! - [`lifecycle`]: start/stop hooks around explicitly wired components
//! - [`server`]: the hyper accept loop with graceful shutdown
//! - [`client`]: a typed reqwest client for the same endpoints

pub mod client;
pub mod config;
pub mod handlers;
pub mod lifecycle;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod server;
pub mod validate;

use std::sync::Arc;

pub use client::{ClientError, UserClient};
pub use config::Config;
pub use handlers::AppState;
pub use lifecycle::{App, BoxError, Hook, LifecycleError};
pub use repository::{InMemoryUserRepository, RepoError, SqliteUserRepository, UserRepository};
pub use server::{BoundAddr, RunningServer, Server};

/// Wires the production service: SQLite repository, request state, and an
/// HTTP hook that serves until the app stops.
pub async fn build_service(config: &Config) -> anyhow::Result<App> {
    use anyhow::Context;
    use tokio::sync::Mutex;

    let mut app = App::new();

    let repo = SqliteUserRepository::open(&config.database.path)
        .with_context(|| format!("opening database {}", config.database.path))?;
    let repo = app.provide(repo);
    let version = repo.schema_version()?;
    tracing::info!(path = %config.database.path, schema_version = version, "database ready");

    let users: Arc<dyn UserRepository> = repo;
    let state = AppState::from_config(users, config);
    app.provide(state.clone());

    let addr = config.server.addr()?;
    let server = Server::bind(addr, state.clone())
        .await
        .with_context(|| format!("binding {}", addr))?
        .with_shutdown_timeout(config.server.shutdown_timeout());
    app.provide(BoundAddr(server.local_addr()?));

    let running: Arc<Mutex<Option<RunningServer>>> = Arc::default();
    let started = running.clone();

    app.append(
        Hook::new("http")
            .on_start(move || async move {
                let handle = server.spawn()?;
                tracing::info!(addr = %handle.addr(), "http server started");
                *started.lock().await = Some(handle);
                Ok::<(), BoxError>(())
            })
            .on_stop(move || async move {
                if let Some(handle) = running.lock().await.take() {
                    tracing::info!("stopping http server");
                    handle.stop().await?;
                }
                Ok::<(), BoxError>(())
            }),
    );

    Ok(app)
}

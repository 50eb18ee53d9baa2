//! Lesson 16: Structuring an API
//!
//! The users API split into layers, each built from the one below:
//!
//!   config -> repository -> handler state -> server
//!
//! The code for each layer lives in its own module under
//! `lesson_course::api`; this program only wires them together.
//!
//! Run with: cargo run --bin lesson_16_structured_api

use std::sync::Arc;

use lesson_course::api::{
    App, AppState, BoundAddr, BoxError, Config, Hook, InMemoryUserRepository, LifecycleError,
    Server, UserRepository,
};
use lesson_course::{banner, key_points, section};

type SharedUsers = Arc<dyn UserRepository>;

fn provide_layers(app: &mut App, config: Config) -> Result<(), LifecycleError> {
    app.provide(config);
    app.provide_with(|_| {
        println!("  building repository");
        let users: SharedUsers = Arc::new(InMemoryUserRepository::seeded());
        Ok(users)
    })?;
    app.provide_with(|app| {
        println!("  building handler state");
        let config = app.resolve::<Config>()?;
        let users = app.resolve::<SharedUsers>()?;
        Ok(AppState::from_config(users.as_ref().clone(), &config))
    })?;
    Ok(())
}

async fn provide_server(app: &mut App) -> Result<(), BoxError> {
    let config = app.resolve::<Config>()?;
    let state = app.resolve::<AppState>()?;
    println!("  binding server");
    let server = Server::bind(config.server.addr()?, state.as_ref().clone())
        .await?
        .with_shutdown_timeout(config.server.shutdown_timeout());
    app.provide(BoundAddr(server.local_addr()?));

    let running = Arc::new(tokio::sync::Mutex::new(None));
    let started = running.clone();
    app.append(
        Hook::new("http")
            .on_start(move || async move {
                *started.lock().await = Some(server.spawn()?);
                Ok::<(), BoxError>(())
            })
            .on_stop(move || async move {
                if let Some(handle) = running.lock().await.take() {
                    handle.stop().await?;
                }
                Ok::<(), BoxError>(())
            }),
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    banner("Structured API");

    section("Wiring");
    let mut app = App::new();
    provide_layers(&mut app, Config::default())?;
    provide_server(&mut app).await?;

    let addr = app.resolve::<BoundAddr>()?;
    println!("\nServing on http://{}/api/users (Ctrl+C to stop)", addr.0);

    key_points(&[
        "config, models, repository, handlers and server are separate modules",
        "Each layer depends only on the layers below it",
        "Handlers see the repository through a trait object",
        "main does nothing but wire the layers and run",
    ]);

    app.run(lesson_course::api::server::shutdown_signal()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_layers_resolve_and_serve() {
        let mut config = Config::default();
        config.server.port = 0;

        let mut app = App::new();
        provide_layers(&mut app, config).unwrap();
        provide_server(&mut app).await.unwrap();
        assert_eq!(app.resolve::<SharedUsers>().unwrap().list().unwrap().len(), 2);

        let addr = app.resolve::<BoundAddr>().unwrap().0;
        app.start().await.unwrap();
        let response = reqwest::get(format!("http://{}/api/users/1", addr)).await.unwrap();
        assert_eq!(response.status(), 200);
        app.stop().await.unwrap();
    }
}

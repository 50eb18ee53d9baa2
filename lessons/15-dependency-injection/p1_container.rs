//! Lesson 15: Dependency injection and lifecycles
//!
//! Components are built explicitly, each receiving what it depends on, and
//! registered in an `App`. Start hooks run in order; stop hooks run in
//! reverse when the app shuts down.
//!
//! Run with: cargo run --bin lesson_15_dependency_injection

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use lesson_course::api::{
    App, AppState, BoxError, Hook, InMemoryUserRepository, LifecycleError, Server,
};
use lesson_course::{banner, key_points};

/// A tiny prefix logger, injected into everything below.
struct Logger {
    prefix: &'static str,
}

impl Logger {
    fn info(&self, msg: &str) {
        println!("{} INFO: {}", self.prefix, msg);
    }
}

struct Database {
    url: String,
    logger: Arc<Logger>,
}

impl Database {
    fn query(&self, sql: &str) {
        self.logger.info(&format!("Executing query: {}", sql));
    }
}

struct UserService {
    db: Arc<Database>,
    logger: Arc<Logger>,
}

impl UserService {
    fn get_user(&self, id: i64) {
        self.logger.info(&format!("Getting user {}", id));
        self.db.query(&format!("SELECT * FROM users WHERE id = {}", id));
    }
}

fn new_database(app: &mut App) -> Result<Arc<Database>, LifecycleError> {
    let logger = app.resolve::<Logger>()?;
    logger.info("Creating database connection");
    let db = app.provide(Database {
        url: "sqlite://tutorial.db".to_string(),
        logger: logger.clone(),
    });

    let start_db = db.clone();
    let stop_logger = logger.clone();
    app.append(
        Hook::new("database")
            .on_start(move || async move {
                start_db.logger.info(&format!("Connecting to {}", start_db.url));
                tokio::time::sleep(Duration::from_millis(100)).await;
                start_db.logger.info("Database connected");
                Ok::<(), BoxError>(())
            })
            .on_stop(move || async move {
                stop_logger.info("Closing database connection");
                Ok::<(), BoxError>(())
            }),
    );
    Ok(db)
}

async fn new_server(app: &mut App, addr: SocketAddr) -> Result<(), BoxError> {
    let logger = app.resolve::<Logger>()?;
    logger.info("Creating HTTP server");
    let state = AppState::new(Arc::new(InMemoryUserRepository::seeded()));
    let server = Server::bind(addr, state).await?;

    let running = Arc::new(tokio::sync::Mutex::new(None));
    let started = running.clone();
    let start_logger = logger.clone();
    app.append(
        Hook::new("http")
            .on_start(move || async move {
                let handle = server.spawn()?;
                start_logger.info(&format!("HTTP server listening on {}", handle.addr()));
                *started.lock().await = Some(handle);
                Ok::<(), BoxError>(())
            })
            .on_stop(move || async move {
                logger.info("Stopping HTTP server");
                if let Some(handle) = running.lock().await.take() {
                    handle.stop().await?;
                }
                Ok::<(), BoxError>(())
            }),
    );
    Ok(())
}

fn wire(app: &mut App) -> Result<Arc<UserService>, LifecycleError> {
    app.provide(Logger { prefix: "[APP]" });
    new_database(app)?;
    app.provide_with(|app| {
        let logger = app.resolve::<Logger>()?;
        logger.info("Creating UserService");
        Ok(UserService {
            db: app.resolve::<Database>()?,
            logger,
        })
    })
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    banner("Dependency Injection");

    let mut app = App::new();
    let users = wire(&mut app)?;
    new_server(&mut app, ([127, 0, 0, 1], 8080).into()).await?;
    println!("Hooks in start order: {:?}\n", app.hook_names());

    app.start().await?;
    let logger = app.resolve::<Logger>()?;
    logger.info("All dependencies injected and ready");
    users.get_user(1);
    logger.info("Visit http://127.0.0.1:8080 and press Ctrl+C to stop");

    lesson_course::api::server::shutdown_signal().await;
    app.stop().await?;

    key_points(&[
        "Constructors take their dependencies as arguments",
        "The container owns shared components behind Arc",
        "Lifecycle hooks start in order and stop in reverse",
        "Wiring stays explicit and is checked by the compiler",
    ]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_wiring_shares_components() {
        let mut app = App::new();
        let users = wire(&mut app).unwrap();
        let db = app.resolve::<Database>().unwrap();
        assert!(Arc::ptr_eq(&users.db, &db));
        assert_eq!(app.hook_names(), vec!["database"]);
    }

    #[tokio::test]
    async fn test_server_hook_starts_and_stops() {
        let mut app = App::new();
        wire(&mut app).unwrap();
        new_server(&mut app, ([127, 0, 0, 1], 0).into()).await.unwrap();
        app.start().await.unwrap();
        app.stop().await.unwrap();
    }
}

//! Lesson 36: Production patterns
//!
//! Liveness and readiness probes, a per-request timeout, and graceful
//! shutdown that stops accepting, flips readiness off and drains open
//! connections within a bounded time.
//!
//! Run with: cargo run --bin lesson_36_production_patterns
//! Then try:
//!   curl http://127.0.0.1:8080/health
//!   curl http://127.0.0.1:8080/ready
//!   curl http://127.0.0.1:8080/api/data
//! and press Ctrl+C while a request is in flight.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use lesson_course::api::{logging, AppState, Config, InMemoryUserRepository, Server};
use lesson_course::{banner, done, key_points};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    banner("Production Patterns");
    let config = Config::default();
    logging::init_for_lesson(&config.app);

    let state = AppState::new(Arc::new(InMemoryUserRepository::new()))
        .with_request_timeout(Duration::from_secs(5))
        .with_data_delay(Duration::from_millis(100));

    let addr: SocketAddr = ([127, 0, 0, 1], 8080).into();
    let server = Server::bind(addr, state)
        .await?
        .with_shutdown_timeout(config.server.shutdown_timeout());

    println!("Server starting on http://{}", server.local_addr()?);
    println!("   GET /health   - liveness");
    println!("   GET /ready    - readiness (503 while shutting down)");
    println!("   GET /api/data - simulated work under a 5s timeout");
    println!("\nPress Ctrl+C for graceful shutdown\n");

    server.run().await?;
    done("server stopped gracefully");

    key_points(&[
        "Liveness says the process is up; readiness says it should get traffic",
        "Bound every request with a timeout",
        "On shutdown: stop accepting, fail readiness, drain, then exit",
        "Cap the drain so a stuck client cannot block shutdown forever",
    ]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_probes_and_slow_request_timeout() {
        let state = AppState::new(Arc::new(InMemoryUserRepository::new()))
            .with_request_timeout(Duration::from_millis(50))
            .with_data_delay(Duration::from_millis(500));
        let server = Server::bind(([127, 0, 0, 1], 0).into(), state)
            .await
            .unwrap()
            .spawn()
            .unwrap();

        let health = reqwest::get(server.url("/health")).await.unwrap();
        assert_eq!(health.status(), 200);
        let ready = reqwest::get(server.url("/ready")).await.unwrap();
        assert_eq!(ready.status(), 200);
        let slow = reqwest::get(server.url("/api/data")).await.unwrap();
        assert_eq!(slow.status(), 408);

        server.stop().await.unwrap();
    }
}

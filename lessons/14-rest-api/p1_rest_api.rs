//! Lesson 14: REST API fundamentals
//!
//! An in-memory users API with the full set of CRUD routes.
//!
//! Run with: cargo run --bin lesson_14_rest_api
//! Then try:
//!   curl http://127.0.0.1:8080/api/users
//!   curl -X POST -H 'Content-Type: application/json' \
//!        -d '{"name":"Charlie","email":"charlie@example.com"}' http://127.0.0.1:8080/api/users
//!   curl -X PUT -d '{"name":"Alicia"}' http://127.0.0.1:8080/api/users/1
//!   curl -X DELETE http://127.0.0.1:8080/api/users/2

use std::net::SocketAddr;
use std::sync::Arc;

use lesson_course::api::{logging, AppState, Config, InMemoryUserRepository, Server};
use lesson_course::{banner, key_points, section};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    banner("REST API Fundamentals");
    logging::init_for_lesson(&Config::default().app);

    section("Endpoints");
    for (method, path, what) in [
        ("GET", "/api/users", "list users"),
        ("POST", "/api/users", "create a user (201)"),
        ("GET", "/api/users/{id}", "fetch one user"),
        ("PUT", "/api/users/{id}", "update name and/or email"),
        ("DELETE", "/api/users/{id}", "delete a user (204)"),
    ] {
        println!("{:<7} {:<17} {}", method, path, what);
    }

    key_points(&[
        "Resources are nouns; HTTP methods are the verbs",
        "Status codes carry meaning: 201 created, 204 no content, 404 missing",
        "Errors are JSON too, with a stable shape",
        "Shared state sits behind Arc and a lock",
    ]);

    let state = AppState::new(Arc::new(InMemoryUserRepository::seeded()));
    let addr: SocketAddr = ([127, 0, 0, 1], 8080).into();
    let server = Server::bind(addr, state).await?;
    println!("\nServing on http://{} (Ctrl+C to stop)", server.local_addr()?);
    server.run().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http_body_util::{BodyExt, Full};
    use hyper::{Method, Request, StatusCode};
    use lesson_course::api::handlers::route;

    fn request(method: Method, path: &str, body: &'static str) -> Request<Full<Bytes>> {
        let mut req = Request::new(Full::new(Bytes::from_static(body.as_bytes())));
        *req.method_mut() = method;
        *req.uri_mut() = path.parse().unwrap();
        req
    }

    #[tokio::test]
    async fn test_crud_round() {
        let state = AppState::new(Arc::new(InMemoryUserRepository::seeded()));

        let created = route(
            &state,
            request(
                Method::POST,
                "/api/users",
                r#"{"name":"Charlie","email":"charlie@example.com"}"#,
            ),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);
        let body = created.into_body().collect().await.unwrap().to_bytes();
        let user: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(user["id"], 3);

        let deleted = route(&state, request(Method::DELETE, "/api/users/3", "")).await;
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

        let gone = route(&state, request(Method::GET, "/api/users/3", "")).await;
        assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    }
}

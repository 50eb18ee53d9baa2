//! Lesson 17: Middleware
//!
//! A small router wrapped in layers: request id, logging, panic recovery,
//! timeout and CORS from `api::middleware`, plus a bearer-token check
//! written here for the protected route.
//!
//! Run with: cargo run --bin lesson_17_middleware
//! Then try:
//!   curl -i http://127.0.0.1:8080/
//!   curl -i http://127.0.0.1:8080/api/protected
//!   curl -i -H 'Authorization: Bearer letmein' http://127.0.0.1:8080/api/protected
//!   curl -i http://127.0.0.1:8080/panic

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use hyper::header::AUTHORIZATION;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, StatusCode};
use hyper_util::rt::{TokioIo, TokioTimer};
use lesson_course::api::handlers::{json_response, text_response, ApiError, ApiResponse};
use lesson_course::api::{logging, middleware, AppState, Config, InMemoryUserRepository};
use lesson_course::{banner, key_points};
use serde_json::json;
use tokio::net::TcpListener;

const TOKEN: &str = "letmein";

/// Rejects requests without `Authorization: Bearer <TOKEN>` before they
/// reach `next`.
async fn require_token<B, F, Fut>(req: Request<B>, next: F) -> ApiResponse
where
    F: FnOnce(Request<B>) -> Fut,
    Fut: Future<Output = ApiResponse>,
{
    let authorised = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|token| token == TOKEN);
    if !authorised {
        tracing::warn!(path = %req.uri().path(), "missing or invalid token");
        return ApiError::new(StatusCode::UNAUTHORIZED, "missing or invalid token").into_response();
    }
    next(req).await
}

async fn router<B>(req: Request<B>) -> ApiResponse {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    match (&method, path.as_str()) {
        (&Method::GET, "/") => json_response(
            StatusCode::OK,
            &json!({"message": "Middleware demonstration"}),
        ),
        (&Method::GET, "/api/protected") => {
            require_token(req, |_| async { text_response(StatusCode::OK, "Protected endpoint") })
                .await
        }
        (&Method::GET, "/panic") => panic!("handler bug"),
        _ => ApiError::not_found("route not found").into_response(),
    }
}

async fn handle<B>(state: AppState, req: Request<B>) -> Result<ApiResponse, Infallible> {
    Ok(middleware::process(&state, req, router).await)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    banner("Middleware");
    logging::init_for_lesson(&Config::default().app);

    key_points(&[
        "Middleware wraps a handler and runs code before and after it",
        "Layers compose: the outermost sees every request first",
        "A layer may answer on its own, as auth and CORS preflight do",
        "catch_unwind keeps one bad handler from taking the connection down",
    ]);

    let state = AppState::new(Arc::new(InMemoryUserRepository::new()));
    let addr: SocketAddr = ([127, 0, 0, 1], 8080).into();
    let listener = TcpListener::bind(addr).await?;
    println!("\nListening on http://{} (Ctrl+C to stop)", addr);

    loop {
        let (tcp, _) = tokio::select! {
            accepted = listener.accept() => accepted?,
            _ = tokio::signal::ctrl_c() => return Ok(()),
        };
        let state = state.clone();
        tokio::spawn(async move {
            let service = service_fn(move |req| handle(state.clone(), req));
            if let Err(err) = http1::Builder::new()
                .timer(TokioTimer::new())
                .serve_connection(TokioIo::new(tcp), service)
                .await
            {
                tracing::debug!(error = %err, "connection error");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http_body_util::Full;
    use hyper::header::HeaderValue;
    use lesson_course::api::middleware::REQUEST_ID;

    fn get(path: &str) -> Request<Full<Bytes>> {
        let mut req = Request::new(Full::new(Bytes::new()));
        *req.uri_mut() = path.parse().unwrap();
        req
    }

    fn state() -> AppState {
        AppState::new(Arc::new(InMemoryUserRepository::new()))
    }

    #[tokio::test]
    async fn test_protected_requires_token() {
        let response = handle(state(), get("/api/protected")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let mut req = get("/api/protected");
        req.headers_mut()
            .insert(AUTHORIZATION, HeaderValue::from_static("Bearer letmein"));
        let response = handle(state(), req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID));
    }

    #[tokio::test]
    async fn test_panic_is_recovered() {
        let response = handle(state(), get("/panic")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

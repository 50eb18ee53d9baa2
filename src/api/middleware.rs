//! Cross-cutting request handling wrapped around the router: request ids,
//! request logging, panic recovery, a per-request timeout, and CORS.

use std::convert::Infallible;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Instant;

use futures::FutureExt;
use hyper::header::{HeaderName, HeaderValue};
use hyper::{Method, Request, StatusCode};
use tracing::Instrument;
use uuid::Uuid;

use super::handlers::{empty_response, route, ApiError, ApiResponse, AppState};

pub const REQUEST_ID: &str = "x-request-id";

const CORS_HEADERS: [(&str, &str); 4] = [
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "GET, POST, PUT, DELETE, OPTIONS"),
    ("access-control-allow-headers", "Accept, Authorization, Content-Type, X-Request-Id"),
    ("access-control-max-age", "300"),
];

/// Reuses a caller-supplied id when it looks sane, otherwise mints a v4 uuid.
pub fn request_id<B>(req: &Request<B>) -> String {
    req.headers()
        .get(REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= 128)
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

pub fn apply_cors(response: &mut ApiResponse) {
    let headers = response.headers_mut();
    for (name, value) in CORS_HEADERS {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

/// Runs `next` inside the middleware stack.
///
/// `OPTIONS` requests are answered here as CORS preflights. A panic in
/// `next` becomes a 500, and a handler slower than the state's request
/// timeout becomes a 408.
pub async fn process<B, F, Fut>(state: &AppState, req: Request<B>, next: F) -> ApiResponse
where
    F: FnOnce(Request<B>) -> Fut,
    Fut: Future<Output = ApiResponse>,
{
    let started = Instant::now();
    let id = request_id(&req);
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let span = tracing::info_span!("request", %method, %path, request_id = %id);

    let mut response = if method == Method::OPTIONS {
        empty_response(StatusCode::NO_CONTENT)
    } else {
        let guarded = AssertUnwindSafe(next(req)).catch_unwind();
        match tokio::time::timeout(state.request_timeout, guarded)
            .instrument(span.clone())
            .await
        {
            Ok(Ok(response)) => response,
            Ok(Err(payload)) => {
                let message = panic_message(payload.as_ref());
                span.in_scope(|| tracing::error!(panic = %message, "handler panicked"));
                ApiError::internal("internal server error").into_response()
            }
            Err(_) => {
                span.in_scope(|| {
                    tracing::warn!(timeout = ?state.request_timeout, "request timed out")
                });
                ApiError::new(StatusCode::REQUEST_TIMEOUT, "request timeout").into_response()
            }
        }
    };

    if let Ok(value) = HeaderValue::from_str(&id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID), value);
    }
    apply_cors(&mut response);

    span.in_scope(|| {
        tracing::info!(
            status = response.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request completed"
        )
    });
    response
}

/// The full service: middleware around [`route`]. Shaped for `service_fn`.
pub async fn handle<B>(state: AppState, req: Request<B>) -> Result<ApiResponse, Infallible>
where
    B: hyper::body::Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let router_state = state.clone();
    Ok(process(&state, req, |req| async move { route(&router_state, req).await }).await)
}

//! Routing and JSON handlers for the users API.
//!
//! Routing is a plain match on `(method, path segments)`, in the same
//! spirit as the single-function hyper services in the HTTP lessons.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::header::{HeaderValue, ALLOW, CONTENT_TYPE};
use hyper::{Method, Request, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use super::config::Config;
use super::models::{NewUser, UserId, UserUpdate};
use super::repository::{RepoError, RepoResult, UserRepository};
use super::validate::{Validate, Violation};

pub type ApiResponse = Response<Full<Bytes>>;

/// Largest request body accepted, in bytes.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub environment: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        ServiceInfo {
            name: "Production API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Everything a request handler can reach. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub info: Arc<ServiceInfo>,
    pub ready: Arc<AtomicBool>,
    pub request_timeout: Duration,
    /// Simulated work behind `GET /api/data`.
    pub data_delay: Duration,
}

impl AppState {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        AppState {
            users,
            info: Arc::new(ServiceInfo::default()),
            ready: Arc::new(AtomicBool::new(true)),
            request_timeout: Duration::from_secs(5),
            data_delay: Duration::from_millis(100),
        }
    }

    pub fn from_config(users: Arc<dyn UserRepository>, config: &Config) -> Self {
        let mut state = Self::new(users);
        state.info = Arc::new(ServiceInfo {
            name: config.app.name.clone(),
            environment: config.app.environment.clone(),
            ..ServiceInfo::default()
        });
        state.request_timeout = config.server.request_timeout();
        state
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_data_delay(mut self, delay: Duration) -> Self {
        self.data_delay = delay;
        self
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }
}

//==============================================================================
// Responses
//==============================================================================

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a [Violation]>,
}

/// A handler failure, rendered as `{"error", "message", "details"?}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<Vec<Violation>>,
    allow: Option<&'static str>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError {
            status,
            message: message.into(),
            details: None,
            allow: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn validation(violations: Vec<Violation>) -> Self {
        ApiError {
            details: Some(violations),
            ..Self::bad_request("validation failed")
        }
    }

    pub fn method_not_allowed(allow: &'static str) -> Self {
        ApiError {
            allow: Some(allow),
            ..Self::new(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
        }
    }

    pub fn into_response(self) -> ApiResponse {
        let body = ErrorBody {
            error: self.status.canonical_reason().unwrap_or("Error"),
            message: &self.message,
            details: self.details.as_deref(),
        };
        let mut response = json_response(self.status, &body);
        if let Some(allow) = self.allow {
            response
                .headers_mut()
                .insert(ALLOW, HeaderValue::from_static(allow));
        }
        response
    }
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(id) => {
                ApiError::not_found(format!("user with ID {} does not exist", id))
            }
            RepoError::Conflict(email) => ApiError::new(
                StatusCode::CONFLICT,
                format!("email {} is already registered", email),
            ),
            other => {
                tracing::error!(error = %other, "repository failure");
                ApiError::internal("database error")
            }
        }
    }
}

pub fn json_response<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> ApiResponse {
    match serde_json::to_vec(value) {
        Ok(body) => {
            let mut response = Response::new(Full::new(Bytes::from(body)));
            *response.status_mut() = status;
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            response
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to encode response");
            text_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
        }
    }
}

pub fn text_response(status: StatusCode, text: &'static str) -> ApiResponse {
    let mut response = Response::new(Full::new(Bytes::from_static(text.as_bytes())));
    *response.status_mut() = status;
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    response
}

pub fn empty_response(status: StatusCode) -> ApiResponse {
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = status;
    response
}

//==============================================================================
// Request helpers
//==============================================================================

async fn read_json<B, T>(body: B) -> Result<T, ApiError>
where
    B: hyper::body::Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
    T: DeserializeOwned,
{
    let bytes = match Limited::new(body, MAX_BODY_BYTES).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) if err.downcast_ref::<LengthLimitError>().is_some() => {
            return Err(ApiError::new(
                StatusCode::PAYLOAD_TOO_LARGE,
                "request body too large",
            ))
        }
        Err(err) => return Err(ApiError::bad_request(format!("failed to read body: {}", err))),
    };
    serde_json::from_slice(&bytes)
        .map_err(|e| ApiError::bad_request(format!("invalid JSON: {}", e)))
}

fn parse_id(raw: &str) -> Result<UserId, ApiError> {
    raw.parse::<UserId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::bad_request(format!("invalid user ID: {}", raw)))
}

/// Runs a repository call off the async worker threads.
async fn with_repo<T, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&dyn UserRepository) -> RepoResult<T> + Send + 'static,
{
    let users = Arc::clone(&state.users);
    tokio::task::spawn_blocking(move || f(users.as_ref()))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "repository task failed");
            ApiError::internal("internal server error")
        })?
        .map_err(ApiError::from)
}

//==============================================================================
// Router
//==============================================================================

/// Dispatches one request. Never fails: errors become JSON error responses.
pub async fn route<B>(state: &AppState, req: Request<B>) -> ApiResponse
where
    B: hyper::body::Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    dispatch(state, req)
        .await
        .unwrap_or_else(ApiError::into_response)
}

async fn dispatch<B>(state: &AppState, req: Request<B>) -> Result<ApiResponse, ApiError>
where
    B: hyper::body::Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match (segments.as_slice(), &method) {
        ([], &Method::GET) => Ok(index(state)),
        ([], _) => Err(ApiError::method_not_allowed("GET")),

        (["health"], &Method::GET) => Ok(json_response(
            StatusCode::OK,
            &json!({"status": "healthy"}),
        )),
        (["ready"], &Method::GET) => Ok(readiness(state)),
        (["api", "health"], &Method::GET) => Ok(text_response(StatusCode::OK, "OK")),
        (["api", "data"], &Method::GET) => Ok(data(state).await),
        (["health"], _) | (["ready"], _) | (["api", "health"], _) | (["api", "data"], _) => {
            Err(ApiError::method_not_allowed("GET"))
        }

        (["api", "users"], &Method::GET) => list_users(state).await,
        (["api", "users"], &Method::POST) => create_user(state, req.into_body()).await,
        (["api", "users"], _) => Err(ApiError::method_not_allowed("GET, POST")),

        (["api", "users", id], &Method::GET) => get_user(state, parse_id(id)?).await,
        (["api", "users", id], &Method::PUT) => {
            let id = parse_id(id)?;
            update_user(state, id, req.into_body()).await
        }
        (["api", "users", id], &Method::DELETE) => delete_user(state, parse_id(id)?).await,
        (["api", "users", _], _) => Err(ApiError::method_not_allowed("GET, PUT, DELETE")),

        _ => Err(ApiError::not_found(format!("no route for {}", path))),
    }
}

//==============================================================================
// Handlers
//==============================================================================

fn index(state: &AppState) -> ApiResponse {
    json_response(
        StatusCode::OK,
        &json!({
            "name": state.info.name,
            "version": state.info.version,
            "environment": state.info.environment,
            "endpoints": [
                "GET /health",
                "GET /ready",
                "GET /api/health",
                "GET /api/users",
                "POST /api/users",
                "GET /api/users/{id}",
                "PUT /api/users/{id}",
                "DELETE /api/users/{id}",
            ],
        }),
    )
}

fn readiness(state: &AppState) -> ApiResponse {
    if state.is_ready() {
        json_response(StatusCode::OK, &json!({"status": "ready"}))
    } else {
        json_response(StatusCode::SERVICE_UNAVAILABLE, &json!({"status": "not ready"}))
    }
}

async fn data(state: &AppState) -> ApiResponse {
    tokio::time::sleep(state.data_delay).await;
    json_response(StatusCode::OK, &json!({"data": "response"}))
}

async fn list_users(state: &AppState) -> Result<ApiResponse, ApiError> {
    let users = with_repo(state, |repo| repo.list()).await?;
    Ok(json_response(StatusCode::OK, &users))
}

async fn get_user(state: &AppState, id: UserId) -> Result<ApiResponse, ApiError> {
    let user = with_repo(state, move |repo| repo.get(id)).await?;
    Ok(json_response(StatusCode::OK, &user))
}

async fn create_user<B>(state: &AppState, body: B) -> Result<ApiResponse, ApiError>
where
    B: hyper::body::Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let new = read_json::<_, NewUser>(body).await?.trimmed();
    new.validate().map_err(ApiError::validation)?;

    let user = with_repo(state, move |repo| repo.create(new)).await?;
    tracing::info!(user_id = user.id, "user created");
    Ok(json_response(StatusCode::CREATED, &user))
}

async fn update_user<B>(state: &AppState, id: UserId, body: B) -> Result<ApiResponse, ApiError>
where
    B: hyper::body::Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let changes = read_json::<_, UserUpdate>(body).await?.trimmed();
    changes.validate().map_err(ApiError::validation)?;

    let user = with_repo(state, move |repo| repo.update(id, changes)).await?;
    Ok(json_response(StatusCode::OK, &user))
}

async fn delete_user(state: &AppState, id: UserId) -> Result<ApiResponse, ApiError> {
    with_repo(state, move |repo| repo.delete(id)).await?;
    tracing::info!(user_id = id, "user deleted");
    Ok(empty_response(StatusCode::NO_CONTENT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::repository::{InMemoryUserRepository, SqliteUserRepository};
    use serde_json::Value;

    fn state() -> AppState {
        AppState::new(Arc::new(InMemoryUserRepository::seeded()))
            .with_data_delay(Duration::from_millis(1))
    }

    fn request(method: Method, path: &str, body: &str) -> Request<Full<Bytes>> {
        let mut req = Request::new(Full::new(Bytes::from(body.to_string())));
        *req.method_mut() = method;
        *req.uri_mut() = path.parse().unwrap();
        req
    }

    async fn send(state: &AppState, method: Method, path: &str, body: &str) -> (StatusCode, Value) {
        let response = route(state, request(method, path, body)).await;
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let state = state();
        assert_eq!(
            send(&state, Method::GET, "/health", "").await,
            (StatusCode::OK, json!({"status": "healthy"}))
        );
        assert_eq!(
            send(&state, Method::GET, "/api/health", "").await,
            (StatusCode::OK, Value::String("OK".to_string()))
        );
        assert_eq!(
            send(&state, Method::GET, "/ready", "").await,
            (StatusCode::OK, json!({"status": "ready"}))
        );

        state.set_ready(false);
        let (status, _) = send(&state, Method::GET, "/ready", "").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_index_reports_service() {
        let (status, body) = send(&state(), Method::GET, "/", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Production API");
        assert!(body["endpoints"].as_array().unwrap().len() > 3);
    }

    #[tokio::test]
    async fn test_list_and_get() {
        let state = state();
        let (status, body) = send(&state, Method::GET, "/api/users", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (status, body) = send(&state, Method::GET, "/api/users/1/", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Alice");
    }

    #[tokio::test]
    async fn test_get_errors() {
        let state = state();
        let (status, body) = send(&state, Method::GET, "/api/users/abc", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Bad Request");

        let (status, body) = send(&state, Method::GET, "/api/users/99", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "user with ID 99 does not exist");
    }

    #[tokio::test]
    async fn test_create_user() {
        let state = state();
        let (status, body) = send(
            &state,
            Method::POST,
            "/api/users",
            r#"{"name":"Carol","email":"carol@example.com"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 3);
        assert_eq!(state.users.list().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_input() {
        let state = state();
        let (status, body) = send(&state, Method::POST, "/api/users", "{oops").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().starts_with("invalid JSON"));

        let (status, body) = send(
            &state,
            Method::POST,
            "/api/users",
            r#"{"name":"C","email":"not-an-email"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "validation failed");
        let details = body["details"].as_array().unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details[0]["field"], "name");
        assert_eq!(details[1]["tag"], "email");
    }

    fn sqlite_state() -> AppState {
        AppState::new(Arc::new(SqliteUserRepository::open_in_memory().unwrap()))
    }

    #[tokio::test]
    async fn test_overlong_email_is_a_validation_error() {
        let email = format!("{}@example.com", "a".repeat(100));
        let body = json!({"name": "Al", "email": email}).to_string();

        let (status, body) = send(&sqlite_state(), Method::POST, "/api/users", &body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"][0]["field"], "email");
        assert_eq!(body["details"][0]["tag"], "max");
    }

    #[tokio::test]
    async fn test_padded_name_is_stored_trimmed() {
        let state = sqlite_state();
        let name = format!("{}Al", " ".repeat(120));
        let body = json!({"name": name, "email": " al@example.com "}).to_string();

        let (status, body) = send(&state, Method::POST, "/api/users", &body).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["name"], "Al");
        assert_eq!(body["email"], "al@example.com");

        let padded = json!({"name": format!("Bo{}", " ".repeat(120))}).to_string();
        let (status, body) = send(&state, Method::PUT, "/api/users/1", &padded).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Bo");
    }

    #[tokio::test]
    async fn test_create_duplicate_email_conflicts() {
        let (status, _) = send(
            &state(),
            Method::POST,
            "/api/users",
            r#"{"name":"Alice Again","email":"alice@example.com"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let state = state();
        let (status, body) =
            send(&state, Method::PUT, "/api/users/2", r#"{"name":"Robert"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Robert");
        assert_eq!(body["email"], "bob@example.com");

        let (status, body) = send(&state, Method::DELETE, "/api/users/2", "").await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, _) = send(&state, Method::DELETE, "/api/users/2", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_route_and_method() {
        let state = state();
        let (status, _) = send(&state, Method::GET, "/nope", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let response = route(&state, request(Method::PATCH, "/api/users/1", "")).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[ALLOW], "GET, PUT, DELETE");
    }

    #[tokio::test]
    async fn test_data_endpoint() {
        let (status, body) = send(&state(), Method::GET, "/api/data", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"data": "response"}));
    }
}

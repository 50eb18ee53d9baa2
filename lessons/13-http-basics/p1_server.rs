//! Lesson 13: A first HTTP server with hyper
//!
//! Run with: cargo run --bin lesson_13_http_server
//! Then try:
//!   curl http://127.0.0.1:8080/
//!   curl http://127.0.0.1:8080/api/users
//!   curl http://127.0.0.1:8080/api/user/2
//!   curl -X POST -d 'hello' http://127.0.0.1:8080/echo

use std::convert::Infallible;
use std::net::SocketAddr;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::{TokioIo, TokioTimer};
use lesson_course::{banner, key_points};
use serde::Serialize;
use tokio::net::TcpListener;

#[derive(Debug, Clone, Serialize)]
struct User {
    id: u32,
    name: String,
    email: String,
}

fn users() -> Vec<User> {
    vec![
        User {
            id: 1,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        },
        User {
            id: 2,
            name: "Bob".to_string(),
            email: "bob@example.com".to_string(),
        },
    ]
}

fn respond(
    status: StatusCode,
    content_type: &'static str,
    body: impl Into<Bytes>,
) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(body.into()));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

fn json<T: Serialize>(status: StatusCode, value: &T) -> Response<Full<Bytes>> {
    match serde_json::to_vec(value) {
        Ok(body) => respond(status, "application/json", body),
        Err(_) => respond(StatusCode::INTERNAL_SERVER_ERROR, "text/plain", "encoding failed"),
    }
}

async fn handle<B>(req: Request<B>) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: hyper::body::Body,
{
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let response = match (&method, path.as_str()) {
        (&Method::GET, "/") => respond(
            StatusCode::OK,
            "text/plain",
            "Welcome to the Rust HTTP server!",
        ),
        (&Method::GET, "/about") => respond(
            StatusCode::OK,
            "text/html; charset=utf-8",
            "<h1>About</h1><p>Built with hyper and tokio.</p>",
        ),
        (&Method::GET, "/api/users") => json(StatusCode::OK, &users()),
        (&Method::GET, p) if p.starts_with("/api/user/") => {
            let id = p.trim_start_matches("/api/user/");
            match id.parse::<u32>().ok().and_then(|id| users().into_iter().find(|u| u.id == id)) {
                Some(user) => json(StatusCode::OK, &user),
                None => respond(StatusCode::NOT_FOUND, "text/plain", "User not found"),
            }
        }
        (&Method::GET, "/headers") => {
            let mut lines: Vec<String> = req
                .headers()
                .iter()
                .map(|(name, value)| format!("{}: {}", name, value.to_str().unwrap_or("<binary>")))
                .collect();
            lines.sort();
            respond(StatusCode::OK, "text/plain", lines.join("\n"))
        }
        (&Method::POST, "/echo") => match req.into_body().collect().await {
            Ok(body) => respond(StatusCode::OK, "text/plain", body.to_bytes()),
            Err(_) => respond(StatusCode::BAD_REQUEST, "text/plain", "could not read body"),
        },
        (_, "/echo") => respond(StatusCode::METHOD_NOT_ALLOWED, "text/plain", "Method Not Allowed"),
        _ => respond(StatusCode::NOT_FOUND, "text/plain", "404 Not Found"),
    };
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    banner("Rust HTTP Server");

    let addr: SocketAddr = ([127, 0, 0, 1], 8080).into();
    let listener = TcpListener::bind(addr).await?;
    println!("Listening on http://{}", addr);
    println!("Routes: /  /about  /api/users  /api/user/{{id}}  /headers  POST /echo");
    println!("Press Ctrl+C to stop\n");

    key_points(&[
        "A hyper service is an async function from Request to Response",
        "TcpListener accepts connections; each is served on its own task",
        "match on (method, path) is all the routing a small server needs",
    ]);

    loop {
        let (tcp, peer) = tokio::select! {
            accepted = listener.accept() => accepted?,
            _ = tokio::signal::ctrl_c() => {
                println!("\nShutting down");
                return Ok(());
            }
        };
        let io = TokioIo::new(tcp);
        tokio::spawn(async move {
            if let Err(err) = http1::Builder::new()
                .timer(TokioTimer::new())
                .serve_connection(io, service_fn(handle))
                .await
            {
                eprintln!("Error serving {}: {:?}", peer, err);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: Method, path: &str, body: &'static str) -> Request<Full<Bytes>> {
        let mut req = Request::new(Full::new(Bytes::from_static(body.as_bytes())));
        *req.method_mut() = method;
        *req.uri_mut() = path.parse().unwrap();
        req
    }

    async fn body_of(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_lists_users() {
        let response = handle(request(Method::GET, "/api/users", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        assert!(body_of(response).await.contains("alice@example.com"));
    }

    #[tokio::test]
    async fn test_single_user() {
        let found = handle(request(Method::GET, "/api/user/2", "")).await.unwrap();
        assert!(body_of(found).await.contains("\"Bob\""));

        let missing = handle(request(Method::GET, "/api/user/9", "")).await.unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_echo() {
        let response = handle(request(Method::POST, "/echo", "ping")).await.unwrap();
        assert_eq!(body_of(response).await, "ping");

        let wrong = handle(request(Method::GET, "/echo", "")).await.unwrap();
        assert_eq!(wrong.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}

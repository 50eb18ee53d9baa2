//! Lesson 18: Request validation
//!
//! Run with: cargo run --bin lesson_18_validation

use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Method, Request, StatusCode};
use lesson_course::api::handlers::{json_response, route, ApiError, ApiResponse};
use lesson_course::api::validate::{Registration, Validate};
use lesson_course::api::{AppState, InMemoryUserRepository};
use lesson_course::{banner, key_points, section};

/// Decodes and validates a sign-up body the same way the users API does.
fn register(body: &str) -> ApiResponse {
    let form: Registration = match serde_json::from_str(body) {
        Ok(form) => form,
        Err(err) => return ApiError::bad_request(format!("invalid JSON: {}", err)).into_response(),
    };
    match form.validate() {
        Ok(()) => json_response(StatusCode::CREATED, &form),
        Err(violations) => ApiError::validation(violations).into_response(),
    }
}

async fn show(response: ApiResponse) -> anyhow::Result<()> {
    let status = response.status();
    let body = response.into_body().collect().await?.to_bytes();
    let value: serde_json::Value = serde_json::from_slice(&body)?;
    println!("{} {}", status.as_u16(), serde_json::to_string_pretty(&value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    banner("Request Validation");

    section("Validating structs");
    let samples = [
        Registration {
            name: "Alice".into(),
            email: "alice@example.com".into(),
            age: Some(30),
        },
        Registration {
            name: "A".into(),
            email: "not-an-email".into(),
            age: Some(150),
        },
        Registration::default(),
    ];
    for (i, form) in samples.iter().enumerate() {
        match form.validate() {
            Ok(()) => println!("{}. valid: {:?}", i + 1, form.name),
            Err(violations) => {
                println!("{}. {} problem(s):", i + 1, violations.len());
                for v in violations {
                    println!("     {} failed {} (value {:?})", v.field, v.tag, v.value);
                }
            }
        }
    }

    println!();
    section("Validation at the HTTP boundary");
    show(register(r#"{"name":"Bob","email":"bob@example.com","age":41}"#)).await?;
    show(register(r#"{"name":"","email":"bob@","age":-1}"#)).await?;
    show(register(r#"{"name": "#)).await?;

    println!();
    section("The users API applies the same rules");
    let state = AppState::new(Arc::new(InMemoryUserRepository::new()));
    let mut req = Request::new(Full::new(Bytes::from_static(
        br#"{"name":"X","email":"x@example"}"#,
    )));
    *req.method_mut() = Method::POST;
    *req.uri_mut() = "/api/users".parse()?;
    show(route(&state, req).await).await?;

    key_points(&[
        "Decode first, then validate; they fail with different messages",
        "Report every violation at once, not just the first",
        "Each violation names the field, the rule and the offending value",
        "Validation lives next to the types it checks, not in handlers",
    ]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_statuses() {
        assert_eq!(
            register(r#"{"name":"Bob","email":"bob@example.com"}"#).status(),
            StatusCode::CREATED
        );
        assert_eq!(
            register(r#"{"name":"Bob","email":"bob@example.com","age":121}"#).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(register("not json").status(), StatusCode::BAD_REQUEST);
    }
}

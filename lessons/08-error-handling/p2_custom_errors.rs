//! Lesson 8: Custom error types
//!
//! Run with: cargo run --bin lesson_08_custom_errors

use std::io;

use lesson_course::errors::{
    error_chain, find_cause, DatabaseError, MultiError, NetworkError, ValidationError,
};
use lesson_course::{banner, key_points, section};
use thiserror::Error;

/// Application-level error composed from the domain errors.
#[derive(Debug, Error)]
enum ServiceError {
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("storage unavailable")]
    Storage(#[from] DatabaseError),
}

fn fetch(host: &str) -> Result<String, NetworkError> {
    match host {
        "ok.example.com" => Ok("payload".to_string()),
        "busy.example.com" => Err(NetworkError {
            host: host.to_string(),
            code: 503,
            temporary: true,
        }),
        _ => Err(NetworkError {
            host: host.to_string(),
            code: 404,
            temporary: false,
        }),
    }
}

fn save(record: &str) -> Result<(), DatabaseError> {
    Err(DatabaseError {
        operation: "insert".to_string(),
        table: "records".to_string(),
        source: Box::new(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            format!("could not store {:?}", record),
        )),
    })
}

fn sync(host: &str) -> Result<(), ServiceError> {
    let payload = fetch(host)?;
    if payload.len() < 10 {
        return Err(ValidationError::new("payload", "too short").into());
    }
    save(&payload)?;
    Ok(())
}

fn validate_user(name: &str, email: &str, age: i32) -> Result<(), MultiError> {
    let mut errors = MultiError::new();
    if name.is_empty() {
        errors.add(ValidationError::new("name", "is required"));
    }
    if !email.contains('@') {
        errors.add(ValidationError::new("email", "must contain @"));
    }
    if !(0..=150).contains(&age) {
        errors.add(ValidationError::new("age", "must be between 0 and 150"));
    }
    errors.into_result(())
}

fn main() {
    banner("Custom Errors");

    section("Typed error fields");
    for host in ["ok.example.com", "busy.example.com", "gone.example.com"] {
        match fetch(host) {
            Ok(body) => println!("{} -> {}", host, body),
            Err(e) if e.is_temporary() => println!("{} -> {} (will retry)", host, e),
            Err(e) => println!("{} -> {} (giving up)", host, e),
        }
    }

    println!();
    section("Wrapping with sources");
    let err = save("alice").unwrap_err();
    for line in error_chain(&err) {
        println!("  {}", line);
    }

    println!();
    section("Converting into one application error");
    for host in ["ok.example.com", "busy.example.com"] {
        match sync(host) {
            Ok(()) => println!("{}: synced", host),
            Err(ServiceError::Network(e)) => println!("{}: network code {}", host, e.code),
            Err(e @ ServiceError::Validation(_)) => println!("{}: {}", host, e),
            Err(e) => println!("{}: {}", host, e),
        }
    }
    let wrapped = ServiceError::from(save("bob").unwrap_err());
    let io_cause = find_cause::<io::Error>(&wrapped);
    println!("io cause under storage error: {:?}", io_cause.map(|e| e.kind()));

    println!();
    section("Collecting several errors");
    match validate_user("", "not-an-email", 200) {
        Ok(()) => println!("valid"),
        Err(errors) => println!("{}", errors.display_all()),
    }
    println!("valid user: {:?}", validate_user("Ann", "ann@example.com", 30).is_ok());

    key_points(&[
        "thiserror derives Display and Error from attributes",
        "#[from] generates From impls so ? converts automatically",
        "#[source] keeps the cause reachable instead of flattening it to text",
        "Aggregate independent failures rather than stopping at the first",
    ]);
}

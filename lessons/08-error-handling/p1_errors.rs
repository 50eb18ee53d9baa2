//! Lesson 8: Error handling basics
//!
//! Run with: cargo run --bin lesson_08_errors

use std::fs;
use std::num::ParseIntError;

use anyhow::{bail, Context};
use lesson_course::errors::{error_chain, find_cause, UserNotFound};
use lesson_course::{banner, key_points, section};

fn parse_age(input: &str) -> Result<u8, ParseIntError> {
    input.trim().parse::<u8>()
}

fn divide(a: i32, b: i32) -> Result<i32, String> {
    if b == 0 {
        return Err("division by zero".to_string());
    }
    Ok(a / b)
}

/// `?` returns early with the error, converting it via `From`.
fn sum_of_ages(a: &str, b: &str) -> Result<u16, ParseIntError> {
    let a = parse_age(a)?;
    let b = parse_age(b)?;
    Ok(a as u16 + b as u16)
}

fn find_user(id: u64) -> Result<&'static str, UserNotFound> {
    match id {
        1 => Ok("alice"),
        2 => Ok("bob"),
        _ => Err(UserNotFound(id)),
    }
}

fn load_settings(path: &str) -> anyhow::Result<String> {
    let text = fs::read_to_string(path).with_context(|| format!("reading settings from {}", path))?;
    if text.trim().is_empty() {
        bail!("settings file {} is empty", path);
    }
    Ok(text)
}

fn main() {
    banner("Error Handling");

    section("Result");
    match divide(10, 2) {
        Ok(v) => println!("1. 10 / 2 = {}", v),
        Err(e) => println!("1. error: {}", e),
    }
    match divide(1, 0) {
        Ok(v) => println!("2. 1 / 0 = {}", v),
        Err(e) => println!("2. error: {}", e),
    }

    println!();
    section("Parsing");
    for input in ["42", "300", "abc", " 7 "] {
        match parse_age(input) {
            Ok(age) => println!("{:?} -> {}", input, age),
            Err(e) => println!("{:?} -> error: {}", input, e),
        }
    }

    println!();
    section("The ? operator");
    println!("1. sum_of_ages(\"20\", \"30\") = {:?}", sum_of_ages("20", "30"));
    println!("2. sum_of_ages(\"20\", \"x\") is_err = {}", sum_of_ages("20", "x").is_err());

    println!();
    section("Sentinel errors");
    for id in [1, 3] {
        match find_user(id) {
            Ok(name) => println!("user {} = {}", id, name),
            Err(e) => println!("{}", e),
        }
    }

    println!();
    section("Context and chains");
    match load_settings("/definitely/missing/settings.toml") {
        Ok(_) => println!("loaded"),
        Err(err) => {
            for (depth, line) in error_chain(err.as_ref()).iter().enumerate() {
                println!("{}{}", "  ".repeat(depth), line);
            }
            let io = find_cause::<std::io::Error>(err.as_ref());
            println!("underlying io kind: {:?}", io.map(|e| e.kind()));
        }
    }

    println!();
    section("Combinators");
    let doubled = parse_age("21").map(|a| a as u32 * 2).unwrap_or(0);
    println!("1. map + unwrap_or: {}", doubled);
    let fallback = parse_age("oops").ok().unwrap_or_default();
    println!("2. ok() + unwrap_or_default: {}", fallback);
    let first_even = ["1", "x", "4", "6"]
        .iter()
        .filter_map(|s| s.parse::<i32>().ok())
        .find(|n| n % 2 == 0);
    println!("3. filter_map over parse results: {:?}", first_even);

    key_points(&[
        "Recoverable failures are values of type Result<T, E>",
        "? propagates errors and converts them with From",
        "anyhow adds context to errors in applications",
        "Walk source() to inspect the cause chain",
    ]);
}

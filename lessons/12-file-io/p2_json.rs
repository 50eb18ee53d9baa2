//! Lesson 12: JSON with serde
//!
//! Run with: cargo run --bin lesson_12_json

use std::collections::BTreeMap;

use lesson_course::fileio::{load_json, save_json, Book, Person};
use lesson_course::{banner, done, key_points, section};
use serde_json::{json, Value};

fn main() -> anyhow::Result<()> {
    banner("JSON Operations");

    let person = Person {
        name: "Alice Johnson".to_string(),
        age: 30,
        email: "alice@example.com".to_string(),
    };

    section("Serialising");
    println!("1. compact: {}", serde_json::to_string(&person)?);
    println!("2. pretty:\n{}", serde_json::to_string_pretty(&person)?);
    let no_email = Person {
        email: String::new(),
        ..person.clone()
    };
    println!("3. empty email skipped: {}", serde_json::to_string(&no_email)?);

    println!();
    section("Deserialising");
    let parsed: Person = serde_json::from_str(r#"{"name":"Bob Smith","age":25}"#)?;
    println!("1. {:?}", parsed);
    match serde_json::from_str::<Person>(r#"{"name":"Broken","age":"old"}"#) {
        Ok(p) => println!("2. parsed {:?}", p),
        Err(e) => println!("2. error: {}", e),
    }

    println!();
    section("Collections");
    let books = vec![
        Book {
            title: "The Rust Programming Language".to_string(),
            author: "Klabnik & Nichols".to_string(),
            year: 2019,
            pages: 560,
            tags: vec!["rust".to_string(), "beginner".to_string()],
            in_print: true,
        },
        Book {
            title: "Programming Rust".to_string(),
            author: "Blandy, Orendorff & Tindall".to_string(),
            year: 2021,
            pages: 738,
            tags: vec!["rust".to_string(), "systems".to_string()],
            in_print: true,
        },
    ];
    let encoded = serde_json::to_string(&books)?;
    let decoded: Vec<Book> = serde_json::from_str(&encoded)?;
    println!("{} books round-tripped, first: {}", decoded.len(), decoded[0].title);

    println!();
    section("Untyped values");
    let dynamic: Value = json!({
        "name": "Config",
        "version": 2,
        "features": ["auth", "logging"],
        "limits": { "rps": 100 }
    });
    println!("1. version = {}", dynamic["version"]);
    println!("2. rps = {}", dynamic["limits"]["rps"]);
    println!("3. missing = {}", dynamic["nope"]);
    let counts: BTreeMap<String, usize> =
        serde_json::from_str(r#"{"apples": 3, "pears": 5}"#)?;
    println!("4. into a map: {:?}", counts);

    println!();
    section("Files");
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("books.json");
    save_json(&path, &books)?;
    done(&format!("saved {}", path.display()));
    let loaded: Vec<Book> = load_json(&path)?;
    println!("loaded {} books, equal = {}", loaded.len(), loaded == books);

    key_points(&[
        "Derive Serialize and Deserialize on plain structs",
        "serde attributes rename, default and skip fields",
        "serde_json::Value handles JSON whose shape is not fixed",
        "Parse errors report line and column",
    ]);
    Ok(())
}

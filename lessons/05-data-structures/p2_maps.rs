//! Lesson 5: Maps
//!
//! Run with: cargo run --bin lesson_05_maps

use std::collections::{BTreeMap, HashMap};

use itertools::Itertools;
use lesson_course::{banner, key_points, section};

fn word_frequency(text: &str) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for word in text.split_whitespace() {
        let word = word
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        if !word.is_empty() {
            *counts.entry(word).or_insert(0) += 1;
        }
    }
    counts
}

fn main() {
    banner("Maps");

    section("Creating and updating");
    let mut ages: HashMap<&str, u32> = HashMap::new();
    ages.insert("Alice", 30);
    ages.insert("Bob", 25);
    println!("1. len = {}", ages.len());

    let previous = ages.insert("Alice", 31);
    println!("2. insert on an existing key returns the old value: {:?}", previous);

    let colors: HashMap<&str, &str> =
        [("red", "#FF0000"), ("green", "#00FF00"), ("blue", "#0000FF")].into_iter().collect();
    println!("3. collected from pairs: {} colors", colors.len());

    println!();
    section("Lookups");
    match ages.get("Alice") {
        Some(age) => println!("1. Alice is {}", age),
        None => println!("1. Alice not found"),
    }
    println!("2. Charlie: {:?}", ages.get("Charlie"));
    println!("3. contains_key(\"Bob\") = {}", ages.contains_key("Bob"));
    println!("4. with default: {}", ages.get("Zed").copied().unwrap_or(0));

    println!();
    section("Entry API");
    let mut scores: HashMap<String, Vec<u32>> = HashMap::new();
    for (name, score) in [("alice", 90), ("bob", 70), ("alice", 85)] {
        scores.entry(name.to_string()).or_default().push(score);
    }
    for name in scores.keys().sorted() {
        println!("{} -> {:?}", name, scores[name]);
    }

    if let Some(age) = ages.get_mut("Bob") {
        *age += 1;
    }
    println!("Bob after get_mut: {}", ages["Bob"]);

    println!();
    section("Removing");
    let removed = ages.remove("Bob");
    println!("1. remove(\"Bob\") -> {:?}, len = {}", removed, ages.len());
    println!("2. remove(\"Nobody\") -> {:?}", ages.remove("Nobody"));

    println!();
    section("Ordered iteration");
    // HashMap order is unspecified; BTreeMap keeps keys sorted
    let sorted: BTreeMap<_, _> = colors.iter().collect();
    for (name, hex) in &sorted {
        println!("{} = {}", name, hex);
    }

    println!();
    section("Word frequency");
    let freq = word_frequency("the quick brown fox jumps over the lazy dog. The dog sleeps.");
    let top = freq
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
        .take(3);
    for (word, count) in top {
        println!("{}: {}", word, count);
    }

    key_points(&[
        "HashMap::get returns Option; missing keys are not an error",
        "The entry API inserts or updates in one lookup",
        "Iteration order of HashMap is unspecified; use BTreeMap for sorted keys",
    ]);
}

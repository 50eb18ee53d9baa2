//! # Lesson Course
//!
//! Shared code behind the numbered lesson programs in `lessons/`.
//!
//! Every lesson is its own binary. The pieces worth unit testing live here so
//! that `cargo test` covers them, while each binary stays a short narrated
//! walkthrough.
//!
//! ## Running Lessons
//!
//! ```bash
//! cargo run --bin lesson_10_channels
//! cargo run --bin lesson_11_calculator
//! cargo run --bin lesson_27_production_api
//! ```
//!
//! ## Modules
//!
//! - `calculator` - arithmetic with a division-by-zero sentinel (lesson 11)
//! - `concurrency` - worker pool, pipeline, cancellation, sync primitives (lesson 10)
//! - `errors` - custom error types and the calculator challenge (lesson 8)
//! - `shapes` - trait objects and downcasting (lesson 7)
//! - `contacts` - the contact book challenge (lesson 5)
//! - `util` - small modules used to teach visibility (lesson 9)
//! - `fileio` - text and JSON files (lesson 12)
//! - `perf` - allocation and rayon comparisons (lesson 35)
//! - `api` - the user service behind lessons 13-36

pub mod api;
pub mod calculator;
pub mod concurrency;
pub mod contacts;
pub mod errors;
pub mod fileio;
pub mod perf;
pub mod shapes;
pub mod util;

use colored::Colorize;

/// Prints a lesson banner in the course's house style.
pub fn banner(title: &str) {
    println!("{}\n", format!("=== {} ===", title).bold());
}

/// Prints a sub-heading inside a lesson.
pub fn section(title: &str) {
    println!("{}\n", format!("--- {} ---", title).cyan());
}

/// Prints the closing numbered list of a lesson.
pub fn key_points(points: &[&str]) {
    println!("\n{}", "=== Key Points ===".bold());
    for (i, point) in points.iter().enumerate() {
        println!("{}. {}", i + 1, point);
    }
}

/// Prints a success line with a green check mark.
pub fn done(message: &str) {
    println!("{} {}", "✓".green(), message);
}

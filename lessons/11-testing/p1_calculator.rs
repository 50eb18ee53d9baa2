//! Lesson 11: Testing
//!
//! The calculator lives in `src/calculator.rs` with its unit tests, doc
//! tests and property tests beside it. Benchmarks are in
//! `benches/calculator.rs`.
//!
//! Run with: cargo run --bin lesson_11_calculator
//! Test with: cargo test calculator
//! Bench with: cargo bench --bench calculator

use lesson_course::calculator::{self, CalcError};
use lesson_course::{banner, key_points, section};

fn main() {
    banner("Testing in Rust");

    section("The code under test");
    println!("1. add(2, 3) = {}", calculator::add(2, 3));
    println!("2. subtract(10, 4) = {}", calculator::subtract(10, 4));
    println!("3. multiply(6, 7) = {}", calculator::multiply(6, 7));
    match calculator::divide(10, 0) {
        Ok(v) => println!("4. divide(10, 0) = {}", v),
        Err(CalcError::DivisionByZero) => println!("4. divide(10, 0) -> division by zero"),
        Err(e) => println!("4. divide(10, 0) -> {}", e),
    }
    println!("5. sum([1..=10]) = {}", calculator::sum(&(1..=10).collect::<Vec<_>>()));
    println!("6. average([]) = {}", calculator::average(&[]));
    println!("7. factorial(10) = {:?}", calculator::factorial(10));

    println!();
    section("Kinds of tests");
    println!("1. Unit tests: #[test] functions in a #[cfg(test)] module");
    println!("2. Table-driven tests: loop over (input, expected) cases");
    println!("3. Doc tests: examples in /// comments are compiled and run");
    println!("4. Property tests: proptest generates inputs for invariants");
    println!("5. Integration tests: files under tests/ use only the public API");
    println!("6. Benchmarks: criterion under benches/");

    key_points(&[
        "cargo test runs unit, integration and doc tests together",
        "assert_eq! reports both values when it fails",
        "Match on error variants, not on message strings, where you can",
        "Benchmark before and after an optimisation",
    ]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(calculator::add(2, 3), 5);
        assert_eq!(calculator::divide(10, 0), Err(CalcError::DivisionByZero));
        assert_eq!(calculator::average(&[]), 0.0);
    }
}

//! Lesson 8 challenge: calculator with rich errors
//!
//! Run with: cargo run --bin lesson_08_calculator_errors

use lesson_course::errors::{
    calculate, calculate_batch, classify, error_chain, safe_calculate, safe_divide,
    CalculationError, Operation,
};
use lesson_course::{banner, key_points, section};

fn report(label: &str, result: Result<f64, CalculationError>) {
    match result {
        Ok(v) => println!("{} = {}", label, v),
        Err(err) => {
            println!("{} failed [{}]", label, classify(&err));
            for line in error_chain(&err) {
                println!("    {}", line);
            }
            if err.is_temporary() {
                println!("    (temporary)");
            }
        }
    }
}

fn main() {
    banner("Calculator Errors");

    section("Single operations");
    report("10 + 5", calculate("+", 10.0, 5.0));
    report("10 / 0", calculate("/", 10.0, 0.0));
    report("5000 * 1", calculate("*", 5000.0, 1.0));
    report("1000 * 1000", calculate("*", 1000.0, 1000.0));
    report("NaN - 1", calculate("-", f64::NAN, 1.0));
    report("3 ^ 2", calculate("^", 3.0, 2.0));

    println!();
    section("Batch");
    let ops = vec![
        Operation::new("add", 1.0, 2.0),
        Operation::new("divide", 9.0, 3.0),
        Operation::new("divide", 1.0, 0.0),
        Operation::new("modulo", 5.0, 2.0),
    ];
    let (results, errors) = calculate_batch(&ops);
    println!("results: {:?}", results);
    for err in &errors {
        println!("error: {}", err);
    }

    println!();
    section("Recovering from panics");
    report(
        "checked",
        safe_calculate(|| safe_divide(8.0, 2.0)),
    );
    report(
        "panicking",
        safe_calculate(|| {
            let values: Vec<f64> = Vec::new();
            Ok(values[3])
        }),
    );

    key_points(&[
        "Enum variants carry the data each failure needs",
        "Wrapping keeps the original cause for logging and matching",
        "Results are range checked just like the inputs",
        "catch_unwind turns a panic into an ordinary error at a boundary",
    ]);
}

//! Lesson 4: Functions
//!
//! Run with: cargo run --bin lesson_04_functions

use lesson_course::{banner, key_points};

fn greet(name: &str) -> String {
    format!("Hello, {}!", name)
}

fn add(a: i32, b: i32) -> i32 {
    a + b
}

fn multiply(a: i32, b: i32) -> i32 {
    a * b
}

/// Several results come back as a tuple.
fn div_mod(a: i32, b: i32) -> (i32, i32) {
    (a / b, a % b)
}

fn min_max(a: i32, b: i32) -> (i32, i32) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

fn safe_divide(a: f64, b: f64) -> Result<f64, String> {
    if b == 0.0 {
        return Err("cannot divide by zero".to_string());
    }
    Ok(a / b)
}

/// A slice stands in for variadic arguments.
fn sum_all(numbers: &[i32]) -> i32 {
    numbers.iter().sum()
}

fn map_ints(numbers: &[i32], f: impl Fn(i32) -> i32) -> Vec<i32> {
    numbers.iter().map(|&n| f(n)).collect()
}

fn factorial(n: u64) -> u64 {
    if n <= 1 {
        1
    } else {
        n * factorial(n - 1)
    }
}

fn fibonacci(n: u32) -> u64 {
    match n {
        0 => 0,
        1 => 1,
        _ => fibonacci(n - 1) + fibonacci(n - 2),
    }
}

/// Runs its message when dropped. Scope exit plays the role of a deferred call.
struct Deferred(&'static str);

impl Drop for Deferred {
    fn drop(&mut self) {
        println!("    {}", self.0);
    }
}

fn demonstrate_drop_order() {
    let _first = Deferred("Guard 1 (dropped 3rd)");
    let _second = Deferred("Guard 2 (dropped 2nd)");
    let _third = Deferred("Guard 3 (dropped 1st)");
    println!("    Regular statement (runs first)");
}

fn main() {
    banner("Rust Functions Tutorial");

    println!("1. Basic function: {}", greet("Alice"));
    println!("2. Parameters: add(5, 3) = {}", add(5, 3));

    let (quotient, remainder) = div_mod(17, 5);
    println!("3. Tuple return: 17 / 5 = {} remainder {}", quotient, remainder);

    let (min, max) = min_max(42, 7);
    println!("4. Destructured return: min = {}, max = {}", min, max);

    match safe_divide(10.0, 2.0) {
        Ok(result) => println!("5. Result return: 10 / 2 = {:.2}", result),
        Err(e) => println!("5. Error: {}", e),
    }
    if let Err(e) = safe_divide(10.0, 0.0) {
        println!("5. Error: {}", e);
    }

    println!("6. Slice argument: sum_all(1..=5) = {}", sum_all(&[1, 2, 3, 4, 5]));

    println!("\n7. Functions as values:");
    let operation: fn(i32, i32) -> i32 = multiply;
    println!("   operation(4, 5) = {}", operation(4, 5));
    let table: [(&str, fn(i32, i32) -> i32); 2] = [("add", add), ("multiply", multiply)];
    for (name, f) in table {
        println!("   {}(6, 7) = {}", name, f(6, 7));
    }

    println!("\n8. Closures called immediately:");
    (|| println!("   Immediately executed closure"))();
    let square = |x: i32| x * x;
    println!("   square(9) = {}", square(9));

    println!("\n9. Higher-order functions:");
    let doubled = map_ints(&[1, 2, 3, 4], |n| n * 2);
    println!("   doubled: {:?}", doubled);

    println!("\n10. Drop order (scope-based cleanup):");
    demonstrate_drop_order();

    println!("\n11. Recursion:");
    println!("    factorial(5) = {}", factorial(5));
    println!("    fibonacci(10) = {}", fibonacci(10));

    key_points(&[
        "The last expression without a semicolon is the return value",
        "Return several values as a tuple, failures as Result",
        "Plain functions coerce to `fn` pointers; closures implement Fn traits",
        "Cleanup runs when values go out of scope, in reverse order",
    ]);
}

//! Lesson 2: Variables, types and operators
//!
//! Run with: cargo run --bin lesson_02_variables

use lesson_course::{banner, key_points};

fn main() {
    banner("Rust Variables Tutorial");

    // 1. Bindings are immutable unless marked `mut`
    let name: &str = "Alice";
    let mut age: u32 = 30;
    println!("1. Explicit types:");
    println!("   Name: {}, Age: {}", name, age);
    age += 1;
    println!("   After a birthday: {}\n", age);

    // 2. Type inference
    let city = "San Francisco";
    let year = 2024; // i32 by default
    println!("2. Type inference:");
    println!("   City: {}, Year: {}\n", city, year);

    // 3. Underscores for readability
    let population: u64 = 331_000_000;
    println!("3. Numeric literals:");
    println!("   Population: {}\n", population);

    // 4. Destructuring several bindings at once
    let (x, y, z) = (1, 2, 3);
    let (first_name, last_name) = ("John", "Doe");
    println!("4. Tuple destructuring:");
    println!("   x={}, y={}, z={}", x, y, z);
    println!("   Full name: {} {}\n", first_name, last_name);

    // 5. Shadowing: a new binding with the same name, possibly a new type
    let spaces = "   ";
    let spaces = spaces.len();
    println!("5. Shadowing:");
    println!("   spaces is now a number: {}\n", spaces);

    // 6. No implicit zero values: Default is explicit
    let default_int = i32::default();
    let default_float = f64::default();
    let default_bool = bool::default();
    let default_string = String::default();
    println!("6. Default values:");
    println!("   i32: {}", default_int);
    println!("   f64: {}", default_float);
    println!("   bool: {}", default_bool);
    println!("   String: '{}'\n", default_string);

    // 7. Sized numeric types
    let small: i8 = i8::MAX;
    let large: i64 = i64::MAX;
    let single: f32 = 3.14;
    let double: f64 = std::f64::consts::PI;
    println!("7. Numeric types:");
    println!("   i8: {}", small);
    println!("   i64: {}", large);
    println!("   f32: {}", single);
    println!("   f64: {:.15}\n", double);

    // 8. Strings: borrowed &str vs owned String
    let message = "Hello, Rust!";
    let mut owned = String::from(message);
    owned.push_str(" Welcome.");
    let multiline = "This is a
    multi-line string";
    let raw = r"C:\no\escapes\here";
    println!("8. Strings:");
    println!("   {}", owned);
    println!("   {}", multiline);
    println!("   {}\n", raw);

    // 9. Conversions are explicit
    let int_value: i32 = 42;
    let float_value = f64::from(int_value);
    let truncated = 3.99_f64 as u8;
    let checked = u8::try_from(300_i32);
    println!("9. Type conversion:");
    println!("   i32 {} -> f64 {}", int_value, float_value);
    println!("   3.99 as u8 = {}", truncated);
    println!("   u8::try_from(300) = {:?}\n", checked);

    // 10. Operators
    let (a, b) = (10, 3);
    println!("10. Arithmetic:");
    println!("    {} + {} = {}", a, b, a + b);
    println!("    {} - {} = {}", a, b, a - b);
    println!("    {} * {} = {}", a, b, a * b);
    println!("    {} / {} = {}", a, b, a / b);
    println!("    {} % {} = {}", a, b, a % b);
    println!("    checked_add(i32::MAX, 1) = {:?}\n", i32::MAX.checked_add(1));

    println!("11. Comparison and logic:");
    println!("    10 == 3: {}", a == b);
    println!("    10 > 3: {}", a > b);
    println!("    true && false: {}", true && false);
    println!("    !true: {}", !true);

    key_points(&[
        "`let` bindings are immutable by default; opt in with `mut`",
        "Shadowing creates a new binding and may change the type",
        "Numeric conversions are explicit: `From`, `TryFrom`, or `as`",
        "Overflow can be handled with checked_* methods",
    ]);
}

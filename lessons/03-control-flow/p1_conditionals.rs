//! Lesson 3: Conditionals and pattern matching
//!
//! `if` is an expression in Rust, and `match` replaces switch statements
//! with exhaustive pattern matching.
//!
//! Run with: cargo run --bin lesson_03_conditionals

use std::any::Any;

use lesson_course::{banner, key_points};

fn grade(score: u32) -> char {
    if score >= 90 {
        'A'
    } else if score >= 80 {
        'B'
    } else if score >= 70 {
        'C'
    } else if score >= 60 {
        'D'
    } else {
        'F'
    }
}

fn greeting(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good morning!",
        12..=16 => "Good afternoon!",
        17..=20 => "Good evening!",
        _ => "Good night!",
    }
}

fn describe(value: &dyn Any) -> String {
    if let Some(n) = value.downcast_ref::<i32>() {
        format!("i32 with value {}", n)
    } else if let Some(s) = value.downcast_ref::<&str>() {
        format!("&str with value {}", s)
    } else if let Some(b) = value.downcast_ref::<bool>() {
        format!("bool with value {}", b)
    } else {
        "unknown type".to_string()
    }
}

fn safe_divide(a: f64, b: f64) -> Option<f64> {
    // early return for the bad case
    if b == 0.0 {
        return None;
    }
    Some(a / b)
}

fn main() {
    banner("Rust Control Flow: Conditionals");

    let age = 20;
    if age >= 18 {
        println!("1. Basic if: You are an adult");
    }

    let temperature = 25;
    let feel = if temperature > 20 { "warm" } else { "cool" };
    println!("2. if as an expression: It's {} outside", feel);

    println!("3. else-if chain: score 85 is grade {}", grade(85));

    let num = 7;
    let parity = if num % 2 == 0 { "even" } else { "odd" };
    println!("4. Inline condition: {} is {}", num, parity);

    let has_license = true;
    if age >= 16 && has_license {
        println!("5. Multiple conditions: You can drive");
    }

    let (is_weekend, is_raining) = (true, false);
    print!("6. Nested conditions: ");
    if is_weekend {
        if is_raining {
            println!("Stay home and watch movies");
        } else {
            println!("Go to the park");
        }
    } else {
        println!("Go to work");
    }

    let day = "Friday";
    let plan = match day {
        "Monday" => "Start of the work week",
        "Wednesday" => "Hump day!",
        "Friday" => "TGIF!",
        "Saturday" | "Sunday" => "Weekend!",
        _ => "Regular weekday",
    };
    println!("7. match on a string: {}", plan);

    println!("8. match on ranges: {}", greeting(14));

    let point = (3, -2);
    let quadrant = match point {
        (0, 0) => "origin".to_string(),
        (x, _) if x > 0 && point.1 > 0 => "quadrant I".to_string(),
        (x, y) if x > 0 && y < 0 => "quadrant IV".to_string(),
        (x, y) => format!("somewhere else ({}, {})", x, y),
    };
    println!("9. match with guards: {:?} is in {}", point, quadrant);

    let values: [Box<dyn Any>; 3] = [Box::new(42_i32), Box::new("hello"), Box::new(true)];
    println!("10. Runtime type checks:");
    for value in &values {
        println!("    {}", describe(value.as_ref()));
    }

    let x = 10;
    println!("\n11. Logical operators:");
    if x > 5 && x < 15 {
        println!("    {} is between 5 and 15 (AND)", x);
    }
    if x < 5 || x > 8 {
        println!("    {} is either less than 5 OR greater than 8", x);
    }
    let items: Vec<i32> = vec![1, 2];
    if !items.is_empty() {
        println!("    List is not empty (NOT)");
    }

    let (a, b, c) = (5, 10, 3);
    println!("\n12. Comparing values: max of {}, {}, {} is {}", a, b, c, a.max(b).max(c));

    println!("\n13. Early return:");
    for (x, y) in [(10.0, 2.0), (10.0, 0.0)] {
        match safe_divide(x, y) {
            Some(result) => println!("    {} / {} = {:.2}", x, y, result),
            None => println!("    {} / {} is undefined", x, y),
        }
    }

    key_points(&[
        "`if` and `match` are expressions and produce values",
        "`match` must cover every case; `_` is the catch-all",
        "Guards (`if` after a pattern) add conditions to a match arm",
        "Option makes the 'no result' case explicit",
    ]);
}

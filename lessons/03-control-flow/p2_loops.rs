//! Lesson 3: Loops
//!
//! Run with: cargo run --bin lesson_03_loops

use std::collections::BTreeMap;

use lesson_course::{banner, key_points};

fn main() {
    banner("Rust Control Flow: Loops");

    println!("1. for over a range (0 to 4):");
    for i in 0..5 {
        println!("   i = {}", i);
    }

    println!("\n2. while loop:");
    let mut count = 0;
    while count < 3 {
        println!("   count = {}", count);
        count += 1;
    }

    println!("\n3. loop with break:");
    let mut counter = 0;
    loop {
        counter += 1;
        if counter > 3 {
            println!("   Breaking out of loop");
            break;
        }
        println!("   Iteration {}", counter);
    }

    // loop can return a value through break
    let mut n = 1;
    let first_power_over_100 = loop {
        n *= 2;
        if n > 100 {
            break n;
        }
    };
    println!("   First power of two over 100: {}", first_power_over_100);

    println!("\n4. continue (skip even numbers):");
    for i in 0..10 {
        if i % 2 == 0 {
            continue;
        }
        println!("   Odd number: {}", i);
    }

    let fruits = ["apple", "banana", "cherry"];
    println!("\n5. enumerate:");
    for (index, fruit) in fruits.iter().enumerate() {
        println!("   Index {}: {}", index, fruit);
    }

    println!("\n6. Iterating over chars:");
    for (i, ch) in "Héllo".char_indices() {
        println!("   Byte {}: {} (U+{:04X})", i, ch, ch as u32);
    }

    println!("\n7. Iterating over a map (sorted by key):");
    let ages: BTreeMap<&str, u32> = [("Alice", 30), ("Bob", 25), ("Carol", 35)]
        .into_iter()
        .collect();
    for (name, age) in &ages {
        println!("   {} is {} years old", name, age);
    }

    println!("\n8. Nested loops (multiplication table 1-3):");
    for i in 1..=3 {
        let row: Vec<String> = (1..=3).map(|j| format!("{:>2}", i * j)).collect();
        println!("   {}", row.join(" "));
    }

    println!("\n9. Labeled break:");
    'outer: for i in 0..3 {
        for j in 0..3 {
            if i * j == 2 {
                println!("   Found i={}, j={}; leaving both loops", i, j);
                break 'outer;
            }
        }
    }

    println!("\n10. Reverse and step:");
    let countdown: Vec<i32> = (1..=5).rev().collect();
    let evens: Vec<i32> = (0..=10).step_by(2).collect();
    println!("   Countdown: {:?}", countdown);
    println!("   Evens: {:?}", evens);

    println!("\n11. Iterator adaptors instead of manual loops:");
    let sum_of_squares: i32 = (1..=10).filter(|n| n % 2 == 1).map(|n| n * n).sum();
    println!("   Sum of odd squares up to 10: {}", sum_of_squares);

    key_points(&[
        "`for` iterates anything that implements IntoIterator",
        "`loop` can return a value with `break value`",
        "Labels let `break` and `continue` target an outer loop",
        "Iterator adaptors often replace hand-written loops",
    ]);
}

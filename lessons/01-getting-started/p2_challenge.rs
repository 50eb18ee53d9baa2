//! Lesson 1 challenge: a personalized greeting.
//!
//! 1. Print a greeting with your name
//! 2. Print your favorite programming language
//! 3. Print why you are learning Rust
//!
//! Run with: cargo run --bin lesson_01_challenge

fn main() {
    let name = "Alex";
    let favorite = "Python";

    println!("Hello, my name is {}", name);
    println!("My favorite programming language is {}", favorite);
    println!(
        "I want to learn Rust because it is fast, memory safe, and great for building reliable services"
    );

    // Bonus: a blank line, then several values on one line
    println!();
    println!("{} {}", "Current status:", "Excited to learn Rust!");

    // Named arguments and inline captures
    println!("{greeting}, {name}!", greeting = "Welcome");
    println!("{name} picked {favorite}");
}

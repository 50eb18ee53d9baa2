//! Lesson 1: Hello, World!
//!
//! The smallest Rust program: a `main` function and the `println!` macro.
//!
//! Run with: cargo run --bin lesson_01_hello

fn main() {
    // println! adds the newline for you
    println!("Hello, World!");
    println!("Welcome to Rust!");
    println!("Let's learn Rust together.");

    // print! does not
    print!("Same ");
    print!("line");
    println!();

    // {} formats with Display, {:?} with Debug
    let language = "Rust";
    println!("Learning {} ({:?})", language, language);

    // eprintln! writes to stderr
    eprintln!("(this line went to stderr)");
}

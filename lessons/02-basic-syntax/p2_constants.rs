//! Lesson 2: Constants and statics
//!
//! Run with: cargo run --bin lesson_02_constants

use lesson_course::{banner, key_points};

const APP_NAME: &str = "Rust Tutorial";
const VERSION: &str = env!("CARGO_PKG_VERSION");

const STATUS_OK: u16 = 200;
const STATUS_NOT_FOUND: u16 = 404;
const STATUS_ERROR: u16 = 500;

const PI: f64 = std::f64::consts::PI;
const E: f64 = std::f64::consts::E;
const MAX_SIZE: usize = 100;

static GREETING: &str = "Hello, World!";

const KB: u64 = 1 << 10;
const MB: u64 = 1 << 20;
const GB: u64 = 1 << 30;
const TB: u64 = 1 << 40;

/// Enum discriminants count up from zero, like a constant generator.
#[derive(Debug, Clone, Copy)]
enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

const fn area(width: u32, height: u32) -> u32 {
    width * height
}

const SCREEN_WIDTH: u32 = 1920;
const SCREEN_HEIGHT: u32 = 1080;
const SCREEN_AREA: u32 = area(SCREEN_WIDTH, SCREEN_HEIGHT);

fn main() {
    banner("Rust Constants Tutorial");

    println!("1. Constants and statics:");
    println!("   Greeting: {}", GREETING);
    println!("   App: {} v{}\n", APP_NAME, VERSION);

    println!("2. HTTP status constants:");
    println!("   OK: {}", STATUS_OK);
    println!("   Not Found: {}", STATUS_NOT_FOUND);
    println!("   Error: {}\n", STATUS_ERROR);

    println!("3. Mathematical constants:");
    println!("   Pi: {:.11}", PI);
    println!("   E: {:.11}", E);
    let radius = 5.0;
    println!("   Circle with radius {:.1} has circumference {:.2}\n", radius, 2.0 * PI * radius);

    println!("4. Enum discriminants:");
    for day in [Weekday::Sunday, Weekday::Monday, Weekday::Friday] {
        println!("   {:?}: {}", day, day as u8);
    }
    println!(
        "   (and {:?}, {:?}, {:?}, {:?} in between)\n",
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Saturday
    );

    println!("5. File size constants:");
    println!("   1 KB = {} bytes", KB);
    println!("   1 MB = {} bytes", MB);
    println!("   1 GB = {} bytes", GB);
    println!("   1 TB = {} bytes\n", TB);

    let mut variable = 10;
    variable += 10;
    println!("6. Constants vs variables:");
    println!("   Variable can change: {}", variable);
    println!("   Constant cannot change: {}\n", MAX_SIZE);
    // MAX_SIZE = 200; would not compile

    println!("7. Compile-time evaluation with const fn:");
    println!("   Screen: {}x{}", SCREEN_WIDTH, SCREEN_HEIGHT);
    println!("   Area: {} pixels", SCREEN_AREA);
    println!(
        "   Aspect ratio: {:.2}",
        SCREEN_WIDTH as f64 / SCREEN_HEIGHT as f64
    );

    key_points(&[
        "`const` values are inlined at every use and need an explicit type",
        "`static` has one fixed address for the whole program",
        "Enums with discriminants replace counter-style constant blocks",
        "`const fn` runs at compile time when used in a const context",
    ]);
}

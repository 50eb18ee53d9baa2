//! Lesson 2 challenge: temperature converter.
//!
//! Convert Celsius to Fahrenheit (F = C * 9/5 + 32) and Kelvin
//! (K = C + 273.15), then try a few interesting values.
//!
//! Run with: cargo run --bin lesson_02_temperature

use lesson_course::{banner, key_points, section};

const C_TO_F_RATIO: f64 = 9.0 / 5.0;
const F_OFFSET: f64 = 32.0;
const K_OFFSET: f64 = 273.15;

fn to_fahrenheit(celsius: f64) -> f64 {
    celsius * C_TO_F_RATIO + F_OFFSET
}

fn to_kelvin(celsius: f64) -> f64 {
    celsius + K_OFFSET
}

fn main() {
    banner("Temperature Converter");

    section("Basic Conversion");
    let celsius = 25.0;
    println!("Temperature: {:.2}°C", celsius);
    println!("Temperature: {:.2}°F", to_fahrenheit(celsius));
    println!("Temperature: {:.2}K\n", to_kelvin(celsius));

    section("Several Temperatures");
    for c in [-40.0, 0.0, 25.0, 100.0] {
        println!("{:>8.2}°C = {:>7.2}°F = {:>7.2}K", c, to_fahrenheit(c), to_kelvin(c));
    }
    println!();

    section("Interesting Facts");
    println!("-40°C = {:.0}°F (the scales meet at -40)", to_fahrenheit(-40.0));
    println!(
        "Water freezes at 0°C = {:.0}°F = {:.2}K",
        to_fahrenheit(0.0),
        to_kelvin(0.0)
    );
    println!(
        "Water boils at 100°C = {:.0}°F = {:.2}K",
        to_fahrenheit(100.0),
        to_kelvin(100.0)
    );
    let room = 22.0;
    println!(
        "Room temperature: {:.1}°C, F - C difference is {:.1}",
        room,
        to_fahrenheit(room) - room
    );

    key_points(&[
        "Keep every temperature in f64 so arithmetic never mixes types",
        "Name the magic numbers with `const`",
        "`{:.2}` formats a float to two decimal places",
    ]);
}

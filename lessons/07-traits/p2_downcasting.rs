//! Lesson 7: Downcasting with Any
//!
//! Run with: cargo run --bin lesson_07_downcasting

use std::any::Any;

use lesson_course::shapes::{describe, Circle, Rectangle, Shape, Triangle};
use lesson_course::{banner, key_points, section};

fn inspect(value: &dyn Any) -> String {
    if let Some(n) = value.downcast_ref::<i32>() {
        format!("i32 with value {}", n)
    } else if let Some(s) = value.downcast_ref::<String>() {
        format!("String of length {}", s.len())
    } else if let Some(s) = value.downcast_ref::<&str>() {
        format!("&str {:?}", s)
    } else if let Some(b) = value.downcast_ref::<bool>() {
        format!("bool {}", b)
    } else {
        "something else".to_string()
    }
}

enum Value {
    Int(i64),
    Text(String),
    Flag(bool),
}

/// When the set of types is closed, an enum is the better tool.
fn inspect_enum(value: &Value) -> String {
    match value {
        Value::Int(n) => format!("int {}", n),
        Value::Text(s) => format!("text {:?}", s),
        Value::Flag(b) => format!("flag {}", b),
    }
}

fn main() {
    banner("Downcasting");

    section("dyn Any");
    let values: Vec<Box<dyn Any>> = vec![
        Box::new(42i32),
        Box::new(String::from("hello")),
        Box::new("borrowed"),
        Box::new(true),
        Box::new(3.5f64),
    ];
    for (i, v) in values.iter().enumerate() {
        println!("{}. {}", i + 1, inspect(v.as_ref()));
    }

    println!();
    section("Owned downcast");
    let boxed: Box<dyn Any> = Box::new(7u8);
    match boxed.downcast::<u8>() {
        Ok(n) => println!("Recovered u8: {}", n),
        Err(_) => println!("Not a u8"),
    }

    println!();
    section("Downcasting trait objects");
    let shapes: Vec<Box<dyn Shape>> = vec![
        Box::new(Rectangle {
            width: 4.0,
            height: 4.0,
        }),
        Box::new(Rectangle {
            width: 3.0,
            height: 2.0,
        }),
        Box::new(Circle { radius: 1.5 }),
        Box::new(Triangle {
            a: 3.0,
            b: 3.0,
            c: 3.0,
        }),
    ];
    for s in &shapes {
        println!("{} is {}", s, describe(s.as_ref()));
    }

    println!();
    section("Enums instead");
    for v in [Value::Int(1), Value::Text("two".into()), Value::Flag(false)] {
        println!("{}", inspect_enum(&v));
    }

    key_points(&[
        "downcast_ref::<T>() returns Some only for the exact concrete type",
        "Trait objects expose Any through an as_any() method",
        "Prefer an enum with match when every variant is known up front",
    ]);
}

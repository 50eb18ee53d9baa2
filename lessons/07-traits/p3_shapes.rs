//! Lesson 7 challenge: shape calculator
//!
//! Run with: cargo run --bin lesson_07_shapes

use lesson_course::shapes::{Circle, Drawable, Rectangle, Shape, ShapeCollection, Triangle};
use lesson_course::{banner, key_points, section};

fn main() {
    banner("Shape Calculator");

    let mut shapes = ShapeCollection::new();
    shapes.add(Rectangle {
        width: 5.0,
        height: 3.0,
    });
    shapes.add(Circle { radius: 2.5 });
    shapes.add(Triangle {
        a: 3.0,
        b: 4.0,
        c: 5.0,
    });
    shapes.add(Rectangle {
        width: 2.0,
        height: 2.0,
    });

    section("All shapes");
    for (i, shape) in shapes.iter().enumerate() {
        println!(
            "{}. {:<26} area={:>7.2} perimeter={:>6.2}",
            i + 1,
            shape.to_string(),
            shape.area(),
            shape.perimeter()
        );
    }

    println!();
    section("Totals");
    println!("Shapes: {}", shapes.len());
    println!("Total area: {:.2}", shapes.total_area());
    if let Some(largest) = shapes.largest() {
        println!("Largest: {} ({:.2})", largest.name(), largest.area());
    }

    println!();
    section("Drawable shapes");
    let drawables: Vec<Box<dyn Drawable>> = vec![
        Box::new(Rectangle {
            width: 6.0,
            height: 2.0,
        }),
        Box::new(Circle { radius: 1.0 }),
    ];
    for d in &drawables {
        println!("{}\n", d.draw());
    }

    key_points(&[
        "One trait, many implementations, stored as Box<dyn Shape>",
        "Optional capabilities are separate traits such as Drawable",
        "Aggregate functions work on any slice of trait objects",
    ]);
}

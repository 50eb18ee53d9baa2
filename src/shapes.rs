// Shapes for the trait lesson: a common `Shape` trait, an optional
// `Drawable` capability, and downcasting through `Any` for shape-specific
// details.

use std::any::Any;
use std::f64::consts::PI;
use std::fmt;

pub trait Shape: fmt::Display + Any {
    fn area(&self) -> f64;
    fn perimeter(&self) -> f64;
    fn name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;
}

pub trait Drawable {
    /// ASCII sketch of the shape.
    fn draw(&self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Shape for Rectangle {
    fn area(&self) -> f64 {
        self.width * self.height
    }

    fn perimeter(&self) -> f64 {
        2.0 * (self.width + self.height)
    }

    fn name(&self) -> &'static str {
        "Rectangle"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Shape for Circle {
    fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    fn perimeter(&self) -> f64 {
        2.0 * PI * self.radius
    }

    fn name(&self) -> &'static str {
        "Circle"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Shape for Triangle {
    // Heron's formula
    fn area(&self) -> f64 {
        let s = self.perimeter() / 2.0;
        (s * (s - self.a) * (s - self.b) * (s - self.c)).sqrt()
    }

    fn perimeter(&self) -> f64 {
        self.a + self.b + self.c
    }

    fn name(&self) -> &'static str {
        "Triangle"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drawable for Rectangle {
    fn draw(&self) -> String {
        let w = (self.width.round() as usize).clamp(1, 20);
        let h = (self.height.round() as usize).clamp(1, 10);
        vec!["#".repeat(w); h].join("\n")
    }
}

impl Drawable for Circle {
    fn draw(&self) -> String {
        [" *** ", "*   *", " *** "].join("\n")
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Rectangle({:.2} x {:.2})", self.width, self.height)
    }
}

impl fmt::Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Circle(r={:.2})", self.radius)
    }
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Triangle({:.2}, {:.2}, {:.2})", self.a, self.b, self.c)
    }
}

pub fn total_area(shapes: &[Box<dyn Shape>]) -> f64 {
    shapes.iter().map(|s| s.area()).sum()
}

pub fn find_largest(shapes: &[Box<dyn Shape>]) -> Option<&dyn Shape> {
    shapes
        .iter()
        .max_by(|a, b| a.area().total_cmp(&b.area()))
        .map(|s| s.as_ref())
}

/// One line of shape-specific detail, found by downcasting.
pub fn describe(shape: &dyn Shape) -> String {
    let any = shape.as_any();
    if let Some(r) = any.downcast_ref::<Rectangle>() {
        if r.width == r.height {
            format!("a square with side {:.2}", r.width)
        } else {
            format!("a rectangle {:.2} wide and {:.2} tall", r.width, r.height)
        }
    } else if let Some(c) = any.downcast_ref::<Circle>() {
        format!("a circle with diameter {:.2}", c.radius * 2.0)
    } else if let Some(t) = any.downcast_ref::<Triangle>() {
        if t.a == t.b && t.b == t.c {
            "an equilateral triangle".to_string()
        } else {
            "a triangle".to_string()
        }
    } else {
        format!("an unknown {}", shape.name())
    }
}

#[derive(Default)]
pub struct ShapeCollection {
    shapes: Vec<Box<dyn Shape>>,
}

impl ShapeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, shape: impl Shape) {
        self.shapes.push(Box::new(shape));
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn total_area(&self) -> f64 {
        total_area(&self.shapes)
    }

    pub fn largest(&self) -> Option<&dyn Shape> {
        find_largest(&self.shapes)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Shape> {
        self.shapes.iter().map(|s| s.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_areas_and_perimeters() {
        let r = Rectangle { width: 3.0, height: 4.0 };
        assert!(approx(r.area(), 12.0));
        assert!(approx(r.perimeter(), 14.0));

        let c = Circle { radius: 1.0 };
        assert!(approx(c.area(), PI));
        assert!(approx(c.perimeter(), 2.0 * PI));

        let t = Triangle { a: 3.0, b: 4.0, c: 5.0 };
        assert!(approx(t.area(), 6.0));
        assert!(approx(t.perimeter(), 12.0));
    }

    #[test]
    fn test_collection_totals_and_largest() {
        let mut shapes = ShapeCollection::new();
        assert!(shapes.largest().is_none());

        shapes.add(Rectangle { width: 2.0, height: 2.0 });
        shapes.add(Circle { radius: 3.0 });
        shapes.add(Triangle { a: 3.0, b: 4.0, c: 5.0 });

        assert_eq!(shapes.len(), 3);
        assert!(approx(shapes.total_area(), 4.0 + 9.0 * PI + 6.0));
        assert_eq!(shapes.largest().map(|s| s.name()), Some("Circle"));
    }

    #[test]
    fn test_describe_downcasts() {
        assert_eq!(
            describe(&Rectangle { width: 2.0, height: 2.0 }),
            "a square with side 2.00"
        );
        assert_eq!(describe(&Circle { radius: 1.5 }), "a circle with diameter 3.00");
        assert_eq!(
            describe(&Triangle { a: 1.0, b: 1.0, c: 1.0 }),
            "an equilateral triangle"
        );
    }

    #[test]
    fn test_display_and_draw() {
        assert_eq!(Circle { radius: 2.0 }.to_string(), "Circle(r=2.00)");
        assert_eq!(Rectangle { width: 3.0, height: 2.0 }.draw(), "###\n###");
    }
}

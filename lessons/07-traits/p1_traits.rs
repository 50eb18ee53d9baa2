//! Lesson 7: Traits
//!
//! Run with: cargo run --bin lesson_07_traits

use std::fmt;

use lesson_course::{banner, key_points, section};

trait Speaker {
    fn name(&self) -> String;
    fn sound(&self) -> String;

    /// Provided method built on the required ones.
    fn speak(&self) -> String {
        format!("{} says {}", self.name(), self.sound())
    }
}

struct Dog {
    name: String,
}

struct Cat {
    name: String,
    lives: u8,
}

impl Speaker for Dog {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn sound(&self) -> String {
        "Woof".to_string()
    }
}

impl Speaker for Cat {
    fn name(&self) -> String {
        format!("{} ({} lives)", self.name, self.lives)
    }

    fn sound(&self) -> String {
        "Meow".to_string()
    }

    fn speak(&self) -> String {
        format!("{} purrs and says {}", self.name(), self.sound())
    }
}

trait Reader {
    fn read(&mut self) -> Option<String>;
}

trait Writer {
    fn write(&mut self, line: &str);
}

/// A type can implement several traits; functions can require both.
#[derive(Default)]
struct Buffer {
    lines: Vec<String>,
}

impl Reader for Buffer {
    fn read(&mut self) -> Option<String> {
        if self.lines.is_empty() {
            None
        } else {
            Some(self.lines.remove(0))
        }
    }
}

impl Writer for Buffer {
    fn write(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

fn echo<T: Reader + Writer>(rw: &mut T, line: &str) -> Option<String> {
    rw.write(line);
    rw.read()
}

struct Point {
    x: i32,
    y: i32,
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Static dispatch: one copy per concrete type.
fn announce(s: &impl Speaker) {
    println!("   {}", s.speak());
}

fn largest<T: PartialOrd + Copy>(items: &[T]) -> Option<T> {
    let mut iter = items.iter().copied();
    let first = iter.next()?;
    Some(iter.fold(first, |max, x| if x > max { x } else { max }))
}

fn main() {
    banner("Traits");

    section("Implementing a trait");
    let dog = Dog {
        name: "Rex".to_string(),
    };
    let cat = Cat {
        name: "Tom".to_string(),
        lives: 9,
    };
    println!("1. {}", dog.speak());
    println!("2. {}", cat.speak());

    println!();
    section("Static dispatch");
    announce(&dog);
    announce(&cat);

    println!();
    section("Trait objects");
    let animals: Vec<Box<dyn Speaker>> = vec![
        Box::new(dog),
        Box::new(cat),
        Box::new(Dog {
            name: "Fido".to_string(),
        }),
    ];
    for (i, a) in animals.iter().enumerate() {
        println!("{}. {}", i + 1, a.speak());
    }

    println!();
    section("Trait composition");
    let mut buffer = Buffer::default();
    println!("echo -> {:?}", echo(&mut buffer, "hello"));

    println!();
    section("Standard library traits");
    let p = Point { x: 3, y: -1 };
    println!("1. Display: {}", p);
    println!("2. to_string(): {}", p.to_string());

    println!();
    section("Generics with trait bounds");
    println!("1. largest of [3, 9, 2] = {:?}", largest(&[3, 9, 2]));
    println!("2. largest of ['a', 'z', 'q'] = {:?}", largest(&['a', 'z', 'q']));
    println!("3. largest of [] = {:?}", largest::<i32>(&[]));

    key_points(&[
        "Traits declare behaviour; types opt in with impl Trait for Type",
        "Default methods can be overridden per type",
        "impl Trait and generics dispatch statically; dyn Trait dispatches at runtime",
        "Bounds like T: PartialOrd + Copy say what a generic needs",
    ]);
}

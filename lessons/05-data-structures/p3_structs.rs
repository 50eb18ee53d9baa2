//! Lesson 5: Structs
//!
//! Run with: cargo run --bin lesson_05_structs

use std::fmt;

use lesson_course::{banner, key_points, section};

#[derive(Debug, Clone, PartialEq)]
struct Person {
    name: String,
    age: u32,
    email: String,
}

impl Person {
    fn new(name: &str, age: u32, email: &str) -> Self {
        Person {
            name: name.to_string(),
            age,
            email: email.to_string(),
        }
    }

    fn greet(&self) -> String {
        format!("Hi, I'm {} and I'm {} years old", self.name, self.age)
    }

    fn birthday(&mut self) {
        self.age += 1;
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

#[derive(Debug, Default)]
struct Address {
    street: String,
    city: String,
    country: String,
}

#[derive(Debug)]
struct Employee {
    person: Person,
    address: Address,
    salary: f64,
}

/// Tuple struct: a distinct type around a single value.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
struct Celsius(f64);

/// Unit struct.
#[derive(Debug)]
struct Marker;

fn main() {
    banner("Structs");

    section("Construction");
    let mut alice = Person::new("Alice", 30, "alice@example.com");
    println!("1. {:?}", alice);
    println!("2. Display: {}", alice);
    println!("3. {}", alice.greet());

    alice.birthday();
    println!("4. After birthday: {}", alice.age);

    let bob = Person {
        name: "Bob".to_string(),
        ..alice.clone()
    };
    println!("5. Struct update syntax: {:?}", bob);

    println!();
    section("Composition");
    let employee = Employee {
        person: Person::new("Carol", 41, "carol@example.com"),
        address: Address {
            street: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            ..Default::default()
        },
        salary: 85_000.0,
    };
    println!("1. {} lives in {}", employee.person.name, employee.address.city);
    println!("2. Country left at default: {:?}", employee.address.country);
    println!("3. Street: {}", employee.address.street);
    println!("4. Salary: {:.2}", employee.salary);

    println!();
    section("Tuple and unit structs");
    let boiling = Celsius(100.0);
    let body = Celsius(37.0);
    println!("1. {:?} > {:?} is {}", boiling, body, boiling > body);
    println!("2. Inner value: {}", boiling.0);
    println!("3. Unit struct: {:?}", Marker);

    println!();
    section("Equality and destructuring");
    let copy = alice.clone();
    println!("1. clone == original: {}", copy == alice);
    let Person { name, age, .. } = copy;
    println!("2. Destructured: {} is {}", name, age);

    key_points(&[
        "Methods live in impl blocks; &self reads, &mut self modifies",
        "Derive Debug, Clone and PartialEq instead of writing them by hand",
        "Struct update syntax fills remaining fields from another value",
        "Tuple structs give a plain value its own type",
    ]);
}

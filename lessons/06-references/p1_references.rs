//! Lesson 6: References and borrowing
//!
//! Run with: cargo run --bin lesson_06_references

use lesson_course::{banner, key_points, section};

#[derive(Debug, Clone)]
struct Person {
    name: String,
    age: u32,
}

impl Person {
    fn info(&self) -> String {
        format!("{} ({} years old)", self.name, self.age)
    }

    fn have_birthday(&mut self) {
        self.age += 1;
    }

    fn rename(&mut self, name: &str) {
        self.name = name.to_string();
    }
}

fn swap(a: &mut i32, b: &mut i32) {
    std::mem::swap(a, b);
}

fn modify_person(p: &mut Person) {
    p.name = format!("Modified {}", p.name);
    p.age += 10;
}

fn double_values(numbers: &mut [i32]) {
    for n in numbers.iter_mut() {
        *n *= 2;
    }
}

/// Takes ownership of a copy; the caller's value is untouched.
fn try_modify_by_value(mut p: Person) {
    p.name = "Modified".to_string();
    p.age = 100;
}

fn create_person(name: &str, age: u32) -> Box<Person> {
    Box::new(Person {
        name: name.to_string(),
        age,
    })
}

/// `Option<&mut T>` replaces a nullable pointer.
fn safe_modify(person: Option<&mut Person>) {
    match person {
        Some(p) => p.age += 1,
        None => println!("   Nothing to modify"),
    }
}

fn main() {
    banner("References and Borrowing");

    section("Basics");
    let x = 42;
    let r = &x;
    println!("1. x = {}, *r = {}", x, *r);
    let mut y = 10;
    {
        let m = &mut y;
        *m += 5;
    }
    println!("2. y after mutation through &mut: {}", y);

    println!();
    section("Swap");
    let (mut a, mut b) = (10, 20);
    println!("Before: a={}, b={}", a, b);
    swap(&mut a, &mut b);
    println!("After:  a={}, b={}", a, b);

    println!();
    section("Mutating through references");
    let mut alice = Person {
        name: "Alice".to_string(),
        age: 25,
    };
    println!("1. Before: {}", alice.info());
    modify_person(&mut alice);
    println!("2. After:  {}", alice.info());

    let mut numbers = vec![1, 2, 3, 4, 5];
    double_values(&mut numbers);
    println!("3. Doubled: {:?}", numbers);

    println!();
    section("&self vs &mut self");
    let mut bob = Person {
        name: "Bob".to_string(),
        age: 30,
    };
    println!("1. info(): {}", bob.info());
    bob.have_birthday();
    println!("2. after have_birthday(): {}", bob.info());
    bob.rename("Robert");
    println!("3. after rename(): {}", bob.info());

    println!();
    section("Moves and copies");
    let carol = Person {
        name: "Carol".to_string(),
        age: 28,
    };
    try_modify_by_value(carol.clone());
    println!("1. After passing a clone: {} (unchanged)", carol.info());

    let boxed = create_person("David", 35);
    println!("2. Boxed on the heap: {}", boxed.info());

    println!();
    section("Option instead of null");
    safe_modify(None);
    let mut eve = Person {
        name: "Eve".to_string(),
        age: 27,
    };
    safe_modify(Some(&mut eve));
    println!("Eve now: {}", eve.info());

    key_points(&[
        "Any number of & borrows, or exactly one &mut borrow, at a time",
        "The borrow checker rejects dangling references at compile time",
        "Box<T> puts a value on the heap with a single owner",
        "Option<&T> makes absence explicit where other languages use null",
    ]);
}

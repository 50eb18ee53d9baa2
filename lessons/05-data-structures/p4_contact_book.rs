//! Lesson 5 challenge: contact book
//!
//! Run with: cargo run --bin lesson_05_contact_book

use lesson_course::contacts::{
    add_contact, delete_contact, find_contact, update_contact, Contact, ContactBook,
};
use lesson_course::{banner, key_points, section};

fn print_contacts(contacts: &[Contact]) {
    for (i, c) in contacts.iter().enumerate() {
        println!("{}. {} - {} - {}", i + 1, c.name, c.phone, c.email);
    }
}

fn main() {
    banner("Contact Book");

    section("Slice-backed contacts");
    let mut contacts = Vec::new();
    add_contact(&mut contacts, Contact::new("Alice", "555-0101", "alice@example.com"));
    add_contact(&mut contacts, Contact::new("Bob", "555-0102", "bob@example.com"));
    add_contact(&mut contacts, Contact::new("Carol", "555-0103", "carol@example.com"));
    print_contacts(&contacts);

    match find_contact(&contacts, "Bob") {
        Some(c) => println!("\nFound Bob: {}", c.phone),
        None => println!("\nBob not found"),
    }

    let updated = update_contact(
        &mut contacts,
        "Bob",
        Contact::new("Bob", "555-9999", "bob@newmail.com"),
    );
    println!("Updated Bob: {}", updated);

    let removed = delete_contact(&mut contacts, "Alice");
    println!("Deleted {} contact(s) named Alice\n", removed);
    print_contacts(&contacts);

    println!();
    section("Map-backed contact book");
    let mut book = ContactBook::new();
    for c in &contacts {
        book.add(c.clone());
    }
    book.add(Contact::new("Dave", "555-0104", "dave@work.org"));
    println!("{} contacts", book.len());

    if let Some(c) = book.find_by_phone("555-0104") {
        println!("By phone 555-0104: {}", c.name);
    }

    println!("Search \"example\":");
    for c in book.search("example") {
        println!("  {}", c.name);
    }

    book.delete("Carol");
    println!("Sorted after deleting Carol:");
    for c in book.list_sorted() {
        println!("  {} ({})", c.name, c.email);
    }

    key_points(&[
        "A Vec of structs is the simplest collection; find returns Option<&T>",
        "retain removes matching elements in place",
        "A HashMap keyed by name gives constant-time lookup",
    ]);
}

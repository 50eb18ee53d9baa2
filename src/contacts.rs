//! Contact book from the data-structures challenge.
//!
//! The free functions work on a plain `Vec<Contact>` the way the first half
//! of the challenge asks; `ContactBook` is the map-backed follow-up.

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl Contact {
    pub fn new(name: &str, phone: &str, email: &str) -> Self {
        Contact {
            name: name.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
        }
    }
}

pub fn add_contact(contacts: &mut Vec<Contact>, contact: Contact) {
    contacts.push(contact);
}

pub fn find_contact<'a>(contacts: &'a [Contact], name: &str) -> Option<&'a Contact> {
    contacts.iter().find(|c| c.name == name)
}

/// Removes every contact called `name`. Returns how many were removed.
pub fn delete_contact(contacts: &mut Vec<Contact>, name: &str) -> usize {
    let before = contacts.len();
    contacts.retain(|c| c.name != name);
    before - contacts.len()
}

pub fn update_contact(contacts: &mut [Contact], name: &str, updated: Contact) -> bool {
    match contacts.iter_mut().find(|c| c.name == name) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}

#[derive(Debug, Default)]
pub struct ContactBook {
    by_name: HashMap<String, Contact>,
}

impl ContactBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the contact with the same name.
    pub fn add(&mut self, contact: Contact) -> Option<Contact> {
        self.by_name.insert(contact.name.clone(), contact)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Contact> {
        self.by_name.get(name)
    }

    pub fn find_by_phone(&self, phone: &str) -> Option<&Contact> {
        self.by_name.values().find(|c| c.phone == phone)
    }

    pub fn delete(&mut self, name: &str) -> Option<Contact> {
        self.by_name.remove(name)
    }

    /// Case-insensitive match against name or email, sorted by name.
    pub fn search(&self, query: &str) -> Vec<&Contact> {
        let query = query.to_lowercase();
        let mut hits: Vec<&Contact> = self
            .by_name
            .values()
            .filter(|c| {
                c.name.to_lowercase().contains(&query) || c.email.to_lowercase().contains(&query)
            })
            .collect();
        hits.sort_by(|a, b| a.name.cmp(&b.name));
        hits
    }

    pub fn list_sorted(&self) -> Vec<&Contact> {
        let mut all: Vec<&Contact> = self.by_name.values().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Contact> {
        vec![
            Contact::new("Alice", "555-0001", "alice@example.com"),
            Contact::new("Bob", "555-0002", "bob@example.com"),
        ]
    }

    #[test]
    fn test_vec_operations() {
        let mut contacts = sample();
        add_contact(&mut contacts, Contact::new("Carol", "555-0003", "carol@example.com"));
        assert_eq!(contacts.len(), 3);

        assert_eq!(find_contact(&contacts, "Bob").map(|c| c.phone.as_str()), Some("555-0002"));
        assert!(find_contact(&contacts, "Zed").is_none());

        assert!(update_contact(
            &mut contacts,
            "Bob",
            Contact::new("Bob", "555-9999", "bob@new.com")
        ));
        assert_eq!(find_contact(&contacts, "Bob").unwrap().phone, "555-9999");
        assert!(!update_contact(&mut contacts, "Zed", Contact::new("Zed", "", "")));

        assert_eq!(delete_contact(&mut contacts, "Alice"), 1);
        assert_eq!(delete_contact(&mut contacts, "Alice"), 0);
        assert_eq!(contacts.len(), 2);
    }

    #[test]
    fn test_book_lookup_and_search() {
        let mut book = ContactBook::new();
        for c in sample() {
            book.add(c);
        }
        book.add(Contact::new("alicia", "555-0004", "ALICIA@example.com"));

        assert_eq!(book.find_by_phone("555-0002").map(|c| c.name.as_str()), Some("Bob"));
        let names: Vec<_> = book.search("ALI").iter().map(|c| c.name.clone()).collect();
        assert_eq!(names, vec!["Alice", "alicia"]);

        let sorted: Vec<_> = book.list_sorted().iter().map(|c| c.name.clone()).collect();
        assert_eq!(sorted, vec!["Alice", "Bob", "alicia"]);

        assert!(book.delete("Bob").is_some());
        assert!(book.find_by_name("Bob").is_none());
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn test_add_replaces_same_name() {
        let mut book = ContactBook::new();
        assert!(book.add(Contact::new("Alice", "1", "a@x.com")).is_none());
        let previous = book.add(Contact::new("Alice", "2", "a@y.com"));
        assert_eq!(previous.map(|c| c.phone), Some("1".to_string()));
        assert_eq!(book.len(), 1);
    }
}

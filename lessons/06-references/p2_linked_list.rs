//! Lesson 6 challenge: singly linked list with owned nodes
//!
//! Run with: cargo run --bin lesson_06_linked_list

use std::fmt;

use lesson_course::{banner, key_points};

#[derive(Debug)]
struct Node {
    value: i32,
    next: Option<Box<Node>>,
}

#[derive(Debug, Default)]
struct LinkedList {
    head: Option<Box<Node>>,
    len: usize,
}

impl LinkedList {
    fn new() -> Self {
        Self::default()
    }

    fn push_front(&mut self, value: i32) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { value, next }));
        self.len += 1;
    }

    fn push_back(&mut self, value: i32) {
        let mut cursor = &mut self.head;
        while let Some(node) = cursor {
            cursor = &mut node.next;
        }
        *cursor = Some(Box::new(Node { value, next: None }));
        self.len += 1;
    }

    fn pop_front(&mut self) -> Option<i32> {
        self.head.take().map(|node| {
            self.head = node.next;
            self.len -= 1;
            node.value
        })
    }

    fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    fn reverse(&mut self) {
        let mut previous = None;
        let mut current = self.head.take();
        while let Some(mut node) = current {
            current = node.next.take();
            node.next = previous;
            previous = Some(node);
        }
        self.head = previous;
    }

    fn contains(&self, value: i32) -> bool {
        self.iter().any(|v| v == value)
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl Drop for LinkedList {
    // iterative so long lists don't overflow the stack
    fn drop(&mut self) {
        let mut current = self.head.take();
        while let Some(mut node) = current {
            current = node.next.take();
        }
    }
}

struct Iter<'a> {
    next: Option<&'a Node>,
}

impl Iterator for Iter<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            node.value
        })
    }
}

impl fmt::Display for LinkedList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|v| v.to_string()).collect();
        write!(f, "{}", parts.join(" -> "))
    }
}

fn main() {
    banner("Linked List");

    let mut list = LinkedList::new();
    for v in 1..=4 {
        list.push_back(v);
    }
    println!("1. Built with push_back: {}", list);

    list.push_front(0);
    println!("2. After push_front(0): {} (len {})", list, list.len());

    println!("3. pop_front -> {:?}", list.pop_front());

    list.reverse();
    println!("4. Reversed: {}", list);

    println!("5. contains(3) = {}, contains(9) = {}", list.contains(3), list.contains(9));

    let sum: i32 = list.iter().sum();
    println!("6. Sum via iterator: {}", sum);

    key_points(&[
        "Option<Box<Node>> is an owned, possibly empty link",
        "take() moves a value out of an Option and leaves None behind",
        "Borrowing iterators walk the list without consuming it",
    ]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_pop() {
        let mut list = LinkedList::new();
        list.push_back(2);
        list.push_front(1);
        list.push_back(3);
        assert_eq!(list.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_empty_list() {
        let mut list = LinkedList::new();
        assert_eq!(list.pop_front(), None);
        assert_eq!(list.to_string(), "");
        list.reverse();
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn test_reverse() {
        let mut list = LinkedList::new();
        for v in 1..=5 {
            list.push_back(v);
        }
        list.reverse();
        assert_eq!(list.to_string(), "5 -> 4 -> 3 -> 2 -> 1");
    }

    #[test]
    fn test_long_list_drops() {
        let mut list = LinkedList::new();
        for v in 0..100_000 {
            list.push_front(v);
        }
        assert_eq!(list.len(), 100_000);
    }
}

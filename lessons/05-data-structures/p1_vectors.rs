//! Lesson 5: Arrays, slices and vectors
//!
//! Run with: cargo run --bin lesson_05_vectors

use lesson_course::{banner, key_points, section};

fn main() {
    banner("Arrays, Slices and Vectors");

    section("Arrays");
    let mut fixed = [0i32; 5];
    fixed[0] = 10;
    fixed[4] = 50;
    println!("1. Fixed-size array: {:?} (len {})", fixed, fixed.len());
    let primes = [2, 3, 5, 7, 11];
    println!("2. Array literal: {:?}", primes);

    // arrays are Copy when their elements are
    let mut copy = primes;
    copy[0] = 100;
    println!("3. Copy is independent: original {:?}, copy {:?}", primes, copy);

    println!();
    section("Vectors");
    let mut numbers: Vec<i32> = Vec::new();
    println!("1. Empty: {:?} len={} capacity={}", numbers, numbers.len(), numbers.capacity());
    for n in 1..=5 {
        numbers.push(n);
        println!("   push {} -> len={} capacity={}", n, numbers.len(), numbers.capacity());
    }

    let mut preallocated = Vec::with_capacity(10);
    preallocated.extend([1, 2, 3]);
    println!(
        "2. with_capacity(10): len={} capacity={}",
        preallocated.len(),
        preallocated.capacity()
    );

    numbers.extend_from_slice(&[6, 7, 8]);
    println!("3. extend_from_slice: {:?}", numbers);

    println!();
    section("Slices");
    let middle = &numbers[2..5];
    println!("1. numbers[2..5] = {:?}", middle);
    println!("2. numbers[..3] = {:?}, numbers[5..] = {:?}", &numbers[..3], &numbers[5..]);

    {
        // a mutable slice writes through to the vector
        let window = &mut numbers[0..2];
        window[0] = 99;
    }
    println!("3. after writing through a slice: {:?}", numbers);

    println!("4. safe access: get(100) = {:?}", numbers.get(100));

    println!();
    section("Common operations");
    let last = numbers.pop();
    println!("1. pop -> {:?}, now {:?}", last, numbers);
    numbers.insert(1, 42);
    println!("2. insert(1, 42) -> {:?}", numbers);
    let removed = numbers.remove(0);
    println!("3. remove(0) -> {}, now {:?}", removed, numbers);
    numbers.retain(|&n| n % 2 == 0);
    println!("4. retain evens -> {:?}", numbers);
    numbers.sort_unstable_by(|a, b| b.cmp(a));
    println!("5. sort descending -> {:?}", numbers);
    println!("6. contains(&42) -> {}", numbers.contains(&42));

    println!();
    section("Iteration");
    let words = vec!["apple", "banana", "cherry"];
    for (i, word) in words.iter().enumerate() {
        println!("{}. {}", i + 1, word);
    }
    let lengths: Vec<usize> = words.iter().map(|w| w.len()).collect();
    println!("lengths: {:?}", lengths);

    println!();
    section("2D vectors");
    let mut grid = vec![vec![0; 3]; 3];
    for (row, cells) in grid.iter_mut().enumerate() {
        for (col, cell) in cells.iter_mut().enumerate() {
            *cell = row * 3 + col;
        }
    }
    for row in &grid {
        println!("{:?}", row);
    }

    key_points(&[
        "Arrays have a length fixed at compile time; Vec grows on the heap",
        "Slices borrow a view into an array or vector without copying",
        "Preallocate with Vec::with_capacity when the size is known",
        "Use get() for indices that might be out of bounds",
    ]);
}

//! Lesson 3 challenge: FizzBuzzBoom.
//!
//! Multiples of 3 print "Fizz", of 5 "Buzz", of 7 "Boom", and the words
//! combine for numbers divisible by several of them.
//!
//! Run with: cargo run --bin lesson_03_fizzbuzzboom

use lesson_course::{banner, key_points, section};

const RULES: [(u32, &str); 3] = [(3, "Fizz"), (5, "Buzz"), (7, "Boom")];

fn fizz_buzz_boom(n: u32) -> String {
    let words: String = RULES
        .iter()
        .filter(|(divisor, _)| n % divisor == 0)
        .map(|(_, word)| *word)
        .collect();
    if words.is_empty() {
        n.to_string()
    } else {
        words
    }
}

/// Same answer as `fizz_buzz_boom`, spelled out with a match on remainders.
fn fizz_buzz_boom_match(n: u32) -> String {
    match (n % 3, n % 5, n % 7) {
        (0, 0, 0) => "FizzBuzzBoom".to_string(),
        (0, 0, _) => "FizzBuzz".to_string(),
        (0, _, 0) => "FizzBoom".to_string(),
        (_, 0, 0) => "BuzzBoom".to_string(),
        (0, _, _) => "Fizz".to_string(),
        (_, 0, _) => "Buzz".to_string(),
        (_, _, 0) => "Boom".to_string(),
        _ => n.to_string(),
    }
}

#[derive(Debug, Default, PartialEq)]
struct Stats {
    fizz: usize,
    buzz: usize,
    boom: usize,
}

fn count_words(limit: u32) -> Stats {
    let mut stats = Stats::default();
    for n in 1..=limit {
        let out = fizz_buzz_boom(n);
        stats.fizz += out.contains("Fizz") as usize;
        stats.buzz += out.contains("Buzz") as usize;
        stats.boom += out.contains("Boom") as usize;
    }
    stats
}

fn main() {
    banner("FizzBuzzBoom");

    section("Approach 1: Building the string");
    for n in 1..=100 {
        if n % 10 == 0 {
            println!("{:<12}", fizz_buzz_boom(n));
        } else {
            print!("{:<12} ", fizz_buzz_boom(n));
        }
    }
    let stats = count_words(100);
    println!("\nStatistics:");
    println!("Fizz appeared: {} times", stats.fizz);
    println!("Buzz appeared: {} times", stats.buzz);
    println!("Boom appeared: {} times\n", stats.boom);

    section("Approach 2: match on remainders");
    for n in [3, 5, 7, 15, 21, 35, 105] {
        println!("{:>3}: {}", n, fizz_buzz_boom_match(n));
    }
    println!();

    section("Approach 3: Analysis of 1-50");
    let (special, regular): (Vec<u32>, Vec<u32>) =
        (1..=50).partition(|n| fizz_buzz_boom(*n) != n.to_string());
    for n in &special {
        println!("{:>3}: {}", n, fizz_buzz_boom(*n));
    }
    println!("\nRegular numbers: {}", regular.len());
    println!("Special numbers: {}", special.len());

    key_points(&[
        "A rule table keeps the divisors and words in one place",
        "Matching on a tuple of remainders makes every combination explicit",
        "`partition` splits one iterator into two collections",
    ]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_words() {
        assert_eq!(fizz_buzz_boom(1), "1");
        assert_eq!(fizz_buzz_boom(3), "Fizz");
        assert_eq!(fizz_buzz_boom(5), "Buzz");
        assert_eq!(fizz_buzz_boom(7), "Boom");
    }

    #[test]
    fn test_combinations() {
        assert_eq!(fizz_buzz_boom(15), "FizzBuzz");
        assert_eq!(fizz_buzz_boom(21), "FizzBoom");
        assert_eq!(fizz_buzz_boom(35), "BuzzBoom");
        assert_eq!(fizz_buzz_boom(105), "FizzBuzzBoom");
    }

    #[test]
    fn test_both_approaches_agree() {
        for n in 1..=210 {
            assert_eq!(fizz_buzz_boom(n), fizz_buzz_boom_match(n), "n = {}", n);
        }
    }

    #[test]
    fn test_counts_up_to_100() {
        assert_eq!(
            count_words(100),
            Stats {
                fizz: 33,
                buzz: 20,
                boom: 14
            }
        );
    }
}

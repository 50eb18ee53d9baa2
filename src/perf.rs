//! Allocation and parallelism comparisons for the performance lesson.
//!
//! Each pair computes the same result two ways so the lesson can time them
//! and the benches can measure them properly.

use std::fmt::Write;

use rayon::prelude::*;

/// Builds `n` copies of `piece` by repeated `+`, reallocating as it grows.
pub fn concat_naive(piece: &str, n: usize) -> String {
    let mut result = String::new();
    for _ in 0..n {
        result = result + piece;
    }
    result
}

/// Same output as [`concat_naive`] with one allocation up front.
pub fn concat_with_capacity(piece: &str, n: usize) -> String {
    let mut result = String::with_capacity(piece.len() * n);
    for _ in 0..n {
        result.push_str(piece);
    }
    result
}

/// Joins numbers with commas through `write!` into a single buffer.
pub fn join_numbers(numbers: &[i64]) -> String {
    let mut out = String::with_capacity(numbers.len() * 4);
    for (i, n) in numbers.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        // writing to a String cannot fail
        let _ = write!(out, "{}", n);
    }
    out
}

pub fn collect_growing(n: usize) -> Vec<usize> {
    let mut v = Vec::new();
    for i in 0..n {
        v.push(i);
    }
    v
}

pub fn collect_preallocated(n: usize) -> Vec<usize> {
    let mut v = Vec::with_capacity(n);
    for i in 0..n {
        v.push(i);
    }
    v
}

pub fn sum_of_squares(numbers: &[u64]) -> u64 {
    numbers.iter().map(|n| n * n).sum()
}

pub fn par_sum_of_squares(numbers: &[u64]) -> u64 {
    numbers.par_iter().map(|n| n * n).sum()
}

/// Counts primes below `limit` by trial division, one candidate per task.
pub fn par_count_primes(limit: u64) -> usize {
    (2..limit).into_par_iter().filter(|&n| is_prime(n)).count()
}

pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    let mut d = 2;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_variants_agree() {
        assert_eq!(concat_naive("ab", 3), "ababab");
        assert_eq!(concat_with_capacity("ab", 3), concat_naive("ab", 3));
        assert_eq!(concat_with_capacity("x", 0), "");
    }

    #[test]
    fn test_preallocated_keeps_capacity() {
        let v = collect_preallocated(1000);
        assert_eq!(v, collect_growing(1000));
        assert_eq!(v.capacity(), 1000);
    }

    #[test]
    fn test_join_numbers() {
        assert_eq!(join_numbers(&[1, -2, 30]), "1,-2,30");
        assert_eq!(join_numbers(&[]), "");
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let numbers: Vec<u64> = (1..=10_000).collect();
        assert_eq!(par_sum_of_squares(&numbers), sum_of_squares(&numbers));
    }

    #[test]
    fn test_primes() {
        assert!(!is_prime(1));
        assert!(is_prime(2));
        assert!(is_prime(97));
        assert!(!is_prime(91));
        assert_eq!(par_count_primes(100), 25);
    }
}

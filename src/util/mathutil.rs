pub fn add(a: i64, b: i64) -> i64 {
    a + b
}

pub fn multiply(a: i64, b: i64) -> i64 {
    a * b
}

/// Mean of the values, `0.0` for an empty slice.
pub fn average(numbers: &[f64]) -> f64 {
    if numbers.is_empty() {
        return 0.0;
    }
    numbers.iter().sum::<f64>() / numbers.len() as f64
}

/// Not exported: only this module can call it.
fn is_valid(n: i64) -> bool {
    n >= 0
}

/// Adds only non-negative operands; anything else yields `None`.
pub fn add_non_negative(a: i64, b: i64) -> Option<i64> {
    (is_valid(a) && is_valid(b)).then(|| add(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        assert_eq!(add(2, 3), 5);
        assert_eq!(multiply(4, 5), 20);
    }

    #[test]
    fn test_average() {
        assert_eq!(average(&[]), 0.0);
        assert_eq!(average(&[1.0, 2.0, 3.0, 4.0]), 2.5);
    }

    #[test]
    fn test_private_helper_reachable_from_tests() {
        assert!(is_valid(0));
        assert!(!is_valid(-1));
        assert_eq!(add_non_negative(1, 2), Some(3));
        assert_eq!(add_non_negative(-1, 2), None);
    }
}

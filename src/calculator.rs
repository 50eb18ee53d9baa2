//! Basic arithmetic used by the testing lesson.
//!
//! Every function is pure. The two fallible ones return [`CalcError`] so the
//! tests can match on the exact failure. Integer arithmetic wraps on
//! overflow instead of panicking.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("factorial of negative number: {0}")]
    NegativeFactorial(i64),
}

/// Returns the sum of two integers.
///
/// ```
/// use lesson_course::calculator::add;
/// assert_eq!(add(2, 3), 5);
/// ```
pub fn add(a: i64, b: i64) -> i64 {
    a.wrapping_add(b)
}

/// ```
/// use lesson_course::calculator::subtract;
/// assert_eq!(subtract(10, 3), 7);
/// ```
pub fn subtract(a: i64, b: i64) -> i64 {
    a.wrapping_sub(b)
}

/// ```
/// use lesson_course::calculator::multiply;
/// assert_eq!(multiply(4, 5), 20);
/// ```
pub fn multiply(a: i64, b: i64) -> i64 {
    a.wrapping_mul(b)
}

/// Integer division truncating toward zero. `i64::MIN / -1` wraps to
/// `i64::MIN`.
///
/// ```
/// use lesson_course::calculator::{divide, CalcError};
/// assert_eq!(divide(10, 2), Ok(5));
/// assert_eq!(divide(10, 0), Err(CalcError::DivisionByZero));
/// assert_eq!(CalcError::DivisionByZero.to_string(), "division by zero");
/// ```
pub fn divide(a: i64, b: i64) -> Result<i64, CalcError> {
    if b == 0 {
        return Err(CalcError::DivisionByZero);
    }
    Ok(a.wrapping_div(b))
}

pub fn is_even(n: i64) -> bool {
    n % 2 == 0
}

/// ```
/// use lesson_course::calculator::abs;
/// assert_eq!(abs(-5), 5);
/// ```
pub fn abs(n: i64) -> i64 {
    n.wrapping_abs()
}

pub fn max(a: i64, b: i64) -> i64 {
    if a > b {
        a
    } else {
        b
    }
}

pub fn min(a: i64, b: i64) -> i64 {
    if a < b {
        a
    } else {
        b
    }
}

/// ```
/// use lesson_course::calculator::sum;
/// assert_eq!(sum(&[1, 2, 3, 4, 5]), 15);
/// ```
pub fn sum(numbers: &[i64]) -> i64 {
    numbers.iter().fold(0, |acc, &n| acc.wrapping_add(n))
}

/// Mean of the slice, `0.0` when it is empty.
///
/// ```
/// use lesson_course::calculator::average;
/// assert_eq!(format!("{:.1}", average(&[10, 20, 30, 40, 50])), "30.0");
/// assert_eq!(average(&[]), 0.0);
/// ```
pub fn average(numbers: &[i64]) -> f64 {
    if numbers.is_empty() {
        return 0.0;
    }
    sum(numbers) as f64 / numbers.len() as f64
}

/// `n!`, wrapping past `20!`.
pub fn factorial(n: i64) -> Result<i64, CalcError> {
    if n < 0 {
        return Err(CalcError::NegativeFactorial(n));
    }
    Ok((2..=n).fold(1i64, |acc, k| acc.wrapping_mul(k)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    //==========================================================================
    // Basic tests
    //==========================================================================

    #[test]
    fn test_add() {
        assert_eq!(add(2, 3), 5);
    }

    #[test]
    fn test_subtract() {
        assert_eq!(subtract(5, 3), 2);
    }

    //==========================================================================
    // Table-driven tests
    //==========================================================================

    #[test]
    fn test_add_table() {
        let cases = [
            ("positive numbers", 2, 3, 5),
            ("negative numbers", -2, -3, -5),
            ("mixed signs", -2, 3, 1),
            ("zeros", 0, 0, 0),
            ("with zero", 5, 0, 5),
        ];

        for (name, a, b, want) in cases {
            assert_eq!(add(a, b), want, "{}: add({}, {})", name, a, b);
        }
    }

    #[test]
    fn test_multiply_table() {
        let cases = [
            ("positive", 3, 4, 12),
            ("negative", -3, 4, -12),
            ("both negative", -3, -4, 12),
            ("with zero", 5, 0, 0),
            ("with one", 5, 1, 5),
        ];

        for (name, a, b, want) in cases {
            assert_eq!(multiply(a, b), want, "{}", name);
        }
    }

    //==========================================================================
    // Error tests
    //==========================================================================

    #[test]
    fn test_divide() {
        let cases = [
            ("normal division", 10, 2, Ok(5)),
            ("division by zero", 10, 0, Err(CalcError::DivisionByZero)),
            ("negative dividend", -10, 2, Ok(-5)),
            ("negative divisor", 10, -2, Ok(-5)),
            ("min by minus one", i64::MIN, -1, Ok(i64::MIN)),
        ];

        for (name, a, b, want) in cases {
            assert_eq!(divide(a, b), want, "{}", name);
        }
    }

    #[test]
    fn test_divide_by_zero_message() {
        let err = divide(10, 0).unwrap_err();
        assert_eq!(err.to_string(), "division by zero");
    }

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(0), Ok(1));
        assert_eq!(factorial(1), Ok(1));
        assert_eq!(factorial(5), Ok(120));
        assert_eq!(factorial(10), Ok(3_628_800));
        assert_eq!(factorial(20), Ok(2_432_902_008_176_640_000));
    }

    #[test]
    fn test_factorial_overflow_wraps() {
        assert_eq!(factorial(21), Ok(-4_249_290_049_419_214_848));
        assert_eq!(factorial(25), Ok(7_034_535_277_573_963_776));
    }

    #[test]
    fn test_overflow_wraps() {
        assert_eq!(add(i64::MAX, 1), i64::MIN);
        assert_eq!(subtract(i64::MIN, 1), i64::MAX);
        assert_eq!(multiply(i64::MAX, 2), -2);
        assert_eq!(abs(i64::MIN), i64::MIN);
        assert_eq!(sum(&[i64::MAX, 1]), i64::MIN);
    }

    #[test]
    fn test_factorial_negative() {
        let err = factorial(-3).unwrap_err();
        assert_eq!(err, CalcError::NegativeFactorial(-3));
        assert_eq!(err.to_string(), "factorial of negative number: -3");
    }

    //==========================================================================
    // Boolean and helper tests
    //==========================================================================

    #[test]
    fn test_is_even() {
        assert!(is_even(4));
        assert!(!is_even(5));
        assert!(is_even(-4));
        assert!(!is_even(-5));
        assert!(is_even(0));
    }

    #[test]
    fn test_abs_max_min() {
        assert_eq!(abs(-7), 7);
        assert_eq!(abs(7), 7);
        assert_eq!(abs(0), 0);
        assert_eq!(max(3, 9), 9);
        assert_eq!(max(-1, -9), -1);
        assert_eq!(min(3, 9), 3);
        assert_eq!(min(4, 4), 4);
    }

    #[test]
    fn test_sum_and_average() {
        assert_eq!(sum(&[]), 0);
        assert_eq!(sum(&[1, 2, 3]), 6);
        assert_eq!(average(&[]), 0.0);
        assert_eq!(average(&[1, 2]), 1.5);
        assert_eq!(average(&[-5, 5]), 0.0);
    }

    //==========================================================================
    // Property tests
    //==========================================================================

    proptest! {
        #[test]
        fn prop_add_commutes(a in -1_000_000i64..1_000_000, b in -1_000_000i64..1_000_000) {
            prop_assert_eq!(add(a, b), add(b, a));
        }

        #[test]
        fn prop_divide_inverts_multiply(a in -10_000i64..10_000, b in 1i64..10_000) {
            prop_assert_eq!(divide(multiply(a, b), b), Ok(a));
        }

        #[test]
        fn prop_abs_non_negative(n in -1_000_000i64..1_000_000) {
            prop_assert!(abs(n) >= 0);
        }

        #[test]
        fn prop_min_le_max(a in any::<i32>(), b in any::<i32>()) {
            let (a, b) = (a as i64, b as i64);
            prop_assert!(min(a, b) <= max(a, b));
        }
    }
}

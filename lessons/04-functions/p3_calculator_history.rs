//! Lesson 4 challenge: calculator with error handling and history.
//!
//! Run with: cargo run --bin lesson_04_calculator_history

use std::fmt;

use lesson_course::{banner, key_points, section};

#[derive(Debug, Clone, PartialEq)]
enum CalcError {
    DivisionByZero,
    ModuloByZero,
    UnknownOperation(String),
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CalcError::DivisionByZero => write!(f, "division by zero"),
            CalcError::ModuloByZero => write!(f, "modulo by zero"),
            CalcError::UnknownOperation(op) => write!(f, "unknown operation: {}", op),
        }
    }
}

impl std::error::Error for CalcError {}

fn calculate(a: f64, b: f64, op: &str) -> Result<f64, CalcError> {
    match op {
        "+" => Ok(a + b),
        "-" => Ok(a - b),
        "*" => Ok(a * b),
        "/" if b == 0.0 => Err(CalcError::DivisionByZero),
        "/" => Ok(a / b),
        "^" => Ok(a.powf(b)),
        "%" if b.trunc() == 0.0 => Err(CalcError::ModuloByZero),
        "%" => Ok((a.trunc() as i64 % b.trunc() as i64) as f64),
        other => Err(CalcError::UnknownOperation(other.to_string())),
    }
}

/// Wraps `calculate` in a closure that records every successful result.
fn with_history() -> (
    impl FnMut(f64, f64, &str) -> Result<f64, CalcError>,
    std::rc::Rc<std::cell::RefCell<Vec<String>>>,
) {
    let history = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let log = std::rc::Rc::clone(&history);
    let calc = move |a: f64, b: f64, op: &str| {
        let result = calculate(a, b, op)?;
        log.borrow_mut().push(format!("{} {} {} = {}", a, op, b, result));
        Ok(result)
    };
    (calc, history)
}

fn main() {
    banner("Calculator with History");

    section("Operations");
    let cases = [
        (10.0, 5.0, "+"),
        (10.0, 5.0, "-"),
        (10.0, 5.0, "*"),
        (10.0, 5.0, "/"),
        (10.0, 0.0, "/"),
        (2.0, 10.0, "^"),
        (10.0, 3.0, "%"),
        (10.0, 3.0, "?"),
    ];

    let (mut calc, history) = with_history();
    for (a, b, op) in cases {
        match calc(a, b, op) {
            Ok(result) => println!("{} {} {} = {:.2}", a, op, b, result),
            Err(e) => println!("{} {} {} -> Error: {}", a, op, b, e),
        }
    }

    println!();
    section("History");
    for (i, entry) in history.borrow().iter().enumerate() {
        println!("{}. {}", i + 1, entry);
    }

    key_points(&[
        "Return Result and let callers decide how to handle failure",
        "Match guards handle the zero-divisor case next to the operator",
        "`?` inside a closure works when the closure returns Result",
    ]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        assert_eq!(calculate(10.0, 5.0, "+"), Ok(15.0));
        assert_eq!(calculate(10.0, 5.0, "-"), Ok(5.0));
        assert_eq!(calculate(10.0, 5.0, "*"), Ok(50.0));
        assert_eq!(calculate(10.0, 5.0, "/"), Ok(2.0));
        assert_eq!(calculate(2.0, 3.0, "^"), Ok(8.0));
        assert_eq!(calculate(10.0, 3.0, "%"), Ok(1.0));
    }

    #[test]
    fn test_errors() {
        assert_eq!(calculate(10.0, 0.0, "/"), Err(CalcError::DivisionByZero));
        assert_eq!(calculate(10.0, 0.0, "%"), Err(CalcError::ModuloByZero));
        assert_eq!(
            calculate(1.0, 1.0, "&"),
            Err(CalcError::UnknownOperation("&".to_string()))
        );
    }

    #[test]
    fn test_history_skips_failures() {
        let (mut calc, history) = with_history();
        calc(1.0, 2.0, "+").unwrap();
        assert!(calc(1.0, 0.0, "/").is_err());
        calc(3.0, 3.0, "*").unwrap();
        assert_eq!(*history.borrow(), vec!["1 + 2 = 3", "3 * 3 = 9"]);
    }
}

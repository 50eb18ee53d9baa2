//! # Error types for the error-handling lesson
//!
//! Three families live here:
//!
//! 1. **Domain errors** - `NetworkError`, `ValidationError`, `DatabaseError`,
//!    each carrying typed fields instead of a formatted string.
//! 2. **Aggregation** - `MultiError` collects failures from batch work.
//! 3. **The calculator challenge** - `CalculationError` plus the functions
//!    that produce it, including a panic boundary via `catch_unwind`.

use std::error::Error as StdError;
use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;

//==============================================================================
// Part 1: Domain errors
//==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("network error: {host} returned {code}")]
pub struct NetworkError {
    pub host: String,
    pub code: u16,
    pub temporary: bool,
}

impl NetworkError {
    /// Callers may retry temporary failures.
    pub fn is_temporary(&self) -> bool {
        self.temporary
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("validation failed on {field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
#[error("database error during {operation} on {table}")]
pub struct DatabaseError {
    pub operation: String,
    pub table: String,
    #[source]
    pub source: Box<dyn StdError + Send + Sync>,
}

/// Sentinel for lookups that find nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("user {0} not found")]
pub struct UserNotFound(pub u64);

/// Renders an error followed by every cause below it.
pub fn error_chain(err: &(dyn StdError + 'static)) -> Vec<String> {
    let mut chain = vec![err.to_string()];
    let mut current = err.source();
    while let Some(cause) = current {
        chain.push(cause.to_string());
        current = cause.source();
    }
    chain
}

/// Finds the first error of type `E` anywhere in the chain.
pub fn find_cause<'a, E: StdError + 'static>(err: &'a (dyn StdError + 'static)) -> Option<&'a E> {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(found) = e.downcast_ref::<E>() {
            return Some(found);
        }
        current = e.source();
    }
    None
}

//==============================================================================
// Part 2: Aggregation
//==============================================================================

#[derive(Debug, Default, Error)]
#[error("{} error(s) occurred", .errors.len())]
pub struct MultiError {
    errors: Vec<Box<dyn StdError + Send + Sync>>,
}

impl MultiError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: impl StdError + Send + Sync + 'static) {
        self.errors.push(Box::new(error));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }

    pub fn display_all(&self) -> String {
        let mut lines = vec![self.to_string()];
        for (i, err) in self.errors.iter().enumerate() {
            lines.push(format!("  {}. {}", i + 1, err));
        }
        lines.join("\n")
    }
}

//==============================================================================
// Part 3: Calculator challenge
//==============================================================================

pub const MIN_VALUE: f64 = -1000.0;
pub const MAX_VALUE: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculationError {
    #[error("cannot divide {dividend} by zero")]
    DivisionByZero { dividend: f64 },
    #[error("invalid input {value}: {reason}")]
    InvalidInput { value: f64, reason: String },
    #[error("{value} is out of range [{min}, {max}]")]
    OutOfRange { value: f64, min: f64, max: f64 },
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
    #[error("calculation {operation} failed")]
    Failed {
        operation: String,
        #[source]
        source: Box<CalculationError>,
    },
    #[error("result validation failed")]
    InvalidResult {
        #[source]
        source: Box<CalculationError>,
    },
    #[error("recovered from panic: {0}")]
    Panicked(String),
}

impl CalculationError {
    /// Retrying never helps: the same operands fail the same way.
    pub fn is_temporary(&self) -> bool {
        match self {
            CalculationError::Failed { source, .. }
            | CalculationError::InvalidResult { source } => source.is_temporary(),
            _ => false,
        }
    }
}

pub fn validate_number(n: f64) -> Result<(), CalculationError> {
    if n.is_nan() || n.is_infinite() {
        return Err(CalculationError::InvalidInput {
            value: n,
            reason: "not a finite number".to_string(),
        });
    }
    if !(MIN_VALUE..=MAX_VALUE).contains(&n) {
        return Err(CalculationError::OutOfRange {
            value: n,
            min: MIN_VALUE,
            max: MAX_VALUE,
        });
    }
    Ok(())
}

/// A zero divisor is reported before the operands are range checked.
pub fn safe_divide(a: f64, b: f64) -> Result<f64, CalculationError> {
    if b == 0.0 {
        return Err(CalculationError::DivisionByZero { dividend: a });
    }
    validate_number(a)?;
    validate_number(b)?;
    Ok(a / b)
}

/// Applies `operation` to both operands. Failures are wrapped with the
/// operation name so the original cause stays reachable through `source()`.
/// A result outside the accepted range is rejected as well.
pub fn calculate(operation: &str, a: f64, b: f64) -> Result<f64, CalculationError> {
    let wrap = |source: CalculationError| CalculationError::Failed {
        operation: operation.to_string(),
        source: Box::new(source),
    };

    validate_number(a).map_err(wrap)?;
    validate_number(b).map_err(wrap)?;

    let result = match operation {
        "add" | "+" => a + b,
        "subtract" | "-" => a - b,
        "multiply" | "*" => a * b,
        "divide" | "/" => safe_divide(a, b).map_err(wrap)?,
        other => return Err(CalculationError::InvalidOperation(other.to_string())),
    };

    validate_number(result).map_err(|source| CalculationError::InvalidResult {
        source: Box::new(source),
    })?;
    Ok(result)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub op: String,
    pub a: f64,
    pub b: f64,
}

impl Operation {
    pub fn new(op: &str, a: f64, b: f64) -> Self {
        Operation {
            op: op.to_string(),
            a,
            b,
        }
    }
}

/// Runs every operation; successes and failures are returned separately.
pub fn calculate_batch(operations: &[Operation]) -> (Vec<f64>, Vec<CalculationError>) {
    let mut results = Vec::new();
    let mut errors = Vec::new();
    for operation in operations {
        match calculate(&operation.op, operation.a, operation.b) {
            Ok(value) => results.push(value),
            Err(err) => errors.push(err),
        }
    }
    (results, errors)
}

/// Like [`calculate`], but a panic inside `f` becomes `CalculationError::Panicked`.
pub fn safe_calculate<F>(f: F) -> Result<f64, CalculationError>
where
    F: FnOnce() -> Result<f64, CalculationError>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(CalculationError::Panicked(message))
        }
    }
}

/// Severity label used when logging an error.
pub fn classify(err: &CalculationError) -> &'static str {
    match err {
        CalculationError::DivisionByZero { .. } => "math",
        CalculationError::InvalidInput { .. } | CalculationError::OutOfRange { .. } => "input",
        CalculationError::InvalidOperation(_) => "usage",
        CalculationError::Failed { source, .. }
        | CalculationError::InvalidResult { source } => classify(source),
        CalculationError::Panicked(_) => "critical",
    }
}

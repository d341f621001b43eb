//! Built-in numeric formatters.
//!
//! Both coerce best-effort: the leading numeric prefix of a string is used,
//! anything unparsable becomes zero. Neither ever fails.

use std::sync::LazyLock;

use regex::Regex;

use super::formatter::Formatter;
use crate::types::Value;

/// Leading decimal number, optionally signed, with optional exponent.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?").expect("valid regex")
});

/// Parse the leading numeric prefix of a string.
///
/// Values that overflow to infinity become zero.
///
/// # Examples
/// ```
/// use dom_extractor::registry::formatters::numeric_prefix;
///
/// assert_eq!(numeric_prefix("12px"), 12.0);
/// assert_eq!(numeric_prefix("  -3.5 kg"), -3.5);
/// assert_eq!(numeric_prefix("1e3"), 1000.0);
/// assert_eq!(numeric_prefix("abc"), 0.0);
/// assert_eq!(numeric_prefix("1e400"), 0.0);
/// ```
#[must_use]
pub fn numeric_prefix(text: &str) -> f64 {
    NUMERIC_PREFIX
        .find(text.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|f| f.is_finite())
        .unwrap_or(0.0)
}

/// Coerce any value to a float.
fn to_float(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Int(i) => *i as f64,
        Value::Float(f) => *f,
        Value::String(s) => numeric_prefix(s),
        Value::Array(_) | Value::Record(_) => {
            if value.to_bool() {
                1.0
            } else {
                0.0
            }
        }
    }
}

/// Truncate toward zero, saturating at the i64 bounds. NaN becomes 0.
fn truncate(f: f64) -> i64 {
    if f.is_nan() {
        0
    } else {
        f.trunc() as i64
    }
}

/// Parse a value to an integer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Integer;

impl Formatter for Integer {
    fn name(&self) -> &str {
        "Integer"
    }

    fn format(&self, value: Value) -> Value {
        match value {
            Value::Int(i) => Value::Int(i),
            Value::String(ref s) if !s.contains(['.', 'e', 'E']) => {
                // Integer literals parse exactly, beyond f64 precision
                s.trim()
                    .parse::<i64>()
                    .map(Value::Int)
                    .unwrap_or_else(|_| Value::Int(truncate(to_float(&value))))
            }
            other => Value::Int(truncate(to_float(&other))),
        }
    }
}

/// Parse a value to a floating-point number.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decimal;

impl Formatter for Decimal {
    fn name(&self) -> &str {
        "Decimal"
    }

    fn format(&self, value: Value) -> Value {
        Value::Float(to_float(&value))
    }
}

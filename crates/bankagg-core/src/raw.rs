//! Helpers for reading loosely-shaped backend JSON.

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Render a scalar JSON value as a string.
///
/// Objects, arrays, and null yield `None`; numeric ids come back in
/// their canonical string form so they can be compared against string ids.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// First present scalar among `keys`, else empty string.
pub fn string_field(raw: &Value, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| raw.get(*key).and_then(scalar_to_string))
        .unwrap_or_default()
}

/// Coerce a numeric-or-string field to a decimal, defaulting to zero.
///
/// Numbers go through their JSON text form rather than `f64` so amounts
/// like `12345.67` survive exactly.
pub fn decimal_field(raw: &Value, key: &str) -> Decimal {
    match raw.get(key) {
        Some(Value::Number(n)) => Decimal::from_str(&n.to_string()).unwrap_or_default(),
        Some(Value::String(s)) => Decimal::from_str(s.trim()).unwrap_or_default(),
        _ => Decimal::ZERO,
    }
}

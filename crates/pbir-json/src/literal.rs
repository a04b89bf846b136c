//! Explicit access to number literals.
//!
//! [`decode`](crate::decode) wraps every floating-point literal (and any
//! integer that would not re-encode to the same text) in a preservation
//! marker carrying its exact source text. The marker is what gets written
//! back, so an untouched literal never changes spelling. Code that needs the
//! numeric value unwraps it with [`literal_f64`]; code that produces a new
//! number builds it with [`number_value`], which never carries source text
//! and therefore encodes with standard formatting.

use serde_json::{Map, Number, Value};

/// Sole key of a preservation marker object.
///
/// Documents that use this key themselves are rejected by `decode`.
pub(crate) const LITERAL_KEY: &str = "$pbir_json::literal";

/// Wrap the source text of a number literal.
pub(crate) fn preserved(text: &str) -> Value {
    let mut marker = Map::with_capacity(1);
    marker.insert(LITERAL_KEY.to_string(), Value::String(text.to_string()));
    Value::Object(marker)
}

/// Source text held by a preservation marker.
pub(crate) fn preserved_text(value: &Value) -> Option<&str> {
    match value {
        Value::Object(map) if map.len() == 1 => map.get(LITERAL_KEY).and_then(Value::as_str),
        _ => None,
    }
}

/// Whether the value is a number, preserved or computed.
pub fn is_number(value: &Value) -> bool {
    value.is_number() || preserved_text(value).is_some()
}

/// Source text of a number literal, or `None` for non-numbers.
///
/// Computed numbers report the text they will be encoded with.
pub fn literal_text(value: &Value) -> Option<String> {
    match value {
        Value::Number(number) => Some(number.to_string()),
        other => preserved_text(other).map(str::to_string),
    }
}

/// Numeric value of a number literal.
pub fn literal_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        other => preserved_text(other).and_then(|text| text.parse().ok()),
    }
}

/// A freshly computed number, formatted with shortest round-trip digits.
///
/// Integral values within `i64` range are emitted without a fraction.
/// Returns `None` for NaN and infinities, which JSON cannot represent.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn number_value(value: f64) -> Option<Value> {
    if !value.is_finite() {
        return None;
    }
    if value.fract() == 0.0 && value.abs() < (i64::MAX as f64) {
        return Some(Value::Number(Number::from(value as i64)));
    }
    Number::from_f64(value).map(Value::Number)
}

/// Numeric equality that ignores the textual form of both sides.
///
/// `1280`, `1280.0` and `1.28e3` are all equal here, which lets transforms
/// stay idempotent without rewriting a literal that already holds the
/// target value.
#[allow(clippy::float_cmp)]
pub fn numbers_equal(left: &Value, right: &Value) -> bool {
    match (literal_f64(left), literal_f64(right)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

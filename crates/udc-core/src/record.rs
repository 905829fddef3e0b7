//! Schemaless records and the value coercions shared by filters, rules and summaries.

use serde_json::Value;

/// One unit of business data: a customer, a ticket or a metric point.
pub type Record = serde_json::Map<String, Value>;

/// Text form of a scalar used for equality filters.
///
/// Strings compare by their content, everything else by its JSON rendering,
/// so a filter value of `"5"` matches a record value of `5`.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Coerce a value to a float for numeric comparisons and sort keys.
///
/// Numeric strings are accepted; booleans count as 1 and 0.
/// Null, nested values and non-numeric text yield `None`.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Render a possibly-missing field for a spoken summary.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "unknown".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

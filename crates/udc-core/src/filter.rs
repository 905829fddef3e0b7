//! Filter predicate language.
//!
//! Callers pass a flat `field -> value` map. Each entry is parsed once into a
//! [`FilterClause`] when the query is built:
//!
//! | Key form | Clause | Semantics |
//! |----------|--------|-----------|
//! | `status` | [`FilterClause::Equals`] | text form of record value == text form of filter value |
//! | `lifetime_value__gt` | [`FilterClause::Compare`] | numeric `>`, also `lt`, `gte`, `lte` |
//! | `value__between` | [`FilterClause::Unsatisfiable`] | unknown operator, matches nothing |
//!
//! A record must satisfy every clause. Records whose field is missing or not
//! numeric never satisfy a comparison; they are dropped, not reported.

use crate::record::{Record, coerce_number, value_text};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Separator between a field name and its comparison operator.
pub const OPERATOR_SEPARATOR: &str = "__";

/// Numeric comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareOp {
    Gt,
    Lt,
    Gte,
    Lte,
}

impl CompareOp {
    /// Parse an operator suffix (`gt`, `lt`, `gte`, `lte`).
    pub fn parse(suffix: &str) -> Option<Self> {
        match suffix {
            "gt" => Some(CompareOp::Gt),
            "lt" => Some(CompareOp::Lt),
            "gte" => Some(CompareOp::Gte),
            "lte" => Some(CompareOp::Lte),
            _ => None,
        }
    }

    /// Whether `lhs <op> rhs` holds.
    pub fn holds(self, lhs: f64, rhs: f64) -> bool {
        match self {
            CompareOp::Gt => lhs > rhs,
            CompareOp::Lt => lhs < rhs,
            CompareOp::Gte => lhs >= rhs,
            CompareOp::Lte => lhs <= rhs,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CompareOp::Gt => "gt",
            CompareOp::Lt => "lt",
            CompareOp::Gte => "gte",
            CompareOp::Lte => "lte",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed filter entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterClause {
    /// Field equals value, compared as text.
    Equals { field: String, value: String },
    /// Field compared numerically against a threshold.
    Compare {
        field: String,
        op: CompareOp,
        threshold: f64,
    },
    /// A clause no record can satisfy: unknown operator or non-numeric threshold.
    Unsatisfiable { key: String, reason: String },
}

impl FilterClause {
    /// Parse one `key -> value` filter entry.
    pub fn parse(key: &str, value: &Value) -> Self {
        let Some((field, suffix)) = key.split_once(OPERATOR_SEPARATOR) else {
            return FilterClause::Equals {
                field: key.to_string(),
                value: value_text(value),
            };
        };

        let Some(op) = CompareOp::parse(suffix) else {
            return FilterClause::Unsatisfiable {
                key: key.to_string(),
                reason: format!("unknown operator '{}'", suffix),
            };
        };

        match coerce_number(value) {
            Some(threshold) => FilterClause::Compare {
                field: field.to_string(),
                op,
                threshold,
            },
            None => FilterClause::Unsatisfiable {
                key: key.to_string(),
                reason: format!("threshold {} is not numeric", value),
            },
        }
    }

    /// Whether a record satisfies this clause.
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            FilterClause::Equals { field, value } => match record.get(field) {
                None | Some(Value::Null) => false,
                Some(actual) => value_text(actual) == *value,
            },
            FilterClause::Compare {
                field,
                op,
                threshold,
            } => record
                .get(field)
                .and_then(coerce_number)
                .is_some_and(|actual| op.holds(actual, *threshold)),
            FilterClause::Unsatisfiable { .. } => false,
        }
    }
}

/// Parse a whole filter map into clauses.
pub fn parse_filters(filters: &serde_json::Map<String, Value>) -> Vec<FilterClause> {
    filters
        .iter()
        .map(|(key, value)| FilterClause::parse(key, value))
        .collect()
}

/// Whether a record satisfies every clause. Stops at the first failing clause.
pub fn matches_all(record: &Record, clauses: &[FilterClause]) -> bool {
    clauses.iter().all(|clause| clause.matches(record))
}

/// Keep the records that satisfy every clause, preserving order.
pub fn apply_filters(records: Vec<Record>, clauses: &[FilterClause]) -> Vec<Record> {
    if clauses.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|record| matches_all(record, clauses))
        .collect()
}

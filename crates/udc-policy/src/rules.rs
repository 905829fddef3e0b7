//! Business rules engine.
//!
//! Applies a source's [`Retention`] and [`SortRule`] to the filtered records.
//! Sources without a policy pass through unchanged.

use crate::policy::{Direction, PolicySet, Retention, SortKey, SortRule, SourcePolicy};
use serde_json::Value;
use std::cmp::Ordering;
use udc_core::record::{coerce_number, value_text};
use udc_core::{Record, Source};

/// Applies business rules for any source of a [`PolicySet`].
pub struct RulesEngine<'a> {
    policies: &'a PolicySet,
}

impl<'a> RulesEngine<'a> {
    /// Create a new rules engine.
    pub fn new(policies: &'a PolicySet) -> Self {
        Self { policies }
    }

    /// Apply the rules of `source` to `records`.
    pub fn apply(&self, source: Source, records: Vec<Record>) -> Vec<Record> {
        if records.is_empty() {
            return records;
        }
        match self.policies.get(source) {
            Some(policy) => {
                let before = records.len();
                let kept = apply_policy(policy, records);
                tracing::debug!(%source, before, after = kept.len(), "business rules applied");
                kept
            }
            None => {
                tracing::debug!(%source, "no policy for source, records passed through");
                records
            }
        }
    }
}

/// Apply one policy's retention and ordering.
pub fn apply_policy(policy: &SourcePolicy, records: Vec<Record>) -> Vec<Record> {
    let mut kept: Vec<Record> = records
        .into_iter()
        .filter(|record| retains(&policy.retention, record))
        .collect();

    if let Some(rule) = &policy.sort {
        sort_records(&mut kept, rule);
    }
    kept
}

fn retains(retention: &Retention, record: &Record) -> bool {
    match retention {
        Retention::All => true,
        Retention::ExcludeWhen { field, values } => !text_in(record, field, values),
        Retention::KeepWhen { field, values } => text_in(record, field, values),
    }
}

fn text_in(record: &Record, field: &str, values: &[String]) -> bool {
    record
        .get(field)
        .and_then(Value::as_str)
        .is_some_and(|actual| values.iter().any(|v| v == actual))
}

/// Stable sort by the rule's key.
pub fn sort_records(records: &mut [Record], rule: &SortRule) {
    if rule.requires_field && !records.first().is_some_and(|r| r.contains_key(rule.key.field())) {
        return;
    }

    let directed = |ordering: Ordering| match rule.direction {
        Direction::Ascending => ordering,
        Direction::Descending => ordering.reverse(),
    };

    match &rule.key {
        SortKey::Numeric { field, default } => {
            let key = |r: &Record| r.get(field).and_then(coerce_number).unwrap_or(*default);
            records.sort_by(|a, b| directed(key(a).total_cmp(&key(b))));
        }
        SortKey::Ranked {
            field,
            ranks,
            default,
        } => {
            let key = |r: &Record| {
                r.get(field)
                    .and_then(Value::as_str)
                    .and_then(|v| ranks.iter().find(|(name, _)| name == v).map(|(_, rank)| *rank))
                    .unwrap_or(*default)
            };
            records.sort_by(|a, b| directed(key(a).cmp(&key(b))));
        }
        SortKey::Text { field } => {
            let key = |r: &Record| r.get(field).map(value_text).unwrap_or_default();
            records.sort_by(|a, b| directed(key(a).cmp(&key(b))));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn records(values: Vec<Value>) -> Vec<Record> {
        values
            .into_iter()
            .map(|v| v.as_object().cloned().unwrap())
            .collect()
    }

    fn field<'r>(records: &'r [Record], name: &str) -> Vec<&'r Value> {
        records.iter().map(|r| &r[name]).collect()
    }

    #[test]
    fn test_crm_excludes_churned_and_sorts_by_value() {
        let set = PolicySet::builtin();
        let engine = RulesEngine::new(&set);
        let out = engine.apply(
            Source::Crm,
            records(vec![
                json!({"id": 1, "status": "active", "lifetime_value": 1000}),
                json!({"id": 2, "status": "churned", "lifetime_value": 50000}),
                json!({"id": 3, "status": "inactive", "lifetime_value": 9000}),
                json!({"id": 4, "status": "active"}),
                json!({"id": 5, "status": "active", "lifetime_value": 9000}),
            ]),
        );

        assert_eq!(field(&out, "id"), vec![&json!(3), &json!(5), &json!(1), &json!(4)]);
        assert!(out.iter().all(|r| r["status"] != "churned"));
    }

    #[test]
    fn test_support_keeps_actionable_sorted_by_priority() {
        let set = PolicySet::builtin();
        let engine = RulesEngine::new(&set);
        let out = engine.apply(
            Source::Support,
            records(vec![
                json!({"id": "a", "status": "open", "priority": "low"}),
                json!({"id": "b", "status": "closed", "priority": "critical"}),
                json!({"id": "c", "status": "in_progress", "priority": "high"}),
                json!({"id": "d", "status": "open", "priority": "critical"}),
                json!({"id": "e", "status": "open"}),
                json!({"id": "f", "status": "resolved", "priority": "high"}),
                json!({"id": "g", "status": "open", "priority": "urgent"}),
                json!({"id": "h", "status": "open", "priority": "high"}),
            ]),
        );

        assert_eq!(
            field(&out, "id"),
            vec![&json!("d"), &json!("c"), &json!("h"), &json!("a"), &json!("e"), &json!("g")]
        );
    }

    #[test]
    fn test_analytics_sorts_by_timestamp_when_present() {
        let set = PolicySet::builtin();
        let engine = RulesEngine::new(&set);
        let out = engine.apply(
            Source::Analytics,
            records(vec![
                json!({"timestamp": "2024-01-03", "value": 3}),
                json!({"timestamp": "2024-01-01", "value": 1}),
                json!({"timestamp": "2024-01-02", "value": 2}),
            ]),
        );
        assert_eq!(field(&out, "value"), vec![&json!(1), &json!(2), &json!(3)]);
    }

    #[test]
    fn test_analytics_passthrough_without_timestamp() {
        let set = PolicySet::builtin();
        let engine = RulesEngine::new(&set);
        let input = records(vec![
            json!({"metric_name": "b", "value": 2}),
            json!({"metric_name": "a", "value": 1, "timestamp": "2024-01-01"}),
        ]);
        let out = engine.apply(Source::Analytics, input.clone());
        assert_eq!(out, input);
    }

    #[test]
    fn test_missing_policy_is_passthrough() {
        let set = PolicySet::empty();
        let engine = RulesEngine::new(&set);
        let input = records(vec![
            json!({"status": "churned", "lifetime_value": 1}),
            json!({"status": "active", "lifetime_value": 2}),
        ]);
        assert_eq!(engine.apply(Source::Crm, input.clone()), input);
    }

    #[test]
    fn test_empty_input() {
        let set = PolicySet::builtin();
        let engine = RulesEngine::new(&set);
        assert!(engine.apply(Source::Support, Vec::new()).is_empty());
    }
}

//! Voice optimization: truncate, project and summarize a page of results.

use crate::policy::{Anchor, PolicySet, SummaryTemplate};
use serde_json::Value;
use udc_core::record::display_value;
use udc_core::{Record, Source};

/// Most records a voice response may carry.
pub const MAX_VOICE_RECORDS: usize = 5;

/// Summary returned for an empty page.
pub const NO_RESULTS_SUMMARY: &str = "No results found.";

/// Produces voice-friendly pages for any source of a [`PolicySet`].
pub struct VoiceOptimizer<'a> {
    policies: &'a PolicySet,
}

impl<'a> VoiceOptimizer<'a> {
    pub fn new(policies: &'a PolicySet) -> Self {
        Self { policies }
    }

    /// Returns the (possibly projected) records and a spoken summary.
    pub fn optimize(&self, source: Source, mut records: Vec<Record>) -> (Vec<Record>, String) {
        if records.is_empty() {
            return (records, NO_RESULTS_SUMMARY.to_string());
        }
        records.truncate(MAX_VOICE_RECORDS);

        match self.policies.get(source) {
            Some(policy) => {
                let shown = match &policy.projection {
                    Some(fields) => records.iter().map(|r| project(r, fields)).collect(),
                    None => records,
                };
                let summary = render_summary(&policy.summary, &shown);
                (shown, summary)
            }
            None => {
                let summary = render_summary(&SummaryTemplate::generic(), &records);
                (records, summary)
            }
        }
    }
}

/// Keep only `fields`, in order; missing fields become `null`.
pub fn project(record: &Record, fields: &[String]) -> Record {
    fields
        .iter()
        .map(|field| {
            let value = record.get(field).cloned().unwrap_or(Value::Null);
            (field.clone(), value)
        })
        .collect()
}

/// Fill a summary template from the records being shown.
pub fn render_summary(summary: &SummaryTemplate, records: &[Record]) -> String {
    let anchor = match summary.anchor {
        Anchor::First => records.first(),
        Anchor::Last => records.last(),
    };

    let resolve = |placeholder: &str| -> String {
        if placeholder == "count" {
            return records.len().to_string();
        }
        if let Some(tally) = summary.tallies.iter().find(|t| t.name == placeholder) {
            let n = records
                .iter()
                .filter(|r| r.get(&tally.field).and_then(Value::as_str) == Some(tally.equals.as_str()))
                .count();
            return n.to_string();
        }

        let (field, fallback) = match placeholder.split_once('|') {
            Some((field, fallback)) => (field, Some(fallback)),
            None => (placeholder, None),
        };
        let value = anchor.and_then(|r| r.get(field)).filter(|v| !v.is_null());
        match (value, fallback) {
            (None, Some(fallback)) => fallback.to_string(),
            (value, _) => display_value(value),
        }
    };

    let mut out = String::with_capacity(summary.template.len());
    let mut rest = summary.template.as_str();
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                out.push_str(&resolve(&after[..close]));
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(values: Vec<Value>) -> Vec<Record> {
        values
            .into_iter()
            .map(|v| v.as_object().cloned().unwrap())
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let set = PolicySet::builtin();
        let (data, summary) = VoiceOptimizer::new(&set).optimize(Source::Crm, Vec::new());
        assert!(data.is_empty());
        assert_eq!(summary, "No results found.");
    }

    #[test]
    fn test_crm_projection_and_summary() {
        let set = PolicySet::builtin();
        let input = records(vec![
            json!({"id": "1", "name": "Customer_9000", "company": "Globex", "lifetime_value": 9000.5, "email": "x@example.com"}),
            json!({"id": "2", "name": "Customer_6000", "company": "Initech", "lifetime_value": 6000}),
        ]);
        let (data, summary) = VoiceOptimizer::new(&set).optimize(Source::Crm, input);

        assert_eq!(data.len(), 2);
        let keys: Vec<&str> = data[0].keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 3);
        assert!(!data[0].contains_key("email"));
        assert_eq!(
            summary,
            "Top customer is Customer_9000 from Globex with lifetime value 9000.5. Showing 2 customers."
        );
    }

    #[test]
    fn test_truncates_to_five() {
        let set = PolicySet::builtin();
        let input: Vec<Record> = (0..8)
            .map(|i| json!({"subject": format!("Issue_{}", i), "priority": "low", "status": "open"}))
            .map(|v| v.as_object().cloned().unwrap())
            .collect();
        let (data, summary) = VoiceOptimizer::new(&set).optimize(Source::Support, input);
        assert_eq!(data.len(), MAX_VOICE_RECORDS);
        assert_eq!(summary, "There are 5 active tickets. 0 are critical priority.");
    }

    #[test]
    fn test_support_counts_critical() {
        let set = PolicySet::builtin();
        let input = records(vec![
            json!({"subject": "a", "priority": "critical", "status": "open", "description": "x"}),
            json!({"subject": "b", "priority": "critical", "status": "in_progress"}),
            json!({"subject": "c", "priority": "high", "status": "open"}),
        ]);
        let (data, summary) = VoiceOptimizer::new(&set).optimize(Source::Support, input);
        assert!(data.iter().all(|r| !r.contains_key("description")));
        assert_eq!(summary, "There are 3 active tickets. 2 are critical priority.");
    }

    #[test]
    fn test_analytics_reports_last_record() {
        let set = PolicySet::builtin();
        let input = records(vec![
            json!({"metric_name": "revenue", "timestamp": "2024-01-01", "value": 10}),
            json!({"metric_name": "revenue", "timestamp": "2024-01-02", "value": 42.5}),
        ]);
        let (data, summary) = VoiceOptimizer::new(&set).optimize(Source::Analytics, input.clone());
        assert_eq!(data, input);
        assert_eq!(summary, "The latest value of revenue is 42.5.");
    }

    #[test]
    fn test_analytics_metric_fallback() {
        let set = PolicySet::builtin();
        let input = records(vec![json!({"timestamp": "2024-01-01", "value": 7})]);
        let (_, summary) = VoiceOptimizer::new(&set).optimize(Source::Analytics, input);
        assert_eq!(summary, "The latest value of metric is 7.");
    }

    #[test]
    fn test_missing_policy_uses_generic_summary() {
        let set = PolicySet::empty();
        let input = records(vec![json!({"a": 1}), json!({"a": 2})]);
        let (data, summary) = VoiceOptimizer::new(&set).optimize(Source::Crm, input.clone());
        assert_eq!(data, input);
        assert_eq!(summary, "Showing 2 records.");
    }

    #[test]
    fn test_projection_fills_missing_with_null() {
        let rec = records(vec![json!({"name": "n"})]).remove(0);
        let projected = project(&rec, &["name".to_string(), "company".to_string()]);
        assert_eq!(projected["company"], Value::Null);
    }

    #[test]
    fn test_render_missing_placeholder_value() {
        let template = SummaryTemplate::new("Owner: {owner}. {unclosed", Anchor::First);
        let out = render_summary(&template, &records(vec![json!({"x": 1})]));
        assert_eq!(out, "Owner: unknown. {unclosed");
    }
}

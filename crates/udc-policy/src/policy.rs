//! Per-source policy records.
//!
//! A [`SourcePolicy`] describes everything source-specific about the pipeline
//! as data: which records are retained, how they are ordered, which fields a
//! voice response keeps and how the spoken summary reads. Connectors carry no
//! business logic of their own.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use udc_core::Source;

/// Which records survive the business rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Retention {
    /// Keep every record.
    All,
    /// Drop records whose text field equals one of `values`.
    ExcludeWhen { field: String, values: Vec<String> },
    /// Keep only records whose text field equals one of `values`.
    KeepWhen { field: String, values: Vec<String> },
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Ascending,
    Descending,
}

/// How a record is turned into a sort key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SortKey {
    /// Numeric field; missing or non-numeric values use `default`.
    Numeric { field: String, default: f64 },
    /// Text field mapped through a rank table; unranked values use `default`.
    Ranked {
        field: String,
        ranks: Vec<(String, i64)>,
        default: i64,
    },
    /// Text field compared lexically; missing values sort as empty text.
    Text { field: String },
}

impl SortKey {
    /// Field the key reads.
    pub fn field(&self) -> &str {
        match self {
            SortKey::Numeric { field, .. }
            | SortKey::Ranked { field, .. }
            | SortKey::Text { field } => field,
        }
    }
}

/// Ordering applied after retention. Sorting is always stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortRule {
    pub key: SortKey,
    pub direction: Direction,
    /// Only sort when the first record carries the key field.
    #[serde(default)]
    pub requires_field: bool,
}

/// Record from which `{field}` placeholders of a summary are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    First,
    Last,
}

/// Named count of records whose field equals a value, usable as `{name}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tally {
    pub name: String,
    pub field: String,
    pub equals: String,
}

/// Spoken summary template.
///
/// Placeholders: `{count}` is the number of records shown, `{<tally>}` a
/// tally, and any other `{field}` or `{field|fallback}` reads the anchor record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryTemplate {
    pub template: String,
    pub anchor: Anchor,
    #[serde(default)]
    pub tallies: Vec<Tally>,
}

impl SummaryTemplate {
    pub fn new(template: impl Into<String>, anchor: Anchor) -> Self {
        Self {
            template: template.into(),
            anchor,
            tallies: Vec::new(),
        }
    }

    pub fn with_tally(
        mut self,
        name: impl Into<String>,
        field: impl Into<String>,
        equals: impl Into<String>,
    ) -> Self {
        self.tallies.push(Tally {
            name: name.into(),
            field: field.into(),
            equals: equals.into(),
        });
        self
    }

    /// Summary used when a source has no policy.
    pub fn generic() -> Self {
        Self::new("Showing {count} records.", Anchor::First)
    }
}

/// Business rules and voice behavior for one source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcePolicy {
    pub source: Source,
    pub retention: Retention,
    #[serde(default)]
    pub sort: Option<SortRule>,
    /// Fields kept in voice responses; `None` keeps records whole.
    #[serde(default)]
    pub projection: Option<Vec<String>>,
    pub summary: SummaryTemplate,
    /// One-line description surfaced as `metadata.note`.
    pub note: String,
}

impl SourcePolicy {
    /// CRM: drop churned customers, highest lifetime value first.
    pub fn crm() -> Self {
        Self {
            source: Source::Crm,
            retention: Retention::ExcludeWhen {
                field: "status".to_string(),
                values: vec!["churned".to_string()],
            },
            sort: Some(SortRule {
                key: SortKey::Numeric {
                    field: "lifetime_value".to_string(),
                    default: 0.0,
                },
                direction: Direction::Descending,
                requires_field: false,
            }),
            projection: Some(strings(&["name", "company", "lifetime_value"])),
            summary: SummaryTemplate::new(
                "Top customer is {name} from {company} with lifetime value {lifetime_value}. \
                 Showing {count} customers.",
                Anchor::First,
            ),
            note: "Churned customers excluded; sorted by lifetime value, highest first."
                .to_string(),
        }
    }

    /// Support: actionable tickets only, most urgent first.
    pub fn support() -> Self {
        Self {
            source: Source::Support,
            retention: Retention::KeepWhen {
                field: "status".to_string(),
                values: strings(&["open", "in_progress"]),
            },
            sort: Some(SortRule {
                key: SortKey::Ranked {
                    field: "priority".to_string(),
                    ranks: vec![
                        ("critical".to_string(), 4),
                        ("high".to_string(), 3),
                        ("medium".to_string(), 2),
                        ("low".to_string(), 1),
                    ],
                    default: 1,
                },
                direction: Direction::Descending,
                requires_field: false,
            }),
            projection: Some(strings(&["subject", "priority", "status"])),
            summary: SummaryTemplate::new(
                "There are {count} active tickets. {critical} are critical priority.",
                Anchor::First,
            )
            .with_tally("critical", "priority", "critical"),
            note: "Only open and in-progress tickets; sorted by priority, critical first."
                .to_string(),
        }
    }

    /// Analytics: chronological when timestamps are present.
    pub fn analytics() -> Self {
        Self {
            source: Source::Analytics,
            retention: Retention::All,
            sort: Some(SortRule {
                key: SortKey::Text {
                    field: "timestamp".to_string(),
                },
                direction: Direction::Ascending,
                requires_field: true,
            }),
            projection: None,
            summary: SummaryTemplate::new(
                "The latest value of {metric_name|metric} is {value}.",
                Anchor::Last,
            ),
            note: "Metric points sorted by timestamp, oldest first.".to_string(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Explicit mapping from source to policy, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct PolicySet {
    policies: HashMap<Source, SourcePolicy>,
}

impl PolicySet {
    /// A set with no policies: every source passes through untouched.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in policies for every known source.
    pub fn builtin() -> Self {
        let mut set = Self::empty();
        set.insert(SourcePolicy::crm());
        set.insert(SourcePolicy::support());
        set.insert(SourcePolicy::analytics());
        set
    }

    /// Add or replace the policy for its source.
    pub fn insert(&mut self, policy: SourcePolicy) {
        self.policies.insert(policy.source, policy);
    }

    /// Policy for a source, if any.
    pub fn get(&self, source: Source) -> Option<&SourcePolicy> {
        self.policies.get(&source)
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

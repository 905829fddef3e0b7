//! Response envelope returned for every query.

use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hint attached to voice responses for downstream answer generation.
pub const VOICE_SUMMARY_HINT: &str = "Use context field to generate concise answer.";

/// Shape of a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Tabular,
    TimeSeries,
    Aggregated,
    Hierarchical,
    Unknown,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Tabular => "tabular",
            DataType::TimeSeries => "time_series",
            DataType::Aggregated => "aggregated",
            DataType::Hierarchical => "hierarchical",
            DataType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Facts about a result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Records that survived filtering and business rules, before paging.
    pub total_results: usize,
    /// Records in `data`.
    pub returned_results: usize,
    pub data_type: DataType,
    /// Connector-declared staleness label, e.g. `real-time` or `cached_5m`.
    pub freshness: String,
    /// Description of the business rule applied to the source, if any.
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub summary_hint: Option<String>,
}

/// Result of one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataResponse {
    pub data: Vec<Record>,
    pub metadata: Metadata,
    /// Spoken summary, present only for voice queries.
    #[serde(default)]
    pub context: Option<String>,
}

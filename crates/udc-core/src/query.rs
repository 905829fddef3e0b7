//! Normalized query contract.
//!
//! [`QueryRequest`] is the loose wire form accepted from HTTP, the CLI and
//! model tool calls. [`Query`] is the validated form the executor runs: the
//! source is resolved and the filters are parsed into clauses.

use crate::error::QueryError;
use crate::filter::{FilterClause, parse_filters};
use crate::source::Source;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Smallest accepted page size.
pub const MIN_LIMIT: u32 = 1;

/// Largest accepted page size.
pub const MAX_LIMIT: u32 = 50;

/// Page size used by the query endpoint when none is given.
pub const DEFAULT_LIMIT: u32 = 10;

/// Query as received from a caller, before validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryRequest {
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<serde_json::Map<String, Value>>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
    #[serde(default)]
    pub voice_context: bool,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT as i64
}

impl QueryRequest {
    /// Create a request for a source with default paging.
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            filters: None,
            limit: default_limit(),
            offset: 0,
            voice_context: false,
        }
    }

    /// Add one filter entry.
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters
            .get_or_insert_with(serde_json::Map::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_voice_context(mut self, voice_context: bool) -> Self {
        self.voice_context = voice_context;
        self
    }

    /// Validate the request and parse its filters.
    pub fn into_query(self) -> Result<Query, QueryError> {
        let source: Source = self.source.parse()?;

        if self.limit < MIN_LIMIT as i64 || self.limit > MAX_LIMIT as i64 {
            return Err(QueryError::InvalidLimit {
                value: self.limit,
                min: MIN_LIMIT,
                max: MAX_LIMIT,
            });
        }
        if self.offset < 0 {
            return Err(QueryError::InvalidOffset(self.offset));
        }

        let filters = self
            .filters
            .as_ref()
            .map(parse_filters)
            .unwrap_or_default();

        Ok(Query {
            source,
            filters,
            limit: self.limit as usize,
            offset: self.offset as usize,
            voice_context: self.voice_context,
        })
    }
}

/// Validated query ready for execution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    pub source: Source,
    pub filters: Vec<FilterClause>,
    pub limit: usize,
    pub offset: usize,
    pub voice_context: bool,
}

impl Query {
    /// Half-open index range `[offset, offset + limit)` clamped to `len`.
    pub fn page_bounds(&self, len: usize) -> (usize, usize) {
        let start = self.offset.min(len);
        let end = self.offset.saturating_add(self.limit).min(len);
        (start, end)
    }
}

//! Connector contract and the built-in connectors.
//!
//! A connector knows where a source's records live and how fresh they are.
//! It carries no filtering or business logic; that is applied by the executor.

use anyhow::Context;
use async_trait::async_trait;
use std::path::PathBuf;
use udc_core::{DataConfig, Record, Source};

/// Freshness label for sources read straight from their backing store.
pub const FRESHNESS_REAL_TIME: &str = "real-time";

/// Freshness label for sources refreshed on a five minute cycle.
pub const FRESHNESS_CACHED_5M: &str = "cached_5m";

/// Default freshness label for a source.
pub fn default_freshness(source: Source) -> &'static str {
    match source {
        Source::Crm | Source::Support => FRESHNESS_REAL_TIME,
        Source::Analytics => FRESHNESS_CACHED_5M,
    }
}

#[async_trait]
pub trait Connector: Send + Sync {
    /// Source this connector serves.
    fn source(&self) -> Source;

    /// Staleness label reported in response metadata.
    fn freshness(&self) -> &str;

    /// Load every record of the source, in storage order.
    async fn fetch(&self) -> anyhow::Result<Vec<Record>>;
}

/// Reads a top-level JSON array of objects from a file.
///
/// A missing file is an empty source. Unreadable or malformed files are errors.
#[derive(Debug, Clone)]
pub struct JsonFileConnector {
    source: Source,
    path: PathBuf,
    freshness: String,
}

impl JsonFileConnector {
    pub fn new(source: Source, path: impl Into<PathBuf>) -> Self {
        Self {
            source,
            path: path.into(),
            freshness: default_freshness(source).to_string(),
        }
    }

    /// Connector for a source using the configured data directory.
    pub fn for_source(source: Source, data: &DataConfig) -> Self {
        Self::new(source, data.path_for(source))
    }

    pub fn crm(data: &DataConfig) -> Self {
        Self::for_source(Source::Crm, data)
    }

    pub fn support(data: &DataConfig) -> Self {
        Self::for_source(Source::Support, data)
    }

    pub fn analytics(data: &DataConfig) -> Self {
        Self::for_source(Source::Analytics, data)
    }

    /// Override the freshness label.
    pub fn with_freshness(mut self, freshness: impl Into<String>) -> Self {
        self.freshness = freshness.into();
        self
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl Connector for JsonFileConnector {
    fn source(&self) -> Source {
        self.source
    }

    fn freshness(&self) -> &str {
        &self.freshness
    }

    async fn fetch(&self) -> anyhow::Result<Vec<Record>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    source = %self.source,
                    path = %self.path.display(),
                    "data file not found, source is empty"
                );
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("reading {}", self.path.display()));
            }
        };

        let records: Vec<Record> = serde_json::from_str(&content)
            .with_context(|| format!("parsing {} as a JSON array of objects", self.path.display()))?;
        Ok(records)
    }
}

/// Serves a fixed set of records held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryConnector {
    source: Source,
    records: Vec<Record>,
    freshness: String,
}

impl InMemoryConnector {
    pub fn new(source: Source, records: Vec<Record>) -> Self {
        Self {
            source,
            records,
            freshness: default_freshness(source).to_string(),
        }
    }

    pub fn with_freshness(mut self, freshness: impl Into<String>) -> Self {
        self.freshness = freshness.into();
        self
    }
}

#[async_trait]
impl Connector for InMemoryConnector {
    fn source(&self) -> Source {
        self.source
    }

    fn freshness(&self) -> &str {
        &self.freshness
    }

    async fn fetch(&self) -> anyhow::Result<Vec<Record>> {
        Ok(self.records.clone())
    }
}

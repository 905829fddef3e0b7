//! Error types for query execution.

use thiserror::Error;
use udc_core::Source;

#[derive(Debug, Error)]
pub enum ExecuteError {
    /// No connector is registered for the source. Raised before any fetch.
    #[error("Unsupported data source: {0}")]
    UnknownSource(Source),

    /// The connector failed to load its records.
    #[error("data fetch failed: {0:#}")]
    Fetch(anyhow::Error),
}

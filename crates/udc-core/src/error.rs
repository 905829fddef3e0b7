//! Error types for query construction.

use thiserror::Error;

/// Errors raised while turning a caller's request into a [`crate::Query`].
///
/// All of these are caller errors: no pipeline work has happened yet.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The source name does not match any known data source.
    #[error("Unsupported data source: {0}")]
    UnknownSource(String),

    /// The page size is outside the accepted range.
    #[error("limit must be between {min} and {max}, got {value}")]
    InvalidLimit { value: i64, min: u32, max: u32 },

    /// The offset is negative.
    #[error("offset must be >= 0, got {0}")]
    InvalidOffset(i64),

    /// The request payload could not be decoded.
    #[error("invalid query arguments: {0}")]
    InvalidArguments(String),
}

impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self {
        QueryError::InvalidArguments(err.to_string())
    }
}

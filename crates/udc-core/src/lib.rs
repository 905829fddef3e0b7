//! # udc-core
//!
//! Shared types for the Universal Data Connector: data sources, schemaless
//! records, the filter predicate language, the normalized query contract,
//! the response envelope and configuration.

// Configuration types shared across all UDC crates
pub mod config;

pub mod error;
pub mod filter;
pub mod query;
pub mod record;
pub mod response;
pub mod source;

pub use config::{ConfigError, DataConfig, LlmConfig, LoggingConfig, ServerConfig, UdcConfig};
pub use error::QueryError;
pub use filter::{CompareOp, FilterClause, apply_filters, matches_all, parse_filters};
pub use query::{DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT, Query, QueryRequest};
pub use record::Record;
pub use response::{DataResponse, DataType, Metadata, VOICE_SUMMARY_HINT};
pub use source::Source;

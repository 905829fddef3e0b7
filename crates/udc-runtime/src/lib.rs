//! UDC Runtime
//!
//! Connectors, the source → connector registry and the query executor.

pub mod connector;
pub mod error;
pub mod executor;
pub mod registry;

pub use connector::{
    Connector, FRESHNESS_CACHED_5M, FRESHNESS_REAL_TIME, InMemoryConnector, JsonFileConnector,
};
pub use error::ExecuteError;
pub use executor::QueryExecutor;
pub use registry::ConnectorRegistry;

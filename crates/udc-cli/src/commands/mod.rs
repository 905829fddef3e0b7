//! CLI command implementations for the Universal Data Connector.

pub mod chat;
pub mod check;
pub mod query;
pub mod serve;
pub mod tools;

//! Error types for the assistant layer.

use thiserror::Error;
use udc_core::QueryError;
use udc_runtime::ExecuteError;

/// Errors from a chat model backend.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM is disabled in configuration")]
    Disabled,

    #[error("API key not found in environment variable {0}")]
    MissingApiKey(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("LLM returned empty response")]
    EmptyResponse,
}

/// Errors while answering a chat turn or executing a tool call.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("model call failed: {0}")]
    Model(#[from] LlmError),

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid tool arguments: {0}")]
    InvalidToolArguments(String),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error("failed to serialize tool result: {0}")]
    Serialization(#[from] serde_json::Error),
}

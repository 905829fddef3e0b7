//! HTTP error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use udc_assistant::{DispatchError, LlmError};
use udc_core::QueryError;
use udc_runtime::ExecuteError;

/// Error returned by a handler, rendered as `{"detail": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The caller sent something invalid.
    #[error("{0}")]
    BadRequest(String),

    /// Chat was requested but no model is configured.
    #[error("{0}")]
    ServiceUnavailable(String),

    /// The model failed or produced an unusable tool call.
    #[error("{0}")]
    BadGateway(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Map a failed chat turn. Tool-call problems are the model's fault.
    pub fn from_chat(err: DispatchError) -> Self {
        match err {
            DispatchError::Model(LlmError::Disabled | LlmError::MissingApiKey(_)) => {
                ApiError::ServiceUnavailable(err.to_string())
            }
            DispatchError::Model(_)
            | DispatchError::UnknownTool(_)
            | DispatchError::InvalidToolArguments(_)
            | DispatchError::Query(_)
            | DispatchError::Execute(ExecuteError::UnknownSource(_)) => {
                ApiError::BadGateway(err.to_string())
            }
            DispatchError::Execute(ExecuteError::Fetch(_)) | DispatchError::Serialization(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }

    /// Map a failed direct tool invocation. Bad names and arguments are the caller's fault.
    pub fn from_tool_execution(err: DispatchError) -> Self {
        match err {
            DispatchError::UnknownTool(_)
            | DispatchError::InvalidToolArguments(_)
            | DispatchError::Query(_) => ApiError::BadRequest(err.to_string()),
            DispatchError::Execute(e) => e.into(),
            DispatchError::Model(_) => ApiError::BadGateway(err.to_string()),
            DispatchError::Serialization(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<ExecuteError> for ApiError {
    fn from(err: ExecuteError) -> Self {
        match err {
            ExecuteError::UnknownSource(_) => ApiError::BadRequest(err.to_string()),
            ExecuteError::Fetch(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(%status, error = %self, "request failed");
        } else {
            tracing::debug!(%status, error = %self, "request rejected");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

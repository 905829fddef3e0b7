//! Request handlers.

use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashMap;
use udc_assistant::ToolDefinition;
use udc_core::{DEFAULT_LIMIT, DataResponse, QueryRequest};

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Universal Data Connector API!" }))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `GET /data/{source}`: reserved parameters page the result, all others filter it.
pub async fn get_data(
    State(state): State<AppState>,
    Path(source): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<DataResponse>, ApiError> {
    let query = data_request(source, params)?.into_query()?;
    let response = state.executor.execute(&query).await?;
    Ok(Json(response))
}

/// Turn query-string parameters into a request with the HTTP defaults.
pub fn data_request(source: String, params: HashMap<String, String>) -> Result<QueryRequest, ApiError> {
    let mut request = QueryRequest::new(source)
        .with_limit(DEFAULT_LIMIT as i64)
        .with_voice_context(true);

    for (key, value) in params {
        match key.as_str() {
            "limit" => request.limit = parse_integer("limit", &value)?,
            "offset" => request.offset = parse_integer("offset", &value)?,
            "voice_context" => request.voice_context = parse_flag(&value)?,
            _ => request = request.with_filter(key, value),
        }
    }
    Ok(request)
}

fn parse_integer(name: &str, value: &str) -> Result<i64, ApiError> {
    value
        .trim()
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("{} must be an integer, got '{}'", name, value)))
}

fn parse_flag(value: &str) -> Result<bool, ApiError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ApiError::BadRequest(format!(
            "voice_context must be a boolean, got '{}'",
            value
        ))),
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// `POST /chat`
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let dispatcher = state
        .dispatcher
        .as_ref()
        .ok_or_else(|| ApiError::ServiceUnavailable("No chat model is configured".to_string()))?;

    tracing::info!(chars = request.message.len(), "chat request received");
    let response = dispatcher
        .respond(&request.message)
        .await
        .map_err(ApiError::from_chat)?;
    Ok(Json(ChatResponse { response }))
}

/// `GET /tools`
pub async fn list_tools(State(state): State<AppState>) -> Json<Vec<ToolDefinition>> {
    Json(state.tools.definitions().to_vec())
}

#[derive(Debug, Deserialize)]
pub struct ToolInvocation {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

/// `POST /tools/execute`
pub async fn execute_tool(
    State(state): State<AppState>,
    payload: Result<Json<ToolInvocation>, JsonRejection>,
) -> Result<Json<DataResponse>, ApiError> {
    let Json(invocation) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let response = state
        .tools
        .execute(&invocation.name, &invocation.arguments)
        .await
        .map_err(ApiError::from_tool_execution)?;
    Ok(Json(response))
}

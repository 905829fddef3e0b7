//! The `query_data` tool: definition, argument validation and conversion.

use crate::error::DispatchError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use udc_core::{DataResponse, MAX_LIMIT, MIN_LIMIT, Query, QueryRequest, Source};
use udc_runtime::QueryExecutor;

/// Name of the only tool the assistant declares.
pub const QUERY_DATA_TOOL: &str = "query_data";

/// Page size used when a tool call does not set `limit`.
pub const TOOL_DEFAULT_LIMIT: i64 = 5;

/// A function the model may call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema of the arguments object.
    pub parameters: Value,
}

impl ToolDefinition {
    /// Definition of `query_data`.
    pub fn query_data() -> Self {
        let sources: Vec<&str> = Source::ALL.iter().map(Source::as_str).collect();
        Self {
            name: QUERY_DATA_TOOL.to_string(),
            description: "Query structured business data from CRM, Support, or Analytics systems."
                .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "source": {
                        "type": "string",
                        "enum": sources,
                        "description": "The data source to query."
                    },
                    "filters": {
                        "type": "object",
                        "description": "Filtering conditions such as metric_name, status, priority, lifetime_value__gt, etc.",
                        "additionalProperties": {
                            "type": ["string", "number", "boolean"]
                        }
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Maximum number of results to return.",
                        "minimum": MIN_LIMIT,
                        "maximum": MAX_LIMIT,
                        "default": TOOL_DEFAULT_LIMIT
                    },
                    "offset": {
                        "type": "integer",
                        "description": "Pagination offset.",
                        "minimum": 0,
                        "default": 0
                    },
                    "voice_context": {
                        "type": "boolean",
                        "description": "Whether to optimize the response for voice interaction.",
                        "default": false
                    }
                },
                "required": ["source"]
            }),
        }
    }

    /// Chat completions `tools` entry.
    pub fn to_openai(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.parameters,
            }
        })
    }

    /// Check `arguments` against the parameter schema.
    pub fn validate(&self, arguments: &Value) -> Result<(), DispatchError> {
        let validator = jsonschema::validator_for(&self.parameters).map_err(|e| {
            DispatchError::InvalidToolArguments(format!("tool schema does not compile: {}", e))
        })?;

        let errors: Vec<String> = validator
            .iter_errors(arguments)
            .take(10)
            .map(|e| e.to_string())
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(DispatchError::InvalidToolArguments(errors.join("; ")))
        }
    }
}

/// Arguments of a `query_data` call, with the tool's defaults applied.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueryDataArgs {
    pub source: String,
    #[serde(default)]
    pub filters: Option<serde_json::Map<String, Value>>,
    #[serde(default = "default_tool_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
    #[serde(default)]
    pub voice_context: bool,
}

fn default_tool_limit() -> i64 {
    TOOL_DEFAULT_LIMIT
}

impl From<QueryDataArgs> for QueryRequest {
    fn from(args: QueryDataArgs) -> Self {
        QueryRequest {
            source: args.source,
            filters: args.filters,
            limit: args.limit,
            offset: args.offset,
            voice_context: args.voice_context,
        }
    }
}

/// Validate raw `query_data` arguments and turn them into a query.
pub fn parse_query_data(definition: &ToolDefinition, arguments: &Value) -> Result<Query, DispatchError> {
    definition.validate(arguments)?;
    let args: QueryDataArgs = serde_json::from_value(arguments.clone())
        .map_err(|e| DispatchError::InvalidToolArguments(e.to_string()))?;
    Ok(QueryRequest::from(args).into_query()?)
}

/// Runs tool invocations against the query executor.
///
/// Needs no model, so direct tool execution works even when chat is disabled.
#[derive(Debug, Clone)]
pub struct ToolExecutor {
    executor: Arc<QueryExecutor>,
    query_data: ToolDefinition,
}

impl ToolExecutor {
    pub fn new(executor: Arc<QueryExecutor>) -> Self {
        Self {
            executor,
            query_data: ToolDefinition::query_data(),
        }
    }

    /// Every tool this executor can run.
    pub fn definitions(&self) -> &[ToolDefinition] {
        std::slice::from_ref(&self.query_data)
    }

    /// Validate and execute one tool invocation.
    pub async fn execute(&self, name: &str, arguments: &Value) -> Result<DataResponse, DispatchError> {
        if name != QUERY_DATA_TOOL {
            return Err(DispatchError::UnknownTool(name.to_string()));
        }
        tracing::debug!(%arguments, "tool arguments");

        let query = parse_query_data(&self.query_data, arguments)?;
        let response = self.executor.execute(&query).await?;
        tracing::info!(
            source = %query.source,
            returned = response.metadata.returned_results,
            "tool call executed"
        );
        Ok(response)
    }
}

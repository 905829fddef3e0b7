//! One chat turn: ask the model, run at most one `query_data` call, ask again.

use crate::client::{ChatMessage, ChatModel};
use crate::error::{DispatchError, LlmError};
use crate::tool::{ToolDefinition, ToolExecutor};
use serde_json::Value;
use std::sync::Arc;
use udc_core::DataResponse;
use udc_runtime::QueryExecutor;

/// System prompt used when none is configured.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a business data assistant.";

pub struct ChatDispatcher {
    model: Arc<dyn ChatModel>,
    tools: ToolExecutor,
    system_prompt: String,
}

impl ChatDispatcher {
    pub fn new(model: Arc<dyn ChatModel>, executor: Arc<QueryExecutor>) -> Self {
        Self {
            model,
            tools: ToolExecutor::new(executor),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Tools declared to the model.
    pub fn tools(&self) -> &[ToolDefinition] {
        self.tools.definitions()
    }

    /// Answer a user message, executing at most one tool call.
    pub async fn respond(&self, message: &str) -> Result<String, DispatchError> {
        let mut messages = vec![
            ChatMessage::system(self.system_prompt.clone()),
            ChatMessage::user(message),
        ];

        let reply = self.model.complete(&messages, self.tools()).await?;

        let mut calls = reply.tool_calls.into_iter();
        let Some(call) = calls.next() else {
            tracing::info!("no tool call, returning direct model reply");
            return reply.content.ok_or(DispatchError::Model(LlmError::EmptyResponse));
        };
        let ignored = calls.count();
        if ignored > 0 {
            tracing::warn!(ignored, "model requested several tool calls, only the first is executed");
        }

        tracing::info!(tool = %call.function.name, call_id = %call.id, "tool call requested");
        let arguments: Value = serde_json::from_str(&call.function.arguments)
            .map_err(|e| DispatchError::InvalidToolArguments(format!("arguments are not JSON: {}", e)))?;

        let result = self.execute_tool_call(&call.function.name, &arguments).await?;
        let content = serde_json::to_string(&result)?;

        messages.push(ChatMessage::Assistant {
            content: reply.content,
            tool_calls: vec![call.clone()],
        });
        messages.push(ChatMessage::tool(call.id, content));

        let final_reply = self.model.complete(&messages, &[]).await?;
        tracing::info!("final response generated");
        final_reply
            .content
            .ok_or(DispatchError::Model(LlmError::EmptyResponse))
    }

    /// Validate and execute one tool invocation without involving the model.
    pub async fn execute_tool_call(
        &self,
        name: &str,
        arguments: &Value,
    ) -> Result<DataResponse, DispatchError> {
        self.tools.execute(name, arguments).await
    }
}

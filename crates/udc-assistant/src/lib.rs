//! UDC Assistant
//!
//! Natural-language access to the query pipeline through model tool calling.
//! The model sees a single `query_data` tool; [`ChatDispatcher`] validates and
//! executes the first call it makes and hands the result back for the final answer.

pub mod client;
pub mod dispatcher;
pub mod error;
pub mod openai;
pub mod tool;

pub use client::{ChatMessage, ChatModel, FunctionCall, ModelReply, ModelRequest, ScriptedModel, ToolCall};
pub use dispatcher::{ChatDispatcher, DEFAULT_SYSTEM_PROMPT};
pub use error::{DispatchError, LlmError};
pub use openai::OpenAiCompatibleClient;
pub use tool::{
    QUERY_DATA_TOOL, QueryDataArgs, TOOL_DEFAULT_LIMIT, ToolDefinition, ToolExecutor, parse_query_data,
};

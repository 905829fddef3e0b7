//! Client for OpenAI-compatible chat completions APIs (Groq, OpenAI, local gateways).

use crate::client::{ChatMessage, ChatModel, ModelReply, ToolCall};
use crate::error::LlmError;
use crate::tool::ToolDefinition;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use udc_core::LlmConfig;

pub struct OpenAiCompatibleClient {
    config: LlmConfig,
    api_key: String,
    http: reqwest::Client,
}

impl OpenAiCompatibleClient {
    /// Build a client, reading the API key from the configured environment variable.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        if !config.enabled {
            return Err(LlmError::Disabled);
        }
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| LlmError::MissingApiKey(config.api_key_env.clone()))?;
        Self::with_api_key(config, api_key)
    }

    pub fn with_api_key(config: &LlmConfig, api_key: impl Into<String>) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config: config.clone(),
            api_key: api_key.into(),
            http,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn request_body(&self, messages: &[ChatMessage], tools: &[ToolDefinition]) -> Value {
        let mut body = json!({
            "model": self.config.model,
            "messages": messages,
        });
        if !tools.is_empty() {
            body["tools"] = tools.iter().map(ToolDefinition::to_openai).collect();
            body["tool_choice"] = json!("auto");
        }
        body
    }
}

#[async_trait]
impl ChatModel for OpenAiCompatibleClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
    ) -> Result<ModelReply, LlmError> {
        let body = self.request_body(messages, tools);
        tracing::debug!(
            model = %self.config.model,
            messages = messages.len(),
            tools = tools.len(),
            "sending chat completion request"
        );

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(self.config.timeout_secs)
                } else {
                    LlmError::Http(format!("Request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::error!(%status, "chat completion request failed");
            return Err(LlmError::Http(format!("HTTP {} from chat completions API: {}", status, detail)));
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
        completion.into_reply()
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}

impl ChatCompletion {
    fn into_reply(self) -> Result<ModelReply, LlmError> {
        let choice = self.choices.into_iter().next().ok_or(LlmError::EmptyResponse)?;
        Ok(ModelReply {
            content: choice.message.content,
            tool_calls: choice.message.tool_calls.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OpenAiCompatibleClient {
        let config = LlmConfig {
            base_url: "http://localhost:9999/v1/".to_string(),
            ..LlmConfig::default()
        };
        OpenAiCompatibleClient::with_api_key(&config, "test-key").unwrap()
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        assert_eq!(client().endpoint(), "http://localhost:9999/v1/chat/completions");
    }

    #[test]
    fn test_request_body_with_and_without_tools() {
        let client = client();
        let messages = [ChatMessage::system("sys"), ChatMessage::user("hi")];

        let with_tools = client.request_body(&messages, &[ToolDefinition::query_data()]);
        assert_eq!(with_tools["model"], "llama-3.1-8b-instant");
        assert_eq!(with_tools["tool_choice"], "auto");
        assert_eq!(with_tools["tools"][0]["function"]["name"], "query_data");
        assert_eq!(with_tools["messages"][1]["role"], "user");

        let plain = client.request_body(&messages, &[]);
        assert!(plain.get("tools").is_none());
        assert!(plain.get("tool_choice").is_none());
    }

    #[test]
    fn test_parse_tool_call_reply() {
        let completion: ChatCompletion = serde_json::from_value(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_9",
                        "type": "function",
                        "function": {"name": "query_data", "arguments": "{\"source\":\"crm\"}"}
                    }]
                }
            }]
        }))
        .unwrap();
        let reply = completion.into_reply().unwrap();
        assert!(reply.content.is_none());
        assert_eq!(reply.tool_calls[0].id, "call_9");
        assert_eq!(reply.tool_calls[0].function.arguments, r#"{"source":"crm"}"#);
    }

    #[test]
    fn test_no_choices_is_empty_response() {
        let completion: ChatCompletion = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(matches!(completion.into_reply(), Err(LlmError::EmptyResponse)));
    }

    #[test]
    fn test_disabled_config() {
        let config = LlmConfig {
            enabled: false,
            ..LlmConfig::default()
        };
        assert!(matches!(
            OpenAiCompatibleClient::from_config(&config),
            Err(LlmError::Disabled)
        ));
    }

    #[test]
    fn test_missing_api_key() {
        let config = LlmConfig {
            api_key_env: "UDC_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..LlmConfig::default()
        };
        assert!(matches!(
            OpenAiCompatibleClient::from_config(&config),
            Err(LlmError::MissingApiKey(name)) if name == "UDC_TEST_KEY_THAT_IS_NEVER_SET"
        ));
    }
}

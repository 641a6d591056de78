//! OpenAI-compatible chat completions client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{
    ChatMessage, ChatOptions, ChatResponse, LlmClient, LlmConfig, LlmError, TokenUsage, ToolCall,
    ToolDefinition,
};

pub struct OpenAiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    /// Build a client for `config`.
    ///
    /// Fails with [`LlmError::MissingApiKey`] unless the provider is a local
    /// Ollama instance, which accepts any key.
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let api_key = match (&config.api_key, &config.provider) {
            (Some(key), _) if !key.is_empty() => key.clone(),
            (_, super::Provider::Ollama) => "ollama".to_string(),
            _ => {
                return Err(LlmError::MissingApiKey {
                    provider: config.provider.name().to_string(),
                })
            }
        };

        Ok(Self {
            client: Client::new(),
            endpoint: format!(
                "{}/chat/completions",
                config.provider.base_url().trim_end_matches('/')
            ),
            api_key,
            model: config.model.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [ToolDefinition]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

fn parse_response(body: &str) -> Result<ChatResponse, LlmError> {
    let parsed: CompletionResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::Parse(format!("{}, body: {}", e, body)))?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or(LlmError::EmptyChoices)?;

    Ok(ChatResponse {
        content: choice.message.content,
        tool_calls: choice.message.tool_calls.unwrap_or_default(),
        usage: parsed
            .usage
            .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens)),
    })
}

#[async_trait]
impl LlmClient for OpenAiClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn chat_completion(
        &self,
        messages: &[ChatMessage],
        tools: Option<&[ToolDefinition]>,
        options: ChatOptions,
    ) -> Result<ChatResponse, LlmError> {
        let request = CompletionRequest {
            model: &self.model,
            messages,
            tools: tools.filter(|t| !t.is_empty()),
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        tracing::debug!(
            model = %self.model,
            messages = messages.len(),
            "sending chat completion"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(LlmError::from_reqwest)?;

        let status = response.status();
        let body = response.text().await.map_err(LlmError::from_reqwest)?;

        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        parse_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Provider;

    #[test]
    fn test_missing_api_key_is_rejected() {
        let config = LlmConfig::new(Provider::OpenAI, None, "gpt-4");
        assert!(matches!(
            OpenAiClient::new(&config),
            Err(LlmError::MissingApiKey { .. })
        ));

        let ollama = LlmConfig::new(Provider::Ollama, None, "llama3");
        assert!(OpenAiClient::new(&ollama).is_ok());
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let config = LlmConfig::new(
            Provider::Custom("http://localhost:8080/v1/".to_string()),
            Some("key".to_string()),
            "local",
        );
        let client = OpenAiClient::new(&config).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8080/v1/chat/completions");
        assert_eq!(client.model(), "local");
    }

    #[test]
    fn test_parse_text_response() {
        let body = r#"{
            "choices": [{"message": {"role": "assistant", "content": "Leaf rust."}}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
        }"#;
        let response = parse_response(body).unwrap();
        assert_eq!(response.content.as_deref(), Some("Leaf rust."));
        assert!(response.tool_calls.is_empty());
        assert_eq!(response.usage, Some(TokenUsage::new(12, 3)));
    }

    #[test]
    fn test_parse_tool_call_response() {
        let body = r#"{
            "choices": [{"message": {"role": "assistant", "content": null, "tool_calls": [
                {"id": "call_1", "type": "function",
                 "function": {"name": "search_internet", "arguments": "{\"query\":\"wheat rust\"}"}}
            ]}}]
        }"#;
        let response = parse_response(body).unwrap();
        assert_eq!(response.content, None);
        assert_eq!(response.tool_calls.len(), 1);
        assert_eq!(response.tool_calls[0].function.name, "search_internet");
        assert_eq!(response.usage, None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_response(r#"{"choices": []}"#), Err(LlmError::EmptyChoices)));
        assert!(matches!(parse_response("not json"), Err(LlmError::Parse(_))));
    }
}

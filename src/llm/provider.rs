use serde::{Deserialize, Serialize};

use super::ChatOptions;

/// Upper and lower bounds accepted for sampling temperature.
pub const MIN_TEMPERATURE: f32 = 0.1;
pub const MAX_TEMPERATURE: f32 = 2.0;

/// OpenAI-compatible providers the client knows a base URL for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Provider {
    /// OpenAI API
    OpenAI,
    /// OpenRouter (OpenAI-compatible)
    OpenRouter,
    /// Ollama local models through its OpenAI-compatible endpoint
    Ollama,
    /// Any other OpenAI-compatible endpoint
    Custom(String),
}

impl Provider {
    /// Pick a provider for a configured base URL, falling back to `Custom`.
    pub fn from_base_url(base_url: &str) -> Self {
        let trimmed = base_url.trim_end_matches('/');
        [Provider::OpenAI, Provider::OpenRouter, Provider::Ollama]
            .into_iter()
            .find(|p| p.base_url() == trimmed)
            .unwrap_or_else(|| Provider::Custom(trimmed.to_string()))
    }

    pub fn base_url(&self) -> &str {
        match self {
            Provider::OpenAI => "https://api.openai.com/v1",
            Provider::OpenRouter => "https://openrouter.ai/api/v1",
            Provider::Ollama => "http://localhost:11434/v1",
            Provider::Custom(url) => url,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Provider::OpenAI => "openai",
            Provider::OpenRouter => "openrouter",
            Provider::Ollama => "ollama",
            Provider::Custom(_) => "custom",
        }
    }
}

/// Everything needed to build one LLM handle.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    pub provider: Provider,
    pub api_key: Option<String>,
    pub model: String,
    /// `None` keeps the provider default.
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl LlmConfig {
    pub fn new(provider: Provider, api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            provider,
            api_key,
            model: model.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Set the sampling temperature, clamped to the supported range.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(clamp_temperature(temperature));
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn chat_options(&self) -> ChatOptions {
        ChatOptions {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

/// Clamp a temperature into `[MIN_TEMPERATURE, MAX_TEMPERATURE]`.
///
/// NaN is not orderable, so it maps to the lower bound.
pub fn clamp_temperature(temperature: f32) -> f32 {
    if temperature.is_nan() {
        return MIN_TEMPERATURE;
    }
    temperature.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_base_urls_resolve_to_providers() {
        assert_eq!(Provider::from_base_url("https://api.openai.com/v1/"), Provider::OpenAI);
        assert_eq!(Provider::from_base_url("https://openrouter.ai/api/v1"), Provider::OpenRouter);
        assert_eq!(
            Provider::from_base_url("http://gateway.local/v1"),
            Provider::Custom("http://gateway.local/v1".to_string())
        );
    }

    #[test]
    fn test_temperature_is_clamped() {
        let config = LlmConfig::new(Provider::OpenAI, None, "gpt-3.5-turbo").with_temperature(3.5);
        assert_eq!(config.temperature, Some(MAX_TEMPERATURE));
        assert_eq!(clamp_temperature(0.0), MIN_TEMPERATURE);
        assert_eq!(clamp_temperature(0.7), 0.7);
        assert_eq!(clamp_temperature(f32::NAN), MIN_TEMPERATURE);
    }

    #[test]
    fn test_chat_options_follow_config() {
        let config = LlmConfig::new(Provider::OpenAI, None, "gpt-4").with_max_tokens(512);
        let options = config.chat_options();
        assert_eq!(options.temperature, None);
        assert_eq!(options.max_tokens, Some(512));
    }
}

//! Settings for both binaries.
//!
//! Layers, lowest precedence first:
//! - built-in defaults
//! - an optional TOML file, `crop_crew.toml` or the path in `CROP_CREW_CONFIG`
//! - `CROP_CREW__<SECTION>__<KEY>` environment variables
//!
//! API keys are read from `OPENAI_API_KEY` and `SERPER_API_KEY` when they are
//! not set through the layers above.

use config::{Environment, File};
use serde::Deserialize;
use thiserror::Error;

use crate::llm::{LlmConfig, Provider};
use crate::tools::{SearchConfig, DEFAULT_ENDPOINT};

pub const DEFAULT_CONFIG_FILE: &str = "crop_crew.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LlmSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    /// Model used by the batch run
    pub model: String,
    /// Model used by the web form
    pub form_model: String,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SearchSettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub results: u32,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CrewSettings {
    pub verbose: bool,
    /// Tool rounds each agent may spend per task
    pub max_iterations: usize,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Settings {
    pub llm: LlmSettings,
    pub search: SearchSettings,
    pub server: ServerSettings,
    pub crew: CrewSettings,
}

impl Settings {
    /// Load settings from the default file location and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("CROP_CREW_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(&path)
    }

    /// Load settings using `path` as the optional TOML layer.
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let built = config::Config::builder()
            .set_default("llm.base_url", Provider::OpenAI.base_url())?
            .set_default("llm.model", "gpt-4")?
            .set_default("llm.form_model", "gpt-3.5-turbo")?
            .set_default("search.endpoint", DEFAULT_ENDPOINT)?
            .set_default("search.results", 10)?
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8501)?
            .set_default("crew.verbose", true)?
            .set_default("crew.max_iterations", 15)?
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("CROP_CREW")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut settings: Settings = built.try_deserialize()?;
        settings.fill_api_keys_from_env();
        Ok(settings)
    }

    fn fill_api_keys_from_env(&mut self) {
        if self.llm.api_key.is_none() {
            self.llm.api_key = std::env::var("OPENAI_API_KEY").ok();
        }
        if self.search.api_key.is_none() {
            self.search.api_key = std::env::var("SERPER_API_KEY").ok();
        }
    }

    /// LLM configuration for `model`, without a temperature override.
    pub fn llm_config(&self, model: &str) -> LlmConfig {
        let mut config = LlmConfig::new(
            Provider::from_base_url(&self.llm.base_url),
            self.llm.api_key.clone(),
            model,
        );
        if let Some(max_tokens) = self.llm.max_tokens {
            config = config.with_max_tokens(max_tokens);
        }
        config
    }

    /// Search configuration requesting `n_results` results.
    pub fn search_config(&self, n_results: u32) -> SearchConfig {
        SearchConfig::new(
            self.search.endpoint.clone(),
            self.search.api_key.clone(),
            n_results,
        )
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::load_from("does-not-exist/crop_crew").unwrap();
        assert_eq!(settings.llm.model, "gpt-4");
        assert_eq!(settings.llm.form_model, "gpt-3.5-turbo");
        assert_eq!(settings.search.results, 10);
        assert_eq!(settings.search.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.server.port, 8501);
        assert!(settings.crew.verbose);
        assert_eq!(settings.crew.max_iterations, 15);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crop_crew.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[llm]\nbase_url = \"https://openrouter.ai/api/v1\"\nmodel = \"openai/gpt-4o\"\n\n[server]\nport = 9100"
        )
        .unwrap();

        let settings = Settings::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(settings.llm.model, "openai/gpt-4o");
        assert_eq!(settings.server.port, 9100);
        assert_eq!(settings.bind_address(), "127.0.0.1:9100");
        assert_eq!(settings.llm_config("openai/gpt-4o").provider, Provider::OpenRouter);
    }

    #[test]
    fn test_search_config_clamps_results() {
        let settings = Settings::load_from("does-not-exist/crop_crew").unwrap();
        assert_eq!(settings.search_config(42).n_results, 20);
        assert_eq!(settings.search_config(0).n_results, 1);
    }
}

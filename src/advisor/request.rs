use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::config::Settings;
use crate::llm::{clamp_temperature, LlmConfig};
use crate::task::TaskInputs;
use crate::tools::{clamp_result_count, SearchConfig};

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_SEARCH_RESULTS: u32 = 10;
pub const DOWNLOAD_SUFFIX: &str = "_crop_advice.md";
pub const MISSING_FIELDS_WARNING: &str =
    "Please fill out Crop Name, Location, and Symptoms to continue.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdvisorError {
    /// Required form fields left blank, by form label.
    #[error("{}", MISSING_FIELDS_WARNING)]
    MissingFields(Vec<&'static str>),
}

/// One submission of the advice form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceRequest {
    #[serde(default)]
    pub crop_name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub symptoms: String,
    #[serde(default)]
    pub soil_info: String,
    #[serde(default = "default_temperature", deserialize_with = "lenient_temperature")]
    pub temperature: f32,
    #[serde(
        default = "default_search_results",
        deserialize_with = "lenient_search_results"
    )]
    pub search_results: u32,
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_search_results() -> u32 {
    DEFAULT_SEARCH_RESULTS
}

/// Slider value as it arrives: a JSON number or raw form text.
#[derive(Deserialize)]
#[serde(untagged)]
enum SliderValue {
    Number(f64),
    Text(String),
}

impl SliderValue {
    fn as_f64(&self) -> Option<f64> {
        match self {
            SliderValue::Number(n) => Some(*n),
            SliderValue::Text(t) => t.trim().parse().ok(),
        }
    }
}

fn lenient_temperature<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = SliderValue::deserialize(deserializer)?;
    Ok(value
        .as_f64()
        .map(|t| t as f32)
        .unwrap_or(DEFAULT_TEMPERATURE))
}

// Negative counts become 0 and fractions round; the clamp happens on use.
fn lenient_search_results<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = SliderValue::deserialize(deserializer)?;
    Ok(value
        .as_f64()
        .filter(|n| n.is_finite())
        .map(|n| n.round().clamp(0.0, u32::MAX as f64) as u32)
        .unwrap_or(DEFAULT_SEARCH_RESULTS))
}

impl Default for AdviceRequest {
    fn default() -> Self {
        Self {
            crop_name: String::new(),
            location: String::new(),
            symptoms: String::new(),
            soil_info: String::new(),
            temperature: DEFAULT_TEMPERATURE,
            search_results: DEFAULT_SEARCH_RESULTS,
        }
    }
}

impl AdviceRequest {
    /// Check the required fields. A blank or whitespace-only field is missing.
    pub fn validate(&self) -> Result<(), AdvisorError> {
        let missing: Vec<&'static str> = [
            ("Crop Name", &self.crop_name),
            ("Location", &self.location),
            ("Symptoms", &self.symptoms),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| label)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AdvisorError::MissingFields(missing))
        }
    }

    /// Temperature handed to the LLM, within the slider range.
    pub fn effective_temperature(&self) -> f32 {
        if self.temperature.is_finite() {
            clamp_temperature(self.temperature)
        } else {
            DEFAULT_TEMPERATURE
        }
    }

    pub fn effective_search_results(&self) -> u32 {
        clamp_result_count(self.search_results)
    }

    pub fn llm_config(&self, settings: &Settings) -> LlmConfig {
        settings
            .llm_config(&settings.llm.form_model)
            .with_temperature(self.effective_temperature())
    }

    pub fn search_config(&self, settings: &Settings) -> SearchConfig {
        settings.search_config(self.effective_search_results())
    }

    /// Kickoff inputs for the form crew's placeholders.
    pub fn inputs(&self) -> TaskInputs {
        TaskInputs::from([
            ("crop".to_string(), self.crop_name.clone()),
            ("location".to_string(), self.location.clone()),
            ("symptoms".to_string(), self.symptoms.clone()),
            ("soil".to_string(), self.soil_info.clone()),
        ])
    }

    pub fn download_filename(&self) -> String {
        download_filename(&self.crop_name)
    }
}

/// Name of the Markdown file offered for download.
pub fn download_filename(crop_name: &str) -> String {
    format!("{}{}", crop_name.to_lowercase(), DOWNLOAD_SUFFIX)
}

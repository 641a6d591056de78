//! Web search backed by a Serper-compatible API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::Tool;

pub const MIN_RESULTS: u32 = 1;
pub const MAX_RESULTS: u32 = 20;
pub const DEFAULT_ENDPOINT: &str = "https://google.serper.dev/search";

pub fn clamp_result_count(n: u32) -> u32 {
    n.clamp(MIN_RESULTS, MAX_RESULTS)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    /// Number of results requested per query, always within `[MIN_RESULTS, MAX_RESULTS]`.
    pub n_results: u32,
}

impl SearchConfig {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, n_results: u32) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key,
            n_results: clamp_result_count(n_results),
        }
    }
}

#[derive(Debug, Serialize)]
struct SerperRequest<'a> {
    q: &'a str,
    num: u32,
}

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

pub struct SerperSearch {
    client: reqwest::Client,
    config: SearchConfig,
}

impl SerperSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

fn format_results(query: &str, results: &[OrganicResult], limit: usize) -> String {
    if results.is_empty() {
        return format!("No results found for: {}", query);
    }

    let mut output = String::from("Search results:\n");
    for result in results.iter().take(limit) {
        output.push_str(&format!(
            "Title: {}\nLink: {}\nSnippet: {}\n---\n",
            result.title, result.link, result.snippet
        ));
    }
    output
}

#[async_trait]
impl Tool for SerperSearch {
    fn name(&self) -> &str {
        "search_internet"
    }

    fn description(&self) -> &str {
        "Search the internet for current information such as crop diseases, pest outbreaks, weather forecasts and fertilizer guidance. Returns titles, links and snippets."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let query = args["query"]
            .as_str()
            .filter(|q| !q.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("Missing 'query' argument"))?;

        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| anyhow::anyhow!("SERPER_API_KEY is not set"))?;

        tracing::debug!(query, n = self.config.n_results, "searching");

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("X-API-KEY", api_key)
            .json(&SerperRequest {
                q: query,
                num: self.config.n_results,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Search API error ({}): {}", status, error_text);
        }

        let parsed: SerperResponse = response.json().await?;
        Ok(format_results(
            query,
            &parsed.organic,
            self.config.n_results as usize,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_count_is_clamped() {
        assert_eq!(SearchConfig::new(DEFAULT_ENDPOINT, None, 0).n_results, 1);
        assert_eq!(SearchConfig::new(DEFAULT_ENDPOINT, None, 10).n_results, 10);
        assert_eq!(SearchConfig::new(DEFAULT_ENDPOINT, None, 50).n_results, 20);
    }

    #[test]
    fn test_format_results() {
        let body = r#"{"organic": [
            {"title": "Wheat rust", "link": "https://example.org/rust", "snippet": "Orange pustules"},
            {"title": "Leaf blight", "link": "https://example.org/blight", "snippet": "Brown lesions"}
        ]}"#;
        let parsed: SerperResponse = serde_json::from_str(body).unwrap();

        let all = format_results("wheat", &parsed.organic, 10);
        assert!(all.contains("Title: Wheat rust\nLink: https://example.org/rust\nSnippet: Orange pustules\n---"));
        assert!(all.contains("Leaf blight"));

        let limited = format_results("wheat", &parsed.organic, 1);
        assert!(!limited.contains("Leaf blight"));

        assert_eq!(format_results("wheat", &[], 5), "No results found for: wheat");
    }

    #[tokio::test]
    async fn test_execute_requires_query_and_key() {
        let tool = SerperSearch::new(SearchConfig::new(DEFAULT_ENDPOINT, None, 5));
        let err = tool.execute(json!({})).await.unwrap_err();
        assert!(err.to_string().contains("query"));

        let err = tool.execute(json!({"query": "rice blast"})).await.unwrap_err();
        assert!(err.to_string().contains("SERPER_API_KEY"));
    }
}

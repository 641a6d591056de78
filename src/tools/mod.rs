//! Tools agents can call while working on a task.

mod search;

pub use search::{
    clamp_result_count, SearchConfig, SerperSearch, DEFAULT_ENDPOINT, MAX_RESULTS, MIN_RESULTS,
};

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::llm::{FunctionDefinition, ToolDefinition};

/// A capability an agent may invoke through the model's function calling.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name the model uses to call the tool.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON schema of the arguments object.
    fn parameters_schema(&self) -> Value;

    async fn execute(&self, args: Value) -> anyhow::Result<String>;

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name: self.name().to_string(),
                description: self.description().to_string(),
                parameters: self.parameters_schema(),
            },
        }
    }
}

/// Tools are shared between agents, so they live behind an `Arc`.
pub type SharedTool = Arc<dyn Tool>;

/// Find a tool by the name the model called it with.
pub fn find_tool<'a>(tools: &'a [SharedTool], name: &str) -> Option<&'a SharedTool> {
    tools.iter().find(|t| t.name() == name)
}

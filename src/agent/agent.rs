use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::agent::role::AgentRole;
use crate::llm::{ChatOptions, LlmClient, LlmError, TokenUsage};
use crate::tools::SharedTool;

/// Tool rounds an agent may spend on one task before it must answer.
pub const DEFAULT_MAX_ITERATIONS: usize = 15;

/// Core Agent structure
#[derive(Clone)]
pub struct Agent {
    pub id: String,
    pub role: AgentRole,

    /// Whether the agent may hand work to other agents. Always false here;
    /// there is no delegation path.
    pub allow_delegation: bool,
    pub verbose: bool,

    pub tools: Vec<SharedTool>,

    // LLM handle and sampling settings
    pub llm: Arc<dyn LlmClient>,
    pub options: ChatOptions,
    pub max_iterations: usize,
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("id", &self.id)
            .field("role", &self.role.role)
            .field("allow_delegation", &self.allow_delegation)
            .field("tools", &self.tools.iter().map(|t| t.name()).collect::<Vec<_>>())
            .field("model", &self.llm.model())
            .field("options", &self.options)
            .finish()
    }
}

/// Agent error types
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("model returned an empty answer")]
    EmptyResponse,
}

/// One tool invocation made while working on a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub tool_name: String,
    /// Arguments as sent by the model (JSON string)
    pub arguments: String,
    /// Text handed back to the model
    pub result: String,
    pub execution_time_ms: u64,
    pub error: Option<String>,
}

impl ToolInvocation {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Agent Response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    /// Final answer text
    pub content: String,
    pub execution_time_ms: u64,
    pub usage: TokenUsage,
    pub tool_calls: Vec<ToolInvocation>,
    pub model_used: String,
}

impl AgentResponse {
    /// Names of tools used, in call order
    pub fn tools_used(&self) -> Vec<&str> {
        self.tool_calls.iter().map(|c| c.tool_name.as_str()).collect()
    }
}

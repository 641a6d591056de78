use std::sync::Arc;

use crate::agent::agent::{Agent, DEFAULT_MAX_ITERATIONS};
use crate::agent::role::AgentRole;
use crate::llm::{ChatOptions, LlmClient};
use crate::tools::SharedTool;

impl Agent {
    /// Create an agent with no tools and provider-default sampling.
    pub fn new(role: AgentRole, llm: Arc<dyn LlmClient>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            allow_delegation: false,
            verbose: false,
            tools: Vec::new(),
            llm,
            options: ChatOptions::default(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn with_tools(mut self, tools: Vec<SharedTool>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_options(mut self, options: ChatOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

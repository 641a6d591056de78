pub mod agent;
pub mod agent_constructors;
pub mod agent_execution;
pub mod agent_prompts;
pub mod role;

// Re-export main types for easier access
pub use agent::Agent;
pub use agent::AgentError;
pub use agent::AgentResponse;
pub use agent::ToolInvocation;
pub use agent::DEFAULT_MAX_ITERATIONS;
pub use agent_prompts::CONTEXT_SEPARATOR;
pub use role::*;

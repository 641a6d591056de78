//! # crop-crew
//!
//! Three crop advisors (crop doctor, weather and irrigation, soil and
//! fertilizer) run one after another over an OpenAI-compatible LLM, with a
//! shared web search tool.
//!
//! ## Modules
//! - `agent`: role/goal/backstory agents and their tool-calling loop
//! - `task`: task templates and kickoff interpolation
//! - `crew`: sequential crew and its output
//! - `llm`: chat completion client
//! - `tools`: search tool
//! - `advisor`: the crop-advice roster and form requests
//! - `web`: the advice form server

pub mod advisor;
pub mod agent;
pub mod config;
pub mod crew;
pub mod llm;
pub mod logging;
pub mod task;
pub mod tools;
pub mod web;

pub use agent::{Agent, AgentError, AgentResponse, AgentRole};
pub use config::Settings;
pub use crew::{Crew, CrewError, CrewOutput};
pub use task::{Task, TaskInputs, TaskOutput};

#[cfg(test)]
mod tests;

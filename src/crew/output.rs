use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::llm::TokenUsage;
use crate::task::TaskOutput;

/// Result of one kickoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewOutput {
    /// Raw text of the final task's output
    pub raw: String,
    pub tasks_output: Vec<TaskOutput>,
    pub token_usage: TokenUsage,
    pub finished_at: DateTime<Utc>,
}

impl CrewOutput {
    pub fn new(tasks_output: Vec<TaskOutput>, token_usage: TokenUsage) -> Self {
        let raw = tasks_output
            .last()
            .map(|o| o.raw.clone())
            .unwrap_or_default();
        Self {
            raw,
            tasks_output,
            token_usage,
            finished_at: Utc::now(),
        }
    }
}

impl fmt::Display for CrewOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

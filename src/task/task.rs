use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::llm::TokenUsage;

/// Values substituted into `{name}` placeholders at kickoff.
pub type TaskInputs = HashMap<String, String>;

/// A unit of work bound to exactly one agent.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Task {
    pub id: String,
    /// May contain `{name}` placeholders
    pub description: String,
    pub expected_output: String,
    /// Id of the agent assigned to this task
    pub agent_id: String,
}

impl Task {
    pub fn new(
        description: impl Into<String>,
        expected_output: impl Into<String>,
        agent: &Agent,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            description: description.into(),
            expected_output: expected_output.into(),
            agent_id: agent.id.clone(),
        }
    }

    /// Copy of this task with its placeholders filled from `inputs`.
    pub fn interpolate(&self, inputs: &TaskInputs) -> Task {
        Task {
            id: self.id.clone(),
            description: interpolate(&self.description, inputs),
            expected_output: interpolate(&self.expected_output, inputs),
            agent_id: self.agent_id.clone(),
        }
    }
}

/// Replace every `{key}` whose key is in `inputs`.
///
/// Single pass: substituted text is never scanned again, and placeholders
/// with unknown keys are kept as written.
pub fn interpolate(template: &str, inputs: &TaskInputs) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let replaced = after.find('}').and_then(|close| {
            let key = &after[..close];
            let is_name = !key.is_empty()
                && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
            if is_name {
                inputs.get(key).map(|value| (value, close))
            } else {
                None
            }
        });

        match replaced {
            Some((value, close)) => {
                output.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                output.push('{');
                rest = after;
            }
        }
    }

    output.push_str(rest);
    output
}

/// What one task produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskOutput {
    /// Interpolated description the agent worked on
    pub description: String,
    pub expected_output: String,
    pub agent_role: String,
    pub raw: String,
    pub usage: TokenUsage,
}

use serde::{Deserialize, Serialize};

/// Who an agent is: the three strings that make up its persona.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRole {
    /// Role label, e.g. "Crop Doctor"
    pub role: String,
    /// What the agent is trying to achieve
    pub goal: String,
    /// Background the agent speaks from
    pub backstory: String,
}

impl AgentRole {
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
        }
    }
}

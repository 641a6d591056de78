use std::sync::Arc;

use thiserror::Error;

use crate::agent::{Agent, AgentError, CONTEXT_SEPARATOR};
use crate::crew::output::CrewOutput;
use crate::llm::TokenUsage;
use crate::task::{Task, TaskInputs, TaskOutput};

#[derive(Debug, Error)]
pub enum CrewError {
    #[error("a crew needs at least one task")]
    EmptyTasks,

    #[error("task '{task}' is assigned to an agent that is not part of the crew")]
    UnknownAgent { task: String },

    #[error("{role} failed: {source}")]
    Agent {
        role: String,
        #[source]
        source: AgentError,
    },
}

/// Ordered agents and tasks, run one task after another.
#[derive(Debug, Clone)]
pub struct Crew {
    agents: Vec<Arc<Agent>>,
    tasks: Vec<Task>,
    verbose: bool,
}

impl Crew {
    /// Bundle agents and tasks. Every task must name an agent in `agents`.
    pub fn new(agents: Vec<Arc<Agent>>, tasks: Vec<Task>) -> Result<Self, CrewError> {
        if tasks.is_empty() {
            return Err(CrewError::EmptyTasks);
        }

        if let Some(orphan) = tasks
            .iter()
            .find(|task| !agents.iter().any(|a| a.id == task.agent_id))
        {
            return Err(CrewError::UnknownAgent {
                task: orphan.description.clone(),
            });
        }

        Ok(Self {
            agents,
            tasks,
            verbose: false,
        })
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn agents(&self) -> &[Arc<Agent>] {
        &self.agents
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    fn agent_for(&self, task: &Task) -> Result<&Arc<Agent>, CrewError> {
        self.agents
            .iter()
            .find(|a| a.id == task.agent_id)
            .ok_or_else(|| CrewError::UnknownAgent {
                task: task.description.clone(),
            })
    }

    /// Run every task in order and return the final result.
    ///
    /// Each task sees the raw outputs of all earlier tasks as context. The
    /// first failure aborts the run; nothing partial is returned.
    pub async fn kickoff(&self, inputs: &TaskInputs) -> Result<CrewOutput, CrewError> {
        let mut tasks_output: Vec<TaskOutput> = Vec::with_capacity(self.tasks.len());
        let mut token_usage = TokenUsage::default();

        for (index, template) in self.tasks.iter().enumerate() {
            let task = template.interpolate(inputs);
            let agent = self.agent_for(&task)?;

            if self.verbose {
                tracing::info!(
                    step = index + 1,
                    total = self.tasks.len(),
                    agent = %agent.role.role,
                    task = %task.description,
                    "starting task"
                );
            } else {
                tracing::debug!(step = index + 1, agent = %agent.role.role, "starting task");
            }

            let context = if tasks_output.is_empty() {
                None
            } else {
                Some(
                    tasks_output
                        .iter()
                        .map(|o| o.raw.as_str())
                        .collect::<Vec<_>>()
                        .join(CONTEXT_SEPARATOR),
                )
            };

            let response = agent
                .execute_task(&task, context.as_deref())
                .await
                .map_err(|source| {
                    tracing::error!(agent = %agent.role.role, error = %source, "task failed");
                    CrewError::Agent {
                        role: agent.role.role.clone(),
                        source,
                    }
                })?;

            if self.verbose {
                tracing::info!(
                    agent = %agent.role.role,
                    elapsed_ms = response.execution_time_ms,
                    tools = ?response.tools_used(),
                    "task finished"
                );
            }

            token_usage.add(&response.usage);
            tasks_output.push(TaskOutput {
                description: task.description,
                expected_output: task.expected_output,
                agent_role: agent.role.role.clone(),
                raw: response.content,
                usage: response.usage,
            });
        }

        Ok(CrewOutput::new(tasks_output, token_usage))
    }
}

use std::time::Instant;

use serde_json::Value;

use crate::agent::agent::{Agent, AgentError, AgentResponse, ToolInvocation};
use crate::llm::{ChatMessage, ChatResponse, TokenUsage, ToolCall, ToolDefinition};
use crate::task::task::Task;
use crate::tools::find_tool;

impl Agent {
    /// Work on `task` until the model produces a final answer.
    ///
    /// `context` carries the outputs of earlier tasks in the crew. Tool
    /// failures are reported back to the model; only LLM failures and an
    /// empty final answer end the run with an error.
    pub async fn execute_task(
        &self,
        task: &Task,
        context: Option<&str>,
    ) -> Result<AgentResponse, AgentError> {
        let start_time = Instant::now();
        let mut messages = self.build_initial_messages(task, context);
        let definitions: Vec<ToolDefinition> = self.tools.iter().map(|t| t.definition()).collect();
        let mut usage = TokenUsage::default();
        let mut tool_calls = Vec::new();

        let mut answer = None;
        for iteration in 1..=self.max_iterations {
            let tools = if definitions.is_empty() {
                None
            } else {
                Some(definitions.as_slice())
            };
            let response = self.llm.chat_completion(&messages, tools, self.options).await?;
            record_usage(&mut usage, &response);

            if response.tool_calls.is_empty() {
                answer = Some(response.content.unwrap_or_default());
                break;
            }

            tracing::debug!(
                agent = %self.role.role,
                iteration,
                calls = response.tool_calls.len(),
                "model requested tools"
            );
            messages.push(ChatMessage::assistant_tool_calls(response.tool_calls.clone()));
            for call in &response.tool_calls {
                let invocation = self.run_tool(call).await;
                messages.push(ChatMessage::tool_result(&call.id, &invocation.result));
                tool_calls.push(invocation);
            }
        }

        let answer = match answer {
            Some(answer) => answer,
            None => {
                tracing::warn!(
                    agent = %self.role.role,
                    max_iterations = self.max_iterations,
                    "tool budget exhausted, asking for final answer"
                );
                messages.push(ChatMessage::user(self.final_answer_prompt()));
                let response = self.llm.chat_completion(&messages, None, self.options).await?;
                record_usage(&mut usage, &response);
                response.content.unwrap_or_default()
            }
        };

        if answer.trim().is_empty() {
            return Err(AgentError::EmptyResponse);
        }

        Ok(AgentResponse {
            content: answer,
            execution_time_ms: start_time.elapsed().as_millis() as u64,
            usage,
            tool_calls,
            model_used: self.llm.model().to_string(),
        })
    }

    async fn run_tool(&self, call: &ToolCall) -> ToolInvocation {
        let tool_name = call.function.name.clone();
        let arguments = call.function.arguments.clone();
        let tool_start = Instant::now();

        let outcome = match find_tool(&self.tools, &tool_name) {
            None => Err(format!("Unknown tool '{}'", tool_name)),
            Some(tool) => match parse_arguments(&arguments) {
                Err(e) => Err(format!("Invalid arguments for '{}': {}", tool_name, e)),
                Ok(args) => tool.execute(args).await.map_err(|e| e.to_string()),
            },
        };

        let execution_time_ms = tool_start.elapsed().as_millis() as u64;
        match outcome {
            Ok(result) => {
                if self.verbose {
                    tracing::info!(agent = %self.role.role, tool = %tool_name, "tool call finished");
                }
                ToolInvocation {
                    tool_name,
                    arguments,
                    result,
                    execution_time_ms,
                    error: None,
                }
            }
            Err(error) => {
                tracing::warn!(agent = %self.role.role, tool = %tool_name, %error, "tool call failed");
                ToolInvocation {
                    tool_name,
                    arguments,
                    result: format!("Error: {}", error),
                    execution_time_ms,
                    error: Some(error),
                }
            }
        }
    }
}

fn record_usage(total: &mut TokenUsage, response: &ChatResponse) {
    if let Some(usage) = &response.usage {
        total.add(usage);
    }
}

fn parse_arguments(arguments: &str) -> Result<Value, serde_json::Error> {
    if arguments.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_str(arguments)
}

use crate::agent::agent::Agent;
use crate::llm::ChatMessage;
use crate::task::task::Task;

/// Separator placed between earlier task outputs in the shared context.
pub const CONTEXT_SEPARATOR: &str = "\n\n----------\n\n";

impl Agent {
    /// Build initial messages for the agent
    pub fn build_initial_messages(&self, task: &Task, context: Option<&str>) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(self.build_system_prompt()),
            ChatMessage::user(self.build_task_prompt(task, context)),
        ]
    }

    pub fn build_system_prompt(&self) -> String {
        let mut prompt = format!(
            "You are {}. {}\nYour personal goal is: {}",
            self.role.role, self.role.backstory, self.role.goal
        );

        if !self.tools.is_empty() {
            let names: Vec<&str> = self.tools.iter().map(|t| t.name()).collect();
            prompt.push_str(&format!(
                "\n\nYou have access to the following tools: {}. Use them when current information would improve your answer.",
                names.join(", ")
            ));
        }

        prompt
    }

    pub fn build_task_prompt(&self, task: &Task, context: Option<&str>) -> String {
        let mut prompt = format!("Current Task: {}", task.description);
        prompt.push_str(&format!(
            "\n\nThis is the expected criteria for your final answer: {}\nyou MUST return the actual complete content as the final answer, not a summary.",
            task.expected_output
        ));

        if let Some(context) = context.filter(|c| !c.trim().is_empty()) {
            prompt.push_str(&format!(
                "\n\nThis is the context you're working with:\n{}",
                context
            ));
        }

        prompt.push_str("\n\nFormat your final answer in Markdown.");
        prompt
    }

    /// Nudge sent when the agent ran out of tool rounds.
    pub fn final_answer_prompt(&self) -> String {
        "You have used all the tool calls available for this task. Give your best final answer now, using the information you already have."
            .to_string()
    }
}

//! The three crop advisors and their tasks, in the batch and form variants.

use std::sync::Arc;

use crate::agent::{Agent, AgentRole};
use crate::config::CrewSettings;
use crate::crew::{Crew, CrewError};
use crate::llm::{ChatOptions, LlmClient};
use crate::task::{Task, TaskInputs};
use crate::tools::SharedTool;

/// Topic the batch run is kicked off with.
pub const BATCH_TOPIC: &str = "Crop Health and Agricultural Advice";

/// What every advisor shares: one LLM handle, one tool list, one set of options.
#[derive(Clone)]
pub struct RosterParts {
    pub llm: Arc<dyn LlmClient>,
    pub tools: Vec<SharedTool>,
    pub options: ChatOptions,
    pub verbose: bool,
    pub max_iterations: usize,
}

impl RosterParts {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        tools: Vec<SharedTool>,
        options: ChatOptions,
        crew: &CrewSettings,
    ) -> Self {
        Self {
            llm,
            tools,
            options,
            verbose: crew.verbose,
            max_iterations: crew.max_iterations,
        }
    }

    fn agent(&self, role: AgentRole) -> Arc<Agent> {
        Arc::new(
            Agent::new(role, Arc::clone(&self.llm))
                .with_tools(self.tools.clone())
                .with_options(self.options)
                .with_verbose(self.verbose)
                .with_max_iterations(self.max_iterations),
        )
    }
}

fn assemble(
    parts: &RosterParts,
    roles: [AgentRole; 3],
    tasks: [(&str, &str); 3],
) -> Result<Crew, CrewError> {
    let agents: Vec<Arc<Agent>> = roles.into_iter().map(|r| parts.agent(r)).collect();
    let tasks = tasks
        .iter()
        .zip(&agents)
        .map(|((description, expected), agent)| Task::new(*description, *expected, agent))
        .collect();

    Ok(Crew::new(agents, tasks)?.with_verbose(parts.verbose))
}

/// Crew for the batch run: fixed prompts, no user input.
pub fn batch_crew(parts: &RosterParts) -> Result<Crew, CrewError> {
    assemble(
        parts,
        [
            AgentRole::new(
                "Crop Doctor",
                "Analyze crop symptoms and provide possible causes and solutions",
                "You are an experienced Agronomist who has spent years diagnosing crop issues such as diseases, pests, and nutrient deficiencies. You help farmers take corrective actions quickly.",
            ),
            AgentRole::new(
                "Weather & Irrigation Expert",
                "Provide local weather forecasts and optimal irrigation advice",
                "You are a climate scientist specializing in agriculture. You understand how weather impacts different crops and help farmers adjust their watering strategies.",
            ),
            AgentRole::new(
                "Soil & Fertilizer Advisor",
                "Recommend soil treatments and fertilizer plans",
                "You are a soil scientist who helps farmers choose the right fertilizers and improve soil health for better yields.",
            ),
        ],
        [
            (
                "Diagnose the crop problem based on symptoms shared by the user and recommend appropriate treatment.",
                "A detailed explanation of the crop issue and step-by-step solution.",
            ),
            (
                "Analyze the user's location and recommend proper watering based on weather trends.",
                "Weather forecast and smart irrigation advice tailored to the crop.",
            ),
            (
                "Analyze user-provided soil information and recommend fertilizer and soil improvements.",
                "Best fertilizer choices and tips for enhancing soil quality.",
            ),
        ],
    )
}

pub fn batch_inputs() -> TaskInputs {
    TaskInputs::from([("topic".to_string(), BATCH_TOPIC.to_string())])
}

/// Crew for the web form. Task descriptions carry `{crop}`, `{location}`,
/// `{symptoms}` and `{soil}` placeholders filled at kickoff.
pub fn form_crew(parts: &RosterParts) -> Result<Crew, CrewError> {
    assemble(
        parts,
        [
            AgentRole::new(
                "Crop Doctor",
                "Diagnose crop problems and provide treatment suggestions",
                "You are an agronomist specializing in identifying and solving crop diseases and pest attacks.",
            ),
            AgentRole::new(
                "Weather & Irrigation Expert",
                "Suggest irrigation based on real-time weather data",
                "You are an agri-climate advisor helping farmers optimize water usage using weather insights.",
            ),
            AgentRole::new(
                "Soil Expert",
                "Analyze soil information and give fertilizer/soil health suggestions",
                "You specialize in soil fertility and know how to improve yield through the right nutrients.",
            ),
        ],
        [
            (
                "Diagnose crop health based on the following symptoms: {symptoms} for crop: {crop}",
                "A diagnosis of the crop issue and treatment steps.",
            ),
            (
                "Provide weather forecast for {location} and suggest irrigation strategy for {crop}.",
                "Accurate irrigation advice based on forecasted weather.",
            ),
            (
                "Analyze the following soil data: {soil} and suggest appropriate fertilizers and soil care methods.",
                "Fertilizer suggestions and soil improvement plan.",
            ),
        ],
    )
}

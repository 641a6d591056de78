use std::sync::Arc;

use async_trait::async_trait;

use crate::advisor::request::AdviceRequest;
use crate::advisor::roster::{batch_crew, batch_inputs, form_crew, RosterParts};
use crate::config::Settings;
use crate::crew::CrewOutput;
use crate::llm::{LlmClient, OpenAiClient};
use crate::tools::{SerperSearch, SharedTool};

/// Turns a validated form submission into advice.
///
/// The web layer only talks to this trait, so handlers can be exercised
/// without network access.
#[async_trait]
pub trait CrewRunner: Send + Sync {
    async fn run(&self, request: &AdviceRequest) -> anyhow::Result<CrewOutput>;
}

/// Builds fresh clients and a fresh crew from settings for every request.
pub struct LiveRunner {
    settings: Settings,
}

impl LiveRunner {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl CrewRunner for LiveRunner {
    async fn run(&self, request: &AdviceRequest) -> anyhow::Result<CrewOutput> {
        let llm_config = request.llm_config(&self.settings);
        let llm: Arc<dyn LlmClient> = Arc::new(OpenAiClient::new(&llm_config)?);
        run_form(&self.settings, request, llm).await
    }
}

/// Run the form crew for `request` on an already built LLM handle.
pub async fn run_form(
    settings: &Settings,
    request: &AdviceRequest,
    llm: Arc<dyn LlmClient>,
) -> anyhow::Result<CrewOutput> {
    let llm_config = request.llm_config(settings);
    let search_config = request.search_config(settings);
    tracing::info!(
        crop = %request.crop_name,
        model = %llm_config.model,
        temperature = ?llm_config.temperature,
        search_results = search_config.n_results,
        "running advice crew"
    );

    let search: SharedTool = Arc::new(SerperSearch::new(search_config));
    let parts = RosterParts::new(
        llm,
        vec![search],
        llm_config.chat_options(),
        &settings.crew,
    );

    let crew = form_crew(&parts)?;
    Ok(crew.kickoff(&request.inputs()).await?)
}

/// One run of the batch crew with the fixed topic.
pub async fn run_batch(settings: &Settings) -> anyhow::Result<CrewOutput> {
    let llm_config = settings.llm_config(&settings.llm.model);
    let search_config = settings.search_config(settings.search.results);
    tracing::info!(model = %llm_config.model, "running batch crew");

    let llm: Arc<dyn LlmClient> = Arc::new(OpenAiClient::new(&llm_config)?);
    let search: SharedTool = Arc::new(SerperSearch::new(search_config));
    let parts = RosterParts::new(
        llm,
        vec![search],
        llm_config.chat_options(),
        &settings.crew,
    );

    let crew = batch_crew(&parts)?;
    Ok(crew.kickoff(&batch_inputs()).await?)
}

//! Crop advice: who the advisors are, what they are asked, and how a form
//! submission becomes a crew run.

pub mod request;
pub mod roster;
pub mod runner;

pub use request::{
    download_filename, AdviceRequest, AdvisorError, DEFAULT_SEARCH_RESULTS, DEFAULT_TEMPERATURE,
    DOWNLOAD_SUFFIX, MISSING_FIELDS_WARNING,
};
pub use roster::{batch_crew, batch_inputs, form_crew, RosterParts, BATCH_TOPIC};
pub use runner::{run_batch, run_form, CrewRunner, LiveRunner};

//! Web form for crop advice.

use crop_crew::{logging, web, Settings};

use dotenv::dotenv;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    logging::init();

    let settings = Settings::load()?;
    info!(
        model = %settings.llm.form_model,
        verbose = settings.crew.verbose,
        "Loaded configuration"
    );

    web::serve(settings).await
}

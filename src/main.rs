use crop_crew::advisor::run_batch;
use crop_crew::{logging, Settings};

use dotenv::dotenv;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    logging::init();

    let settings = Settings::load()?;
    let result = run_batch(&settings).await?;

    println!("{}", result);
    Ok(())
}

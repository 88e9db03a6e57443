use clap::Parser;
use quiz_ladder::{Quiz, QuizError, Settings, logging};
use tracing::info;

#[tokio::main]
async fn main() {
    let settings = Settings::parse();

    if let Err(e) = run(settings).await {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}

async fn run(settings: Settings) -> Result<(), QuizError> {
    logging::init(settings.log_file.as_deref())?;
    info!(count = settings.count, api_url = %settings.api_url, "starting quiz");

    Quiz::from_settings(&settings)?.run().await
}

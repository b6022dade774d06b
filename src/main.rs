//! Outing CLI binary entry point.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use outing::agent::Agent;
use outing::cli::{Cli, DEFAULT_PROMPT};
use outing::config::OutingConfig;
use outing::provider::create_provider;
use outing::tools::builtin::{all_tools, AcceptDetected, LocationPrompt, StdinPrompt};
use outing::types::GenerationSettings;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = OutingConfig::from_env();
    let provider = create_provider(&cli.model, &config)?;

    let prompt: Arc<dyn LocationPrompt> = if cli.yes {
        Arc::new(AcceptDetected)
    } else {
        Arc::new(StdinPrompt)
    };
    let tools = all_tools(&config, prompt);

    let mut settings = GenerationSettings::default();
    settings.temperature = cli.temperature;
    settings.max_tokens = cli.max_tokens;

    let mut agent = Agent::new(provider, tools).with_settings(settings);
    let answer = agent
        .run(cli.prompt.unwrap_or_else(|| DEFAULT_PROMPT.to_string()))
        .await?;

    println!("{answer}");
    Ok(())
}

//! CLI argument definitions.

use clap::Parser;

/// Default request when no prompt is given.
pub const DEFAULT_PROMPT: &str =
    "Please suggest some activities based on my location, the weather, and the current time.";

/// Suggest activities based on your location, the weather, and the time of day.
#[derive(Parser, Debug)]
#[command(name = "outing", version, about)]
pub struct Cli {
    /// What to ask the assistant.
    pub prompt: Option<String>,

    /// Chat model to use.
    #[arg(long, default_value = crate::provider::openai::DEFAULT_MODEL)]
    pub model: String,

    /// Sampling temperature.
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Maximum tokens per completion.
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Accept the detected location without prompting.
    #[arg(long, short = 'y')]
    pub yes: bool,
}

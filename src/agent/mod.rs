//! Transcript-holding agent façade over the tool loop.

use std::sync::Arc;

use crate::error::Result;
use crate::generation::generate_text;
use crate::provider::ModelProvider;
use crate::tools::tool::Tool;
use crate::types::{GenerationSettings, ModelMessage};

/// Fixed system prompt seeding every transcript.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant. You can suggest activities based on location, weather and time of day. Only use the functions you have been provided with.";

/// An agent holding an append-only conversation transcript.
///
/// The transcript persists across [`Agent::run`] calls within one process;
/// nothing is persisted across runs of the program.
pub struct Agent {
    provider: Box<dyn ModelProvider>,
    tools: Vec<Arc<dyn Tool>>,
    settings: GenerationSettings,
    messages: Vec<ModelMessage>,
}

impl Agent {
    /// Create an agent with the given provider and tools.
    pub fn new(provider: Box<dyn ModelProvider>, tools: Vec<Arc<dyn Tool>>) -> Self {
        Self {
            provider,
            tools,
            settings: GenerationSettings::default(),
            messages: vec![ModelMessage::system(SYSTEM_PROMPT)],
        }
    }

    /// Override the generation settings.
    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// The current transcript.
    pub fn transcript(&self) -> &[ModelMessage] {
        &self.messages
    }

    /// Run one user turn through the tool loop and return the final answer.
    pub async fn run(&mut self, user_input: impl Into<String>) -> Result<String> {
        self.messages.push(ModelMessage::user(user_input));

        // Give the model the wall clock so it can reason about "now".
        let now = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ");
        self.messages
            .push(ModelMessage::system(format!("Current time is {now}")));

        let result = generate_text(
            self.provider.as_ref(),
            self.messages.clone(),
            self.settings.clone(),
            &self.tools,
        )
        .await?;

        self.messages = result.messages;
        Ok(result.text)
    }
}

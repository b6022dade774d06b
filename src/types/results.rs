//! Result types returned by the generation loop.

use super::generation::FinishReason;
use super::message::{AgentToolCall, AgentToolResult, ModelMessage};
use super::usage::Usage;

/// The outcome of a full `generate_text` call.
#[derive(Debug, Clone)]
pub struct GenerateTextResult {
    /// Final assistant text (or the iteration-budget fallback text).
    pub text: String,
    /// One step per provider round-trip.
    pub steps: Vec<GenerationStep>,
    /// The full transcript after the run, including tool traffic.
    pub messages: Vec<ModelMessage>,
    /// Accumulated usage across all steps.
    pub usage: Usage,
    pub finish_reason: Option<FinishReason>,
}

/// A single provider round-trip within the tool loop.
#[derive(Debug, Clone)]
pub struct GenerationStep {
    pub text: String,
    pub tool_calls: Vec<AgentToolCall>,
    pub tool_results: Vec<AgentToolResult>,
    pub usage: Usage,
    pub finish_reason: Option<FinishReason>,
}

//! Convenience re-exports.

pub use crate::agent::Agent;
pub use crate::config::OutingConfig;
pub use crate::error::{OutingError, Result};
pub use crate::generation::generate_text;
pub use crate::provider::{create_provider, ModelProvider, ProviderRequest, ProviderResponse};
pub use crate::tools::{AgentTool, AgentToolParameters, Tool, ToolArguments};
pub use crate::types::{
    AgentToolCall, AgentToolResult, ContentPart, FinishReason, GenerationSettings, ModelMessage,
    Role, Usage,
};

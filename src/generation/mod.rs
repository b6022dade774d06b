//! Text generation with tool loop.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::OutingError;
use crate::provider::{ModelProvider, ProviderRequest, ToolDefinition};
use crate::tools::arguments::ToolArguments;
use crate::tools::tool::{Tool, ToolExecutionContext};
use crate::types::{
    AgentToolResult, ContentPart, FinishReason, GenerateTextResult, GenerationSettings,
    GenerationStep, ModelMessage, Role, Usage,
};

/// Maximum tool loop iterations before giving up.
pub const MAX_TOOL_ITERATIONS: usize = 5;

/// Text returned when the iteration budget is exhausted.
pub const MAX_ITERATIONS_MESSAGE: &str = "The maximum number of iterations has been met without a suitable answer. Please try again with a more specific input.";

/// Generate text with an optional tool loop.
///
/// If the model returns tool calls, they are executed sequentially and fed
/// back until the model produces a final text response or the iteration
/// budget runs out. Tool failures (including unknown tool names) become
/// error-flagged tool results for the model to react to, never loop failures.
pub async fn generate_text(
    provider: &dyn ModelProvider,
    mut messages: Vec<ModelMessage>,
    settings: GenerationSettings,
    tools: &[Arc<dyn Tool>],
) -> Result<GenerateTextResult, OutingError> {
    let tool_defs: Option<Vec<ToolDefinition>> = if tools.is_empty() {
        None
    } else {
        Some(
            tools
                .iter()
                .map(|t| ToolDefinition {
                    name: t.name().to_string(),
                    description: t.description().to_string(),
                    parameters: t.parameters().schema.clone(),
                })
                .collect(),
        )
    };

    let mut steps = Vec::new();
    let mut total_usage = Usage::default();

    for iteration in 0..MAX_TOOL_ITERATIONS {
        let request = ProviderRequest {
            messages: messages.clone(),
            settings: settings.clone(),
            tools: tool_defs.clone(),
        };

        debug!(iteration, "generate_text: calling provider");
        let response = provider.generate_text(&request).await?;

        total_usage.merge(&response.usage);

        let has_tool_calls = !response.tool_calls.is_empty();

        let mut step = GenerationStep {
            text: response.text.clone(),
            tool_calls: response.tool_calls.clone(),
            tool_results: Vec::new(),
            usage: response.usage,
            finish_reason: response.finish_reason,
        };

        if has_tool_calls {
            // Add assistant message with tool calls
            let mut assistant_content: Vec<ContentPart> = Vec::new();
            if !response.text.is_empty() {
                assistant_content.push(ContentPart::Text {
                    text: response.text.clone(),
                });
            }
            for tc in &response.tool_calls {
                assistant_content.push(ContentPart::ToolCall(tc.clone()));
            }
            messages.push(ModelMessage {
                role: Role::Assistant,
                content: assistant_content,
                timestamp: Some(chrono::Utc::now()),
            });

            // Execute each tool call
            for tc in &response.tool_calls {
                let ctx = ToolExecutionContext {
                    tool_call_id: Some(tc.id.clone()),
                };
                let tool = tools.iter().find(|t| t.name() == tc.name);
                let result = match tool {
                    Some(t) => {
                        let args = ToolArguments::new(tc.arguments.clone());
                        match t.execute(&args, &ctx).await {
                            Ok(val) => AgentToolResult {
                                tool_call_id: tc.id.clone(),
                                result: val,
                                is_error: false,
                            },
                            Err(e) => {
                                warn!(tool = tc.name, error = %e, "Tool execution failed");
                                AgentToolResult {
                                    tool_call_id: tc.id.clone(),
                                    result: serde_json::json!({"error": e.to_string()}),
                                    is_error: true,
                                }
                            }
                        }
                    }
                    None => {
                        warn!(tool = tc.name, "Tool not found");
                        AgentToolResult {
                            tool_call_id: tc.id.clone(),
                            result: serde_json::json!({"error": format!("Tool '{}' not found", tc.name)}),
                            is_error: true,
                        }
                    }
                };
                step.tool_results.push(result.clone());
                messages.push(ModelMessage::tool_result(
                    result.tool_call_id.clone(),
                    result.result,
                    result.is_error,
                ));
            }

            steps.push(step);
            continue;
        }

        // No tool calls — final response
        steps.push(step);

        if !response.text.is_empty() {
            messages.push(ModelMessage::assistant(&response.text));
        }

        return Ok(GenerateTextResult {
            text: response.text,
            steps,
            messages,
            usage: total_usage,
            finish_reason: response.finish_reason,
        });
    }

    // Budget exhausted without a final answer
    warn!(
        iterations = MAX_TOOL_ITERATIONS,
        "tool loop hit iteration budget"
    );
    Ok(GenerateTextResult {
        text: MAX_ITERATIONS_MESSAGE.to_string(),
        steps,
        messages,
        usage: total_usage,
        finish_reason: Some(FinishReason::Length),
    })
}

//! Tests for the OpenAI provider (wiremock-backed).

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use outing::error::OutingError;
use outing::provider::openai::OpenAiProvider;
use outing::provider::{ModelProvider, ProviderRequest, ToolDefinition};
use outing::types::{FinishReason, GenerationSettings, ModelMessage};

fn provider_for(server: &MockServer) -> OpenAiProvider {
    OpenAiProvider::new(
        "gpt-4o-mini".to_string(),
        "sk-test".to_string(),
        Some(server.uri()),
    )
}

fn request_with_tools(tools: Option<Vec<ToolDefinition>>) -> ProviderRequest {
    ProviderRequest {
        messages: vec![ModelMessage::user("hello")],
        settings: GenerationSettings::default(),
        tools,
    }
}

fn chat_response(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

#[tokio::test]
async fn parses_plain_text_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({"model": "gpt-4o-mini"})))
        .respond_with(chat_response(json!({
            "choices": [{
                "message": { "content": "Hi there!" },
                "finish_reason": "stop",
            }],
            "usage": { "prompt_tokens": 9, "completion_tokens": 3, "total_tokens": 12 },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let response = provider
        .generate_text(&request_with_tools(None))
        .await
        .unwrap();

    assert_eq!(response.text, "Hi there!");
    assert_eq!(response.finish_reason, Some(FinishReason::Stop));
    assert_eq!(response.usage.total_tokens, 12);
    assert!(response.tool_calls.is_empty());
}

#[tokio::test]
async fn parses_tool_calls_with_json_arguments() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(chat_response(json!({
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_abc",
                        "type": "function",
                        "function": {
                            "name": "get_current_weather",
                            "arguments": "{\"latitude\":\"52.52\",\"longitude\":\"13.40\"}",
                        }
                    }],
                },
                "finish_reason": "tool_calls",
            }],
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let response = provider
        .generate_text(&request_with_tools(None))
        .await
        .unwrap();

    assert_eq!(response.finish_reason, Some(FinishReason::ToolCalls));
    assert_eq!(response.tool_calls.len(), 1);
    let tc = &response.tool_calls[0];
    assert_eq!(tc.id, "call_abc");
    assert_eq!(tc.name, "get_current_weather");
    assert_eq!(tc.arguments["latitude"], "52.52");
}

#[tokio::test]
async fn invalid_argument_json_is_passed_through_as_string() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(chat_response(json!({
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_bad",
                        "type": "function",
                        "function": { "name": "get_location", "arguments": "not json" },
                    }],
                },
                "finish_reason": "tool_calls",
            }],
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let response = provider
        .generate_text(&request_with_tools(None))
        .await
        .unwrap();

    assert_eq!(
        response.tool_calls[0].arguments,
        serde_json::Value::String("not json".to_string()),
    );
}

#[tokio::test]
async fn tools_are_sent_in_openai_function_format() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "tools": [{
                "type": "function",
                "function": { "name": "get_location" },
            }],
        })))
        .respond_with(chat_response(json!({
            "choices": [{ "message": { "content": "ok" }, "finish_reason": "stop" }],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let tools = vec![ToolDefinition {
        name: "get_location".to_string(),
        description: "Get the user's location".to_string(),
        parameters: json!({"type": "object", "properties": {}, "required": []}),
    }];

    provider
        .generate_text(&request_with_tools(Some(tools)))
        .await
        .unwrap();
}

#[tokio::test]
async fn unauthorized_maps_to_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let result = provider.generate_text(&request_with_tools(None)).await;

    assert!(matches!(result, Err(OutingError::Authentication(_))));
}

#[tokio::test]
async fn rate_limit_maps_to_rate_limited_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let result = provider.generate_text(&request_with_tools(None)).await;

    assert!(matches!(result, Err(OutingError::RateLimited { .. })));
}

#[tokio::test]
async fn empty_choices_is_an_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(chat_response(json!({"choices": []})))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let result = provider.generate_text(&request_with_tools(None)).await;

    assert!(matches!(result, Err(OutingError::Api { status: 200, .. })));
}

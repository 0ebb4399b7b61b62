//! Tests for the tool layer

use pine_iris::llm::LlmOrchestrator;
use pine_iris::tools::{PineIrisHandler, PineIrisTool, TemplateTool};
use pine_iris::{Provider, ProviderConfig, ProviderErrorKind};

use serde_json::{Map, Value, json};
use std::sync::Arc;

use test_utils::{SAMPLE_STRATEGY, ScriptedClient, Step, analysis_reply, enhancement_reply};

// Helper function to create a Map<String, Value> from a JSON object
fn create_params_map(json_value: &Value) -> Option<Map<String, Value>> {
    json_value.as_object().cloned()
}

fn scripted_handler(steps: Vec<Step>) -> PineIrisHandler {
    let config = ProviderConfig::with_defaults(Provider::Mock);
    let orchestrator = LlmOrchestrator::with_client(config, ScriptedClient::new(steps));
    PineIrisHandler::new(Arc::new(orchestrator))
}

fn mock_handler() -> PineIrisHandler {
    PineIrisHandler::from_store(&ProviderConfig::mock()).expect("mock config is valid")
}

#[tokio::test]
async fn test_analyze_tool_renders_markdown() {
    let handler = scripted_handler(vec![Step::Reply(analysis_reply())]);
    let result = handler
        .call_tool(
            "pine_analyze",
            create_params_map(&json!({ "script": SAMPLE_STRATEGY })),
        )
        .await
        .expect("tool call should run");

    assert!(!result.is_error);
    assert!(result.text.contains("Add an ATR stop"));
}

#[tokio::test]
async fn test_analyze_tool_reports_provider_failure_as_error_result() {
    let handler = scripted_handler(vec![Step::Fail(ProviderErrorKind::Auth)]);
    let result = handler
        .call_tool(
            "pine_analyze",
            create_params_map(&json!({ "script": SAMPLE_STRATEGY })),
        )
        .await
        .expect("operation failures are results, not call errors");

    assert!(result.is_error);
    assert!(result.text.contains("auth"));
}

#[tokio::test]
async fn test_analyze_tool_rejects_blank_script() {
    let err = mock_handler()
        .call_tool("pine_analyze", create_params_map(&json!({ "script": "  " })))
        .await
        .expect_err("blank script is invalid");
    assert!(err.to_string().contains("`script`"));
}

#[tokio::test]
async fn test_enhance_tool_with_prior_analysis_skips_analysis() {
    let client = ScriptedClient::new([Step::Reply(enhancement_reply(1))]);
    let orchestrator =
        LlmOrchestrator::with_client(ProviderConfig::with_defaults(Provider::Mock), client.clone());
    let handler = PineIrisHandler::new(Arc::new(orchestrator));

    let result = handler
        .call_tool(
            "pine_enhance",
            create_params_map(&json!({
                "script": SAMPLE_STRATEGY,
                "analysis": "{\"risk\": {\"assessment\": \"none\"}}",
                "count": 2
            })),
        )
        .await
        .expect("tool call should run");

    assert_eq!(client.calls(), 1);
    assert!(!result.is_error);
    assert!(result.text.contains("requested 2"));
    assert!(result.text.contains("```pinescript"));
}

#[tokio::test]
async fn test_enhance_tool_with_mock_provider_runs_full_flow() {
    let result = mock_handler()
        .call_tool(
            "pine_enhance",
            create_params_map(&json!({ "script": SAMPLE_STRATEGY })),
        )
        .await
        .expect("tool call should run");

    assert!(!result.is_error);
    assert_eq!(result.text.matches("```pinescript").count(), 3);
}

#[tokio::test]
async fn test_enhance_tool_rejects_zero_count() {
    let err = mock_handler()
        .call_tool(
            "pine_enhance",
            create_params_map(&json!({ "script": SAMPLE_STRATEGY, "count": 0 })),
        )
        .await
        .expect_err("zero variations is invalid");
    assert!(err.to_string().contains("`count`"));
}

#[tokio::test]
async fn test_template_tool_direct() {
    let tool = TemplateTool {
        category: "indicator".to_string(),
        name: "bollinger bands".to_string(),
    };
    let result = tool
        .execute(Arc::new(
            LlmOrchestrator::new(&ProviderConfig::mock()).expect("mock config is valid"),
        ))
        .await
        .expect("template lookup should succeed");

    assert!(result.text.starts_with("# Bollinger Bands"));
    assert!(result.text.contains("//@version=5"));
}

#[tokio::test]
async fn test_list_templates_tool() {
    let result = mock_handler()
        .call_tool(
            "pine_list_templates",
            create_params_map(&json!({ "category": "strategy" })),
        )
        .await
        .expect("listing should succeed");

    assert!(result.text.contains("- RSI Mean Reversion"));
    assert!(result.text.trim_end().ends_with("- Basic Strategy"));
}

#[tokio::test]
async fn test_invalid_parameters_are_call_errors() {
    let err = mock_handler()
        .call_tool("pine_template", create_params_map(&json!({ "name": "rsi" })))
        .await
        .expect_err("category is required");
    assert!(err.to_string().contains("Invalid parameters"));
}

#[tokio::test]
async fn test_analyze_output_feeds_enhance_tool() {
    let client = ScriptedClient::new([
        Step::Reply(analysis_reply()),
        Step::Reply(enhancement_reply(1)),
    ]);
    let orchestrator =
        LlmOrchestrator::with_client(ProviderConfig::with_defaults(Provider::Mock), client.clone());
    let handler = PineIrisHandler::new(Arc::new(orchestrator));

    let analyzed = handler
        .call_tool(
            "pine_analyze",
            create_params_map(&json!({ "script": SAMPLE_STRATEGY })),
        )
        .await
        .expect("analysis should run");
    assert!(analyzed.text.contains("```json"));
    assert!(analyzed.text.contains("\"recommendations\""));

    let enhanced = handler
        .call_tool(
            "pine_enhance",
            create_params_map(&json!({
                "script": SAMPLE_STRATEGY,
                "analysis": analyzed.text,
                "count": 1
            })),
        )
        .await
        .expect("enhancement should run");
    assert!(!enhanced.is_error);

    let prompts = client.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[1].contains("\"recommendations\": [\n"));
    assert!(prompts[1].contains("Add an ATR stop"));
    assert!(!prompts[1].contains("# Strategy Analysis"));
}

#[tokio::test]
async fn test_enhance_tool_rejects_oversized_count() {
    let err = mock_handler()
        .call_tool(
            "pine_enhance",
            create_params_map(&json!({ "script": SAMPLE_STRATEGY, "count": 1_000_000_000u64 })),
        )
        .await
        .expect_err("count above the cap is invalid");
    assert!(err.to_string().contains("`count`"));
}

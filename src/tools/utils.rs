//! Common utilities for Pine-Iris tools

use crate::llm::LlmOrchestrator;

use serde::Serialize;
use std::sync::Arc;

/// Common trait for all Pine-Iris tools
#[async_trait::async_trait]
pub trait PineIrisTool {
    /// Execute the tool against the shared orchestrator
    async fn execute(&self, orchestrator: Arc<LlmOrchestrator>)
    -> Result<ToolResult, anyhow::Error>;
}

/// Text payload returned to the tool caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolResult {
    pub text: String,
    /// Set when the tool ran but the operation itself failed
    pub is_error: bool,
}

/// Creates a successful text result
pub fn create_text_result(text: String) -> ToolResult {
    ToolResult {
        text,
        is_error: false,
    }
}

/// Creates a failed result carrying the error message
pub fn create_error_result(error: &crate::error::Error) -> ToolResult {
    ToolResult {
        text: error.to_string(),
        is_error: true,
    }
}

/// Rejects blank required string parameters
pub fn require_non_empty(name: &str, value: &str) -> Result<(), anyhow::Error> {
    if value.trim().is_empty() {
        return Err(anyhow::anyhow!(
            "The `{name}` parameter is required and must not be empty."
        ));
    }
    Ok(())
}

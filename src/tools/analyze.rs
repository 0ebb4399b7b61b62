//! Strategy analysis tool

use super::ToolDefinition;
use super::utils::{PineIrisTool, ToolResult, create_error_result, create_text_result, require_non_empty};
use crate::llm::LlmOrchestrator;
use crate::log_debug;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Analyze a PineScript strategy's parameters, logic, risk and performance
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct AnalyzeTool {
    /// Full PineScript source to analyze
    pub script: String,
}

impl AnalyzeTool {
    pub const NAME: &'static str = "pine_analyze";

    /// Returns the tool definition for the analysis tool
    pub fn tool_definition() -> ToolDefinition {
        ToolDefinition::for_type::<Self>(
            Self::NAME,
            "Analyze a PineScript strategy and report on its parameters, trading logic, risk management and performance",
        )
    }
}

#[async_trait::async_trait]
impl PineIrisTool for AnalyzeTool {
    async fn execute(
        &self,
        orchestrator: Arc<LlmOrchestrator>,
    ) -> Result<ToolResult, anyhow::Error> {
        require_non_empty("script", &self.script)?;
        log_debug!("Analyzing {} char script", self.script.len());

        let analysis = match orchestrator.analyze_strategy(&self.script).await {
            Ok(analysis) => analysis,
            Err(e) => return Ok(create_error_result(&e)),
        };

        // The JSON block is what `pine_enhance` takes as its `analysis` argument
        let json = serde_json::to_string_pretty(&analysis)?;
        Ok(create_text_result(format!(
            "{}\n## Analysis JSON\n\n```json\n{json}\n```\n",
            analysis.to_markdown()
        )))
    }
}

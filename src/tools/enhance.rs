//! Strategy enhancement tool

use super::ToolDefinition;
use super::utils::{PineIrisTool, ToolResult, create_error_result, create_text_result, require_non_empty};
use crate::llm::{LlmOrchestrator, MAX_ENHANCEMENTS};
use crate::log_debug;
use crate::parser::json_regions;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

const DEFAULT_COUNT: usize = 3;

fn default_count() -> usize {
    DEFAULT_COUNT
}

/// Generate improved variations of a PineScript strategy
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct EnhanceTool {
    /// Full PineScript source to improve
    pub script: String,

    /// Analysis JSON from a previous `pine_analyze` run (its full output is accepted too);
    /// analyzed afresh when empty
    #[serde(default)]
    pub analysis: String,

    /// Number of variations to generate, at most 10
    #[serde(default = "default_count")]
    pub count: usize,
}

/// The first JSON object in `analysis`, or the text unchanged when it holds none
fn prior_analysis_json(analysis: &str) -> &str {
    json_regions(analysis, '{')
        .find(|region| serde_json::from_str::<serde_json::Value>(region).is_ok())
        .unwrap_or(analysis)
}

impl EnhanceTool {
    pub const NAME: &'static str = "pine_enhance";

    /// Returns the tool definition for the enhancement tool
    pub fn tool_definition() -> ToolDefinition {
        ToolDefinition::for_type::<Self>(
            Self::NAME,
            "Generate improved variations of a PineScript strategy, optionally guided by an earlier analysis",
        )
    }
}

#[async_trait::async_trait]
impl PineIrisTool for EnhanceTool {
    async fn execute(
        &self,
        orchestrator: Arc<LlmOrchestrator>,
    ) -> Result<ToolResult, anyhow::Error> {
        require_non_empty("script", &self.script)?;
        if !(1..=MAX_ENHANCEMENTS).contains(&self.count) {
            return Err(anyhow::anyhow!(
                "The `count` parameter must be between 1 and {MAX_ENHANCEMENTS}."
            ));
        }
        log_debug!("Generating {} enhancements", self.count);

        if !self.analysis.trim().is_empty() {
            let prior = prior_analysis_json(&self.analysis);
            return Ok(
                match orchestrator
                    .generate_enhancements(prior, &self.script, self.count)
                    .await
                {
                    Ok(batch) => create_text_result(batch.to_markdown()),
                    Err(e) => create_error_result(&e),
                },
            );
        }

        Ok(
            match orchestrator.enhance_strategy(&self.script, self.count).await {
                Ok((analysis, batch)) => create_text_result(format!(
                    "{}\n{}",
                    analysis.to_markdown(),
                    batch.to_markdown()
                )),
                Err(e) => create_error_result(&e),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prior_analysis_json_strips_markdown() {
        let output = "# Strategy Analysis\n\n- uses {fast}\n```json\n{\"risk\": {}}\n```\n";
        assert_eq!(prior_analysis_json(output), "{\"risk\": {}}");
        assert_eq!(prior_analysis_json("plain notes"), "plain notes");
    }
}

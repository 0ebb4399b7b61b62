//! Template lookup tools

use super::ToolDefinition;
use super::utils::{PineIrisTool, ToolResult, create_text_result};
use crate::llm::LlmOrchestrator;
use crate::templates::{TemplateCategory, TemplateRegistry};

use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::sync::Arc;

/// Fetch a starter PineScript template by category and name
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct TemplateTool {
    /// Template category: `strategy` or `indicator`
    pub category: String,

    /// Template name or a fragment of it, such as "ma cross" or "bollinger"
    #[serde(default)]
    pub name: String,
}

impl TemplateTool {
    pub const NAME: &'static str = "pine_template";

    /// Returns the tool definition for the template tool
    pub fn tool_definition() -> ToolDefinition {
        ToolDefinition::for_type::<Self>(
            Self::NAME,
            "Get a PineScript v5 starter template; unknown names return a generic skeleton",
        )
    }
}

#[async_trait::async_trait]
impl PineIrisTool for TemplateTool {
    async fn execute(
        &self,
        _orchestrator: Arc<LlmOrchestrator>,
    ) -> Result<ToolResult, anyhow::Error> {
        let category: TemplateCategory = self.category.parse()?;
        let entry = TemplateRegistry::global().lookup(category, &self.name);
        Ok(create_text_result(format!(
            "# {}\n\n```pinescript\n{}```\n",
            entry.canonical_name, entry.body
        )))
    }
}

/// List the templates available in a category
#[derive(Debug, Deserialize, Serialize, schemars::JsonSchema)]
pub struct ListTemplatesTool {
    /// Template category: `strategy` or `indicator`
    pub category: String,
}

impl ListTemplatesTool {
    pub const NAME: &'static str = "pine_list_templates";

    /// Returns the tool definition for the template listing tool
    pub fn tool_definition() -> ToolDefinition {
        ToolDefinition::for_type::<Self>(
            Self::NAME,
            "List the PineScript templates available for a category",
        )
    }
}

#[async_trait::async_trait]
impl PineIrisTool for ListTemplatesTool {
    async fn execute(
        &self,
        _orchestrator: Arc<LlmOrchestrator>,
    ) -> Result<ToolResult, anyhow::Error> {
        let category: TemplateCategory = self.category.parse()?;
        let mut text = format!("# {category} templates\n\n");
        for name in TemplateRegistry::global().names(category) {
            writeln!(text, "- {name}").expect("write to string should not fail");
        }
        Ok(create_text_result(text))
    }
}

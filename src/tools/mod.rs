//! Tool layer for Pine-Iris
//!
//! Exposes analysis, enhancement and template lookup as named tools with
//! JSON-schema described inputs, ready to be mounted on any tool protocol.

pub mod analyze;
pub mod enhance;
pub mod template;
pub mod utils;

use crate::config::ConfigStore;
use crate::llm::LlmOrchestrator;
use crate::log_debug;

use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

pub use self::analyze::AnalyzeTool;
pub use self::enhance::EnhanceTool;
pub use self::template::{ListTemplatesTool, TemplateTool};
pub use self::utils::{PineIrisTool, ToolResult};

/// Name, description and input schema of a tool
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

impl ToolDefinition {
    /// Definition whose input schema is derived from `T`
    pub fn for_type<T: schemars::JsonSchema>(
        name: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            description,
            input_schema: serde_json::to_value(schemars::schema_for!(T)).unwrap_or(Value::Null),
        }
    }
}

// Define our tools for the Pine-Iris toolbox
#[derive(Debug)]
pub enum PineIrisTools {
    AnalyzeTool(AnalyzeTool),
    EnhanceTool(EnhanceTool),
    TemplateTool(TemplateTool),
    ListTemplatesTool(ListTemplatesTool),
}

impl PineIrisTools {
    /// Get all tools available in Pine-Iris
    pub fn get_tools() -> Vec<ToolDefinition> {
        vec![
            AnalyzeTool::tool_definition(),
            EnhanceTool::tool_definition(),
            TemplateTool::tool_definition(),
            ListTemplatesTool::tool_definition(),
        ]
    }

    /// Convert a tool name and its arguments into a `PineIrisTools` variant
    pub fn try_from(name: &str, args: Map<String, Value>) -> Result<Self, anyhow::Error> {
        let args = Value::Object(args);
        let invalid = |e: serde_json::Error| anyhow::anyhow!("Invalid parameters for {name}: {e}");

        match name {
            AnalyzeTool::NAME => Ok(Self::AnalyzeTool(
                serde_json::from_value(args).map_err(invalid)?,
            )),
            EnhanceTool::NAME => Ok(Self::EnhanceTool(
                serde_json::from_value(args).map_err(invalid)?,
            )),
            TemplateTool::NAME => Ok(Self::TemplateTool(
                serde_json::from_value(args).map_err(invalid)?,
            )),
            ListTemplatesTool::NAME => Ok(Self::ListTemplatesTool(
                serde_json::from_value(args).map_err(invalid)?,
            )),
            _ => Err(anyhow::anyhow!("Unknown tool: {name}")),
        }
    }

    fn as_tool(&self) -> &(dyn PineIrisTool + Send + Sync) {
        match self {
            Self::AnalyzeTool(tool) => tool,
            Self::EnhanceTool(tool) => tool,
            Self::TemplateTool(tool) => tool,
            Self::ListTemplatesTool(tool) => tool,
        }
    }
}

/// Dispatches tool calls to a shared orchestrator
#[derive(Clone)]
pub struct PineIrisHandler {
    orchestrator: Arc<LlmOrchestrator>,
}

impl PineIrisHandler {
    pub fn new(orchestrator: Arc<LlmOrchestrator>) -> Self {
        Self { orchestrator }
    }

    /// Build a handler for the provider selected in `store`
    pub fn from_store(store: &dyn ConfigStore) -> crate::error::Result<Self> {
        Ok(Self::new(Arc::new(LlmOrchestrator::new(store)?)))
    }

    pub fn instructions(&self) -> &'static str {
        "Pine-Iris analyzes and improves TradingView PineScript strategies. Use it to review a strategy, generate enhanced variations, or fetch starter templates."
    }

    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        PineIrisTools::get_tools()
    }

    /// Run the named tool.
    ///
    /// Bad names or arguments are errors; failures of the underlying
    /// operation come back as a result with `is_error` set.
    pub async fn call_tool(
        &self,
        name: &str,
        args: Option<Map<String, Value>>,
    ) -> Result<ToolResult, anyhow::Error> {
        let args = args.ok_or_else(|| anyhow::anyhow!("Missing arguments"))?;
        log_debug!("Calling tool {} with {} arguments", name, args.len());

        let tool = PineIrisTools::try_from(name, args)?;
        tool.as_tool()
            .execute(Arc::clone(&self.orchestrator))
            .await
            .map_err(|e| anyhow::anyhow!("Tool execution failed: {e}"))
    }
}

//! Pine-Iris - AI-powered PineScript strategy assistant
//!
//! This library analyzes TradingView PineScript strategies with a large language
//! model, generates improved variations of them, and serves starter templates.

// Allow certain clippy warnings that are either stylistic or from external dependencies
#![allow(clippy::uninlined_format_args)] // Style preference
#![allow(clippy::format_push_string)] // Performance improvement but stylistic
#![allow(clippy::return_self_not_must_use)] // Builder pattern is clear enough
#![allow(clippy::items_after_statements)] // Locally-scoped use statements are fine

pub mod config;
pub mod error;
pub mod llm;
pub mod llm_providers;
pub mod logger;
pub mod parser;
pub mod prompt;
pub mod providers;
pub mod templates;
pub mod tools;
pub mod types;

// Re-export important structs and functions for easier testing
pub use config::{Config, ConfigStore};
pub use error::{Error, ProviderErrorKind, Result};
pub use llm::{LlmOrchestrator, MAX_ENHANCEMENTS, RetryPolicy};
pub use llm_providers::{ProviderClient, client_for};
pub use parser::ResponseParser;
pub use providers::{Provider, ProviderConfig};
pub use templates::{TemplateCategory, TemplateRegistry, list_templates, resolve_template};
pub use tools::{PineIrisHandler, ToolResult};

// Re-exports from types module
pub use types::{
    CountMismatch, EnhancementBatch, EnhancementResult, LogicAnalysis, ParameterAnalysis,
    PerformanceAnalysis, RiskAnalysis, StrategyAnalysis,
};

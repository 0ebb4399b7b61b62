//! Structured results produced from model output
//!
//! - Strategy analyses
//! - Enhancement variants

mod analysis;
mod enhancement;
mod lenient;

pub use analysis::{
    LogicAnalysis, ParameterAnalysis, PerformanceAnalysis, RiskAnalysis, StrategyAnalysis,
};
pub use enhancement::{CountMismatch, EnhancementBatch, EnhancementResult};

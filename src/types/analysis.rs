//! Strategy analysis types and formatting

use super::lenient;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Structured review of a trading script.
///
/// The four sections are required; every leaf inside them defaults to empty
/// when the model leaves it out.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Default, PartialEq, Eq)]
pub struct StrategyAnalysis {
    pub parameters: ParameterAnalysis,
    pub logic: LogicAnalysis,
    pub risk: RiskAnalysis,
    pub performance: PerformanceAnalysis,
}

/// Inputs the script exposes and how they could be tuned
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterAnalysis {
    /// Input parameters found in the script
    #[serde(default, deserialize_with = "lenient::string_list")]
    #[schemars(with = "Vec<String>")]
    pub identified: Vec<String>,
    /// Suggested parameter changes
    #[serde(default, deserialize_with = "lenient::string_list")]
    #[schemars(with = "Vec<String>")]
    pub suggestions: Vec<String>,
}

/// Assessment of the entry/exit logic
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Default, PartialEq, Eq)]
pub struct LogicAnalysis {
    #[serde(default, deserialize_with = "lenient::string_list")]
    #[schemars(with = "Vec<String>")]
    pub strengths: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    #[schemars(with = "Vec<String>")]
    pub weaknesses: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    #[schemars(with = "Vec<String>")]
    pub improvements: Vec<String>,
}

/// Risk management review
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Default, PartialEq, Eq)]
pub struct RiskAnalysis {
    /// Free-form summary of the risk profile
    #[serde(default, deserialize_with = "lenient::string")]
    #[schemars(with = "String")]
    pub assessment: String,
    #[serde(default, deserialize_with = "lenient::string_list")]
    #[schemars(with = "Vec<String>")]
    pub recommendations: Vec<String>,
}

/// Execution cost of the script itself
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Default, PartialEq, Eq)]
pub struct PerformanceAnalysis {
    #[serde(default, deserialize_with = "lenient::string_list")]
    #[schemars(with = "Vec<String>")]
    pub bottlenecks: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    #[schemars(with = "Vec<String>")]
    pub optimizations: Vec<String>,
}

impl StrategyAnalysis {
    /// Top-level keys a decoded analysis object must carry
    pub const SECTIONS: [&'static str; 4] = ["parameters", "logic", "risk", "performance"];

    /// Render the analysis as markdown for tool output
    pub fn to_markdown(&self) -> String {
        let mut out = String::from("# Strategy Analysis\n");

        out.push_str("\n## Parameters\n");
        push_list(&mut out, "Identified", &self.parameters.identified);
        push_list(&mut out, "Suggestions", &self.parameters.suggestions);

        out.push_str("\n## Logic\n");
        push_list(&mut out, "Strengths", &self.logic.strengths);
        push_list(&mut out, "Weaknesses", &self.logic.weaknesses);
        push_list(&mut out, "Improvements", &self.logic.improvements);

        out.push_str("\n## Risk\n");
        if !self.risk.assessment.is_empty() {
            writeln!(out, "\n{}", self.risk.assessment).expect("write to string should not fail");
        }
        push_list(&mut out, "Recommendations", &self.risk.recommendations);

        out.push_str("\n## Performance\n");
        push_list(&mut out, "Bottlenecks", &self.performance.bottlenecks);
        push_list(&mut out, "Optimizations", &self.performance.optimizations);

        out
    }
}

fn push_list(out: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    writeln!(out, "\n### {heading}\n").expect("write to string should not fail");
    for item in items {
        writeln!(out, "- {item}").expect("write to string should not fail");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_leaves_default_to_empty() {
        let analysis: StrategyAnalysis = serde_json::from_str(
            r#"{"parameters": {}, "logic": {"strengths": ["clear"]}, "risk": {}, "performance": {}}"#,
        )
        .expect("analysis should deserialize");
        assert_eq!(analysis.logic.strengths, vec!["clear"]);
        assert!(analysis.logic.weaknesses.is_empty());
        assert!(analysis.risk.assessment.is_empty());
    }

    #[test]
    fn test_missing_section_is_rejected() {
        let result = serde_json::from_str::<StrategyAnalysis>(
            r#"{"parameters": {}, "logic": {}, "risk": {}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_markdown_skips_empty_lists() {
        let mut analysis = StrategyAnalysis::default();
        analysis.risk.assessment = "No stop loss".to_string();
        analysis.logic.weaknesses = vec!["Whipsaws in ranges".to_string()];
        let md = analysis.to_markdown();
        assert!(md.contains("No stop loss"));
        assert!(md.contains("### Weaknesses"));
        assert!(md.contains("- Whipsaws in ranges"));
        assert!(!md.contains("### Strengths"));
    }
}

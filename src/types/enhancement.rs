//! Enhancement variant types and formatting

use super::lenient;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// One improved version of a script proposed by the model
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EnhancementResult {
    /// Short label for the variation
    #[serde(default, deserialize_with = "lenient::string")]
    #[schemars(with = "String")]
    pub version: String,
    /// Complete script source for the variation
    pub code: String,
    #[serde(default, deserialize_with = "lenient::string")]
    #[schemars(with = "String")]
    pub explanation: String,
    #[serde(default, deserialize_with = "lenient::string_list")]
    #[schemars(with = "Vec<String>")]
    pub expected_improvements: Vec<String>,
}

/// The provider returned fewer usable variants than were requested
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountMismatch {
    pub requested: usize,
    pub received: usize,
}

impl fmt::Display for CountMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "requested {} enhancement variations but the provider returned {}",
            self.requested, self.received
        )
    }
}

/// Variants in provider order plus an optional shortfall warning
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EnhancementBatch {
    pub variants: Vec<EnhancementResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<CountMismatch>,
}

impl EnhancementBatch {
    /// Build a batch, capping at `requested` and flagging any shortfall
    pub fn new(mut variants: Vec<EnhancementResult>, requested: usize) -> Self {
        variants.truncate(requested);
        let warning = (variants.len() < requested).then_some(CountMismatch {
            requested,
            received: variants.len(),
        });
        Self { variants, warning }
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Render all variants as markdown for tool output
    pub fn to_markdown(&self) -> String {
        let mut out = String::from("# Strategy Enhancements\n");

        if let Some(warning) = &self.warning {
            writeln!(out, "\n> ⚠️ Warning: {warning}").expect("write to string should not fail");
        }

        for (index, variant) in self.variants.iter().enumerate() {
            let title = if variant.version.trim().is_empty() {
                format!("Variation {}", index + 1)
            } else {
                variant.version.clone()
            };
            writeln!(out, "\n## {title}\n").expect("write to string should not fail");

            if !variant.explanation.is_empty() {
                writeln!(out, "{}\n", variant.explanation)
                    .expect("write to string should not fail");
            }
            if !variant.expected_improvements.is_empty() {
                out.push_str("### Expected Improvements\n\n");
                for item in &variant.expected_improvements {
                    writeln!(out, "- {item}").expect("write to string should not fail");
                }
                out.push('\n');
            }
            writeln!(out, "```pinescript\n{}\n```", variant.code.trim_end())
                .expect("write to string should not fail");
        }

        out
    }
}

//! Prompt construction for analysis and enhancement requests.
//!
//! Both renderers are pure: the same inputs always produce the same text.

use std::fmt::Write;

pub(crate) const ANALYSIS_HEADER: &str =
    "You are an expert PineScript developer and quantitative trading analyst.";
pub(crate) const ENHANCEMENT_HEADER: &str =
    "You are an expert PineScript developer improving an existing trading strategy.";
pub(crate) const VARIATION_COUNT_LABEL: &str = "Number of variations:";

const ANALYSIS_SHAPE: &str = r#"{
  "parameters": {
    "identified": ["string"],
    "suggestions": ["string"]
  },
  "logic": {
    "strengths": ["string"],
    "weaknesses": ["string"],
    "improvements": ["string"]
  },
  "risk": {
    "assessment": "string",
    "recommendations": ["string"]
  },
  "performance": {
    "bottlenecks": ["string"],
    "optimizations": ["string"]
  }
}"#;

const ENHANCEMENT_SHAPE: &str = r#"[
  {
    "version": "string",
    "code": "string",
    "explanation": "string",
    "expectedImprovements": ["string"]
  }
]"#;

const NO_COMMENTARY: &str = "Respond with the JSON only. Do not add any explanation, \
    greeting or text before or after it, and do not wrap it in markdown. \
    Escape quotes, backslashes and newlines inside string values.";

/// Render the prompt asking for a structured analysis of `script`
pub fn analysis_prompt(script: &str) -> String {
    let mut prompt = String::from(ANALYSIS_HEADER);
    prompt.push_str(
        "\n\nAnalyze the PineScript strategy below. Review:\n\
         1. Parameters: which inputs exist and how they could be tuned.\n\
         2. Logic: strengths, weaknesses and concrete improvements to the entry and exit rules.\n\
         3. Risk: an overall assessment and recommendations for risk management.\n\
         4. Performance: computational bottlenecks and optimizations of the script itself.\n",
    );

    push_script(&mut prompt, script);

    write!(
        prompt,
        "\nYour response must be a single JSON object with exactly this structure:\n\n{ANALYSIS_SHAPE}\n\n{NO_COMMENTARY}\n"
    )
    .expect("write to string should not fail");

    prompt
}

/// Render the prompt asking for `count` improved variants of `script`
pub fn enhancement_prompt(prior_analysis_json: &str, script: &str, count: usize) -> String {
    let mut prompt = String::from(ENHANCEMENT_HEADER);
    prompt.push_str(
        "\n\nUsing the analysis below, write improved versions of the strategy. \
         Each version must be a complete, compilable PineScript v5 script that \
         addresses the weaknesses and recommendations in the analysis.\n",
    );

    write!(
        prompt,
        "\nPrevious analysis:\n```json\n{}\n```\n",
        prior_analysis_json.trim()
    )
    .expect("write to string should not fail");

    push_script(&mut prompt, script);

    write!(
        prompt,
        "\n{VARIATION_COUNT_LABEL} {count}\n\n\
         Your response must be a JSON array of exactly {count} objects with this structure:\n\n\
         {ENHANCEMENT_SHAPE}\n\n{NO_COMMENTARY}\n"
    )
    .expect("write to string should not fail");

    prompt
}

fn push_script(prompt: &mut String, script: &str) {
    write!(prompt, "\nOriginal script:\n```pinescript\n{script}\n```\n")
        .expect("write to string should not fail");
}

/// Read the requested variation count back out of an enhancement prompt
pub(crate) fn requested_count(prompt: &str) -> Option<usize> {
    prompt
        .lines()
        .find_map(|line| line.trim().strip_prefix(VARIATION_COUNT_LABEL))
        .and_then(|rest| rest.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = "//@version=5\nstrategy(\"Test\")\nif ta.crossover(close, ta.sma(close, 20))\n    strategy.entry(\"L\", strategy.long)";

    #[test]
    fn test_analysis_prompt_embeds_script_verbatim() {
        let prompt = analysis_prompt(SCRIPT);
        assert!(prompt.contains(SCRIPT));
        assert!(prompt.starts_with(ANALYSIS_HEADER));
        for key in ["\"parameters\"", "\"logic\"", "\"risk\"", "\"performance\"", "\"assessment\""] {
            assert!(prompt.contains(key), "missing {key}");
        }
        assert!(prompt.contains("JSON only"));
    }

    #[test]
    fn test_prompts_are_deterministic() {
        assert_eq!(analysis_prompt(SCRIPT), analysis_prompt(SCRIPT));
        assert_eq!(
            enhancement_prompt("{}", SCRIPT, 3),
            enhancement_prompt("{}", SCRIPT, 3)
        );
    }

    #[test]
    fn test_enhancement_prompt_carries_inputs_and_count() {
        let prior = r#"{"risk": {"assessment": "no stops"}}"#;
        let prompt = enhancement_prompt(prior, SCRIPT, 4);
        assert!(prompt.contains(prior));
        assert!(prompt.contains(SCRIPT));
        assert!(prompt.contains("exactly 4 objects"));
        assert!(prompt.contains("\"expectedImprovements\""));
        assert_eq!(requested_count(&prompt), Some(4));
    }

    #[test]
    fn test_requested_count_absent() {
        assert_eq!(requested_count(&analysis_prompt(SCRIPT)), None);
    }
}

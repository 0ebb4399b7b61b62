use super::ProviderClient;
use crate::error::Result;
use crate::llm::MAX_ENHANCEMENTS;
use crate::log_debug;
use crate::prompt::{ANALYSIS_HEADER, ENHANCEMENT_HEADER, requested_count};
use crate::providers::ProviderConfig;

use async_trait::async_trait;
use serde_json::{Value, json};

const NAME: &str = "mock";

/// Themes cycled through when producing canned variants
const VARIANT_THEMES: &[(&str, &str, &str)] = &[
    (
        "ATR stop loss",
        "Adds an ATR-based stop loss and take profit to every entry.",
        "stopMult = input.float(2.0, \"ATR Stop Multiplier\", minval=0.5)\natr = ta.atr(14)\nstrategy.exit(\"Exit\", \"Long\", stop=close - atr * stopMult, limit=close + atr * stopMult * 2)",
    ),
    (
        "Trend filter",
        "Only takes trades in the direction of a 200-period moving average.",
        "trendLength = input.int(200, \"Trend Filter Length\", minval=1)\ninUptrend = close > ta.sma(close, trendLength)",
    ),
    (
        "Volume confirmation",
        "Requires above-average volume before entering.",
        "volLength = input.int(20, \"Volume Average Length\", minval=1)\nvolumeOk = volume > ta.sma(volume, volLength)",
    ),
];

/// Deterministic offline backend.
///
/// Recognizes the analysis and enhancement prompts and answers them the way
/// a chatty model would: with commentary around a fenced JSON payload.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockProvider;

impl MockProvider {
    pub fn new() -> Self {
        Self
    }

    fn analysis_payload() -> Value {
        json!({
            "parameters": {
                "identified": ["fastLength", "slowLength"],
                "suggestions": ["Expose the moving average type as an input"]
            },
            "logic": {
                "strengths": ["Simple, well understood crossover entry"],
                "weaknesses": ["Produces whipsaw trades in ranging markets"],
                "improvements": ["Add a trend or volatility filter before entering"]
            },
            "risk": {
                "assessment": "No stop loss or position sizing is defined; drawdowns are unbounded.",
                "recommendations": ["Add an ATR-based stop loss", "Size positions as a percent of equity"]
            },
            "performance": {
                "bottlenecks": [],
                "optimizations": ["Cache repeated ta.sma calls in variables"]
            }
        })
    }

    fn enhancement_payload(count: usize) -> Value {
        let variants: Vec<Value> = (0..count)
            .map(|index| {
                let (theme, explanation, snippet) = VARIANT_THEMES[index % VARIANT_THEMES.len()];
                json!({
                    "version": format!("v{}: {theme}", index + 1),
                    "code": format!(
                        "//@version=5\nstrategy(\"Enhanced Strategy v{}\", overlay=true)\n{snippet}\n",
                        index + 1
                    ),
                    "explanation": explanation,
                    "expectedImprovements": [format!("{theme} reduces losing trades")]
                })
            })
            .collect();
        Value::Array(variants)
    }

    fn fenced(intro: &str, payload: &Value) -> String {
        let body = serde_json::to_string_pretty(payload).unwrap_or_default();
        format!("{intro}\n\n```json\n{body}\n```\n\nLet me know if you want any changes.")
    }
}

#[async_trait]
impl ProviderClient for MockProvider {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn send(&self, prompt: &str, _config: &ProviderConfig) -> Result<String> {
        log_debug!("Mock provider answering {} char prompt", prompt.len());

        if prompt.starts_with(ENHANCEMENT_HEADER) {
            let count = requested_count(prompt).unwrap_or(1).min(MAX_ENHANCEMENTS);
            return Ok(Self::fenced(
                "Here are the enhanced versions of your strategy:",
                &Self::enhancement_payload(count),
            ));
        }

        if prompt.starts_with(ANALYSIS_HEADER) {
            return Ok(Self::fenced(
                "Here is my analysis of your strategy:",
                &Self::analysis_payload(),
            ));
        }

        Ok("Mock provider received an unrecognized prompt.".to_string())
    }
}

//! Response Parser
//!
//! Pulls structured data out of free-form model output. Models wrap JSON in
//! prose and code fences, and the scripts embedded in their answers are full
//! of brace characters, so the payload is located by delimiter balancing
//! that understands JSON string literals rather than by pattern matching.

use crate::error::{Error, Result};
use crate::log_debug;
use crate::types::{EnhancementResult, StrategyAnalysis};

use serde_json::Value;

const ANALYSIS: &str = "analysis";
const ENHANCEMENT: &str = "enhancement";

/// Find the first balanced JSON region opened by `open` (`{` or `[`).
///
/// Delimiters inside string literals are ignored, escape sequences included.
/// Returns `None` when no region closes before the end of the text.
pub fn extract_json_region(raw: &str, open: char) -> Option<&str> {
    let close = closing_delimiter(open)?;
    let start = raw.find(open)?;
    balanced_region_at(raw, start, open, close)
}

/// Every balanced region opened by `open`, in order of its opening delimiter.
///
/// Lets callers skip a bracketed fragment of prose that precedes the real
/// payload.
pub fn json_regions(raw: &str, open: char) -> impl Iterator<Item = &str> {
    let close = closing_delimiter(open);
    raw.match_indices(open)
        .filter_map(move |(start, _)| balanced_region_at(raw, start, open, close?))
}

fn closing_delimiter(open: char) -> Option<char> {
    match open {
        '{' => Some('}'),
        '[' => Some(']'),
        _ => None,
    }
}

fn balanced_region_at(raw: &str, start: usize, open: char, close: char) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in raw[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            c if c == open => depth += 1,
            c if c == close => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + c.len_utf8();
                    return Some(&raw[start..end]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Decode the first region opened by `open` that is valid JSON.
///
/// When no region decodes, the error reports the first region's failure.
fn decode_first_region(raw: &str, open: char, operation: &'static str) -> Result<Value> {
    let mut first_error = None;
    for region in json_regions(raw, open) {
        match serde_json::from_str::<Value>(region) {
            Ok(value) => {
                log_debug!("Parser: decoded region - {} chars", region.len());
                return Ok(value);
            }
            Err(e) => {
                log_debug!("Parser: skipping undecodable region: {}", e);
                first_error.get_or_insert(e);
            }
        }
    }

    let kind = if open == '[' { "array" } else { "object" };
    Err(match first_error {
        Some(e) => Error::parse(operation, format!("invalid JSON: {e}"), raw),
        None => Error::parse(operation, format!("no complete JSON {kind} found"), raw),
    })
}

/// Response parser for model output
#[derive(Clone, Copy, Debug, Default)]
pub struct ResponseParser;

impl ResponseParser {
    pub fn new() -> Self {
        Self
    }

    /// Decode a strategy analysis.
    ///
    /// The four sections must be present; anything inside them may be
    /// missing and is defaulted.
    pub fn parse_analysis(&self, raw: &str) -> Result<StrategyAnalysis> {
        log_debug!("Parser: parsing analysis response - {} chars", raw.len());

        let value = decode_first_region(raw, '{', ANALYSIS)?;

        let Value::Object(object) = &value else {
            return Err(Error::parse(ANALYSIS, "payload is not a JSON object", raw));
        };

        let missing: Vec<&str> = StrategyAnalysis::SECTIONS
            .iter()
            .copied()
            .filter(|section| object.get(*section).is_none_or(Value::is_null))
            .collect();
        if !missing.is_empty() {
            return Err(Error::parse(
                ANALYSIS,
                format!("missing required sections: {}", missing.join(", ")),
                raw,
            ));
        }

        serde_json::from_value(value)
            .map_err(|e| Error::parse(ANALYSIS, format!("unexpected structure: {e}"), raw))
    }

    /// Decode enhancement variants in provider order.
    ///
    /// Elements that are not usable variants are skipped. A shortfall
    /// against `expected_count` is not an error here; callers decide how to
    /// report it.
    pub fn parse_enhancements(
        &self,
        raw: &str,
        expected_count: usize,
    ) -> Result<Vec<EnhancementResult>> {
        log_debug!(
            "Parser: parsing enhancement response - {} chars, expecting {}",
            raw.len(),
            expected_count
        );

        let Value::Array(items) = decode_first_region(raw, '[', ENHANCEMENT)? else {
            return Err(Error::parse(ENHANCEMENT, "payload is not a JSON array", raw));
        };
        let total = items.len();

        let variants: Vec<EnhancementResult> = items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(variant) => Some(variant),
                Err(e) => {
                    log_debug!("Parser: skipping enhancement #{}: {}", index + 1, e);
                    None
                }
            })
            .collect();

        if variants.is_empty() {
            return Err(Error::parse(
                ENHANCEMENT,
                format!("none of the {total} array elements is a usable variant"),
                raw,
            ));
        }

        if variants.len() < expected_count {
            log_debug!(
                "Parser: decoded {} of {} requested variants",
                variants.len(),
                expected_count
            );
        }

        Ok(variants)
    }
}

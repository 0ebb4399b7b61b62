//! Forgiving deserializers for leaf fields of model output.
//!
//! Models drift from the requested shape in small ways: `null` instead of an
//! empty list, a bare string where a list was asked for, a number where a
//! string was asked for. Leaves absorb those drifts; structure does not.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accept a list of strings, a single scalar, or `null`
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.into_iter().filter_map(scalar_to_string).collect(),
        other => scalar_to_string(other).into_iter().collect(),
    })
}

/// Accept a string, any other scalar, a list of strings, or `null`
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(scalar_to_string)
            .collect::<Vec<_>>()
            .join(", "),
        other => scalar_to_string(other).unwrap_or_default(),
    })
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

//! Field conversion helpers shared by every mapper
//!
//! Optional API fields arrive as `Option<T>`; the helpers here keep absence
//! as `None` so it serializes to `null` in state, never to a zero value.

use anyhow::{Context, Result};
use serde_json::Value;

/// Encode an arbitrary JSON value as a compact JSON string.
/// Absent and JSON `null` both map to `None`.
pub fn json_string(value: Option<&Value>) -> Result<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => serde_json::to_string(v)
            .map(Some)
            .context("Unable to encode JSON value"),
    }
}

/// Decode a JSON string attribute into a value for a request payload
pub fn parse_json(attribute: &str, raw: Option<&str>) -> Result<Option<Value>> {
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => serde_json::from_str(s)
            .map(Some)
            .with_context(|| format!("`{}` is not valid JSON", attribute)),
    }
}

/// Keep the planned JSON string when it is semantically equal to what the
/// API returned, so key order and whitespace never show up as drift
pub fn prefer_planned_json(planned: Option<&str>, actual: Option<String>) -> Option<String> {
    match (planned, actual) {
        (Some(planned), Some(actual)) => {
            let same = serde_json::from_str::<Value>(planned)
                .ok()
                .zip(serde_json::from_str::<Value>(&actual).ok())
                .map(|(a, b)| a == b)
                .unwrap_or(false);
            if same {
                Some(planned.to_string())
            } else {
                Some(actual)
            }
        }
        (_, actual) => actual,
    }
}

/// Map a list element-wise, preserving order
pub fn list<'a, T, U>(items: &'a [T], f: impl Fn(&'a T) -> U) -> Option<Vec<U>> {
    Some(items.iter().map(f).collect())
}

/// Map an optional list element-wise; an absent list stays absent
pub fn optional_list<'a, T, U>(
    items: Option<&'a Vec<T>>,
    f: impl Fn(&'a T) -> U,
) -> Option<Vec<U>> {
    items.map(|items| items.iter().map(f).collect())
}

/// Map an optional list whose element conversion can fail
pub fn try_list<'a, T, U>(
    items: Option<&'a Vec<T>>,
    f: impl Fn(&'a T) -> Result<U>,
) -> Result<Option<Vec<U>>> {
    items
        .map(|items| items.iter().map(f).collect::<Result<Vec<_>>>())
        .transpose()
}

/// Treat empty strings from state as absent
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

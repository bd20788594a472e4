//! Diagnostics returned by lifecycle calls

use serde::Serialize;

use crate::segment::format_api_error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

/// A user-facing problem attached to one operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{summary}: {detail}")]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    /// Missing or invalid configuration, detected before any request
    pub fn config(detail: impl Into<String>) -> Self {
        Self::error("Invalid configuration", detail)
    }

    /// Required attribute absent or empty
    pub fn missing_attribute(name: &str) -> Self {
        Self::config(format!("The `{}` attribute is required and must not be empty", name))
    }

    /// Transport or non-2xx failure; the detail carries the pretty-printed body
    pub fn api(summary: impl Into<String>, error: &anyhow::Error) -> Self {
        Self::error(summary, format_api_error(error))
    }

    /// Lookup that exhausted every page without a match
    pub fn not_found(kind: &str, id: &str) -> Self {
        Self::error(
            format!("{} not found", kind),
            format!("No {} with id {} exists in this workspace", kind.to_lowercase(), id),
        )
    }

    /// Payload that could not be mapped to or from state
    pub fn decode(summary: impl Into<String>, error: &anyhow::Error) -> Self {
        Self::error(summary, format!("{:#}", error))
    }
}

/// Lifecycle result type
pub type DiagResult<T> = Result<T, Diagnostic>;

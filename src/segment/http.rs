//! HTTP utilities for Segment Public API calls

use anyhow::{Context, Result};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Per-request timeout; cancellation beyond this is left to Terraform
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Non-2xx response from the Public API
#[derive(Debug, thiserror::Error)]
#[error("API request failed: {status}")]
pub struct ApiError {
    pub status: StatusCode,
    /// Raw response body, kept for diagnostics
    pub body: String,
}

impl ApiError {
    /// Response body re-indented as JSON, or `None` when the body is not JSON
    pub fn pretty_body(&self) -> Option<String> {
        let parsed: Value = serde_json::from_str(&self.body).ok()?;
        serde_json::to_string_pretty(&parsed).ok()
    }
}

/// Check whether an error chain carries a 404 from the API
pub fn is_not_found(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<ApiError>()
        .map(|e| e.status == StatusCode::NOT_FOUND)
        .unwrap_or(false)
}

/// HTTP client wrapper for Segment API calls
#[derive(Clone)]
pub struct SegmentHttpClient {
    client: Client,
}

impl SegmentHttpClient {
    /// Create a new HTTP client
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Make a GET request
    pub async fn get(&self, url: &str, token: &str, query: &[(&str, &str)]) -> Result<Value> {
        self.send(Method::GET, url, token, query, None).await
    }

    /// Make a POST request
    pub async fn post(&self, url: &str, token: &str, body: Option<&Value>) -> Result<Value> {
        self.send(Method::POST, url, token, &[], body).await
    }

    /// Make a PATCH request
    pub async fn patch(&self, url: &str, token: &str, body: &Value) -> Result<Value> {
        self.send(Method::PATCH, url, token, &[], Some(body)).await
    }

    /// Make a PUT request
    pub async fn put(&self, url: &str, token: &str, body: &Value) -> Result<Value> {
        self.send(Method::PUT, url, token, &[], Some(body)).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, url: &str, token: &str, query: &[(&str, &str)]) -> Result<Value> {
        self.send(Method::DELETE, url, token, query, None).await
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        token: &str,
        query: &[(&str, &str)],
        body: Option<&Value>,
    ) -> Result<Value> {
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method, url)
            .bearer_auth(token)
            .header(reqwest::header::ACCEPT, "application/vnd.segment.v1+json");

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.context("Failed to send request")?;

        let status = response.status();
        let response_body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&response_body));
            return Err(ApiError {
                status,
                body: response_body,
            }
            .into());
        }

        // Handle empty response
        if response_body.is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&response_body).context("Failed to parse response JSON")
    }
}

/// Format an API error for display: the error chain, followed by the
/// pretty-printed response body when the API returned one
pub fn format_api_error(error: &anyhow::Error) -> String {
    let message = format!("{:#}", error);

    match error.downcast_ref::<ApiError>().and_then(ApiError::pretty_body) {
        Some(body) => format!("{}\n{}", message, body),
        None => message,
    }
}

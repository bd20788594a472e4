//! Configuration Management
//!
//! Resolves the provider configuration (API URL and token) from command-line
//! flags, environment variables and an optional config file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default Public API endpoint
pub const DEFAULT_URL: &str = "https://api.segmentapis.com";

/// Environment variable holding the API token
pub const TOKEN_ENV: &str = "SEGMENT_PUBLIC_API_TOKEN";

/// Environment variable overriding the API URL
pub const URL_ENV: &str = "SEGMENT_PUBLIC_API_URL";

/// Provider configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProviderConfig {
    /// Public API base URL
    #[serde(default)]
    pub url: Option<String>,
    /// Public API token
    #[serde(default)]
    pub token: Option<String>,
}

impl ProviderConfig {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("terraform-provider-segment").join("config.json"))
    }

    /// Load configuration from disk, falling back to an empty config
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed config file {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Overlay environment variables on top of this configuration
    pub fn with_env(mut self) -> Self {
        if let Some(url) = non_empty_env(URL_ENV) {
            self.url = Some(url);
        }
        if let Some(token) = non_empty_env(TOKEN_ENV) {
            self.token = Some(token);
        }
        self
    }

    /// Overlay explicit values (flags or provider block attributes)
    pub fn with_overrides(mut self, url: Option<String>, token: Option<String>) -> Self {
        if url.is_some() {
            self.url = url;
        }
        if token.is_some() {
            self.token = token;
        }
        self
    }

    /// Full resolution: config file < environment < overrides
    pub fn resolve(url: Option<String>, token: Option<String>) -> Self {
        Self::load().with_env().with_overrides(url, token)
    }

    /// Get effective URL (configured > default)
    pub fn effective_url(&self) -> String {
        self.url
            .clone()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_URL.to_string())
    }

    /// Check the configuration without contacting the API
    pub fn validate(&self) -> Result<()> {
        self.require_token()?;
        let url = self.effective_url();
        let parsed = url::Url::parse(&url).with_context(|| format!("Invalid API URL '{}'", url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("API URL '{}' must use http or https", url);
        }
        Ok(())
    }

    /// Get the token or fail with a configuration error
    pub fn require_token(&self) -> Result<String> {
        self.token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .with_context(|| {
                format!(
                    "Missing API token. Set the provider `token` attribute or the {} environment variable",
                    TOKEN_ENV
                )
            })
    }

    /// User agent sent with every request
    pub fn user_agent(&self) -> String {
        crate::USER_AGENT.to_string()
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

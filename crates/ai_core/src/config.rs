//! Configuration for the Gemini backend

use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for the Gemini generative backend and analysis models
#[derive(Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Base URL of the Gemini API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API version path segment
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// API key sent in the `x-goog-api-key` header
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for quick scans
    #[serde(default = "default_quick_model")]
    pub quick_model: String,

    /// Model used for deep analysis
    #[serde(default = "default_deep_model")]
    pub deep_model: String,

    /// Reasoning token budget for deep analysis
    #[serde(default = "default_deep_thinking_budget")]
    pub deep_thinking_budget: u32,

    /// Optional output token cap for quick scans (never applied to deep analysis)
    #[serde(default)]
    pub quick_max_output_tokens: Option<u32>,

    /// Client-side request timeout in milliseconds; `None` waits indefinitely
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_api_version() -> String {
    "v1beta".to_string()
}

fn default_quick_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_deep_model() -> String {
    "gemini-3-pro-preview".to_string()
}

const fn default_deep_thinking_budget() -> u32 {
    32_768
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_version: default_api_version(),
            api_key: None,
            quick_model: default_quick_model(),
            deep_model: default_deep_model(),
            deep_thinking_budget: default_deep_thinking_budget(),
            quick_max_output_tokens: None,
            timeout_ms: None,
        }
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("quick_model", &self.quick_model)
            .field("deep_model", &self.deep_model)
            .field("deep_thinking_budget", &self.deep_thinking_budget)
            .field("quick_max_output_tokens", &self.quick_max_output_tokens)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl GeminiConfig {
    /// Create a default config with the given API key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.as_deref().is_none_or(|k| k.trim().is_empty()) {
            return Err("Gemini API key is required".to_string());
        }

        if self.base_url.trim().is_empty() {
            return Err("Base URL must not be empty".to_string());
        }

        if self.quick_model.trim().is_empty() || self.deep_model.trim().is_empty() {
            return Err("Model identifiers must not be empty".to_string());
        }

        if self.deep_thinking_budget == 0 {
            return Err("Deep thinking budget must be greater than 0".to_string());
        }

        if self.quick_max_output_tokens == Some(0) {
            return Err("Quick output token cap must be greater than 0".to_string());
        }

        if self.timeout_ms == Some(0) {
            return Err("Timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

//! Application configuration
//!
//! Sources are layered: built-in defaults, then an optional
//! `clausewise.toml`, then `CLAUSEWISE_*` environment variables
//! (`CLAUSEWISE_GEMINI__API_KEY`, `CLAUSEWISE_LOG_FORMAT`, ...).

use std::{fmt, path::Path};

use ai_core::GeminiConfig;
use ai_speech::SpeechConfig;
use serde::{Deserialize, Serialize};

use crate::retry::RetryConfig;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "CLAUSEWISE";

/// Plain environment variables accepted as the Gemini API key, in order
pub const API_KEY_FALLBACK_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

const REDACTED: &str = "[REDACTED]";

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Configuration for URL text extraction through a reader service
#[derive(Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Reader endpoint; the target URL is appended as a path
    #[serde(default = "default_reader_base_url")]
    pub reader_base_url: String,

    /// Optional bearer token for the reader service
    #[serde(default)]
    pub api_key: Option<String>,

    /// Minimum trimmed length of extracted text
    #[serde(default = "default_min_text_chars")]
    pub min_text_chars: usize,

    /// Request timeout in milliseconds
    #[serde(default = "default_extraction_timeout")]
    pub timeout_ms: u64,
}

fn default_reader_base_url() -> String {
    "https://r.jina.ai".to_string()
}

const fn default_min_text_chars() -> usize {
    application::services::DEFAULT_MIN_EXTRACTED_CHARS
}

const fn default_extraction_timeout() -> u64 {
    30_000
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            reader_base_url: default_reader_base_url(),
            api_key: None,
            min_text_chars: default_min_text_chars(),
            timeout_ms: default_extraction_timeout(),
        }
    }
}

impl fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionConfig")
            .field("reader_base_url", &self.reader_base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| REDACTED))
            .field("min_text_chars", &self.min_text_chars)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl ExtractionConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let base = self.reader_base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(format!("Reader base URL must be http(s): {base}"));
        }

        if self.timeout_ms == 0 {
            return Err("Extraction timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log output format
    #[serde(default)]
    pub log_format: LogFormat,

    /// Gemini backend and analysis models
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Speech synthesis
    #[serde(default)]
    pub speech: SpeechConfig,

    /// URL extraction
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Caller-level retry for analysis calls
    #[serde(default)]
    pub retry: RetryConfig,
}

impl AppConfig {
    /// Load configuration from a file and the environment
    ///
    /// Without `path`, `clausewise.toml` is read if present. An explicit
    /// path must exist.
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("clausewise").required(false),
        };

        let builder = config::Config::builder()
            .add_source(file)
            // e.g. CLAUSEWISE_GEMINI__DEEP_MODEL
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.apply_api_key_fallback(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Fill a missing Gemini key from the first non-empty fallback variable
    pub fn apply_api_key_fallback(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self
            .gemini
            .api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
        {
            return;
        }

        self.gemini.api_key = API_KEY_FALLBACK_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .find(|key| !key.trim().is_empty());
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), String> {
        self.gemini.validate().map_err(|e| format!("gemini: {e}"))?;
        self.speech.validate().map_err(|e| format!("speech: {e}"))?;
        self.extraction
            .validate()
            .map_err(|e| format!("extraction: {e}"))?;
        self.retry.validate().map_err(|e| format!("retry: {e}"))?;
        Ok(())
    }

    /// Copy of the configuration with secrets masked
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.gemini.api_key.is_some() {
            config.gemini.api_key = Some(REDACTED.to_string());
        }
        if config.extraction.api_key.is_some() {
            config.extraction.api_key = Some(REDACTED.to_string());
        }
        config
    }

    /// Render the redacted configuration as TOML
    pub fn to_redacted_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&self.redacted())
    }
}

//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer.
//! Contains the Gemini analysis and speech adapters, the reader-based URL
//! extractor, configuration loading and opt-in retry.

pub mod adapters;
pub mod config;
pub mod retry;

pub use adapters::*;
pub use config::{AppConfig, ExtractionConfig, LogFormat};
pub use retry::{RetryConfig, RetryResult, Retryable, retry, with_retry};

//! AI Core - Gemini backend client and document analysis
//!
//! Provides the generative backend port, a Gemini REST adapter, the
//! mode-dependent analysis request builder, and the analysis executor that
//! turns a document into an [`domain::AnalysisResult`].
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use ai_core::{DocumentAnalyzer, GeminiClient, GeminiConfig};
//! use domain::AnalysisMode;
//!
//! let config = GeminiConfig::with_api_key("...");
//! let backend = Arc::new(GeminiClient::new(config.clone())?);
//! let analyzer = DocumentAnalyzer::new(backend, config);
//! let result = analyzer.analyze(&terms_text, AnalysisMode::Quick).await?;
//! println!("{} ({}/10)", result.risk_level, result.safety_rating);
//! ```

pub mod analyzer;
pub mod config;
pub mod error;
pub mod gemini;
pub mod ports;
pub mod request;
pub mod types;

pub use analyzer::{DocumentAnalyzer, parse_analysis};
pub use config::GeminiConfig;
pub use error::InferenceError;
pub use gemini::GeminiClient;
pub use ports::GenerativeBackend;
pub use request::{AnalysisRequestConfig, analysis_output_schema, build_request_config};
pub use types::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    GenerationConfigBuilder, InlineData, Part, ResponseModality, SpeechOutputConfig,
};

//! Document analysis executor
//!
//! Sends a document to the backend with the mode-dependent request config
//! and decodes the structured answer into an [`AnalysisResult`].

use std::sync::Arc;

use domain::{AnalysisMode, AnalysisResult};
use tracing::{debug, info, instrument, warn};

use crate::config::GeminiConfig;
use crate::error::InferenceError;
use crate::ports::GenerativeBackend;
use crate::request::build_request_config;
use crate::types::GenerateContentResponse;

/// Runs one analysis call per document
pub struct DocumentAnalyzer {
    backend: Arc<dyn GenerativeBackend>,
    config: GeminiConfig,
}

impl std::fmt::Debug for DocumentAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentAnalyzer")
            .field("backend", &self.backend.name())
            .field("config", &self.config)
            .finish()
    }
}

impl DocumentAnalyzer {
    /// Create an analyzer over a backend
    pub fn new(backend: Arc<dyn GenerativeBackend>, config: GeminiConfig) -> Self {
        Self { backend, config }
    }

    /// Configuration used to build requests
    pub const fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Analyze a document
    ///
    /// # Errors
    ///
    /// Propagates backend errors unchanged, returns `EmptyResponse` if the
    /// model produced no text and `Parse` if the text is not a valid
    /// analysis result.
    #[instrument(skip(self, document), fields(mode = %mode, document_len = document.len()))]
    pub async fn analyze(
        &self,
        document: &str,
        mode: AnalysisMode,
    ) -> Result<AnalysisResult, InferenceError> {
        let request_config = build_request_config(mode, &self.config);
        let request = request_config.to_request(document)?;

        debug!(
            model = %request_config.model(),
            thinking_budget = ?request_config.thinking_budget(),
            "Requesting document analysis"
        );

        let response = self
            .backend
            .generate_content(request_config.model(), &request)
            .await?;

        let result = parse_analysis(&response)?;

        info!(
            risk_level = %result.risk_level,
            safety_rating = result.safety_rating,
            risky_clauses = result.risky_clauses.len(),
            "Document analysis completed"
        );

        Ok(result)
    }
}

/// Decode the answer text of a backend response into an [`AnalysisResult`]
///
/// The rating is passed through as-is; an out-of-range value or one that
/// disagrees with the risk level is only logged.
pub fn parse_analysis(response: &GenerateContentResponse) -> Result<AnalysisResult, InferenceError> {
    let Some(text) = response.text().filter(|t| !t.trim().is_empty()) else {
        if let Some(reason) = response.block_reason() {
            warn!(block_reason = %reason, "Prompt was blocked by the backend");
        }
        return Err(InferenceError::EmptyResponse);
    };

    let result = AnalysisResult::from_json(&text).map_err(InferenceError::Parse)?;

    if !result.rating_in_range() {
        warn!(
            safety_rating = result.safety_rating,
            "Safety rating outside the 1-10 range"
        );
    } else if !result.rating_matches_risk_level() {
        warn!(
            safety_rating = result.safety_rating,
            risk_level = %result.risk_level,
            "Safety rating inconsistent with risk level"
        );
    }

    Ok(result)
}

//! Analysis adapter - Implements AnalysisPort using ai_core

use std::sync::Arc;

use ai_core::{
    DocumentAnalyzer, GeminiClient, GeminiConfig, GenerativeBackend, InferenceError,
    build_request_config,
};
use application::{error::ApplicationError, ports::AnalysisPort};
use async_trait::async_trait;
use domain::{AnalysisMode, AnalysisResult};
use tracing::{debug, instrument};

use super::is_client_rejection;

/// Adapter for Gemini document analysis
#[derive(Debug)]
pub struct GeminiAnalysisAdapter {
    analyzer: DocumentAnalyzer,
}

impl GeminiAnalysisAdapter {
    /// Create an adapter with its own Gemini client
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the client cannot be built.
    pub fn new(config: GeminiConfig) -> Result<Self, ApplicationError> {
        let client = GeminiClient::new(config.clone()).map_err(map_inference_error)?;
        Ok(Self::with_backend(Arc::new(client), config))
    }

    /// Create an adapter over an existing backend
    pub fn with_backend(backend: Arc<dyn GenerativeBackend>, config: GeminiConfig) -> Self {
        Self {
            analyzer: DocumentAnalyzer::new(backend, config),
        }
    }
}

/// Convert an ai_core error into the application taxonomy
pub fn map_inference_error(err: InferenceError) -> ApplicationError {
    match err {
        InferenceError::Configuration(msg) => ApplicationError::Configuration(msg),
        InferenceError::EmptyResponse => ApplicationError::EmptyResponse,
        InferenceError::InvalidResponse(msg) => ApplicationError::Parse(msg),
        InferenceError::Parse(e) => ApplicationError::Parse(e.to_string()),
        e @ InferenceError::ServerError { status, .. } if is_client_rejection(status) => {
            ApplicationError::Rejected(e.to_string())
        },
        e @ (InferenceError::ConnectionFailed(_)
        | InferenceError::RequestFailed(_)
        | InferenceError::Timeout(_)
        | InferenceError::RateLimited
        | InferenceError::ServerError { .. }) => ApplicationError::Transport(e.to_string()),
    }
}

#[async_trait]
impl AnalysisPort for GeminiAnalysisAdapter {
    #[instrument(skip(self, text), fields(text_len = text.len(), mode = %mode))]
    async fn analyze(
        &self,
        text: &str,
        mode: AnalysisMode,
    ) -> Result<AnalysisResult, ApplicationError> {
        let result = self
            .analyzer
            .analyze(text, mode)
            .await
            .map_err(map_inference_error)?;

        debug!(
            safety_rating = result.safety_rating,
            risky_clauses = result.risky_clauses.len(),
            "Analysis adapter returned result"
        );

        Ok(result)
    }

    fn model_for(&self, mode: AnalysisMode) -> String {
        build_request_config(mode, self.analyzer.config())
            .model()
            .to_string()
    }
}

//! Analysis service - Document risk analysis use case
//!
//! Accepts pasted text or a URL, resolves URLs to text through the
//! extraction port, and runs one structured analysis call.

use std::{fmt, sync::Arc, time::Instant};

use domain::{AnalysisMode, AnalysisResult, DocumentSource, DomainError};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{AnalysisPort, DocumentExtractionPort},
};

/// Minimum trimmed length of extracted text worth analyzing
pub const DEFAULT_MIN_EXTRACTED_CHARS: usize = 20;

/// Result of analyzing one document
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    /// Structured analysis result
    pub result: AnalysisResult,
    /// Mode the document was analyzed in
    pub mode: AnalysisMode,
    /// Model that served the analysis
    pub model: String,
    /// Length of the analyzed text in characters
    pub document_chars: usize,
    /// Total processing time in milliseconds (extraction included)
    pub processing_time_ms: u64,
}

/// Service for analyzing legal documents
pub struct AnalysisService {
    analysis: Arc<dyn AnalysisPort>,
    extraction: Option<Arc<dyn DocumentExtractionPort>>,
    min_extracted_chars: usize,
}

impl fmt::Debug for AnalysisService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisService")
            .field("url_extraction", &self.extraction.is_some())
            .field("min_extracted_chars", &self.min_extracted_chars)
            .finish_non_exhaustive()
    }
}

impl AnalysisService {
    /// Create a service that analyzes pasted text only
    pub fn new(analysis: Arc<dyn AnalysisPort>) -> Self {
        Self {
            analysis,
            extraction: None,
            min_extracted_chars: DEFAULT_MIN_EXTRACTED_CHARS,
        }
    }

    /// Enable URL sources through an extraction port
    #[must_use]
    pub fn with_extraction(
        mut self,
        extraction: Arc<dyn DocumentExtractionPort>,
        min_extracted_chars: usize,
    ) -> Self {
        self.extraction = Some(extraction);
        self.min_extracted_chars = min_extracted_chars;
        self
    }

    /// Analyze a document from any source
    #[instrument(skip(self, source), fields(source = source.kind(), mode = %mode))]
    pub async fn analyze(
        &self,
        source: &DocumentSource,
        mode: AnalysisMode,
    ) -> Result<AnalysisOutcome, ApplicationError> {
        let start = Instant::now();

        let text = match source {
            DocumentSource::Text(text) => text.clone(),
            DocumentSource::Url(url) => self.extract(url).await?,
        };

        let result = self.analyze_text(&text, mode).await?;

        let outcome = AnalysisOutcome {
            result,
            mode,
            model: self.analysis.model_for(mode),
            document_chars: text.chars().count(),
            processing_time_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        };

        info!(
            model = %outcome.model,
            processing_time_ms = outcome.processing_time_ms,
            "Document analyzed"
        );

        Ok(outcome)
    }

    /// Analyze pasted document text
    pub async fn analyze_text(
        &self,
        text: &str,
        mode: AnalysisMode,
    ) -> Result<AnalysisResult, ApplicationError> {
        if text.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Document text must not be empty".to_string(),
            )
            .into());
        }

        debug!(document_chars = text.len(), "Running analysis");
        self.analysis.analyze(text, mode).await
    }

    /// Fetch a URL as text through the extraction port
    pub async fn extract(&self, url: &str) -> Result<String, ApplicationError> {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(DomainError::ValidationError(format!(
                "URL must start with http:// or https://: {url}"
            ))
            .into());
        }

        let extraction = self.extraction.as_ref().ok_or_else(|| {
            ApplicationError::Configuration("URL extraction is not configured".to_string())
        })?;

        let text = extraction.extract_text(url).await?;
        let length = text.trim().chars().count();

        if length < self.min_extracted_chars {
            warn!(length, minimum = self.min_extracted_chars, "Extracted text too short");
            return Err(ApplicationError::ExtractionTooShort {
                length,
                minimum: self.min_extracted_chars,
            });
        }

        debug!(length, "Extracted document text");
        Ok(text)
    }
}

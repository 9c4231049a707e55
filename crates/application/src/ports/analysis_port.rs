//! Analysis port - Interface for structured document risk analysis

use async_trait::async_trait;
use domain::{AnalysisMode, AnalysisResult};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for document analysis
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AnalysisPort: Send + Sync {
    /// Analyze a legal document in the given mode
    ///
    /// One backend call per invocation; no retry.
    async fn analyze(
        &self,
        text: &str,
        mode: AnalysisMode,
    ) -> Result<AnalysisResult, ApplicationError>;

    /// Model identifier used for a mode
    fn model_for(&self, mode: AnalysisMode) -> String;
}

//! Retrying analysis adapter - Opt-in retries around any AnalysisPort

use std::sync::Arc;

use application::{error::ApplicationError, ports::AnalysisPort};
use async_trait::async_trait;
use domain::{AnalysisMode, AnalysisResult};

use crate::retry::{RetryConfig, retry};

/// Decorator that retries transport failures of the wrapped port
pub struct RetryingAnalysisAdapter {
    inner: Arc<dyn AnalysisPort>,
    config: RetryConfig,
}

impl std::fmt::Debug for RetryingAnalysisAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryingAnalysisAdapter")
            .field("max_retries", &self.config.max_retries)
            .finish_non_exhaustive()
    }
}

impl RetryingAnalysisAdapter {
    /// Wrap `inner` with the given retry settings
    pub fn new(inner: Arc<dyn AnalysisPort>, config: RetryConfig) -> Self {
        Self { inner, config }
    }
}

#[async_trait]
impl AnalysisPort for RetryingAnalysisAdapter {
    async fn analyze(
        &self,
        text: &str,
        mode: AnalysisMode,
    ) -> Result<AnalysisResult, ApplicationError> {
        retry(&self.config, || self.inner.analyze(text, mode)).await
    }

    fn model_for(&self, mode: AnalysisMode) -> String {
        self.inner.model_for(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::RiskLevel;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FlakyAnalysis {
        failures: u32,
        calls: AtomicU32,
        error: fn() -> ApplicationError,
    }

    #[async_trait]
    impl AnalysisPort for FlakyAnalysis {
        async fn analyze(
            &self,
            _text: &str,
            _mode: AnalysisMode,
        ) -> Result<AnalysisResult, ApplicationError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) < self.failures {
                return Err((self.error)());
            }
            Ok(AnalysisResult {
                summary: "ok".to_string(),
                risky_clauses: vec![],
                good_points: vec![],
                concerns: vec![],
                safety_rating: 8,
                risk_level: RiskLevel::Low,
            })
        }

        fn model_for(&self, _mode: AnalysisMode) -> String {
            "flaky".to_string()
        }
    }

    fn fast(max_retries: u32) -> RetryConfig {
        RetryConfig {
            initial_delay_ms: 1,
            max_delay_ms: 2,
            ..RetryConfig::with_max_retries(max_retries)
        }
        .without_jitter()
    }

    #[tokio::test]
    async fn retries_transport_failures() {
        let inner = Arc::new(FlakyAnalysis {
            failures: 2,
            calls: AtomicU32::new(0),
            error: || ApplicationError::Transport("503".to_string()),
        });
        let adapter = RetryingAnalysisAdapter::new(inner.clone(), fast(2));

        let result = adapter.analyze("terms", AnalysisMode::Quick).await.unwrap();
        assert_eq!(result.safety_rating, 8);
        assert_eq!(inner.calls.load(Ordering::SeqCst), 3);
        assert_eq!(adapter.model_for(AnalysisMode::Quick), "flaky");
    }

    #[tokio::test]
    async fn never_retries_empty_response() {
        let inner = Arc::new(FlakyAnalysis {
            failures: 1,
            calls: AtomicU32::new(0),
            error: || ApplicationError::EmptyResponse,
        });
        let adapter = RetryingAnalysisAdapter::new(inner.clone(), fast(3));

        let err = adapter.analyze("terms", AnalysisMode::Deep).await.unwrap_err();
        assert!(matches!(err, ApplicationError::EmptyResponse));
        assert_eq!(inner.calls.load(Ordering::SeqCst), 1);
    }
}

//! Reader adapter - Implements DocumentExtractionPort over the Jina Reader API
//!
//! The reader fetches a page server-side and returns its readable text:
//! `GET {reader_base_url}/{target_url}`.

use std::time::Duration;

use application::{error::ApplicationError, ports::DocumentExtractionPort};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use crate::config::ExtractionConfig;

/// Adapter for URL text extraction through a reader service
#[derive(Debug)]
pub struct JinaReaderAdapter {
    client: Client,
    config: ExtractionConfig,
}

impl JinaReaderAdapter {
    /// Create a new reader adapter
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the config is invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: ExtractionConfig) -> Result<Self, ApplicationError> {
        config.validate().map_err(ApplicationError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Reader URL for a target page
    pub fn reader_url(&self, target: &str) -> String {
        format!(
            "{}/{}",
            self.config.reader_base_url.trim_end_matches('/'),
            target.trim()
        )
    }
}

#[async_trait]
impl DocumentExtractionPort for JinaReaderAdapter {
    #[instrument(skip(self), fields(reader = %self.config.reader_base_url))]
    async fn extract_text(&self, url: &str) -> Result<String, ApplicationError> {
        let mut request = self.client.get(self.reader_url(url));
        if let Some(key) = self.config.api_key.as_deref() {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApplicationError::Transport(format!("Reader request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Reader returned an error status");
            return Err(ApplicationError::Transport(format!(
                "Reader returned HTTP {}",
                status.as_u16()
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ApplicationError::Transport(format!("Reader body unreadable: {e}")))?;

        debug!(length = text.len(), "Reader returned text");
        Ok(text)
    }
}

//! Gemini REST client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::config::GeminiConfig;
use crate::error::InferenceError;
use crate::ports::GenerativeBackend;
use crate::types::{GenerateContentRequest, GenerateContentResponse};

/// Generative backend backed by the Gemini `generateContent` endpoint
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Error envelope returned by the API on failure
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

impl GeminiClient {
    /// Create a new Gemini client
    ///
    /// # Errors
    ///
    /// Returns `InferenceError::Configuration` if the config is invalid and
    /// `InferenceError::ConnectionFailed` if the HTTP client cannot be built.
    pub fn new(config: GeminiConfig) -> Result<Self, InferenceError> {
        config.validate().map_err(InferenceError::Configuration)?;

        let mut builder = Client::builder();
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder
            .build()
            .map_err(|e| InferenceError::ConnectionFailed(e.to_string()))?;

        info!(
            base_url = %config.base_url,
            quick_model = %config.quick_model,
            deep_model = %config.deep_model,
            "Initialized Gemini client"
        );

        Ok(Self { client, config })
    }

    /// Configuration in use
    pub const fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Build the `generateContent` URL for a model
    fn api_url(&self, model: &str) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.api_version.trim_matches('/'),
            model
        )
    }

    fn api_key(&self) -> &str {
        self.config.api_key.as_deref().unwrap_or_default()
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    #[instrument(skip(self, request), fields(model = %model))]
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, InferenceError> {
        debug!("Sending generateContent request");

        let response = self
            .client
            .post(self.api_url(model))
            .header("x-goog-api-key", self.api_key())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 429 {
            warn!("Gemini rate limit exceeded");
            return Err(InferenceError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&body).map_or(body, |e| {
                match e.error.status {
                    Some(s) => format!("{s}: {}", e.error.message),
                    None => e.error.message,
                }
            });
            warn!(status = %status, message = %message, "Gemini request failed");
            return Err(InferenceError::ServerError {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        debug!(
            candidates = body.candidates.len(),
            usage = ?body.usage_metadata,
            "generateContent completed"
        );

        Ok(body)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

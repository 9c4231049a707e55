//! Port definitions for the generative backend
//!
//! Adapters for a concrete model service implement [`GenerativeBackend`];
//! the analyzer and the speech synthesizer only depend on this trait.

use async_trait::async_trait;

use crate::error::InferenceError;
use crate::types::{GenerateContentRequest, GenerateContentResponse};

/// A backend that runs a single `generateContent` call against a model
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Send `request` to `model` and return the raw response envelope
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, InferenceError>;

    /// Backend name for logging
    fn name(&self) -> &'static str {
        "generative-backend"
    }
}

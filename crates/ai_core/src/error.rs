//! Inference errors

use domain::FailureStage;
use thiserror::Error;

/// Errors that can occur while talking to the generative backend
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Request configuration could not be built
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Failed to connect to the backend
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the backend failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Client-side timeout elapsed
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Backend returned a non-success status
    #[error("Server error {status}: {message}")]
    ServerError {
        /// HTTP status code
        status: u16,
        /// Error message from the backend
        message: String,
    },

    /// Response envelope could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Backend returned no text where JSON was expected
    #[error("Empty response from model")]
    EmptyResponse,

    /// Response text did not match the analysis result shape
    #[error("Failed to parse analysis result: {0}")]
    Parse(#[source] serde_json::Error),
}

impl InferenceError {
    /// Pipeline stage this error belongs to
    #[must_use]
    pub const fn stage(&self) -> FailureStage {
        match self {
            Self::Configuration(_) => FailureStage::Configuration,
            Self::ConnectionFailed(_)
            | Self::RequestFailed(_)
            | Self::Timeout(_)
            | Self::RateLimited
            | Self::ServerError { .. } => FailureStage::Network,
            Self::InvalidResponse(_) | Self::EmptyResponse | Self::Parse(_) => FailureStage::Parse,
        }
    }
}

impl From<reqwest::Error> for InferenceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

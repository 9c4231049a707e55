//! Application-level errors

use domain::{DomainError, FailureStage};
use thiserror::Error;

/// Errors that can occur in the application layer
///
/// Each variant is request-scoped; nothing is recovered locally.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error (invalid caller input)
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Request or client configuration could not be built
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Model returned no text where a structured result was expected
    #[error("The model returned an empty response")]
    EmptyResponse,

    /// Speech response carried no audio payload
    #[error("No audio data returned")]
    NoAudioData,

    /// Response text did not match the expected result shape
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Transport or backend failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Backend refused the request with a 4xx status; never retried
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// Extracted document text was too short to analyze
    #[error("Extracted text too short: {length} characters (minimum {minimum})")]
    ExtractionTooShort {
        /// Trimmed length of the extracted text
        length: usize,
        /// Required minimum length
        minimum: usize,
    },

    /// Audio payload could not be decoded
    #[error("Audio decode failed: {0}")]
    Decode(String),

    /// Audio output device failed
    #[error("Playback failed: {0}")]
    Playback(String),
}

impl ApplicationError {
    /// Pipeline stage that produced this error
    pub const fn stage(&self) -> FailureStage {
        match self {
            Self::Domain(_) | Self::ExtractionTooShort { .. } => FailureStage::Input,
            Self::Configuration(_) => FailureStage::Configuration,
            Self::EmptyResponse | Self::NoAudioData | Self::Parse(_) => FailureStage::Parse,
            Self::Transport(_) | Self::Rejected(_) => FailureStage::Network,
            Self::Decode(_) => FailureStage::Decode,
            Self::Playback(_) => FailureStage::Playback,
        }
    }

    /// Check if this error is retryable
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

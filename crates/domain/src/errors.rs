//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Analysis mode outside the supported set
    #[error("Invalid analysis mode: {0}. Use 'quick' or 'deep'")]
    InvalidAnalysisMode(String),

    /// Audio buffer parameters are inconsistent
    #[error("Invalid audio buffer: {0}")]
    InvalidAudioBuffer(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

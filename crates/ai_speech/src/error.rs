//! Speech processing errors

use ai_core::InferenceError;
use domain::FailureStage;
use thiserror::Error;

/// Errors that can occur during speech synthesis and playback
#[derive(Debug, Error)]
pub enum SpeechError {
    /// Backend response carried no audio payload
    #[error("No audio data returned from the speech backend")]
    NoAudioData,

    /// Audio payload could not be decoded
    #[error("Invalid audio: {0}")]
    InvalidAudio(String),

    /// Backend call failed
    #[error(transparent)]
    Backend(#[from] InferenceError),

    /// Audio output device failed
    #[error("Playback failed: {0}")]
    Playback(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl SpeechError {
    /// Pipeline stage this error belongs to
    #[must_use]
    pub const fn stage(&self) -> FailureStage {
        match self {
            Self::NoAudioData => FailureStage::Parse,
            Self::InvalidAudio(_) => FailureStage::Decode,
            Self::Backend(e) => e.stage(),
            Self::Playback(_) => FailureStage::Playback,
            Self::Configuration(_) => FailureStage::Configuration,
        }
    }
}

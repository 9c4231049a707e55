//! Speech port - Interface for text-to-speech synthesis

use async_trait::async_trait;
use domain::AudioSampleBuffer;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for speech synthesis
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SpeechPort: Send + Sync {
    /// Synthesize speech from text (Text-to-Speech)
    ///
    /// Returns a decoded, device-independent sample buffer.
    async fn synthesize(&self, text: &str) -> Result<AudioSampleBuffer, ApplicationError>;

    /// Voice used for synthesis
    fn voice(&self) -> String;
}

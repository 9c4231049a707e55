//! Port definitions for speech synthesis and audio output
//!
//! Defines the traits (ports) that synthesis and output adapters must implement.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::error::SpeechError;
use crate::types::{AudioSampleBuffer, OutputState, PlaybackOutcome};

/// Port for Text-to-Speech (TTS) implementations
///
/// Implementations turn text into a decoded, device-independent sample
/// buffer.
///
/// # Example
///
/// ```ignore
/// use ai_speech::TextToSpeech;
///
/// async fn narrate(tts: &impl TextToSpeech, summary: &str) -> Result<(), SpeechError> {
///     let buffer = tts.synthesize(summary).await?;
///     println!("{} frames at {} Hz", buffer.frame_count(), buffer.sample_rate());
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Convert text to speech
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if the backend call fails, the response carries
    /// no audio, or the audio cannot be decoded.
    async fn synthesize(&self, text: &str) -> Result<AudioSampleBuffer, SpeechError>;

    /// Get the name of the TTS model
    fn model_name(&self) -> &str;

    /// Get the voice used for synthesis
    fn voice(&self) -> &str;
}

/// Port for an audio output device
#[async_trait]
pub trait AudioOutput: Send + Sync {
    /// Current device state
    fn state(&self) -> OutputState;

    /// Resume a suspended device
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Playback` if the device cannot be resumed.
    async fn resume(&self) -> Result<(), SpeechError>;

    /// Play `buffer` until it ends or `stop` fires
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Playback` if the device fails.
    async fn play(
        &self,
        buffer: AudioSampleBuffer,
        stop: oneshot::Receiver<()>,
    ) -> Result<PlaybackOutcome, SpeechError>;

    /// Close the device
    async fn close(&self) -> Result<(), SpeechError> {
        Ok(())
    }
}

/// Acquires audio output devices on demand
pub trait AudioOutputFactory: Send + Sync {
    /// Open a new output device
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Playback` if no device can be opened.
    fn open(&self) -> Result<Arc<dyn AudioOutput>, SpeechError>;
}

impl<F> AudioOutputFactory for F
where
    F: Fn() -> Result<Arc<dyn AudioOutput>, SpeechError> + Send + Sync,
{
    fn open(&self) -> Result<Arc<dyn AudioOutput>, SpeechError> {
        self()
    }
}

//! Speech adapter - Implements SpeechPort using ai_speech

use std::sync::Arc;

use ai_core::GenerativeBackend;
use ai_speech::{GeminiSpeechSynthesizer, SpeechConfig, SpeechError, TextToSpeech};
use application::{error::ApplicationError, ports::SpeechPort};
use async_trait::async_trait;
use domain::AudioSampleBuffer;
use tracing::{debug, instrument};

use super::analysis_adapter::map_inference_error;

/// Adapter for speech synthesis
pub struct SpeechAdapter {
    synthesizer: Arc<dyn TextToSpeech>,
}

impl std::fmt::Debug for SpeechAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechAdapter")
            .field("model", &self.synthesizer.model_name())
            .field("voice", &self.synthesizer.voice())
            .finish()
    }
}

impl SpeechAdapter {
    /// Create a Gemini-backed speech adapter
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the speech config is invalid.
    pub fn new(
        backend: Arc<dyn GenerativeBackend>,
        config: SpeechConfig,
    ) -> Result<Self, ApplicationError> {
        let synthesizer = GeminiSpeechSynthesizer::new(backend, config).map_err(map_speech_error)?;
        Ok(Self::with_synthesizer(Arc::new(synthesizer)))
    }

    /// Wrap an existing synthesizer
    pub fn with_synthesizer(synthesizer: Arc<dyn TextToSpeech>) -> Self {
        Self { synthesizer }
    }

    /// Underlying synthesizer, shared with the playback coordinator
    pub fn synthesizer(&self) -> Arc<dyn TextToSpeech> {
        Arc::clone(&self.synthesizer)
    }
}

/// Convert an ai_speech error into the application taxonomy
pub fn map_speech_error(err: SpeechError) -> ApplicationError {
    match err {
        SpeechError::NoAudioData => ApplicationError::NoAudioData,
        SpeechError::InvalidAudio(msg) => ApplicationError::Decode(msg),
        SpeechError::Backend(e) => map_inference_error(e),
        SpeechError::Playback(msg) => ApplicationError::Playback(msg),
        SpeechError::Configuration(msg) => ApplicationError::Configuration(msg),
    }
}

#[async_trait]
impl SpeechPort for SpeechAdapter {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn synthesize(&self, text: &str) -> Result<AudioSampleBuffer, ApplicationError> {
        let buffer = self
            .synthesizer
            .synthesize(text)
            .await
            .map_err(map_speech_error)?;

        debug!(
            frames = buffer.frame_count(),
            sample_rate = buffer.sample_rate(),
            "Speech synthesized"
        );

        Ok(buffer)
    }

    fn voice(&self) -> String {
        self.synthesizer.voice().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ai_core::InferenceError;
    use domain::FailureStage;

    struct SilentSpeech;

    #[async_trait]
    impl TextToSpeech for SilentSpeech {
        async fn synthesize(&self, text: &str) -> Result<AudioSampleBuffer, SpeechError> {
            if text == "fail" {
                return Err(SpeechError::NoAudioData);
            }
            AudioSampleBuffer::new(24_000, vec![vec![0.0; 2_400]])
                .map_err(|e| SpeechError::InvalidAudio(e.to_string()))
        }

        fn model_name(&self) -> &str {
            "silent"
        }

        fn voice(&self) -> &str {
            "Puck"
        }
    }

    #[tokio::test]
    async fn synthesize_delegates_to_provider() {
        let adapter = SpeechAdapter::with_synthesizer(Arc::new(SilentSpeech));
        let buffer = adapter.synthesize("hello").await.unwrap();
        assert_eq!(buffer.frame_count(), 2_400);
        assert_eq!(adapter.voice(), "Puck");
    }

    #[tokio::test]
    async fn provider_errors_are_mapped() {
        let adapter = SpeechAdapter::with_synthesizer(Arc::new(SilentSpeech));
        let err = adapter.synthesize("fail").await.unwrap_err();
        assert!(matches!(err, ApplicationError::NoAudioData));
    }

    #[test]
    fn debug_shows_model_and_voice() {
        let adapter = SpeechAdapter::with_synthesizer(Arc::new(SilentSpeech));
        let debug = format!("{adapter:?}");
        assert!(debug.contains("silent"));
        assert!(debug.contains("Puck"));
    }

    #[test]
    fn error_mapping_keeps_stages() {
        let cases = [
            (SpeechError::NoAudioData, FailureStage::Parse),
            (
                SpeechError::InvalidAudio("bad base64".to_string()),
                FailureStage::Decode,
            ),
            (
                SpeechError::Backend(InferenceError::RateLimited),
                FailureStage::Network,
            ),
            (
                SpeechError::Playback("device lost".to_string()),
                FailureStage::Playback,
            ),
            (
                SpeechError::Configuration("no voice".to_string()),
                FailureStage::Configuration,
            ),
        ];

        for (err, stage) in cases {
            assert_eq!(err.stage(), stage);
            assert_eq!(map_speech_error(err).stage(), stage);
        }
    }
}

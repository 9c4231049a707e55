//! Gemini speech synthesizer
//!
//! Requests audio-only output from a Gemini TTS model and decodes the raw
//! PCM16 payload of the first part of the first candidate.

use std::sync::Arc;

use ai_core::{
    Content, GenerateContentRequest, GenerationConfig, GenerativeBackend, ResponseModality,
    SpeechOutputConfig,
};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::pcm::decode_pcm16_base64;
use crate::ports::TextToSpeech;
use crate::types::{AudioSampleBuffer, sample_rate_from_mime_type};

/// Text-to-speech over a Gemini generative backend
pub struct GeminiSpeechSynthesizer {
    backend: Arc<dyn GenerativeBackend>,
    config: SpeechConfig,
}

impl std::fmt::Debug for GeminiSpeechSynthesizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiSpeechSynthesizer")
            .field("backend", &self.backend.name())
            .field("config", &self.config)
            .finish()
    }
}

impl GeminiSpeechSynthesizer {
    /// Create a new synthesizer
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid.
    pub fn new(
        backend: Arc<dyn GenerativeBackend>,
        config: SpeechConfig,
    ) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;
        Ok(Self { backend, config })
    }

    /// Configuration in use
    pub const fn config(&self) -> &SpeechConfig {
        &self.config
    }

    /// Build the audio-only request for `text`
    fn build_request(&self, text: &str) -> Result<GenerateContentRequest, SpeechError> {
        let generation_config = GenerationConfig::builder()
            .response_modalities(vec![ResponseModality::Audio])
            .speech_config(SpeechOutputConfig::prebuilt_voice(&self.config.voice))
            .build()?;

        Ok(GenerateContentRequest {
            contents: vec![Content::text(text)],
            system_instruction: None,
            generation_config: Some(generation_config),
        })
    }
}

#[async_trait]
impl TextToSpeech for GeminiSpeechSynthesizer {
    #[instrument(skip(self, text), fields(model = %self.config.tts_model, text_len = text.len()))]
    async fn synthesize(&self, text: &str) -> Result<AudioSampleBuffer, SpeechError> {
        let request = self.build_request(text)?;

        debug!(voice = %self.config.voice, "Requesting speech synthesis");

        let response = self
            .backend
            .generate_content(&self.config.tts_model, &request)
            .await?;

        let inline = response
            .first_inline_data()
            .filter(|data| !data.data.is_empty())
            .ok_or(SpeechError::NoAudioData)?;

        let declared_rate = sample_rate_from_mime_type(&inline.mime_type);
        if let Some(rate) = declared_rate.filter(|r| *r != self.config.sample_rate) {
            warn!(
                declared = rate,
                configured = self.config.sample_rate,
                "Audio payload declares a different sample rate"
            );
        }

        let buffer =
            decode_pcm16_base64(&inline.data, self.config.sample_rate, self.config.channels)?;

        debug!(
            frames = buffer.frame_count(),
            duration_ms = u64::try_from(buffer.duration().as_millis()).unwrap_or(u64::MAX),
            "Speech synthesis completed"
        );

        Ok(buffer)
    }

    fn model_name(&self) -> &str {
        &self.config.tts_model
    }

    fn voice(&self) -> &str {
        &self.config.voice
    }
}

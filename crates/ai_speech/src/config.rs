//! Configuration for speech synthesis

use serde::{Deserialize, Serialize};

/// Configuration for text-to-speech synthesis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Text-to-speech model
    #[serde(default = "default_tts_model")]
    pub tts_model: String,

    /// Prebuilt voice name
    #[serde(default = "default_voice")]
    pub voice: String,

    /// Sample rate of the returned PCM in Hz
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Number of interleaved channels in the returned PCM
    #[serde(default = "default_channels")]
    pub channels: u16,
}

fn default_tts_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}

fn default_voice() -> String {
    "Kore".to_string()
}

const fn default_sample_rate() -> u32 {
    24_000
}

const fn default_channels() -> u16 {
    1
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            tts_model: default_tts_model(),
            voice: default_voice(),
            sample_rate: default_sample_rate(),
            channels: default_channels(),
        }
    }
}

impl SpeechConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.tts_model.trim().is_empty() {
            return Err("TTS model must not be empty".to_string());
        }

        if self.voice.trim().is_empty() {
            return Err("Voice must not be empty".to_string());
        }

        if self.sample_rate == 0 {
            return Err("Sample rate must be greater than 0".to_string());
        }

        if self.channels == 0 {
            return Err("Channel count must be greater than 0".to_string());
        }

        Ok(())
    }
}

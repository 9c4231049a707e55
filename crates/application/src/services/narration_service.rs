//! Narration service - Reads an analysis summary aloud
//!
//! Synthesizes the summary through the speech port and hands the decoded
//! buffer to the playback port.

use std::{fmt, sync::Arc, time::Duration};

use domain::{AnalysisResult, DomainError};
use tracing::{info, instrument};

use crate::{
    error::ApplicationError,
    ports::{PlaybackPort, SpeechPort},
};

/// Result of starting a narration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NarrationOutcome {
    /// Number of frames handed to playback
    pub frames: usize,
    /// Sample rate of the synthesized audio
    pub sample_rate: u32,
    /// Playback duration
    pub duration: Duration,
}

/// Service for narrating analysis summaries
pub struct NarrationService {
    speech: Arc<dyn SpeechPort>,
    playback: Arc<dyn PlaybackPort>,
}

impl fmt::Debug for NarrationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NarrationService")
            .field("voice", &self.speech.voice())
            .finish_non_exhaustive()
    }
}

impl NarrationService {
    /// Create a new narration service
    pub fn new(speech: Arc<dyn SpeechPort>, playback: Arc<dyn PlaybackPort>) -> Self {
        Self { speech, playback }
    }

    /// Synthesize the result summary and start playing it
    pub async fn narrate_summary(
        &self,
        result: &AnalysisResult,
    ) -> Result<NarrationOutcome, ApplicationError> {
        self.narrate(&result.summary).await
    }

    /// Synthesize `text` and start playing it
    ///
    /// Any active playback is replaced.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn narrate(&self, text: &str) -> Result<NarrationOutcome, ApplicationError> {
        if text.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Nothing to narrate: text is empty".to_string(),
            )
            .into());
        }

        let buffer = self.speech.synthesize(text).await?;
        let outcome = NarrationOutcome {
            frames: buffer.frame_count(),
            sample_rate: buffer.sample_rate(),
            duration: buffer.duration(),
        };

        self.playback.play(buffer).await?;

        info!(
            frames = outcome.frames,
            duration_ms = u64::try_from(outcome.duration.as_millis()).unwrap_or(u64::MAX),
            "Narration started"
        );

        Ok(outcome)
    }

    /// Narrate and wait until playback has finished
    pub async fn narrate_to_end(&self, text: &str) -> Result<NarrationOutcome, ApplicationError> {
        let outcome = self.narrate(text).await?;
        self.playback.wait_until_finished().await;
        Ok(outcome)
    }

    /// Stop the current narration, if any
    pub fn stop(&self) {
        self.playback.stop();
    }
}

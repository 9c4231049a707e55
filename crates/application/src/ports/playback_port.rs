//! Playback port - Interface for playing decoded audio

use async_trait::async_trait;
use domain::AudioSampleBuffer;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for audio playback
///
/// Implementations keep at most one playback active; starting a new one
/// stops the previous.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PlaybackPort: Send + Sync {
    /// Start playing `buffer`, replacing any active playback
    async fn play(&self, buffer: AudioSampleBuffer) -> Result<(), ApplicationError>;

    /// Stop the active playback, if any
    fn stop(&self);

    /// Resolve once nothing is playing
    async fn wait_until_finished(&self);
}

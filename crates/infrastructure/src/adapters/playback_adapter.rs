//! Playback adapter - Implements PlaybackPort using the playback coordinator

use std::sync::Arc;

use ai_speech::PlaybackCoordinator;
use application::{error::ApplicationError, ports::PlaybackPort};
use async_trait::async_trait;
use domain::AudioSampleBuffer;

use super::speech_adapter::map_speech_error;

/// Adapter exposing a [`PlaybackCoordinator`] as a playback port
#[derive(Debug, Clone)]
pub struct CoordinatorPlaybackAdapter {
    coordinator: Arc<PlaybackCoordinator>,
}

impl CoordinatorPlaybackAdapter {
    /// Wrap a shared coordinator
    pub const fn new(coordinator: Arc<PlaybackCoordinator>) -> Self {
        Self { coordinator }
    }

    /// The wrapped coordinator
    pub const fn coordinator(&self) -> &Arc<PlaybackCoordinator> {
        &self.coordinator
    }
}

#[async_trait]
impl PlaybackPort for CoordinatorPlaybackAdapter {
    async fn play(&self, buffer: AudioSampleBuffer) -> Result<(), ApplicationError> {
        self.coordinator
            .play(buffer)
            .await
            .map(|_| ())
            .map_err(map_speech_error)
    }

    fn stop(&self) {
        self.coordinator.stop();
    }

    async fn wait_until_finished(&self) {
        self.coordinator.wait_idle().await;
    }
}

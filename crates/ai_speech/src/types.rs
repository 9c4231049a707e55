//! Types for speech synthesis and playback

use serde::{Deserialize, Serialize};
use std::fmt;

pub use domain::AudioSampleBuffer;

/// State of an audio output device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputState {
    /// Ready to play
    Running,
    /// Acquired but paused (needs `resume` before playback)
    Suspended,
    /// Closed; must be reacquired
    Closed,
}

/// Observable state of the playback coordinator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// Nothing playing
    #[default]
    Idle,
    /// Synthesizing or preparing the device
    Loading,
    /// A buffer is playing
    Playing,
}

impl PlaybackState {
    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Playing => "playing",
        }
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a playback ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// The whole buffer was played
    Completed,
    /// Playback was stopped early
    Stopped,
}

/// Sample rate declared in a PCM MIME type such as
/// `audio/L16;codec=pcm;rate=24000`
#[must_use]
pub fn sample_rate_from_mime_type(mime: &str) -> Option<u32> {
    mime.split(';')
        .skip(1)
        .filter_map(|param| param.trim().split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("rate"))
        .and_then(|(_, value)| value.trim().parse().ok())
}

//! Decoded audio sample buffer

use std::time::Duration;

use crate::errors::DomainError;

/// Channel-separated floating point audio ready for an output device
///
/// Samples are normalized to [-1.0, 1.0]. Every channel holds exactly
/// `frame_count` samples. Ownership moves to whoever plays it.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSampleBuffer {
    sample_rate: u32,
    channels: Vec<Vec<f32>>,
}

impl AudioSampleBuffer {
    /// Create a buffer from per-channel sample vectors
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAudioBuffer` if the sample rate is zero,
    /// there are no channels, or the channels differ in length.
    pub fn new(sample_rate: u32, channels: Vec<Vec<f32>>) -> Result<Self, DomainError> {
        if sample_rate == 0 {
            return Err(DomainError::InvalidAudioBuffer(
                "sample rate must be greater than 0".to_string(),
            ));
        }

        let Some(first) = channels.first() else {
            return Err(DomainError::InvalidAudioBuffer(
                "at least one channel is required".to_string(),
            ));
        };

        let frames = first.len();
        if channels.iter().any(|c| c.len() != frames) {
            return Err(DomainError::InvalidAudioBuffer(
                "all channels must have the same number of frames".to_string(),
            ));
        }

        Ok(Self {
            sample_rate,
            channels,
        })
    }

    /// Sample rate in Hz
    #[must_use]
    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of channels
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Number of frames (samples per channel)
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Samples of one channel
    #[must_use]
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// Whether the buffer holds no frames
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frame_count() == 0
    }

    /// Playback duration
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.frame_count() as f64 / f64::from(self.sample_rate))
    }

    /// Samples interleaved frame by frame (L R L R ...)
    #[must_use]
    pub fn interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.frame_count() * self.channel_count());
        for frame in 0..self.frame_count() {
            for channel in &self.channels {
                out.push(channel[frame]);
            }
        }
        out
    }
}

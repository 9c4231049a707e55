//! WAV file audio output
//!
//! An [`AudioOutput`] that "plays" a buffer by writing it to a 16-bit PCM
//! WAV file. Writing happens in chunks so a stop request ends the file
//! early with a valid header.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use ai_speech::{
    AudioOutput, AudioSampleBuffer, OutputState, PlaybackOutcome, SpeechError, pcm::buffer_to_i16,
};
use async_trait::async_trait;
use hound::{SampleFormat, WavSpec, WavWriter};
use parking_lot::Mutex;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tracing::{debug, instrument};

/// Frames written between stop checks
const CHUNK_FRAMES: usize = 4_800;

/// Audio output writing to a WAV file
#[derive(Debug)]
pub struct WavFileOutput {
    path: PathBuf,
    state: Mutex<OutputState>,
    frames_written: AtomicUsize,
    last_error: Mutex<Option<String>>,
}

impl WavFileOutput {
    /// Create an output writing to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: Mutex::new(OutputState::Running),
            frames_written: AtomicUsize::new(0),
            last_error: Mutex::new(None),
        }
    }

    /// Destination file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Frames written by the last playback
    pub fn frames_written(&self) -> usize {
        self.frames_written.load(Ordering::SeqCst)
    }

    /// Take the error of the last failed playback, if any
    pub fn take_error(&self) -> Option<String> {
        self.last_error.lock().take()
    }

    /// Pause the output; the next playback resumes it first
    pub fn suspend(&self) {
        let mut state = self.state.lock();
        if *state == OutputState::Running {
            *state = OutputState::Suspended;
        }
    }
}

fn stop_requested(stop: &mut oneshot::Receiver<()>) -> bool {
    !matches!(stop.try_recv(), Err(TryRecvError::Empty))
}

fn write_wav(
    path: &Path,
    buffer: &AudioSampleBuffer,
    stop: &mut oneshot::Receiver<()>,
) -> Result<(PlaybackOutcome, usize), SpeechError> {
    let channels = u16::try_from(buffer.channel_count())
        .map_err(|_| SpeechError::Playback("too many channels for WAV".to_string()))?;
    let spec = WavSpec {
        channels,
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let to_playback = |e: hound::Error| SpeechError::Playback(format!("WAV write failed: {e}"));
    let mut writer = WavWriter::create(path, spec).map_err(to_playback)?;

    let samples = buffer_to_i16(buffer);
    let stride = usize::from(channels);
    let mut frames = 0;
    let mut outcome = PlaybackOutcome::Completed;

    for chunk in samples.chunks(CHUNK_FRAMES * stride) {
        if stop_requested(stop) {
            outcome = PlaybackOutcome::Stopped;
            break;
        }
        for &sample in chunk {
            writer.write_sample(sample).map_err(to_playback)?;
        }
        frames += chunk.len() / stride;
    }

    writer.finalize().map_err(to_playback)?;
    Ok((outcome, frames))
}

#[async_trait]
impl AudioOutput for WavFileOutput {
    fn state(&self) -> OutputState {
        *self.state.lock()
    }

    async fn resume(&self) -> Result<(), SpeechError> {
        let mut state = self.state.lock();
        if *state == OutputState::Closed {
            return Err(SpeechError::Playback("WAV output is closed".to_string()));
        }
        *state = OutputState::Running;
        Ok(())
    }

    #[instrument(skip(self, buffer, stop), fields(path = %self.path.display(), frames = buffer.frame_count()))]
    async fn play(
        &self,
        buffer: AudioSampleBuffer,
        mut stop: oneshot::Receiver<()>,
    ) -> Result<PlaybackOutcome, SpeechError> {
        let state = self.state();
        if state != OutputState::Running {
            return Err(SpeechError::Playback(format!(
                "WAV output is not running ({state:?})"
            )));
        }

        let path = self.path.clone();
        let written = tokio::task::spawn_blocking(move || write_wav(&path, &buffer, &mut stop))
            .await
            .map_err(|e| SpeechError::Playback(format!("WAV writer task failed: {e}")))
            .and_then(|result| result);

        match written {
            Ok((outcome, frames)) => {
                self.frames_written.store(frames, Ordering::SeqCst);
                debug!(frames, ?outcome, "WAV written");
                Ok(outcome)
            },
            Err(e) => {
                *self.last_error.lock() = Some(e.to_string());
                Err(e)
            },
        }
    }

    async fn close(&self) -> Result<(), SpeechError> {
        *self.state.lock() = OutputState::Closed;
        Ok(())
    }
}

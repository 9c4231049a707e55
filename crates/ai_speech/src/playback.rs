//! Playback coordination
//!
//! [`PlaybackCoordinator`] owns at most one active playback and the audio
//! output device. The device is acquired lazily on first use, resumed if it
//! is suspended, and dropped by [`PlaybackCoordinator::release`].
//!
//! Every start bumps a generation counter. Completion or failure of a
//! playback only affects the coordinator state if it still belongs to the
//! current generation, so a stale playback can never flip a newer one back
//! to idle. A playback that was stopped is awaited before the next one
//! reaches the device.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::error::SpeechError;
use crate::ports::{AudioOutput, AudioOutputFactory, TextToSpeech};
use crate::types::{AudioSampleBuffer, OutputState, PlaybackState};

struct ActivePlayback {
    generation: u64,
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

#[derive(Default)]
struct Inner {
    device: Option<Arc<dyn AudioOutput>>,
    active: Option<ActivePlayback>,
    draining: Option<JoinHandle<()>>,
    generation: u64,
}

struct Shared {
    inner: Mutex<Inner>,
    state: watch::Sender<PlaybackState>,
}

impl Shared {
    fn current_state(&self) -> PlaybackState {
        *self.state.borrow()
    }

    fn stop_locked(&self, inner: &mut Inner) {
        inner.generation += 1;
        if let Some(active) = inner.active.take() {
            let _ = active.stop.send(());
            inner.draining = Some(active.task);
            debug!(generation = active.generation, "Stopped playback");
        }
        self.state.send_replace(PlaybackState::Idle);
    }

    /// Mark a playback as finished if it is still the active one
    fn finish(&self, generation: u64) {
        let mut inner = self.inner.lock();
        if inner
            .active
            .as_ref()
            .is_some_and(|a| a.generation == generation)
        {
            inner.active = None;
            self.state.send_replace(PlaybackState::Idle);
        }
    }

    /// Return to idle after a failed start, unless superseded
    fn abort_start(&self, generation: u64) {
        let inner = self.inner.lock();
        if inner.generation == generation && inner.active.is_none() {
            self.state.send_replace(PlaybackState::Idle);
        }
    }
}

/// Coordinates speech playback on a single output device
pub struct PlaybackCoordinator {
    factory: Arc<dyn AudioOutputFactory>,
    shared: Arc<Shared>,
}

impl std::fmt::Debug for PlaybackCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackCoordinator")
            .field("state", &self.state())
            .field("has_device", &self.has_device())
            .finish_non_exhaustive()
    }
}

impl PlaybackCoordinator {
    /// Create a coordinator that opens devices through `factory`
    pub fn new(factory: impl AudioOutputFactory + 'static) -> Self {
        let (state, _) = watch::channel(PlaybackState::Idle);
        Self {
            factory: Arc::new(factory),
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner::default()),
                state,
            }),
        }
    }

    /// Current state
    pub fn state(&self) -> PlaybackState {
        self.shared.current_state()
    }

    /// Whether an output device is currently held
    pub fn has_device(&self) -> bool {
        self.shared.inner.lock().device.is_some()
    }

    /// Watch state changes
    pub fn subscribe(&self) -> watch::Receiver<PlaybackState> {
        self.shared.state.subscribe()
    }

    /// Stop if busy, otherwise synthesize `text` and start playing it
    ///
    /// Returns the state after the call: `Idle` if a playback was stopped
    /// (or this start was superseded), `Playing` if playback started.
    ///
    /// # Errors
    ///
    /// Returns the synthesis or device error. The state is `Idle` afterwards.
    #[instrument(skip(self, synthesizer, text), fields(text_len = text.len()))]
    pub async fn toggle(
        &self,
        synthesizer: &dyn TextToSpeech,
        text: &str,
    ) -> Result<PlaybackState, SpeechError> {
        let generation = {
            let mut inner = self.shared.inner.lock();
            if self.shared.current_state() != PlaybackState::Idle {
                self.shared.stop_locked(&mut inner);
                info!("Playback toggled off");
                return Ok(PlaybackState::Idle);
            }
            inner.generation += 1;
            self.shared.state.send_replace(PlaybackState::Loading);
            inner.generation
        };

        let prepared = async {
            let device = self.acquire_device().await?;
            let buffer = synthesizer.synthesize(text).await?;
            Ok::<_, SpeechError>((device, buffer))
        }
        .await;

        match prepared {
            Ok((device, buffer)) => Ok(self.start(device, buffer, generation)),
            Err(e) => {
                warn!(error = %e, "Failed to start playback");
                self.shared.abort_start(generation);
                Err(e)
            },
        }
    }

    /// Play a decoded buffer, replacing any active playback
    ///
    /// # Errors
    ///
    /// Returns the device error if no output could be acquired or resumed.
    #[instrument(skip(self, buffer), fields(frames = buffer.frame_count()))]
    pub async fn play(&self, buffer: AudioSampleBuffer) -> Result<PlaybackState, SpeechError> {
        let generation = {
            let mut inner = self.shared.inner.lock();
            self.shared.stop_locked(&mut inner);
            self.shared.state.send_replace(PlaybackState::Loading);
            inner.generation
        };

        match self.acquire_device().await {
            Ok(device) => Ok(self.start(device, buffer, generation)),
            Err(e) => {
                warn!(error = %e, "Failed to acquire audio output");
                self.shared.abort_start(generation);
                Err(e)
            },
        }
    }

    /// Stop the active playback, if any
    pub fn stop(&self) {
        let mut inner = self.shared.inner.lock();
        if inner.active.is_some() || self.shared.current_state() != PlaybackState::Idle {
            self.shared.stop_locked(&mut inner);
        }
    }

    /// Resolve once the coordinator is idle
    pub async fn wait_idle(&self) {
        let mut rx = self.subscribe();
        let _ = rx.wait_for(|state| *state == PlaybackState::Idle).await;
    }

    /// Stop playback and drop the output device
    ///
    /// The next playback acquires a fresh device.
    ///
    /// # Errors
    ///
    /// Returns the device error if closing fails.
    pub async fn release(&self) -> Result<(), SpeechError> {
        let device = {
            let mut inner = self.shared.inner.lock();
            self.shared.stop_locked(&mut inner);
            inner.device.take()
        };

        if let Some(device) = device {
            device.close().await?;
            info!("Released audio output");
        }
        Ok(())
    }

    async fn acquire_device(&self) -> Result<Arc<dyn AudioOutput>, SpeechError> {
        let device = {
            let mut inner = self.shared.inner.lock();
            match &inner.device {
                Some(device) if device.state() != OutputState::Closed => Arc::clone(device),
                _ => {
                    let device = self.factory.open()?;
                    debug!("Acquired audio output");
                    inner.device = Some(Arc::clone(&device));
                    device
                },
            }
        };

        if device.state() == OutputState::Suspended {
            debug!("Resuming suspended audio output");
            device.resume().await?;
        }

        Ok(device)
    }

    fn start(
        &self,
        device: Arc<dyn AudioOutput>,
        buffer: AudioSampleBuffer,
        generation: u64,
    ) -> PlaybackState {
        let mut inner = self.shared.inner.lock();
        if inner.generation != generation {
            debug!(generation, "Playback superseded before start");
            return PlaybackState::Idle;
        }

        let (stop_tx, stop_rx) = oneshot::channel();
        let previous = inner.draining.take();
        let shared = Arc::clone(&self.shared);
        let frames = buffer.frame_count();

        let task = tokio::spawn(async move {
            if let Some(previous) = previous {
                let _ = previous.await;
            }
            match device.play(buffer, stop_rx).await {
                Ok(outcome) => debug!(generation, ?outcome, "Playback ended"),
                Err(e) => warn!(generation, error = %e, "Playback failed"),
            }
            shared.finish(generation);
        });

        inner.active = Some(ActivePlayback {
            generation,
            stop: stop_tx,
            task,
        });
        self.shared.state.send_replace(PlaybackState::Playing);
        info!(generation, frames, "Playback started");

        PlaybackState::Playing
    }
}

//! AI Speech - Text-to-speech synthesis and playback
//!
//! Turns text into a decoded sample buffer and coordinates playing it on a
//! single audio output:
//! - `TextToSpeech` - Synthesize speech from text (TTS)
//! - `AudioOutput` - Play decoded buffers on a device
//! - `PlaybackCoordinator` - At most one active playback, lazy device
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the traits (ports)
//! - `providers` module contains concrete implementations (adapters)
//! - `pcm` module decodes raw 16-bit PCM into normalized samples
//!
//! # Example
//!
//! ```ignore
//! use ai_speech::{GeminiSpeechSynthesizer, PlaybackCoordinator, SpeechConfig};
//!
//! let tts = GeminiSpeechSynthesizer::new(backend, SpeechConfig::default())?;
//! let coordinator = PlaybackCoordinator::new(open_output);
//!
//! coordinator.toggle(&tts, &result.summary).await?;
//! coordinator.wait_idle().await;
//! ```

pub mod config;
pub mod error;
pub mod pcm;
pub mod playback;
pub mod ports;
pub mod providers;
pub mod types;

pub use config::SpeechConfig;
pub use error::SpeechError;
pub use playback::PlaybackCoordinator;
pub use ports::{AudioOutput, AudioOutputFactory, TextToSpeech};
pub use providers::gemini::GeminiSpeechSynthesizer;
pub use types::{AudioSampleBuffer, OutputState, PlaybackOutcome, PlaybackState};

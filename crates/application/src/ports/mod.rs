//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod analysis_port;
mod document_extraction_port;
mod playback_port;
mod speech_port;

#[cfg(test)]
pub use analysis_port::MockAnalysisPort;
pub use analysis_port::AnalysisPort;
#[cfg(test)]
pub use document_extraction_port::MockDocumentExtractionPort;
pub use document_extraction_port::DocumentExtractionPort;
#[cfg(test)]
pub use playback_port::MockPlaybackPort;
pub use playback_port::PlaybackPort;
#[cfg(test)]
pub use speech_port::MockSpeechPort;
pub use speech_port::SpeechPort;

//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod analysis_adapter;
mod jina_reader_adapter;
mod playback_adapter;
mod retrying_analysis_adapter;
mod speech_adapter;

pub use analysis_adapter::{GeminiAnalysisAdapter, map_inference_error};
pub use jina_reader_adapter::JinaReaderAdapter;
pub use playback_adapter::CoordinatorPlaybackAdapter;
pub use retrying_analysis_adapter::RetryingAnalysisAdapter;
pub use speech_adapter::{SpeechAdapter, map_speech_error};

/// Whether an HTTP status means the backend refused the request itself
///
/// 408 and 429 are transient and stay retryable.
pub(crate) const fn is_client_rejection(status: u16) -> bool {
    matches!(status, 400..=499) && status != 408 && status != 429
}


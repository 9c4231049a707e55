//! Domain entities - Analysis results, document inputs, and decoded audio

mod analysis_result;
mod audio_buffer;
mod document_source;

pub use analysis_result::{AnalysisResult, RiskyClause};
pub use audio_buffer::AudioSampleBuffer;
pub use document_source::DocumentSource;

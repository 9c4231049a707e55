//! Application services - Use case implementations

mod analysis_service;
mod narration_service;

pub use analysis_service::{AnalysisOutcome, AnalysisService, DEFAULT_MIN_EXTRACTED_CHARS};
pub use narration_service::{NarrationOutcome, NarrationService};

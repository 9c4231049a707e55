//! Value Objects - Immutable, identity-less domain primitives

mod analysis_mode;
mod failure_stage;
mod risk_level;
mod safety_band;

pub use analysis_mode::AnalysisMode;
pub use failure_stage::FailureStage;
pub use risk_level::RiskLevel;
pub use safety_band::{SAFETY_RATING_MAX, SAFETY_RATING_MIN, SafetyBand};

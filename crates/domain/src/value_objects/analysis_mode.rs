//! Analysis mode value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Depth of a document analysis
///
/// Chosen by the caller before each request. The mode selects the model,
/// whether extended reasoning is enabled, and which calibration text is
/// appended to the system instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Fast scan on the cheaper model, calibrated against over-penalizing boilerplate
    Quick,
    /// Thorough analysis on the higher-capability model with a reasoning budget
    #[default]
    Deep,
}

impl AnalysisMode {
    /// Wire name of the mode
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Quick => "quick",
            Self::Deep => "deep",
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Quick => "Quick Scan",
            Self::Deep => "Deep Analysis",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AnalysisMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quick" => Ok(Self::Quick),
            "deep" => Ok(Self::Deep),
            _ => Err(DomainError::InvalidAnalysisMode(s.to_string())),
        }
    }
}

//! Pipeline failure stage

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pipeline stage that produced a failure
///
/// Every error surfaced by the analysis and speech pipelines can be traced
/// back to exactly one of these stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureStage {
    /// Request or client configuration could not be built
    Configuration,
    /// Caller input was rejected before any request was made
    Input,
    /// Transport or backend-level failure
    Network,
    /// Backend answered but the payload did not match the expected shape
    Parse,
    /// Audio payload could not be decoded
    Decode,
    /// Audio output device failure
    Playback,
}

impl FailureStage {
    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Input => "input",
            Self::Network => "network",
            Self::Parse => "parse",
            Self::Decode => "decode",
            Self::Playback => "playback",
        }
    }
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//! Overall risk level value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse risk classification of an analyzed document
///
/// Serialized exactly as the backend emits it: `"High"`, `"Medium"`, `"Low"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Aggressive or predatory terms
    High,
    /// Standard corporate boilerplate
    Medium,
    /// User-friendly terms
    Low,
}

impl RiskLevel {
    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Get an emoji representation
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::High => "🔴",
            Self::Medium => "🟡",
            Self::Low => "🟢",
        }
    }

    /// Whether a safety rating falls in the range this level usually pairs with
    ///
    /// High pairs with 1-4, Medium with 5-7, Low with 8-10. The backend is
    /// responsible for consistency; this is only used for diagnostics.
    #[must_use]
    pub const fn is_consistent_with(&self, rating: i64) -> bool {
        matches!(
            (self, rating),
            (Self::High, 1..=4) | (Self::Medium, 5..=7) | (Self::Low, 8..=10)
        )
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

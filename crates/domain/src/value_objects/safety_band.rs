//! Safety rating bands

use serde::{Deserialize, Serialize};

/// Lowest rating the backend contract allows
pub const SAFETY_RATING_MIN: i64 = 1;
/// Highest rating the backend contract allows
pub const SAFETY_RATING_MAX: i64 = 10;

/// Display band of a 1-10 safety rating
///
/// Total over all integers: a rating outside the contract range lands in
/// the nearest band instead of failing, so display code never has to
/// special-case a misbehaving backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyBand {
    /// 8-10: transparent, user-friendly
    Safe,
    /// 5-7: standard boilerplate
    Caution,
    /// 1-4: aggressive or one-sided terms
    Risky,
}

impl SafetyBand {
    /// Classify a rating
    #[must_use]
    pub const fn from_rating(rating: i64) -> Self {
        if rating >= 8 {
            Self::Safe
        } else if rating >= 5 {
            Self::Caution
        } else {
            Self::Risky
        }
    }

    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Safe => "Safe",
            Self::Caution => "Average / Caution",
            Self::Risky => "Risky",
        }
    }

    /// Whether a rating is within the contract range
    #[must_use]
    pub const fn in_contract_range(rating: i64) -> bool {
        rating >= SAFETY_RATING_MIN && rating <= SAFETY_RATING_MAX
    }
}

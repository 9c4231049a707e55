//! Analysis result entity
//!
//! The structured contract returned to callers of the analysis pipeline.
//! Field names on the wire are camelCase, matching the output schema
//! declared to the backend.

use serde::{Deserialize, Serialize};

use crate::value_objects::{RiskLevel, SafetyBand};

/// A clause flagged as risky for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskyClause {
    /// Section name or number, e.g. "Section 3.2: Termination"
    pub section: String,
    /// Short direct excerpt of the clause text
    pub snippet: String,
    /// One-sentence plain-language explanation of the impact
    pub explanation: String,
}

/// Structured risk analysis of a legal document
///
/// Every field is required when decoding; the lists may be empty.
/// `safety_rating` is carried exactly as the backend produced it, even
/// outside 1-10.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Short summary of the document
    pub summary: String,
    /// Risky clauses in document order
    pub risky_clauses: Vec<RiskyClause>,
    /// User-friendly or positive points
    pub good_points: Vec<String>,
    /// General concerns
    pub concerns: Vec<String>,
    /// Safety rating, 1 (highly risky) to 10 (very safe)
    pub safety_rating: i64,
    /// Overall risk level
    pub risk_level: RiskLevel,
}

impl AnalysisResult {
    /// Decode a result from the backend's JSON text
    ///
    /// Fails if the text is not JSON or any required field is missing or
    /// has the wrong type. Values are not repaired.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Display band of the safety rating
    #[must_use]
    pub const fn safety_band(&self) -> SafetyBand {
        SafetyBand::from_rating(self.safety_rating)
    }

    /// Whether the safety rating is within 1-10
    #[must_use]
    pub const fn rating_in_range(&self) -> bool {
        SafetyBand::in_contract_range(self.safety_rating)
    }

    /// Whether the rating and the risk level agree with the scoring rubric
    #[must_use]
    pub const fn rating_matches_risk_level(&self) -> bool {
        self.risk_level.is_consistent_with(self.safety_rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{
        "summary": "A standard streaming service agreement.",
        "riskyClauses": [
            {
                "section": "Section 9: Arbitration",
                "snippet": "All disputes shall be resolved by binding arbitration.",
                "explanation": "You cannot take the company to court."
            }
        ],
        "goodPoints": ["Cancel anytime from account settings."],
        "concerns": ["Data may be shared with advertising partners."],
        "safetyRating": 6,
        "riskLevel": "Medium"
    }"#;

    #[test]
    fn decodes_full_payload() {
        let result = AnalysisResult::from_json(FULL).unwrap();
        assert_eq!(result.risky_clauses.len(), 1);
        assert_eq!(result.risky_clauses[0].section, "Section 9: Arbitration");
        assert_eq!(result.good_points.len(), 1);
        assert_eq!(result.concerns.len(), 1);
        assert_eq!(result.safety_rating, 6);
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert_eq!(result.safety_band(), SafetyBand::Caution);
        assert!(result.rating_matches_risk_level());
    }

    #[test]
    fn empty_lists_are_valid() {
        let json = r#"{"summary":"s","riskyClauses":[],"goodPoints":[],"concerns":[],"safetyRating":9,"riskLevel":"Low"}"#;
        let result = AnalysisResult::from_json(json).unwrap();
        assert!(result.risky_clauses.is_empty());
        assert!(result.good_points.is_empty());
        assert!(result.concerns.is_empty());
    }

    #[test]
    fn missing_field_is_rejected() {
        let json = r#"{"summary":"s","riskyClauses":[],"goodPoints":[],"safetyRating":9,"riskLevel":"Low"}"#;
        let err = AnalysisResult::from_json(json).unwrap_err();
        assert!(err.to_string().contains("concerns"));
    }

    #[test]
    fn clause_missing_explanation_is_rejected() {
        let json = r#"{"summary":"s","riskyClauses":[{"section":"1","snippet":"x"}],"goodPoints":[],"concerns":[],"safetyRating":5,"riskLevel":"Medium"}"#;
        assert!(AnalysisResult::from_json(json).is_err());
    }

    #[test]
    fn out_of_range_rating_passes_through() {
        let json = r#"{"summary":"s","riskyClauses":[],"goodPoints":[],"concerns":[],"safetyRating":14,"riskLevel":"Low"}"#;
        let result = AnalysisResult::from_json(json).unwrap();
        assert_eq!(result.safety_rating, 14);
        assert!(!result.rating_in_range());
        assert_eq!(result.safety_band(), SafetyBand::Safe);
    }

    #[test]
    fn inconsistent_level_is_kept() {
        let json = r#"{"summary":"s","riskyClauses":[],"goodPoints":[],"concerns":[],"safetyRating":2,"riskLevel":"Low"}"#;
        let result = AnalysisResult::from_json(json).unwrap();
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert!(!result.rating_matches_risk_level());
    }

    #[test]
    fn unknown_risk_level_is_rejected() {
        let json = r#"{"summary":"s","riskyClauses":[],"goodPoints":[],"concerns":[],"safetyRating":5,"riskLevel":"Severe"}"#;
        assert!(AnalysisResult::from_json(json).is_err());
    }

    #[test]
    fn serializes_camel_case() {
        let result = AnalysisResult::from_json(FULL).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("riskyClauses"));
        assert!(json.contains("safetyRating"));
        assert!(!json.contains("risky_clauses"));
    }
}

//! Report rendering
//!
//! Every list section prints an explicit line when empty, and any safety
//! rating renders, including values outside 1-10.

use std::fmt::Write;

use application::AnalysisOutcome;
use domain::{AnalysisMode, AnalysisResult, SafetyBand};
use serde::Serialize;

/// Printed when no risky clauses were found
pub const NO_RISKY_CLAUSES: &str = "No significant risky clauses detected.";
/// Printed when no good points were found
pub const NO_GOOD_POINTS: &str = "No specific highlights found.";
/// Printed when no general concerns were found
pub const NO_CONCERNS: &str = "No general concerns noted.";

/// Machine-readable report
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport<'a> {
    pub mode: AnalysisMode,
    pub model: &'a str,
    pub document_chars: usize,
    pub processing_time_ms: u64,
    pub safety_band: SafetyBand,
    pub rating_in_range: bool,
    pub result: &'a AnalysisResult,
}

impl<'a> JsonReport<'a> {
    /// Build the JSON view of an outcome
    pub fn new(outcome: &'a AnalysisOutcome) -> Self {
        Self {
            mode: outcome.mode,
            model: &outcome.model,
            document_chars: outcome.document_chars,
            processing_time_ms: outcome.processing_time_ms,
            safety_band: outcome.result.safety_band(),
            rating_in_range: outcome.result.rating_in_range(),
            result: &outcome.result,
        }
    }
}

/// Render the human-readable report
pub fn render_report(outcome: &AnalysisOutcome) -> String {
    let result = &outcome.result;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} Risk level: {}",
        result.risk_level.emoji(),
        result.risk_level.label()
    );
    let _ = writeln!(out, "Safety score: {}", score_line(result));
    let _ = writeln!(
        out,
        "{} with {} in {} ms",
        outcome.mode.label(),
        outcome.model,
        outcome.processing_time_ms
    );

    out.push_str("\nSummary\n");
    let _ = writeln!(out, "  {}", result.summary.trim());

    out.push_str("\nRisky clauses\n");
    if result.risky_clauses.is_empty() {
        let _ = writeln!(out, "  {NO_RISKY_CLAUSES}");
    }
    for (index, clause) in result.risky_clauses.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", index + 1, clause.section);
        let _ = writeln!(out, "     \"{}\"", clause.snippet);
        let _ = writeln!(out, "     {}", clause.explanation);
    }

    out.push_str("\nGood points\n");
    push_list(&mut out, &result.good_points, '+', NO_GOOD_POINTS);

    out.push_str("\nConcerns\n");
    push_list(&mut out, &result.concerns, '-', NO_CONCERNS);

    out
}

/// "7/10 (Average / Caution)"; out-of-range ratings are flagged, not clamped
pub fn score_line(result: &AnalysisResult) -> String {
    let band = result.safety_band().label();
    if result.rating_in_range() {
        format!("{}/10 ({band})", result.safety_rating)
    } else {
        format!("{}/10 ({band}, outside 1-10)", result.safety_rating)
    }
}

fn push_list(out: &mut String, items: &[String], bullet: char, empty: &str) {
    if items.is_empty() {
        let _ = writeln!(out, "  {empty}");
        return;
    }
    for item in items {
        let _ = writeln!(out, "  {bullet} {item}");
    }
}

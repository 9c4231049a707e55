//! Mode-dependent analysis request configuration
//!
//! [`build_request_config`] is the single place where an [`AnalysisMode`]
//! is turned into a model identifier, a system instruction, an output
//! schema and generation parameters. Quick scans never carry a reasoning
//! budget and deep analysis never carries an output token cap; the two
//! variants of [`AnalysisRequestConfig`] make any other combination
//! unrepresentable.

use domain::AnalysisMode;
use serde_json::{Value, json};

use crate::config::GeminiConfig;
use crate::error::InferenceError;
use crate::types::{GenerateContentRequest, GenerationConfig};

/// Role, scoring rubric and clause guidelines shared by both modes
pub const BASE_SYSTEM_INSTRUCTION: &str = "\
You help users understand Terms & Conditions, Privacy Policies, and License Agreements.
You simplify the text, highlight important points, identify risks, and call out anything the user should know.
You stay neutral and helpful. You do not give legal advice, only explanations.

Analyze the provided text and output the results in the specified JSON format.

**Scoring Guidelines (Strict but Fair):**
- **CRITICAL:** Start with a baseline score of 5. Most standard agreements are a 5 or 6.
- Do NOT give a score of 8, 9, or 10 unless the document explicitly gives the user *more* rights than standard law (e.g. \"We never sell data\", \"Full refund at any time\", \"No arbitration\").
- If the document contains standard \"We may share data with partners\" or \"Class action waiver\", the score MUST be 6 or lower.
- **8-10 (Safe):** Transparent, user-friendly, respects privacy, no forced arbitration, clear opt-outs.
- **5-7 (Average/Caution):** Standard corporate boilerplate. Includes typical liability limits, class action waivers, or binding arbitration, but isn't aggressively predatory.
- **1-4 (Risky):** Aggressive data selling, hidden fees, unusual waiver of rights, difficult cancellation, or heavily one-sided terms.
- 'safetyRating' is an integer between 1 (Highly Risky) and 10 (Very Safe).

**Risky Clauses Guidelines:**
- For every risky clause, you MUST extract the Section Name/Number as a headline.
- Provide a very short \"snippet\" (1-2 lines max) of the actual text.
- The 'explanation' must be extremely simple and limited to strictly 1 sentence. Explain the impact on the user in plain English.
";

/// Appended to the base instruction for quick scans
pub const QUICK_SCAN_CALIBRATION: &str = "
**Quick Scan Calibration:**
- Do NOT be overly critical of standard industry practices.
- If a document contains standard corporate boilerplate (like standard liability caps or arbitration with opt-outs), rate it as \"Average\" (6-7), NOT \"Risky\" (5).
- Only drop the score to 5 or lower if clauses are hidden, aggressively one-sided, or unusual for the industry.
";

/// Structured-output schema for [`domain::AnalysisResult`]
pub fn analysis_output_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": {
                "type": "STRING",
                "description": "A quick summary of the document."
            },
            "riskyClauses": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "section": {
                            "type": "STRING",
                            "description": "The section number and title (e.g. 'Section 3.2: Termination')."
                        },
                        "snippet": {
                            "type": "STRING",
                            "description": "A direct quote or short summary of the clause text (max 2 lines)."
                        },
                        "explanation": {
                            "type": "STRING",
                            "description": "A simplified 1 sentence explanation of the risk."
                        }
                    },
                    "required": ["section", "snippet", "explanation"]
                },
                "description": "List of risky or dangerous clauses."
            },
            "goodPoints": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "User-friendly or positive sections."
            },
            "concerns": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "General concerns about the document."
            },
            "safetyRating": {
                "type": "INTEGER",
                "description": "Safety rating from 1 to 10."
            },
            "riskLevel": {
                "type": "STRING",
                "enum": ["High", "Medium", "Low"],
                "description": "Overall risk level."
            }
        },
        "required": ["summary", "riskyClauses", "goodPoints", "concerns", "safetyRating", "riskLevel"]
    })
}

/// Quick scan parameters
#[derive(Debug, Clone, PartialEq)]
pub struct QuickRequestConfig {
    model: String,
    system_instruction: String,
    output_schema: Value,
    max_output_tokens: Option<u32>,
}

/// Deep analysis parameters
#[derive(Debug, Clone, PartialEq)]
pub struct DeepRequestConfig {
    model: String,
    system_instruction: String,
    output_schema: Value,
    thinking_budget: u32,
}

/// Request parameters for one analysis call
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisRequestConfig {
    /// Fast model, calibrated instruction, no reasoning budget
    Quick(QuickRequestConfig),
    /// Slow model with an extended reasoning budget
    Deep(DeepRequestConfig),
}

/// Build the request parameters for `mode`
pub fn build_request_config(mode: AnalysisMode, config: &GeminiConfig) -> AnalysisRequestConfig {
    AnalysisRequestConfig::for_mode(mode, config)
}

impl AnalysisRequestConfig {
    /// Build the request parameters for `mode`
    pub fn for_mode(mode: AnalysisMode, config: &GeminiConfig) -> Self {
        match mode {
            AnalysisMode::Quick => Self::Quick(QuickRequestConfig {
                model: config.quick_model.clone(),
                system_instruction: format!("{BASE_SYSTEM_INSTRUCTION}{QUICK_SCAN_CALIBRATION}"),
                output_schema: analysis_output_schema(),
                max_output_tokens: config.quick_max_output_tokens,
            }),
            AnalysisMode::Deep => Self::Deep(DeepRequestConfig {
                model: config.deep_model.clone(),
                system_instruction: BASE_SYSTEM_INSTRUCTION.to_string(),
                output_schema: analysis_output_schema(),
                thinking_budget: config.deep_thinking_budget,
            }),
        }
    }

    /// Mode this config was built for
    pub const fn mode(&self) -> AnalysisMode {
        match self {
            Self::Quick(_) => AnalysisMode::Quick,
            Self::Deep(_) => AnalysisMode::Deep,
        }
    }

    /// Model identifier
    pub fn model(&self) -> &str {
        match self {
            Self::Quick(c) => &c.model,
            Self::Deep(c) => &c.model,
        }
    }

    /// System instruction text
    pub fn system_instruction(&self) -> &str {
        match self {
            Self::Quick(c) => &c.system_instruction,
            Self::Deep(c) => &c.system_instruction,
        }
    }

    /// Declared output schema
    pub const fn output_schema(&self) -> &Value {
        match self {
            Self::Quick(c) => &c.output_schema,
            Self::Deep(c) => &c.output_schema,
        }
    }

    /// Reasoning budget (deep only)
    pub const fn thinking_budget(&self) -> Option<u32> {
        match self {
            Self::Quick(_) => None,
            Self::Deep(c) => Some(c.thinking_budget),
        }
    }

    /// Output token cap (quick only)
    pub const fn max_output_tokens(&self) -> Option<u32> {
        match self {
            Self::Quick(c) => c.max_output_tokens,
            Self::Deep(_) => None,
        }
    }

    /// Wire-level generation parameters
    ///
    /// # Errors
    ///
    /// Returns `InferenceError::Configuration` if the builder rejects the
    /// combination of parameters.
    pub fn generation_config(&self) -> Result<GenerationConfig, InferenceError> {
        let builder = GenerationConfig::builder().json_output(self.output_schema().clone());
        let builder = match self {
            Self::Quick(c) => match c.max_output_tokens {
                Some(cap) => builder.max_output_tokens(cap),
                None => builder,
            },
            Self::Deep(c) => builder.thinking_budget(c.thinking_budget),
        };
        builder.build()
    }

    /// Full request body for analysing `document`
    pub fn to_request(&self, document: &str) -> Result<GenerateContentRequest, InferenceError> {
        Ok(GenerateContentRequest::user_text(document)
            .with_system_instruction(self.system_instruction())
            .with_generation_config(self.generation_config()?))
    }

    /// Summary of the parameters, with the schema, for display
    pub fn describe(&self) -> Value {
        json!({
            "mode": self.mode().as_str(),
            "model": self.model(),
            "thinkingBudget": self.thinking_budget(),
            "maxOutputTokens": self.max_output_tokens(),
            "responseMimeType": "application/json",
            "responseSchema": self.output_schema(),
        })
    }
}

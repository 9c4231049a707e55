//! Gemini `generateContent` wire types
//!
//! Request and response bodies are camelCase JSON. Only the fields this
//! crate reads or writes are modelled; unknown response fields are ignored.

use serde::{Deserialize, Serialize};

use crate::error::InferenceError;

/// Body of a `generateContent` request
///
/// Outgoing only; the client never decodes a request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation contents (a single user turn here)
    pub contents: Vec<Content>,
    /// System instruction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    /// Generation parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Single user text turn without system instruction or parameters
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user_text(text)],
            system_instruction: None,
            generation_config: None,
        }
    }

    /// Set the system instruction
    #[must_use]
    pub fn with_system_instruction(mut self, text: impl Into<String>) -> Self {
        self.system_instruction = Some(Content::text(text));
        self
    }

    /// Set the generation config
    #[must_use]
    pub fn with_generation_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }
}

/// A content block made of parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    /// Author role ("user" or "model"); omitted for system instructions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Parts of the content
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Role-less content with one text part
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }

    /// User content with one text part
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part::text(text)],
        }
    }
}

/// A single part of a content block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Text payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Binary payload (base64)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
    /// Set on reasoning summaries, which are not part of the answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
}

impl Part {
    /// Text part
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Whether this part is a reasoning summary
    #[must_use]
    pub fn is_thought(&self) -> bool {
        self.thought.unwrap_or(false)
    }
}

/// Base64-encoded binary data with its MIME type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// MIME type, e.g. `audio/L16;codec=pcm;rate=24000`
    #[serde(default)]
    pub mime_type: String,
    /// Base64 payload
    #[serde(default)]
    pub data: String,
}

/// Output modality requested from the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResponseModality {
    /// Text output
    Text,
    /// Audio output
    Audio,
}

/// Voice selection for speech output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechOutputConfig {
    /// Voice configuration
    pub voice_config: VoiceConfig,
}

/// Voice configuration wrapper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig {
    /// Prebuilt voice
    pub prebuilt_voice_config: PrebuiltVoiceConfig,
}

/// Named prebuilt voice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrebuiltVoiceConfig {
    /// Voice name, e.g. "Kore"
    pub voice_name: String,
}

impl SpeechOutputConfig {
    /// Speech output with a prebuilt voice
    pub fn prebuilt_voice(name: impl Into<String>) -> Self {
        Self {
            voice_config: VoiceConfig {
                prebuilt_voice_config: PrebuiltVoiceConfig {
                    voice_name: name.into(),
                },
            },
        }
    }

    /// Name of the selected voice
    #[must_use]
    pub fn voice_name(&self) -> &str {
        &self.voice_config.prebuilt_voice_config.voice_name
    }
}

/// Reasoning configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingConfig {
    /// Token allowance for internal deliberation
    pub thinking_budget: u32,
}

/// Generation parameters
///
/// Only constructible through [`GenerationConfigBuilder`], which rejects a
/// reasoning budget combined with an output token cap. There is no
/// `Deserialize` impl to bypass it:
///
/// ```compile_fail
/// let config: ai_core::GenerationConfig = serde_json::from_str(
///     r#"{"thinkingConfig": {"thinkingBudget": 1024}, "maxOutputTokens": 256}"#,
/// ).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<ResponseModality>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    speech_config: Option<SpeechOutputConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

impl GenerationConfig {
    /// Start building a generation config
    #[must_use]
    pub fn builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder::default()
    }

    /// Declared response MIME type
    #[must_use]
    pub fn response_mime_type(&self) -> Option<&str> {
        self.response_mime_type.as_deref()
    }

    /// Declared response schema
    #[must_use]
    pub const fn response_schema(&self) -> Option<&serde_json::Value> {
        self.response_schema.as_ref()
    }

    /// Requested output modalities
    #[must_use]
    pub fn response_modalities(&self) -> Option<&[ResponseModality]> {
        self.response_modalities.as_deref()
    }

    /// Speech output configuration
    #[must_use]
    pub const fn speech_config(&self) -> Option<&SpeechOutputConfig> {
        self.speech_config.as_ref()
    }

    /// Reasoning budget, if extended reasoning is enabled
    #[must_use]
    pub fn thinking_budget(&self) -> Option<u32> {
        self.thinking_config.map(|t| t.thinking_budget)
    }

    /// Output token cap
    #[must_use]
    pub const fn max_output_tokens(&self) -> Option<u32> {
        self.max_output_tokens
    }
}

/// Builder for [`GenerationConfig`]
#[derive(Debug, Clone, Default)]
pub struct GenerationConfigBuilder {
    response_mime_type: Option<String>,
    response_schema: Option<serde_json::Value>,
    response_modalities: Option<Vec<ResponseModality>>,
    speech_config: Option<SpeechOutputConfig>,
    thinking_budget: Option<u32>,
    max_output_tokens: Option<u32>,
}

impl GenerationConfigBuilder {
    /// Request JSON output conforming to `schema`
    #[must_use]
    pub fn json_output(mut self, schema: serde_json::Value) -> Self {
        self.response_mime_type = Some("application/json".to_string());
        self.response_schema = Some(schema);
        self
    }

    /// Request the given output modalities
    #[must_use]
    pub fn response_modalities(mut self, modalities: Vec<ResponseModality>) -> Self {
        self.response_modalities = Some(modalities);
        self
    }

    /// Set the speech output configuration
    #[must_use]
    pub fn speech_config(mut self, config: SpeechOutputConfig) -> Self {
        self.speech_config = Some(config);
        self
    }

    /// Enable extended reasoning with the given token budget
    #[must_use]
    pub const fn thinking_budget(mut self, budget: u32) -> Self {
        self.thinking_budget = Some(budget);
        self
    }

    /// Cap the number of output tokens
    #[must_use]
    pub const fn max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = Some(tokens);
        self
    }

    /// Build the config
    ///
    /// # Errors
    ///
    /// Returns `InferenceError::Configuration` if both a reasoning budget
    /// and an output token cap are set.
    pub fn build(self) -> Result<GenerationConfig, InferenceError> {
        if let (Some(budget), Some(cap)) = (self.thinking_budget, self.max_output_tokens) {
            return Err(InferenceError::Configuration(format!(
                "thinking budget ({budget}) and max output tokens ({cap}) are mutually exclusive"
            )));
        }

        Ok(GenerationConfig {
            response_mime_type: self.response_mime_type,
            response_schema: self.response_schema,
            response_modalities: self.response_modalities,
            speech_config: self.speech_config,
            thinking_config: self
                .thinking_budget
                .map(|thinking_budget| ThinkingConfig { thinking_budget }),
            max_output_tokens: self.max_output_tokens,
        })
    }
}

/// Body of a `generateContent` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Response candidates
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Feedback on the prompt (e.g. block reason)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<PromptFeedback>,
    /// Token usage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
    /// Model version that served the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
}

/// A response candidate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    /// Why generation stopped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Feedback about the prompt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// Reason the prompt was blocked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    /// Prompt tokens
    #[serde(default)]
    pub prompt_token_count: u32,
    /// Output tokens
    #[serde(default)]
    pub candidates_token_count: u32,
    /// Reasoning tokens
    #[serde(default)]
    pub thoughts_token_count: u32,
    /// Total tokens
    #[serde(default)]
    pub total_token_count: u32,
}

impl GenerateContentResponse {
    /// Concatenated answer text of the first candidate
    ///
    /// Reasoning summaries are skipped. Returns `None` when the first
    /// candidate has no text parts at all.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let mut texts = content
            .parts
            .iter()
            .filter(|p| !p.is_thought())
            .filter_map(|p| p.text.as_deref())
            .peekable();

        texts.peek()?;
        Some(texts.collect())
    }

    /// Inline data of the first part of the first candidate
    #[must_use]
    pub fn first_inline_data(&self) -> Option<&InlineData> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .inline_data
            .as_ref()
    }

    /// Block reason reported for the prompt, if any
    #[must_use]
    pub fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback.as_ref()?.block_reason.as_deref()
    }
}

//! Document input source

use serde::{Deserialize, Serialize};

/// Where the document to analyze comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum DocumentSource {
    /// Pasted document text
    Text(String),
    /// Web page whose text is extracted before analysis
    Url(String),
}

impl DocumentSource {
    /// Create a text source
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create a URL source
    pub fn url(url: impl Into<String>) -> Self {
        Self::Url(url.into())
    }

    /// Short name of the source kind, for logging
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Url(_) => "url",
        }
    }
}

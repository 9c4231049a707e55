//! Document extraction port - Interface for turning a URL into plain text

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for fetching a web page as readable text
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DocumentExtractionPort: Send + Sync {
    /// Fetch `url` and return its readable text
    ///
    /// Returns the body as received; length checks are done by the caller.
    async fn extract_text(&self, url: &str) -> Result<String, ApplicationError>;
}

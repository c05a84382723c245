/*!
 * Translation port used by the page pipeline.
 *
 * The pipeline only needs "translate this text between these languages for this
 * kind of content". `TranslationService` implements it on top of LLM providers
 * and `MockTranslator` implements it for tests.
 */

use async_trait::async_trait;
use std::fmt;

use crate::errors::TranslationError;

/// Tag selecting the instruction template used for a translation request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// Article body
    Text,
    /// Article title
    Title,
    /// Caller-defined kind, looked up by name in the prompt templates
    Custom(String),
}

impl ContentKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Title => "title",
            Self::Custom(name) => name,
        }
    }
}

impl From<&str> for ContentKind {
    fn from(value: &str) -> Self {
        match value {
            "text" => Self::Text,
            "title" => Self::Title,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability that turns text in one language into text in another
#[async_trait]
pub trait TextTranslator: Send + Sync {
    /// Translate `text` from `source_language` to `target_language`
    ///
    /// # Arguments
    /// * `text` - Text to translate, placeholders included
    /// * `source_language` - Wiki language code of the text
    /// * `target_language` - Wiki language code to translate into
    /// * `kind` - Content kind used to pick the instruction template
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
        kind: &ContentKind,
    ) -> Result<String, TranslationError>;

    /// Name used in logs
    fn name(&self) -> &str;
}

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Target language identifier, forwarded verbatim to the provider
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(String);

impl Locale {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Locale {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl From<&str> for Locale {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of a single translation attempt.
///
/// Serializes as `{"text": ...}` or `{"error": ...}`, which is the shape
/// exposed in the `details` array of a failed batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranslationOutcome {
    Translated { text: String },
    Failed {
        #[serde(rename = "error")]
        reason: String,
    },
}

impl TranslationOutcome {
    pub fn translated(text: impl Into<String>) -> Self {
        Self::Translated { text: text.into() }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Translation provider interface - one remote call per text item
#[async_trait]
pub trait Translator: Send + Sync {
    /// Short provider name used in logs
    fn name(&self) -> &str;

    /// Translate `text` into `locale`
    ///
    /// # Returns
    /// The translated text, or the provider failure (network, malformed
    /// response, rejection)
    async fn translate(&self, text: &str, locale: &Locale) -> Result<String, anyhow::Error>;
}

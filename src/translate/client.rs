use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

use super::interface::{Locale, TranslationOutcome, Translator};

/// Wraps a provider and turns every call into a [`TranslationOutcome`].
///
/// Provider faults never escape: errors and timeouts become `Failed` values
/// and are logged here.
pub struct TranslationClient {
    provider: Arc<dyn Translator>,
    timeout: Option<Duration>,
}

impl TranslationClient {
    /// Create a new translation client
    ///
    /// # Arguments
    /// * `provider` - The provider each call is forwarded to
    /// * `timeout` - Per-call limit, `None` to wait indefinitely
    pub fn new(provider: Arc<dyn Translator>, timeout: Option<Duration>) -> Self {
        Self { provider, timeout }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Translate one text item. Calls the provider exactly once.
    pub async fn translate_one(&self, text: &str, locale: &Locale) -> TranslationOutcome {
        let call = self.provider.translate(text, locale);
        let result = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => Err(anyhow::anyhow!("timed out after {:?}", limit)),
            },
            None => call.await,
        };

        match result {
            Ok(translated) => {
                debug!(
                    "{} translated {} chars to {}",
                    self.provider.name(),
                    text.chars().count(),
                    locale
                );
                TranslationOutcome::translated(translated)
            }
            Err(e) => {
                let message = format!("Error translating '{}': {:#}", text, e);
                error!("{}", message);
                TranslationOutcome::failed(message)
            }
        }
    }
}

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use super::google::GoogleTranslator;
use super::interface::Translator;
use super::passthrough::PassthroughTranslator;
use crate::config::TranslatorConfig;

/// Factory for creating translation providers
pub struct TranslatorFactory;

impl TranslatorFactory {
    /// Create the provider named by `config.provider`
    pub fn create(config: &TranslatorConfig) -> Result<Arc<dyn Translator>> {
        info!("Initializing translator: {}", config.provider);

        match config.provider.as_str() {
            "google" => Ok(Arc::new(GoogleTranslator::new(
                config.base_url.clone(),
                config.source_language.clone(),
                config.timeout(),
            )?)),
            "passthrough" => Ok(Arc::new(PassthroughTranslator)),
            other => Err(anyhow::anyhow!("Unsupported translation provider: {}", other)),
        }
    }
}

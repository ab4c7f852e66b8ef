use std::sync::Arc;

use crate::config::Config;
use crate::translate::{TranslationClient, Translator, TranslatorFactory};

/// Shared, read-only state handed to every request
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub translation_client: Arc<TranslationClient>,
}

impl AppState {
    /// Build state with the provider named in the config
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let translator = TranslatorFactory::create(&config.translator)?;
        Ok(Self::with_translator(config, translator))
    }

    pub fn with_translator(config: Config, translator: Arc<dyn Translator>) -> Self {
        let translation_client = Arc::new(TranslationClient::new(
            translator,
            config.translator.timeout(),
        ));

        Self {
            config: Arc::new(config),
            translation_client,
        }
    }
}

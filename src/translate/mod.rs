pub mod interface;
pub mod client;
pub mod factory;
pub mod google;
pub mod passthrough;

pub use interface::{Locale, TranslationOutcome, Translator};
pub use client::TranslationClient;
pub use factory::TranslatorFactory;
pub use google::GoogleTranslator;
pub use passthrough::PassthroughTranslator;

#[cfg(test)]
pub(crate) mod testing;

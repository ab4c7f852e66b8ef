use crate::error::TranslateError;
use crate::translate::{Locale, TranslationClient, TranslationOutcome};

/// Character ceiling for a single-text request (inclusive)
pub const MAX_TEXT_LENGTH: usize = 15000;

/// Translate one text blob with a single provider call.
///
/// The length check runs before the provider is contacted. Length is counted
/// in characters, not bytes.
pub async fn translate_single(
    client: &TranslationClient,
    text: Option<&str>,
    locale: &Locale,
    max_length: usize,
) -> Result<String, TranslateError> {
    let text = text.ok_or(TranslateError::Validation)?;

    let length = text.chars().count();
    if length > max_length {
        return Err(TranslateError::LengthExceeded {
            length,
            limit: max_length,
        });
    }

    match client.translate_one(text, locale).await {
        TranslationOutcome::Translated { text } => Ok(text),
        TranslationOutcome::Failed { reason } => Err(TranslateError::Translation(reason)),
    }
}

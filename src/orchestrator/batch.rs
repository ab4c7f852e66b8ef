use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::error::TranslateError;
use crate::translate::{Locale, TranslationClient, TranslationOutcome};

/// One named entry of a batch request. `None` marks an absent (null) value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequestField {
    pub name: String,
    pub text: Option<String>,
}

impl TranslationRequestField {
    pub fn new(name: impl Into<String>, text: Option<&str>) -> Self {
        Self {
            name: name.into(),
            text: text.map(str::to_string),
        }
    }
}

/// Translate every present field and reassemble the results.
///
/// Only `None` counts as absent; empty strings are dispatched like any other
/// text. At most `max_concurrency` provider calls run at once, and results
/// keep dispatch order regardless of completion order.
///
/// # Returns
/// `(text_<n>, translation)` pairs, `n` being the 1-based dispatch position.
/// The whole batch fails if any single item fails.
pub async fn translate_batch(
    client: &TranslationClient,
    fields: &[TranslationRequestField],
    locale: &Locale,
    max_concurrency: usize,
) -> Result<Vec<(String, String)>, TranslateError> {
    let texts: Vec<String> = fields
        .iter()
        .filter_map(|field| field.text.clone())
        .collect();

    if texts.is_empty() {
        warn!("Batch request to {} has no text fields", locale);
        return Err(TranslateError::MissingFields);
    }

    info!(
        "Translating {} of {} fields to {}",
        texts.len(),
        fields.len(),
        locale
    );

    let outcomes: Vec<TranslationOutcome> = stream::iter(texts)
        .map(|text| async move { client.translate_one(&text, locale).await })
        .buffered(max_concurrency.max(1))
        .collect()
        .await;

    let failed = outcomes.iter().filter(|o| o.is_failed()).count();
    if failed > 0 {
        warn!(
            "{} of {} translations to {} failed",
            failed,
            outcomes.len(),
            locale
        );
        return Err(TranslateError::BatchFailure { details: outcomes });
    }

    Ok(outcomes
        .into_iter()
        .enumerate()
        .filter_map(|(i, outcome)| match outcome {
            TranslationOutcome::Translated { text } => Some((format!("text_{}", i + 1), text)),
            TranslationOutcome::Failed { .. } => None,
        })
        .collect())
}

use async_trait::async_trait;

use super::interface::{Locale, Translator};

/// Returns the input unchanged. Useful for local runs without network access.
pub struct PassthroughTranslator;

#[async_trait]
impl Translator for PassthroughTranslator {
    fn name(&self) -> &str {
        "passthrough"
    }

    async fn translate(&self, text: &str, _locale: &Locale) -> Result<String, anyhow::Error> {
        Ok(text.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_returns_input() {
        let result = PassthroughTranslator
            .translate("Hello", &Locale::from("es"))
            .await
            .unwrap();
        assert_eq!(result, "Hello");
    }
}

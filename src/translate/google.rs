use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::interface::{Locale, Translator};

/// Google Translate web endpoint (`translate_a/single`, `client=gtx`)
pub struct GoogleTranslator {
    client: Client,
    base_url: String,
    source_language: String,
}

impl GoogleTranslator {
    /// Build a translator with its own pooled HTTP client
    ///
    /// # Arguments
    /// * `base_url` - Endpoint root, e.g. `https://translate.googleapis.com`
    /// * `source_language` - Source language code, `auto` to let Google detect
    /// * `timeout` - Request timeout applied by the HTTP client
    pub fn new(base_url: String, source_language: String, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        let base_url = base_url.trim_end_matches('/').to_string();
        info!(
            "Initialized GoogleTranslator: base_url={}, source_language={}",
            base_url, source_language
        );

        Ok(Self {
            client,
            base_url,
            source_language,
        })
    }
}

/// Concatenate the translated segments found at `[0][*][0]`
fn extract_translation(body: &Value) -> Result<String> {
    let segments = body
        .get(0)
        .and_then(|v| v.as_array())
        .context("Invalid translation response format: missing segments")?;

    let translation: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(|v| v.as_str()))
        .collect();

    if translation.is_empty() {
        anyhow::bail!("Empty translation received from Google");
    }
    Ok(translation)
}

#[async_trait]
impl Translator for GoogleTranslator {
    fn name(&self) -> &str {
        "google"
    }

    async fn translate(&self, text: &str, locale: &Locale) -> Result<String> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }

        let url = format!("{}/translate_a/single", self.base_url);
        debug!("Requesting translation of {} chars to {}", text.chars().count(), locale);

        let response = self
            .client
            .post(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", self.source_language.as_str()),
                ("tl", locale.as_str()),
                ("dt", "t"),
            ])
            .form(&[("q", text)])
            .send()
            .await
            .context("Failed to reach translation service")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Google Translate API error: {} - {}", status, body);
            anyhow::bail!("Translation service returned error: {}", status);
        }

        let body: Value = response
            .json()
            .await
            .context("Failed to parse translation response")?;

        extract_translation(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{body_string_contains, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn google_response(segments: &[&str]) -> Value {
        let segments: Vec<Value> = segments
            .iter()
            .map(|s| serde_json::json!([s, "source", null, null, 10]))
            .collect();
        serde_json::json!([segments, null, "en"])
    }

    fn translator(server: &MockServer) -> GoogleTranslator {
        GoogleTranslator::new(server.uri(), "auto".to_string(), Some(Duration::from_secs(5)))
            .expect("client should build")
    }

    // ==================== Response Parsing Tests ====================

    #[test]
    fn test_extract_translation_joins_segments() {
        let body = google_response(&["Hola. ", "¿Cómo estás?"]);
        assert_eq!(extract_translation(&body).unwrap(), "Hola. ¿Cómo estás?");
    }

    #[test]
    fn test_extract_translation_missing_segments() {
        let err = extract_translation(&serde_json::json!({"unexpected": true})).unwrap_err();
        assert!(err.to_string().contains("missing segments"));
    }

    #[test]
    fn test_extract_translation_empty() {
        let err = extract_translation(&serde_json::json!([[]])).unwrap_err();
        assert!(err.to_string().contains("Empty translation"));
    }

    // ==================== HTTP Tests ====================

    #[tokio::test]
    async fn test_translate_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate_a/single"))
            .and(query_param("client", "gtx"))
            .and(query_param("sl", "auto"))
            .and(query_param("tl", "es"))
            .and(body_string_contains("q=Hello"))
            .respond_with(ResponseTemplate::new(200).set_body_json(google_response(&["Hola"])))
            .expect(1)
            .mount(&server)
            .await;

        let result = translator(&server)
            .translate("Hello", &Locale::from("es"))
            .await
            .expect("Should succeed");

        assert_eq!(result, "Hola");
    }

    #[tokio::test]
    async fn test_translate_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate_a/single"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
            .expect(1)
            .mount(&server)
            .await;

        let err = translator(&server)
            .translate("Hello", &Locale::from("es"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("429"));
    }

    #[tokio::test]
    async fn test_translate_malformed_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate_a/single"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
            .mount(&server)
            .await;

        let err = translator(&server)
            .translate("Hello", &Locale::from("es"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Failed to parse"));
    }

    #[tokio::test]
    async fn test_blank_text_skips_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let result = translator(&server)
            .translate("  ", &Locale::from("es"))
            .await
            .expect("Should succeed");

        assert_eq!(result, "  ");
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate_a/single"))
            .respond_with(ResponseTemplate::new(200).set_body_json(google_response(&["Hallo"])))
            .expect(1)
            .mount(&server)
            .await;

        let translator = GoogleTranslator::new(format!("{}/", server.uri()), "en".to_string(), None)
            .expect("client should build");
        let result = translator.translate("Hey", &Locale::from("de")).await.unwrap();

        assert_eq!(result, "Hallo");
    }
}

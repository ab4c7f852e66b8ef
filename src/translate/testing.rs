//! Scripted provider shared by unit tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use super::interface::{Locale, Translator};

/// Answers from a fixed table; texts not in the table translate to `<locale>:<text>`
#[derive(Default)]
pub struct ScriptedTranslator {
    replies: HashMap<String, Result<String, String>>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, text: &str, translated: &str) -> Self {
        self.replies
            .insert(text.to_string(), Ok(translated.to_string()));
        self
    }

    pub fn fail(mut self, text: &str, message: &str) -> Self {
        self.replies.insert(text.to_string(), Err(message.to_string()));
        self
    }

    pub fn delay(mut self, text: &str, delay: Duration) -> Self {
        self.delays.insert(text.to_string(), delay);
        self
    }

    /// Texts received, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Translator for ScriptedTranslator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn translate(&self, text: &str, locale: &Locale) -> Result<String, anyhow::Error> {
        self.calls.lock().unwrap().push(text.to_string());
        if let Some(delay) = self.delays.get(text) {
            tokio::time::sleep(*delay).await;
        }
        match self.replies.get(text) {
            Some(Ok(translated)) => Ok(translated.clone()),
            Some(Err(message)) => Err(anyhow::anyhow!(message.clone())),
            None => Ok(format!("{}:{}", locale, text)),
        }
    }
}

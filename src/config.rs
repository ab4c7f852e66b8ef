use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::orchestrator::MAX_TEXT_LENGTH;

/// Files tried, in order, when `CONFIG_PATH` is not set
const DEFAULT_CONFIG_PATHS: [&str; 3] = ["conf.yaml", "conf.yml", "conf.json"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub translator: TranslatorConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Provider name understood by `TranslatorFactory`
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_source_language")]
    pub source_language: String,
    /// Per-call limit in seconds, 0 disables
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Provider calls in flight per batch request
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Character ceiling for single-text requests (inclusive)
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,
    /// Request body ceiling in bytes, 0 disables
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_provider() -> String {
    "google".to_string()
}

fn default_base_url() -> String {
    "https://translate.googleapis.com".to_string()
}

fn default_source_language() -> String {
    "auto".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_concurrency() -> usize {
    8
}

fn default_max_text_length() -> usize {
    MAX_TEXT_LENGTH
}

fn default_max_body_bytes() -> usize {
    64 * 1024 * 1024
}

fn default_log_filter() -> String {
    "translation_gateway=info,tower_http=info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: default_base_url(),
            source_language: default_source_language(),
            timeout_secs: default_timeout_secs(),
            max_concurrency: default_max_concurrency(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_text_length: default_max_text_length(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl TranslatorConfig {
    pub fn timeout(&self) -> Option<Duration> {
        match self.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

impl Config {
    /// Load configuration from a YAML or JSON file
    ///
    /// `${VAR}` placeholders are replaced with environment variables before
    /// parsing. Files ending in `.json` are parsed as JSON, everything else as
    /// YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = read_text_file(path)?;
        let content = substitute_env_vars(&content)?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let config: Config = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON config: {}", path.display()))?
        } else if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Invalid YAML config: {}", path.display()))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Find and load the first config file that exists
    ///
    /// Tries `$CONFIG_PATH` first, then the default file names in the working
    /// directory. Falls back to built-in defaults when none exists.
    ///
    /// # Returns
    /// The config and the path it came from, if any
    pub fn discover() -> Result<(Self, Option<PathBuf>)> {
        let candidates: Vec<PathBuf> = std::env::var("CONFIG_PATH")
            .ok()
            .into_iter()
            .map(PathBuf::from)
            .chain(DEFAULT_CONFIG_PATHS.iter().map(PathBuf::from))
            .collect();

        for path in candidates {
            if path.exists() {
                let config = Self::load(&path)?;
                return Ok((config, Some(path)));
            }
            tracing::debug!("Config file not found: {}", path.display());
        }

        Ok((Self::default(), None))
    }

    pub fn validate(&self) -> Result<()> {
        if self.translator.max_concurrency == 0 {
            anyhow::bail!("translator.max_concurrency must be at least 1");
        }
        if self.limits.max_text_length == 0 {
            anyhow::bail!("limits.max_text_length must be at least 1");
        }
        Ok(())
    }
}

/// Read a UTF-8 file, dropping a byte order mark if present
fn read_text_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    let (content, _, had_errors) = encoding_rs::UTF_8.decode(&bytes);
    if had_errors {
        anyhow::bail!("Configuration file is not valid UTF-8: {}", path.display());
    }
    Ok(content.into_owned())
}

/// Replace `${VAR_NAME}` with the variable's value, leaving unset ones as-is
fn substitute_env_vars(content: &str) -> Result<String> {
    let pattern = Regex::new(r"\$\{(\w+)\}")?;
    let replaced = pattern.replace_all(content, |caps: &regex::Captures| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    });
    Ok(replaced.into_owned())
}

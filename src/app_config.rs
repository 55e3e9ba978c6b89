use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs;
use std::path::{Path, PathBuf};

use crate::script::Script;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Directory of source-language binary catalogs
    pub source_dir: PathBuf,

    /// Directory holding the previous-translations snapshot, keyed by filename
    #[serde(default)]
    pub previous_dir: PathBuf,

    /// Directory receiving the translated binary catalogs
    pub output_dir: PathBuf,

    /// Directory receiving audit review copies
    #[serde(default = "default_review_dir")]
    pub review_dir: PathBuf,

    /// Source language code (ISO)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Entry skip rules
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Audit tool config
    #[serde(default)]
    pub audit: AuditConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Primary provider (DeepL) settings
    #[serde(default)]
    pub deepl: ProviderConfig,

    /// Secondary provider (generic HTTP endpoint) settings
    #[serde(default)]
    pub fallback: ProviderConfig,

    /// Attempts per chunk before emitting an error marker
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Maximum characters per provider call
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,

    /// Base backoff between retries (milliseconds), multiplied by the attempt number
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            deepl: ProviderConfig::default(),
            fallback: ProviderConfig::default(),
            max_retries: default_max_retries(),
            max_chunk_chars: default_max_chunk_chars(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

/// Credentials and endpoint for one provider
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ProviderConfig {
    /// API key
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service URL, empty for the provider's public default
    #[serde(default = "String::new")]
    pub endpoint: String,
}

/// Rules deciding which entries are translated
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PolicyConfig {
    /// Sentinel marking a deliberately empty string
    #[serde(default = "default_empty_marker")]
    pub empty_marker: String,

    /// Substrings exempting identifier-like values from translation
    #[serde(default = "default_exemptions")]
    pub exemptions: Vec<String>,

    /// Script of text still awaiting conversion
    #[serde(default)]
    pub source_script: Script,

    /// Script of text already translated
    #[serde(default = "default_target_script")]
    pub target_script: Script,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            empty_marker: default_empty_marker(),
            exemptions: default_exemptions(),
            source_script: Script::default(),
            target_script: default_target_script(),
        }
    }
}

/// Audit tool configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AuditConfig {
    /// Substrings whose presence in a translation flags the catalog for review
    #[serde(default)]
    pub suspect_strings: Vec<String>,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_review_dir() -> PathBuf {
    PathBuf::from("review")
}

fn default_source_language() -> String {
    "ru".to_string()
}

fn default_target_language() -> String {
    "zh".to_string()
}

fn default_max_retries() -> usize {
    5
}

fn default_max_chunk_chars() -> usize {
    999
}

fn default_retry_backoff_ms() -> u64 {
    1000 // 1 second base backoff, scaled by the attempt number
}

fn default_empty_marker() -> String {
    "?empty?".to_string()
}

fn default_exemptions() -> Vec<String> {
    vec!["Obj. ".to_string()]
}

fn default_target_script() -> Script {
    Script::Cjk
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Write the configuration as pretty JSON, creating a template to fill in
    pub fn write_default<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Config::default();
        let content = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config")?;
        fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate languages
        let _source_name = crate::language_utils::get_language_name(&self.source_language)?;
        let _target_name = crate::language_utils::get_language_name(&self.target_language)?;

        if self.source_dir.as_os_str().is_empty() {
            return Err(anyhow!("source_dir must be set"));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(anyhow!("output_dir must be set"));
        }

        if self.policy.source_script == self.policy.target_script {
            return Err(anyhow!(
                "source_script and target_script must differ, both are {}",
                self.policy.source_script
            ));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_dir: PathBuf::from("catalogs/source"),
            previous_dir: PathBuf::from("catalogs/previous"),
            output_dir: PathBuf::from("catalogs/output"),
            review_dir: default_review_dir(),
            source_language: default_source_language(),
            target_language: default_target_language(),
            translation: TranslationConfig::default(),
            policy: PolicyConfig::default(),
            audit: AuditConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

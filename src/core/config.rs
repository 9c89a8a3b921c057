//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the translation pipeline.
///
/// Built once at startup and passed into every component; nothing reads
/// configuration from ambient globals after this point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    pub api_endpoint: String,
    pub api_key: String,
    pub target_language: String,
    pub source_language: String,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub translation_delay_ms: u64,
    pub max_chunk_len: usize,
    pub timeout_ms: u64,
    pub file_extensions: Vec<String>,
    pub ignore_dirs: Vec<String>,
    pub ignore_files: Vec<String>,
    pub glossary_path: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_endpoint: std::env::var("TRANSLATE_API_ENDPOINT")
                .unwrap_or_else(|_| "https://libretranslate.com/translate".to_string()),
            api_key: std::env::var("TRANSLATE_API_KEY").unwrap_or_default(),
            target_language: "zh".to_string(),
            source_language: "en".to_string(),
            max_retries: 3,
            retry_delay_ms: 2000,
            translation_delay_ms: 500,
            max_chunk_len: 5000,
            timeout_ms: 30000,
            file_extensions: vec![".txt".to_string(), ".md".to_string()],
            ignore_dirs: vec![
                "node_modules".to_string(),
                ".git".to_string(),
                ".github".to_string(),
                "scripts".to_string(),
                "assets".to_string(),
                "target".to_string(),
            ],
            ignore_files: vec![
                "package.json".to_string(),
                "package-lock.json".to_string(),
                "glossary.json".to_string(),
                ".gitignore".to_string(),
                "Cargo.toml".to_string(),
                "Cargo.lock".to_string(),
            ],
            glossary_path: "glossary.json".to_string(),
        }
    }
}

impl TranslatorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Ok(lang) = std::env::var("TARGET_LANGUAGE") {
            config.target_language = lang;
        }

        if let Ok(lang) = std::env::var("SOURCE_LANGUAGE") {
            config.source_language = lang;
        }

        if let Ok(value) = std::env::var("MAX_RETRIES") {
            config.max_retries = value.parse::<u32>()?;
        }

        if let Ok(value) = std::env::var("RETRY_DELAY_MS") {
            config.retry_delay_ms = value.parse::<u64>()?;
        }

        if let Ok(value) = std::env::var("TRANSLATION_DELAY_MS") {
            config.translation_delay_ms = value.parse::<u64>()?;
        }

        if let Ok(value) = std::env::var("MAX_CHUNK_LEN") {
            config.max_chunk_len = value.parse::<usize>()?;
        }

        if let Ok(value) = std::env::var("REQUEST_TIMEOUT_MS") {
            config.timeout_ms = value.parse::<u64>()?;
        }

        Ok(config)
    }

    /// Load from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_endpoint.is_empty() {
            return Err(anyhow::anyhow!("API endpoint is required"));
        }

        if self.target_language.is_empty() {
            return Err(anyhow::anyhow!("Target language is required"));
        }

        if self.max_chunk_len == 0 {
            return Err(anyhow::anyhow!("max_chunk_len must be greater than 0"));
        }

        Ok(())
    }

    /// True when this extension (with leading dot) is translated as text
    pub fn is_text_extension(&self, ext: &str) -> bool {
        self.file_extensions.iter().any(|e| e == ext)
    }
}

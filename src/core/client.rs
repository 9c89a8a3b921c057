//! Pluggable translation provider and retrying gateway

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::core::config::TranslatorConfig;
use crate::core::errors::{Result, TranslationError};
use crate::core::models::{TranslationRequest, TranslationResult};

/// A translation capability: one request in, one translated string out.
///
/// The pipeline assumes nothing else about the provider; anything that can
/// answer `translate` can sit behind the gateway.
#[async_trait]
pub trait TranslateProvider: Send + Sync + std::fmt::Debug {
    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult>;
}

/// HTTP provider speaking the LibreTranslate wire shape
#[derive(Debug, Clone)]
pub struct HttpProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpProvider {
    /// Build the provider with timeouts and pooling from `config`
    pub fn new(config: &TranslatorConfig) -> Result<Self> {
        let timeout = Duration::from_millis(config.timeout_ms);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.api_endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl TranslateProvider for HttpProvider {
    async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult> {
        let mut body = serde_json::json!({
            "q": request.text,
            "source": request
                .source_lang
                .clone()
                .unwrap_or_else(|| "auto".to_string()),
            "target": request.target_lang,
            "format": "text",
        });

        if !self.api_key.is_empty() {
            body["api_key"] = serde_json::json!(self.api_key);
        }

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranslationError::TimeoutError
                } else {
                    TranslationError::NetworkError {
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();

        if status.is_success() {
            let json: serde_json::Value =
                response
                    .json()
                    .await
                    .map_err(|e| TranslationError::InvalidResponseError {
                        message: e.to_string(),
                    })?;

            let translation = json["translatedText"]
                .as_str()
                .ok_or_else(|| TranslationError::InvalidResponseError {
                    message: "No translatedText in response".to_string(),
                })?
                .to_string();

            let detected_source_lang = json["detectedLanguage"]["language"]
                .as_str()
                .map(|s| s.to_string());

            Ok(TranslationResult {
                translation,
                detected_source_lang,
            })
        } else {
            let status_code = status.as_u16();
            let error_text = response.text().await.unwrap_or_default();

            Err(TranslationError::ProviderError {
                status: status_code,
                message: error_text,
            })
        }
    }
}

/// Gateway adding bounded retry and rate-limit pauses on top of a provider
#[derive(Debug, Clone)]
pub struct Translator {
    provider: Arc<dyn TranslateProvider>,
    config: Arc<TranslatorConfig>,
}

impl Translator {
    pub fn new(config: TranslatorConfig, provider: Arc<dyn TranslateProvider>) -> Self {
        Self {
            provider,
            config: Arc::new(config),
        }
    }

    /// Gateway backed by the HTTP provider described in `config`
    pub fn http(config: TranslatorConfig) -> Result<Self> {
        config.validate()?;
        let provider = HttpProvider::new(&config)?;
        Ok(Self::new(config, Arc::new(provider)))
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Translate one chunk with bounded retry.
    ///
    /// Attempt `k` (1-based) waits `retry_delay_ms * k` before retrying, a
    /// strictly increasing backoff. Once the attempt budget is spent the
    /// last provider error is wrapped in `RetriesExhausted` and propagated;
    /// the failure is terminal for the caller's document.
    pub async fn translate_chunk(&self, text: &str) -> Result<String> {
        let request = TranslationRequest::new(text, self.config.target_language.clone())
            .with_source_lang(self.config.source_language.clone());

        let mut last_error: Option<TranslationError> = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let delay = Duration::from_millis(self.config.retry_delay_ms * attempt as u64);
                debug!("Retry attempt {} after {:?}", attempt, delay);
                sleep(delay).await;
            }

            match self.provider.translate(&request).await {
                Ok(result) => {
                    if attempt > 0 {
                        info!("Translation succeeded after {} retries", attempt);
                    }
                    return Ok(result.translation);
                }
                Err(e) => {
                    warn!("Translation attempt {} failed: {}", attempt + 1, e);
                    last_error = Some(e);
                }
            }
        }

        Err(TranslationError::RetriesExhausted {
            attempts: self.config.max_retries + 1,
            message: last_error.map(|e| e.to_string()).unwrap_or_default(),
        })
    }

    /// Cooperative pause between chunks and between files
    pub async fn pause(&self) {
        sleep(Duration::from_millis(self.config.translation_delay_ms)).await;
    }
}

// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for OpenAI-compatible chat-completions APIs.
//!
//! Provides [`OpenAiCompatibleClient`] which handles request construction,
//! bearer authentication, and a single retry on transient errors.

use std::time::Duration;

use async_trait::async_trait;
use autodidact_config::model::ProviderConfig;
use autodidact_core::{AutodidactError, KnowledgeProvider};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, ChatMessage, ChatRequest, ChatResponse};

/// A knowledge provider backed by a `/chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleClient {
    client: reqwest::Client,
    name: String,
    model: String,
    endpoint: String,
    max_tokens: u32,
    temperature: f32,
    max_retries: u32,
    retry_delay: Duration,
}

impl OpenAiCompatibleClient {
    /// Build a client from provider configuration.
    ///
    /// The API key is optional; local servers such as Ollama accept
    /// unauthenticated requests.
    pub fn new(config: &ProviderConfig) -> Result<Self, AutodidactError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = config.resolve_api_key() {
            let value = HeaderValue::from_str(&format!("Bearer {key}")).map_err(|e| {
                AutodidactError::Config(format!(
                    "invalid API key for provider `{}`: {e}",
                    config.name
                ))
            })?;
            headers.insert(AUTHORIZATION, value);
        } else {
            debug!(provider = %config.name, "no API key configured, sending unauthenticated requests");
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AutodidactError::Provider {
                provider: config.name.clone(),
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            name: config.name.clone(),
            model: config.model.clone(),
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            max_retries: 1,
            retry_delay: Duration::from_secs(1),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Overrides the pause before a retry.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    fn provider_err(&self, message: String, source: Option<reqwest::Error>) -> AutodidactError {
        AutodidactError::Provider {
            provider: self.name.clone(),
            message,
            source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }
    }

    /// Sends one completion request and returns the first choice's text.
    ///
    /// On transient errors (429, 500, 502, 503), retries once.
    pub async fn complete(&self, request: &ChatRequest) -> Result<String, AutodidactError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(provider = %self.name, attempt, "retrying completion request after transient error");
                tokio::time::sleep(self.retry_delay).await;
            }

            let response = self
                .client
                .post(&self.endpoint)
                .json(request)
                .send()
                .await
                .map_err(|e| self.provider_err(format!("HTTP request failed: {e}"), Some(e)))?;

            let status = response.status();
            debug!(provider = %self.name, status = %status, attempt, "completion response received");

            if status.is_success() {
                let body = response.text().await.map_err(|e| {
                    self.provider_err(format!("failed to read response body: {e}"), Some(e))
                })?;
                let parsed: ChatResponse = serde_json::from_str(&body).map_err(|e| {
                    AutodidactError::Provider {
                        provider: self.name.clone(),
                        message: format!("failed to parse API response: {e}"),
                        source: Some(Box::new(e)),
                    }
                })?;
                return match parsed.first_text().map(str::trim) {
                    Some(text) if !text.is_empty() => Ok(text.to_string()),
                    _ => Err(self.provider_err("response contained no text".into(), None)),
                };
            }

            let body = response.text().await.unwrap_or_default();
            if is_transient_error(status) && attempt < self.max_retries {
                warn!(provider = %self.name, status = %status, body = %body, "transient error, will retry");
                last_error = Some(self.provider_err(format!("API returned {status}: {body}"), None));
                continue;
            }

            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => match api_err.error.type_ {
                    Some(kind) => format!("API error ({kind}): {}", api_err.error.message),
                    None => format!("API error ({status}): {}", api_err.error.message),
                },
                Err(_) => format!("API returned {status}: {body}"),
            };
            return Err(self.provider_err(message, None));
        }

        Err(last_error
            .unwrap_or_else(|| self.provider_err("completion request failed after retries".into(), None)))
    }
}

#[async_trait]
impl KnowledgeProvider for OpenAiCompatibleClient {
    fn name(&self) -> &str {
        &self.name
    }

    async fn ask(&self, topic: &str, instruction: &str) -> Result<String, AutodidactError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(instruction), ChatMessage::user(topic)],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };
        self.complete(&request).await
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 502 | 503)
}

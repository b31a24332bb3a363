//! Model endpoint clients.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::{GenerationError, Result};

/// Default per-call timeout for generation requests.
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(120);

/// Trait for language-model endpoints.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Name of the model being invoked.
    fn model_name(&self) -> &str;

    /// Run one generation call and return the raw model output.
    ///
    /// A single call: retry is the caller's concern.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Model client for an Ollama-compatible endpoint.
pub struct OllamaClient {
    /// Endpoint base URL, e.g. `http://localhost:11434`.
    base_url: String,

    /// HTTP client.
    client: reqwest::Client,

    /// Model to invoke.
    model: String,

    /// Per-call timeout.
    timeout: Duration,
}

impl OllamaClient {
    /// Create a new client for the given base URL and model.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            client: reqwest::Client::new(),
            model: model.into(),
            timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }

    /// Set the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl ModelClient for OllamaClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);
        debug!("Sending generation request to {url} with model {}", self.model);

        let body = serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
        });

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Transport {
                message: format!("status {status}: {body}"),
            });
        }

        let result: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        debug!("Model returned {} chars", result.response.len());
        Ok(result.response)
    }
}

/// Ollama generate-endpoint response format.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

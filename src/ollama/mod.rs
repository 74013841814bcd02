//! HTTP client for a local Ollama-compatible inference server.
//!
//! Single point of contact with the model service: one-shot completions,
//! a reachability probe, and model enumeration. Completions are
//! non-streaming and not cancellable once issued.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default Ollama server URL.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Model used when the user has never selected one.
pub const DEFAULT_MODEL: &str = "llama3.2";

#[derive(Debug, Error)]
pub enum OllamaError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Ollama server not reachable at {0}. Start it with: ollama serve")]
    ServerNotRunning(String),

    #[error("Ollama API error from {url}: {status}: {message}")]
    Api {
        url: String,
        status: u16,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, OllamaError>;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
    #[allow(dead_code)]
    done: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    models: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    name: String,
}

/// Client for the local inference server.
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Set the base URL, dropping any trailing slash.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the model identifier to use for completions.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a prompt and return the full completion text.
    ///
    /// No timeout beyond the transport default: local models can take
    /// arbitrarily long, and callers await the single-shot result.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    OllamaError::ServerNotRunning(self.base_url.clone())
                } else {
                    OllamaError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(OllamaError::Api {
                url,
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response.json().await?;
        if let Some(error) = body.error {
            return Err(OllamaError::Api {
                url,
                status: status.as_u16(),
                message: error,
            });
        }

        Ok(body.response)
    }

    /// Probe the server. Never errors; any failure is reported as `false`.
    pub async fn check_availability(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        match self
            .client
            .get(&url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                log::debug!("Availability probe failed for {}: {}", self.base_url, e);
                false
            }
        }
    }

    /// List installed model names. Falls back to a one-element list with
    /// the configured model when the server cannot be queried.
    pub async fn list_models(&self) -> Vec<String> {
        let url = format!("{}/api/tags", self.base_url);
        let fallback = vec![self.model.clone()];

        let response = match self
            .client
            .get(&url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => {
                log::warn!("Model listing from {} returned {}", url, r.status());
                return fallback;
            }
            Err(e) => {
                log::warn!("Model listing from {} failed: {}", url, e);
                return fallback;
            }
        };

        match response.json::<TagsResponse>().await {
            Ok(tags) => {
                let names: Vec<String> = tags.models.into_iter().map(|m| m.name).collect();
                if names.is_empty() {
                    fallback
                } else {
                    names
                }
            }
            Err(e) => {
                log::warn!("Model listing from {} returned malformed JSON: {}", url, e);
                fallback
            }
        }
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_client() {
        let client = OllamaClient::new();
        assert_eq!(client.base_url(), DEFAULT_OLLAMA_URL);
        assert_eq!(client.model(), DEFAULT_MODEL);
    }

    #[test]
    fn test_builder_pattern() {
        let client = OllamaClient::new()
            .with_url("http://myserver:11434/")
            .with_model("mistral:7b");
        assert_eq!(client.base_url(), "http://myserver:11434");
        assert_eq!(client.model(), "mistral:7b");
    }

    #[tokio::test]
    async fn test_check_availability_unreachable() {
        // Port 9 (discard) is not listening in the test environment.
        let client = OllamaClient::new().with_url("http://127.0.0.1:9");
        assert!(!client.check_availability().await);
    }

    #[tokio::test]
    async fn test_list_models_unreachable_falls_back() {
        let client = OllamaClient::new()
            .with_url("http://127.0.0.1:9")
            .with_model("mistral:7b");
        assert_eq!(client.list_models().await, vec!["mistral:7b".to_string()]);
    }

    #[tokio::test]
    async fn test_complete_unreachable_names_endpoint() {
        let client = OllamaClient::new().with_url("http://127.0.0.1:9");
        let err = client.complete("hello").await.unwrap_err();
        assert!(err.to_string().contains("127.0.0.1:9"));
    }
}

//! Ollama Provider Implementation
//!
//! Provides integration with Ollama's local LLM API. Local models need no
//! credential.
//!
//! # Examples
//!
//! ```no_run
//! use minutes_llm::OllamaProvider;
//!
//! let provider = OllamaProvider::new("http://localhost:11434", "llama3.2");
//! ```

use crate::{parse_envelope, send_request, LlmError};
use minutes_domain::traits::{GenerationParams, LlmProvider};
use serde::{Deserialize, Serialize};

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default local model
pub const DEFAULT_MODEL: &str = "llama3.2";

/// Ollama API provider for local LLM inference
pub struct OllamaProvider {
    endpoint: String,
    model: String,
    client: reqwest::Client,
}

/// Request body for Ollama generate API
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

/// Response from Ollama generate API
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: Model to use (e.g., "llama3.2", "mistral")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a new Ollama provider against `http://localhost:11434`
    pub fn default_endpoint(model: impl Into<String>) -> Self {
        Self::new(DEFAULT_ENDPOINT, model)
    }
}

impl LlmProvider for OllamaProvider {
    type Error = LlmError;

    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str, params: &GenerationParams) -> Result<String, Self::Error> {
        let body = OllamaGenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: OllamaOptions {
                temperature: params.temperature,
                num_predict: params.max_tokens,
            },
        };

        tracing::debug!(model = %self.model, endpoint = %self.endpoint, "Sending Ollama request");
        let request = self
            .client
            .post(format!("{}/api/generate", self.endpoint))
            .json(&body);
        let text = send_request(request).await?;
        let response: OllamaGenerateResponse = parse_envelope(&text)?;
        Ok(response.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_provider_creation() {
        let provider = OllamaProvider::new("http://localhost:11434/", "llama3.2");
        assert_eq!(provider.endpoint, "http://localhost:11434");
        assert_eq!(provider.model(), "llama3.2");
    }

    #[test]
    fn test_default_endpoint() {
        let provider = OllamaProvider::default_endpoint("mistral");
        assert_eq!(provider.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(provider.name(), "ollama");
    }

    #[test]
    fn test_request_disables_streaming() {
        let body = OllamaGenerateRequest {
            model: "llama3.2",
            prompt: "hi",
            stream: false,
            options: OllamaOptions {
                temperature: 0.1,
                num_predict: 1024,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["num_predict"], 1024);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_communication_error() {
        // Port 1 is reserved and refuses connections
        let provider = OllamaProvider::new("http://127.0.0.1:1", "llama3.2");
        let err = provider.complete("hi", &GenerationParams::default()).await.unwrap_err();
        assert!(matches!(err, LlmError::Communication(_)));
    }
}

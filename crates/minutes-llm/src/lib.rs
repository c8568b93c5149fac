//! Minutes LLM Provider Layer
//!
//! Pluggable LLM provider implementations.
//!
//! # Architecture
//!
//! This crate provides implementations of the `LlmProvider` trait from
//! `minutes-domain`. Every vendor speaks a different JSON envelope; each
//! adapter turns "one prompt in" into "one text completion out" and maps
//! failures onto [`LlmError`].
//!
//! # Providers
//!
//! - `GeminiProvider`: Google Generative Language API
//! - `OpenAiProvider`: OpenAI-compatible chat completions (OpenAI, Groq, ...)
//! - `AnthropicProvider`: Anthropic Messages API
//! - `OllamaProvider`: Local Ollama API
//! - `MockProvider`: Deterministic mock for testing
//!
//! # Examples
//!
//! ```
//! use minutes_llm::MockProvider;
//! use minutes_domain::traits::{GenerationParams, LlmProvider};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let provider = MockProvider::new("[]");
//! let text = provider.complete("prompt", &GenerationParams::default()).await.unwrap();
//! assert_eq!(text, "[]");
//! # }
//! ```

#![warn(missing_docs)]

pub mod anthropic;
pub mod factory;
pub mod gemini;
pub mod ollama;
pub mod openai;

use minutes_domain::traits::{GenerationParams, LlmProvider};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use anthropic::AnthropicProvider;
pub use factory::{build_provider, AnyProvider, ProviderConfig, ProviderKind};
pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

/// Errors that can occur during LLM operations
///
/// Only [`LlmError::InvalidResponse`] is soft: the provider answered with a
/// success status but the envelope did not have the expected shape.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    /// Missing credential or unusable provider settings; raised before any network call
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Provider answered with a non-success HTTP status
    #[error("Provider error (HTTP {status}): {body}")]
    Provider {
        /// HTTP status code
        status: u16,
        /// Response body as returned by the provider
        body: String,
    },

    /// Network or transport failure before a response arrived
    #[error("Communication error: {0}")]
    Communication(String),

    /// Success status but the response envelope is missing expected fields
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl LlmError {
    /// Whether this failure should degrade to an empty result instead of failing the call
    pub fn is_soft(&self) -> bool {
        matches!(self, LlmError::InvalidResponse(_))
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        LlmError::Communication(format!("Request failed: {}", e))
    }
}

/// Return the credential or fail before touching the network
pub(crate) fn require_api_key<'a>(
    api_key: &'a Option<String>,
    provider: &str,
) -> Result<&'a str, LlmError> {
    match api_key.as_deref().map(str::trim) {
        Some(key) if !key.is_empty() => Ok(key),
        _ => Err(LlmError::Configuration(format!(
            "{} API key is not configured",
            provider
        ))),
    }
}

/// Send a prepared request and return the body of a successful response
///
/// Transport failures become [`LlmError::Communication`]; non-success
/// statuses become [`LlmError::Provider`] carrying the status and body.
pub(crate) async fn send_request(request: reqwest::RequestBuilder) -> Result<String, LlmError> {
    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(LlmError::Provider {
            status: status.as_u16(),
            body,
        });
    }

    response
        .text()
        .await
        .map_err(|e| LlmError::Communication(format!("Failed to read response body: {}", e)))
}

/// Deserialize a provider envelope, treating any mismatch as a soft failure
pub(crate) fn parse_envelope<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, LlmError> {
    serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("Unexpected response envelope: {}", e)))
}

/// Mock LLM provider for deterministic testing
///
/// This provider returns pre-configured results without making any network calls.
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_result: Result<String, LlmError>,
    responses: Arc<Mutex<HashMap<String, Result<String, LlmError>>>>,
    call_count: Arc<Mutex<usize>>,
    last_prompt: Arc<Mutex<Option<String>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_result(Ok(response.into()))
    }

    /// Create a MockProvider that fails every call with the given error
    pub fn failing(error: LlmError) -> Self {
        Self::with_result(Err(error))
    }

    fn with_result(default_result: Result<String, LlmError>) -> Self {
        Self {
            default_result,
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_prompt: Arc::new(Mutex::new(None)),
        }
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.insert(prompt.into(), Ok(response.into()));
        }
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>, error: LlmError) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.insert(prompt.into(), Err(error));
        }
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        self.call_count.lock().map(|c| *c).unwrap_or(0)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        if let Ok(mut count) = self.call_count.lock() {
            *count = 0;
        }
    }

    /// The most recent prompt passed to complete
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().ok().and_then(|p| p.clone())
    }

    fn respond(&self, prompt: &str) -> Result<String, LlmError> {
        if let Ok(mut count) = self.call_count.lock() {
            *count += 1;
        }
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(prompt.to_string());
        }

        let responses = self
            .responses
            .lock()
            .map_err(|e| LlmError::Communication(format!("Mock state poisoned: {}", e)))?;
        match responses.get(prompt) {
            Some(result) => result.clone(),
            None => self.default_result.clone(),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("[]")
    }
}

impl LlmProvider for MockProvider {
    type Error = LlmError;

    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock"
    }

    async fn complete(&self, prompt: &str, _params: &GenerationParams) -> Result<String, Self::Error> {
        self.respond(prompt)
    }
}

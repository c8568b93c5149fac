//! Provider selection from configuration
//!
//! The `[llm]` section of the server config deserializes into
//! [`ProviderConfig`]; [`build_provider`] turns it into an [`AnyProvider`].
//! Secrets are resolved once, here, and handed to the adapter.

use crate::{
    anthropic, gemini, ollama, openai, AnthropicProvider, GeminiProvider, LlmError, MockProvider,
    OllamaProvider, OpenAiProvider,
};
use minutes_domain::traits::{GenerationParams, LlmProvider};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which vendor adapter to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google Gemini
    #[default]
    Gemini,
    /// OpenAI-compatible chat completions
    OpenAi,
    /// Anthropic Messages API
    Anthropic,
    /// Local Ollama
    Ollama,
    /// Canned responses, no network
    Mock,
}

impl ProviderKind {
    /// Environment variable consulted when no explicit key is configured
    pub fn default_api_key_env(&self) -> Option<&'static str> {
        match self {
            ProviderKind::Gemini => Some("GEMINI_API_KEY"),
            ProviderKind::OpenAi => Some("OPENAI_API_KEY"),
            ProviderKind::Anthropic => Some("ANTHROPIC_API_KEY"),
            ProviderKind::Ollama | ProviderKind::Mock => None,
        }
    }

    fn default_endpoint(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => gemini::DEFAULT_ENDPOINT,
            ProviderKind::OpenAi => openai::DEFAULT_ENDPOINT,
            ProviderKind::Anthropic => anthropic::DEFAULT_ENDPOINT,
            ProviderKind::Ollama => ollama::DEFAULT_ENDPOINT,
            ProviderKind::Mock => "",
        }
    }

    fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => gemini::DEFAULT_MODEL,
            ProviderKind::OpenAi => openai::DEFAULT_MODEL,
            ProviderKind::Anthropic => anthropic::DEFAULT_MODEL,
            ProviderKind::Ollama => ollama::DEFAULT_MODEL,
            ProviderKind::Mock => "mock",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Ollama => "ollama",
            ProviderKind::Mock => "mock",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ProviderKind {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "openai" => Ok(ProviderKind::OpenAi),
            "anthropic" => Ok(ProviderKind::Anthropic),
            "ollama" => Ok(ProviderKind::Ollama),
            "mock" => Ok(ProviderKind::Mock),
            other => Err(LlmError::Configuration(format!("Unknown provider '{}'", other))),
        }
    }
}

/// Provider settings as read from the `[llm]` config section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Adapter to use
    #[serde(default)]
    pub provider: ProviderKind,

    /// Model name; the adapter's default when omitted
    #[serde(default)]
    pub model: Option<String>,

    /// API base URL; the vendor's public endpoint when omitted
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Explicit API key. Prefer `api_key_env` so keys stay out of files.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Environment variable holding the API key
    #[serde(default)]
    pub api_key_env: Option<String>,

    /// Fixed completion text for the mock provider
    #[serde(default)]
    pub mock_response: Option<String>,
}

impl ProviderConfig {
    /// Config for a provider with every other field defaulted
    pub fn for_provider(provider: ProviderKind) -> Self {
        Self {
            provider,
            ..Self::default()
        }
    }

    /// Model name after defaults are applied
    pub fn effective_model(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| self.provider.default_model().to_string())
    }

    /// Endpoint after defaults are applied
    pub fn effective_endpoint(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| self.provider.default_endpoint().to_string())
    }

    /// Explicit key first, then the configured or default environment variable
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(key) = self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
            return Some(key.to_string());
        }

        let var = self
            .api_key_env
            .as_deref()
            .or_else(|| self.provider.default_api_key_env())?;
        std::env::var(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Reject settings no adapter can work with
    pub fn validate(&self) -> Result<(), LlmError> {
        if let Some(model) = &self.model {
            if model.trim().is_empty() {
                return Err(LlmError::Configuration("model name cannot be empty".to_string()));
            }
        }
        if let Some(endpoint) = &self.endpoint {
            if endpoint.trim().is_empty() {
                return Err(LlmError::Configuration("endpoint cannot be empty".to_string()));
            }
        }
        Ok(())
    }
}

/// Any configured provider
///
/// `LlmProvider` uses `impl Future` returns, so trait objects are not
/// available; this enum is the runtime-selected provider instead.
pub enum AnyProvider {
    /// Google Gemini
    Gemini(GeminiProvider),
    /// OpenAI-compatible chat
    OpenAi(OpenAiProvider),
    /// Anthropic Messages
    Anthropic(AnthropicProvider),
    /// Local Ollama
    Ollama(OllamaProvider),
    /// Canned responses
    Mock(MockProvider),
}

impl From<MockProvider> for AnyProvider {
    fn from(provider: MockProvider) -> Self {
        AnyProvider::Mock(provider)
    }
}

impl LlmProvider for AnyProvider {
    type Error = LlmError;

    fn name(&self) -> &str {
        match self {
            AnyProvider::Gemini(p) => p.name(),
            AnyProvider::OpenAi(p) => p.name(),
            AnyProvider::Anthropic(p) => p.name(),
            AnyProvider::Ollama(p) => p.name(),
            AnyProvider::Mock(p) => p.name(),
        }
    }

    fn model(&self) -> &str {
        match self {
            AnyProvider::Gemini(p) => p.model(),
            AnyProvider::OpenAi(p) => p.model(),
            AnyProvider::Anthropic(p) => p.model(),
            AnyProvider::Ollama(p) => p.model(),
            AnyProvider::Mock(p) => p.model(),
        }
    }

    async fn complete(&self, prompt: &str, params: &GenerationParams) -> Result<String, Self::Error> {
        match self {
            AnyProvider::Gemini(p) => p.complete(prompt, params).await,
            AnyProvider::OpenAi(p) => p.complete(prompt, params).await,
            AnyProvider::Anthropic(p) => p.complete(prompt, params).await,
            AnyProvider::Ollama(p) => p.complete(prompt, params).await,
            AnyProvider::Mock(p) => p.complete(prompt, params).await,
        }
    }
}

/// Build the configured provider
///
/// A missing API key is not an error here: the server still starts, the
/// health check reports the LLM as unhealthy, and extraction fails with a
/// configuration error.
pub fn build_provider(config: &ProviderConfig) -> Result<AnyProvider, LlmError> {
    config.validate()?;

    let model = config.effective_model();
    let endpoint = config.effective_endpoint();
    let api_key = config.resolve_api_key();

    tracing::info!(
        provider = %config.provider,
        model = %model,
        api_key_present = api_key.is_some(),
        "Configured LLM provider"
    );

    let provider = match config.provider {
        ProviderKind::Gemini => AnyProvider::Gemini(GeminiProvider::new(endpoint, model, api_key)),
        ProviderKind::OpenAi => AnyProvider::OpenAi(OpenAiProvider::new(endpoint, model, api_key)),
        ProviderKind::Anthropic => {
            AnyProvider::Anthropic(AnthropicProvider::new(endpoint, model, api_key))
        }
        ProviderKind::Ollama => AnyProvider::Ollama(OllamaProvider::new(endpoint, model)),
        ProviderKind::Mock => AnyProvider::Mock(MockProvider::new(
            config.mock_response.clone().unwrap_or_else(|| "[]".to_string()),
        )),
    };

    Ok(provider)
}

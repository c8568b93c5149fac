//! Anthropic Messages API provider

use crate::{parse_envelope, require_api_key, send_request, LlmError};
use minutes_domain::traits::{GenerationParams, LlmProvider};
use serde::{Deserialize, Serialize};

/// Default Anthropic API base URL
pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com";

/// Default Claude model
pub const DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";

/// Value sent in the `anthropic-version` header
pub const API_VERSION: &str = "2023-06-01";

/// Anthropic Messages API provider
pub struct AnthropicProvider {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

impl AnthropicProvider {
    /// Create an Anthropic provider
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    /// First block of type `text`; tool-use and other blocks are skipped
    fn extract_text(body: &str) -> Result<String, LlmError> {
        let response: MessagesResponse = parse_envelope(body)?;
        response
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .ok_or_else(|| LlmError::InvalidResponse("No text block in Anthropic response".to_string()))
    }
}

impl LlmProvider for AnthropicProvider {
    type Error = LlmError;

    fn name(&self) -> &str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str, params: &GenerationParams) -> Result<String, Self::Error> {
        let key = require_api_key(&self.api_key, "Anthropic")?;

        let body = MessagesRequest {
            model: &self.model,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "Sending Anthropic request");
        let request = self
            .client
            .post(format!("{}/v1/messages", self.endpoint))
            .header("x-api-key", key)
            .header("anthropic-version", API_VERSION)
            .json(&body);
        let text = send_request(request).await?;
        Self::extract_text(&text)
    }
}

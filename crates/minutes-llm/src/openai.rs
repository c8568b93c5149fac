//! OpenAI-compatible chat completions provider
//!
//! Works with any service exposing `/chat/completions` with bearer auth
//! (OpenAI, Groq, OpenRouter, vLLM, ...).

use crate::{parse_envelope, require_api_key, send_request, LlmError};
use minutes_domain::traits::{GenerationParams, LlmProvider};
use serde::{Deserialize, Serialize};

/// Default OpenAI API base URL
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default chat model
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// OpenAI-compatible chat provider
pub struct OpenAiProvider {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create an OpenAI-compatible provider
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    fn extract_text(body: &str) -> Result<String, LlmError> {
        let response: ChatResponse = parse_envelope(body)?;
        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .ok_or_else(|| LlmError::InvalidResponse("No message content in first choice".to_string()))
    }
}

impl LlmProvider for OpenAiProvider {
    type Error = LlmError;

    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str, params: &GenerationParams) -> Result<String, Self::Error> {
        let key = require_api_key(&self.api_key, "OpenAI")?;

        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "Sending chat completion request");
        let request = self
            .client
            .post(format!("{}/chat/completions", self.endpoint))
            .bearer_auth(key)
            .json(&body);
        let text = send_request(request).await?;
        Self::extract_text(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text() {
        let body = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"[{\"task\":\"A\"}]"}}]}"#;
        assert_eq!(OpenAiProvider::extract_text(body).unwrap(), r#"[{"task":"A"}]"#);
    }

    #[test]
    fn test_extract_text_null_content_is_soft() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        assert!(OpenAiProvider::extract_text(body).unwrap_err().is_soft());
        assert!(OpenAiProvider::extract_text(r#"{"choices":[]}"#).unwrap_err().is_soft());
        assert!(OpenAiProvider::extract_text("not json").unwrap_err().is_soft());
    }

    #[test]
    fn test_request_shape() {
        let body = ChatRequest {
            model: "gpt-4o-mini",
            messages: vec![ChatMessage {
                role: "user",
                content: "hello",
            }],
            temperature: 0.1,
            max_tokens: 256,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 256);
    }

    #[tokio::test]
    async fn test_missing_key_is_configuration_error() {
        let provider = OpenAiProvider::new(DEFAULT_ENDPOINT, DEFAULT_MODEL, Some(String::new()));
        let err = provider.complete("hi", &GenerationParams::default()).await.unwrap_err();
        assert!(matches!(err, LlmError::Configuration(_)));
    }
}

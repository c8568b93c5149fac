//! Gemini Provider Implementation
//!
//! Talks to the Google Generative Language `generateContent` endpoint. The
//! API key travels as the `key` query parameter.

use crate::{parse_envelope, require_api_key, send_request, LlmError};
use minutes_domain::traits::{GenerationParams, LlmProvider};
use serde::{Deserialize, Serialize};

/// Default Gemini API base URL
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Default Gemini model
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

/// Google Gemini provider
pub struct GeminiProvider {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GeminiProvider {
    /// Create a Gemini provider
    ///
    /// A missing key is accepted here; `complete` reports it as a
    /// configuration error without touching the network.
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.endpoint, self.model)
    }

    /// Pull `candidates[0].content.parts[0].text` out of a response body
    fn extract_text(body: &str) -> Result<String, LlmError> {
        let response: GenerateContentResponse = parse_envelope(body)?;
        response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or_else(|| LlmError::InvalidResponse("No text in first Gemini candidate".to_string()))
    }
}

impl LlmProvider for GeminiProvider {
    type Error = LlmError;

    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str, params: &GenerationParams) -> Result<String, Self::Error> {
        let key = require_api_key(&self.api_key, "Gemini")?;

        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: params.temperature,
                max_output_tokens: params.max_tokens,
            },
        };

        tracing::debug!(model = %self.model, prompt_chars = prompt.len(), "Sending Gemini request");
        let request = self.client.post(self.url()).query(&[("key", key)]).json(&body);
        let text = send_request(request).await?;
        Self::extract_text(&text)
    }
}

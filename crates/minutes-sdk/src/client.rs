//! Minutes client implementation.

use crate::error::SdkError;
use minutes_domain::{
    ActionItem, ActionItemId, ExtractedItem, ItemFilter, ItemUpdate, NewActionItem, Transcript,
    TranscriptId,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Transcript saved together with its extracted items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedTranscript {
    /// The saved transcript
    pub transcript: Transcript,
    /// Items extracted and stored for it
    pub action_items: Vec<ActionItem>,
}

/// Health check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// The service itself
    pub backend: String,
    /// Database probe
    pub database: String,
    /// LLM probe
    pub llm: String,
}

impl HealthStatus {
    /// Whether every probe reported healthy
    pub fn is_healthy(&self) -> bool {
        [&self.backend, &self.database, &self.llm]
            .iter()
            .all(|s| s.as_str() == "healthy")
    }
}

#[derive(Serialize)]
struct ExtractRequest<'a> {
    transcript: &'a str,
}

#[derive(Deserialize)]
struct ExtractResponse {
    #[serde(rename = "actionItems")]
    action_items: Vec<ExtractedItem>,
}

#[derive(Serialize)]
struct CreateTranscriptRequest<'a> {
    content: &'a str,
}

/// Minutes SDK client
#[derive(Debug, Clone)]
pub struct MinutesClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl MinutesClient {
    /// Create a client for a server URL such as `http://localhost:3000`
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Server URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Extract action items without saving anything
    pub async fn extract(&self, transcript: &str) -> Result<Vec<ExtractedItem>, SdkError> {
        let request = self
            .http_client
            .post(self.url("/api/extract"))
            .json(&ExtractRequest { transcript });
        let response: ExtractResponse = send_json(request).await?;
        Ok(response.action_items)
    }

    /// Save a transcript and store the items extracted from it
    pub async fn create_transcript(&self, content: &str) -> Result<CreatedTranscript, SdkError> {
        let request = self
            .http_client
            .post(self.url("/api/transcripts"))
            .json(&CreateTranscriptRequest { content });
        send_json(request).await
    }

    /// Most recent transcripts first; the server default applies when `limit` is `None`
    pub async fn list_transcripts(&self, limit: Option<usize>) -> Result<Vec<Transcript>, SdkError> {
        let mut request = self.http_client.get(self.url("/api/transcripts"));
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }
        send_json(request).await
    }

    /// Get one transcript
    pub async fn get_transcript(&self, id: TranscriptId) -> Result<Transcript, SdkError> {
        let request = self.http_client.get(self.url(&format!("/api/transcripts/{}", id)));
        send_json(request).await
    }

    /// Items of a transcript in creation order
    pub async fn list_action_items(
        &self,
        transcript_id: TranscriptId,
        filter: ItemFilter,
    ) -> Result<Vec<ActionItem>, SdkError> {
        let request = self
            .http_client
            .get(self.url(&format!("/api/transcripts/{}/action-items", transcript_id)))
            .query(&[("filter", filter.to_string())]);
        send_json(request).await
    }

    /// Add one item to a transcript
    pub async fn add_action_item(
        &self,
        transcript_id: TranscriptId,
        item: &NewActionItem,
    ) -> Result<ActionItem, SdkError> {
        let request = self
            .http_client
            .post(self.url(&format!("/api/transcripts/{}/action-items", transcript_id)))
            .json(item);
        send_json(request).await
    }

    /// Change one field of an item
    pub async fn update_action_item(
        &self,
        id: ActionItemId,
        update: &ItemUpdate,
    ) -> Result<ActionItem, SdkError> {
        let request = self
            .http_client
            .patch(self.url(&format!("/api/action-items/{}", id)))
            .json(update);
        send_json(request).await
    }

    /// Flip an item between done and open
    pub async fn toggle_action_item(&self, id: ActionItemId) -> Result<ActionItem, SdkError> {
        let request = self
            .http_client
            .post(self.url(&format!("/api/action-items/{}/toggle", id)));
        send_json(request).await
    }

    /// Delete an item
    pub async fn delete_action_item(&self, id: ActionItemId) -> Result<(), SdkError> {
        let request = self
            .http_client
            .delete(self.url(&format!("/api/action-items/{}", id)));
        send(request).await?;
        Ok(())
    }

    /// Service, database, and LLM health
    pub async fn health(&self) -> Result<HealthStatus, SdkError> {
        let request = self.http_client.get(self.url("/api/health"));
        send_json(request).await
    }
}

async fn send(request: reqwest::RequestBuilder) -> Result<reqwest::Response, SdkError> {
    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(SdkError::from_status(status.as_u16(), &body));
    }

    Ok(response)
}

async fn send_json<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, SdkError> {
    let response = send(request).await?;
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalized() {
        let client = MinutesClient::new("http://localhost:3000/");
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.url("/api/health"), "http://localhost:3000/api/health");
    }

    #[test]
    fn test_health_status() {
        let status: HealthStatus =
            serde_json::from_str(r#"{"backend":"healthy","database":"healthy","llm":"unhealthy"}"#)
                .unwrap();
        assert!(!status.is_healthy());
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let client = MinutesClient::new("http://127.0.0.1:1");
        let err = client.health().await.unwrap_err();
        assert!(matches!(err, SdkError::ConnectionError(_)));
    }
}

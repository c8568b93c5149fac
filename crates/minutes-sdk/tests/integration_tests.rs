//! End-to-end tests for the Minutes SDK against an in-process server

use minutes_domain::{ItemFilter, ItemUpdate, NewActionItem, TranscriptId};
use minutes_extractor::{Extractor, ExtractorConfig};
use minutes_llm::{AnyProvider, LlmError, MockProvider};
use minutes_sdk::{MinutesClient, SdkError};
use minutes_server::handlers::{create_router, AppState, Limits};
use minutes_store::SqliteStore;

const TRANSCRIPT: &str = "Sam will send the report by Friday. Lee books the venue.";

const TWO_ITEMS: &str = r#"Sure! [{"task":"Send report","owner":"Sam","due_date":"Friday"},{"description":"Book venue","assignee":"Lee"}]"#;

/// Serve the app on an ephemeral port and return a client for it
async fn spawn_server(provider: MockProvider) -> MinutesClient {
    let store = SqliteStore::new(":memory:").unwrap();
    let extractor = Extractor::new(AnyProvider::Mock(provider), ExtractorConfig::default());
    let app = create_router(AppState::new(store, extractor, Limits::default()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MinutesClient::new(&format!("http://{}", addr))
}

#[tokio::test]
async fn test_extract_without_saving() {
    let client = spawn_server(MockProvider::new(TWO_ITEMS)).await;

    let items = client.extract(TRANSCRIPT).await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].task, "Book venue");
    assert_eq!(items[1].owner.as_deref(), Some("Lee"));

    let history = client.list_transcripts(None).await.unwrap();
    assert!(history.is_empty());
}

#[tokio::test]
async fn test_short_transcript_is_invalid_input() {
    let client = spawn_server(MockProvider::new("[]")).await;
    let err = client.extract("too short").await.unwrap_err();
    assert!(matches!(err, SdkError::InvalidInput(_)));
}

#[tokio::test]
async fn test_hard_failure_carries_details() {
    let client = spawn_server(MockProvider::failing(LlmError::Configuration(
        "Gemini API key is not configured".to_string(),
    )))
    .await;

    match client.extract(TRANSCRIPT).await.unwrap_err() {
        SdkError::ServerError {
            status,
            message,
            details,
        } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Failed to extract action items");
            assert!(details.unwrap().contains("not configured"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_full_item_lifecycle() {
    let client = spawn_server(MockProvider::new(TWO_ITEMS)).await;

    let created = client.create_transcript(TRANSCRIPT).await.unwrap();
    assert_eq!(created.action_items.len(), 2);
    let transcript_id = created.transcript.id;
    let first = created.action_items[0].id;

    let fetched = client.get_transcript(transcript_id).await.unwrap();
    assert_eq!(fetched.content, TRANSCRIPT);

    let toggled = client.toggle_action_item(first).await.unwrap();
    assert!(toggled.is_done);
    let done = client
        .list_action_items(transcript_id, ItemFilter::Done)
        .await
        .unwrap();
    assert_eq!(done.len(), 1);

    let edited = client
        .update_action_item(first, &ItemUpdate::Task("Send final report".to_string()))
        .await
        .unwrap();
    assert_eq!(edited.task, "Send final report");
    assert!(edited.is_done);

    let added = client
        .add_action_item(
            transcript_id,
            &NewActionItem {
                task: "Circulate notes".to_string(),
                owner: None,
                due_date: Some("Monday".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(added.due_date.as_deref(), Some("Monday"));

    client.delete_action_item(first).await.unwrap();
    let remaining = client
        .list_action_items(transcript_id, ItemFilter::All)
        .await
        .unwrap();
    let tasks: Vec<&str> = remaining.iter().map(|i| i.task.as_str()).collect();
    assert_eq!(tasks, vec!["Book venue", "Circulate notes"]);

    let err = client.delete_action_item(first).await.unwrap_err();
    assert!(matches!(err, SdkError::NotFound(_)));
}

#[tokio::test]
async fn test_history_limit() {
    let client = spawn_server(MockProvider::new("[]")).await;
    for _ in 0..3 {
        client.create_transcript(TRANSCRIPT).await.unwrap();
    }

    assert_eq!(client.list_transcripts(Some(2)).await.unwrap().len(), 2);
    assert_eq!(client.list_transcripts(None).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_missing_transcript() {
    let client = spawn_server(MockProvider::new("[]")).await;
    let err = client.get_transcript(TranscriptId::new()).await.unwrap_err();
    assert!(matches!(err, SdkError::NotFound(_)));
}

#[tokio::test]
async fn test_health() {
    let client = spawn_server(MockProvider::new("Hello!")).await;
    let health = client.health().await.unwrap();
    assert!(health.is_healthy());
}

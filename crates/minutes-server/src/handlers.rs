//! HTTP request handlers for the Minutes service.
//!
//! Implements extraction, transcript history, action item CRUD, and the
//! health check using axum.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, patch, post},
    Router as AxumRouter,
};
use minutes_domain::traits::{ActionItemStore, LlmProvider};
use minutes_domain::{
    ActionItem, ActionItemId, ExtractedItem, ItemFilter, ItemUpdate, NewActionItem, Transcript,
    TranscriptId,
};
use minutes_extractor::{Extractor, ExtractorError};
use minutes_llm::AnyProvider;
use minutes_store::{SqliteStore, StoreError};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Request limits applied before extraction
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    /// Shortest accepted transcript, counted after trimming
    pub min_transcript_chars: usize,
    /// Default history size
    pub history_limit: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            min_transcript_chars: 10,
            history_limit: 5,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Transcript and action item storage
    pub store: Arc<Mutex<SqliteStore>>,
    /// Extraction pipeline
    pub extractor: Arc<Extractor<AnyProvider>>,
    /// Request limits
    pub limits: Limits,
}

impl AppState {
    /// Bundle a store and extractor into shareable state
    pub fn new(store: SqliteStore, extractor: Extractor<AnyProvider>, limits: Limits) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            extractor: Arc::new(extractor),
            limits,
        }
    }

    /// Run one synchronous store call under the lock
    fn with_store<T>(
        &self,
        f: impl FnOnce(&mut SqliteStore) -> Result<T, StoreError>,
    ) -> Result<T, AppError> {
        let mut store = self
            .store
            .lock()
            .map_err(|_| AppError::Internal("store lock poisoned".to_string()))?;
        f(&mut store).map_err(AppError::from)
    }
}

/// POST /api/extract request
#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    /// Meeting transcript
    #[serde(default)]
    pub transcript: String,
}

/// POST /api/extract response
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractResponse {
    /// Extracted items in model order
    #[serde(rename = "actionItems")]
    pub action_items: Vec<ExtractedItem>,
}

/// POST /api/transcripts request
#[derive(Debug, Deserialize)]
pub struct CreateTranscriptRequest {
    /// Meeting transcript
    #[serde(default, alias = "transcript")]
    pub content: String,
}

/// POST /api/transcripts response
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTranscriptResponse {
    /// The saved transcript
    pub transcript: Transcript,
    /// Items extracted and stored for it
    pub action_items: Vec<ActionItem>,
}

/// GET /api/transcripts query
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Maximum transcripts to return
    pub limit: Option<usize>,
}

/// GET /api/transcripts/:id/action-items query
#[derive(Debug, Deserialize)]
pub struct ItemsQuery {
    /// all, open, or done
    pub filter: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Always "healthy" when the service answers
    pub backend: String,
    /// Database probe result
    pub database: String,
    /// LLM probe result
    pub llm: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Underlying cause, when there is one worth showing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Malformed or out-of-range input
    BadRequest(String),
    /// Unknown transcript or action item
    NotFound(String),
    /// Hard extraction failure (credential or provider)
    Extraction(ExtractorError),
    /// Internal server error
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            AppError::Extraction(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to extract action items".to_string(),
                Some(e.to_string()),
            ),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
        };

        let body = Json(ErrorResponse { error, details });
        (status, body).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(msg) => AppError::NotFound(msg),
            StoreError::InvalidData(msg) => AppError::BadRequest(msg),
            StoreError::Database(e) => {
                error!("Database error: {}", e);
                AppError::Internal(format!("Database error: {}", e))
            }
        }
    }
}

impl From<ExtractorError> for AppError {
    fn from(e: ExtractorError) -> Self {
        AppError::Extraction(e)
    }
}

fn parse_transcript_id(raw: &str) -> Result<TranscriptId, AppError> {
    TranscriptId::from_string(raw).map_err(AppError::BadRequest)
}

fn parse_item_id(raw: &str) -> Result<ActionItemId, AppError> {
    ActionItemId::from_string(raw).map_err(AppError::BadRequest)
}

fn check_transcript_length(transcript: &str, limits: &Limits) -> Result<(), AppError> {
    if transcript.trim().chars().count() < limits.min_transcript_chars {
        return Err(AppError::BadRequest(format!(
            "Transcript must be at least {} characters",
            limits.min_transcript_chars
        )));
    }
    Ok(())
}

/// POST /api/extract - Extract action items without saving anything
async fn extract(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    check_transcript_length(&request.transcript, &state.limits)?;

    let action_items = state.extractor.extract(&request.transcript).await?;

    Ok(Json(ExtractResponse { action_items }))
}

/// POST /api/transcripts - Save a transcript, extract, and store its items
///
/// The transcript is saved before extraction, so it stays in history even
/// when extraction fails.
async fn create_transcript(
    State(state): State<AppState>,
    Json(request): Json<CreateTranscriptRequest>,
) -> Result<(StatusCode, Json<CreateTranscriptResponse>), AppError> {
    check_transcript_length(&request.content, &state.limits)?;

    let transcript = Transcript::new(request.content);
    state.with_store(|store| store.insert_transcript(&transcript))?;
    info!(transcript_id = %transcript.id, "Saved transcript");

    let extracted = state.extractor.extract(&transcript.content).await?;

    let new_items: Vec<NewActionItem> = extracted.into_iter().map(NewActionItem::from).collect();
    let action_items = state.with_store(|store| store.insert_action_items(transcript.id, new_items))?;
    info!(
        transcript_id = %transcript.id,
        items = action_items.len(),
        "Stored action items"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateTranscriptResponse {
            transcript,
            action_items,
        }),
    ))
}

/// GET /api/transcripts - Most recent transcripts first
async fn list_transcripts(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<Transcript>>, AppError> {
    let limit = query.limit.unwrap_or(state.limits.history_limit);
    let transcripts = state.with_store(|store| store.list_transcripts(limit))?;
    Ok(Json(transcripts))
}

/// GET /api/transcripts/:id
async fn get_transcript(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Transcript>, AppError> {
    let id = parse_transcript_id(&id)?;
    state
        .with_store(|store| store.get_transcript(id))?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("transcript {}", id)))
}

/// GET /api/transcripts/:id/action-items - Items in creation order
async fn list_action_items(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ItemsQuery>,
) -> Result<Json<Vec<ActionItem>>, AppError> {
    let id = parse_transcript_id(&id)?;
    let filter = match query.filter.as_deref() {
        Some(raw) => raw.parse::<ItemFilter>().map_err(AppError::BadRequest)?,
        None => ItemFilter::All,
    };

    let items = state.with_store(|store| {
        if store.get_transcript(id)?.is_none() {
            return Err(StoreError::NotFound(format!("transcript {}", id)));
        }
        store.list_action_items(id, filter)
    })?;
    Ok(Json(items))
}

/// POST /api/transcripts/:id/action-items - Add one item by hand
async fn add_action_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(item): Json<NewActionItem>,
) -> Result<(StatusCode, Json<ActionItem>), AppError> {
    let id = parse_transcript_id(&id)?;
    if item.task.trim().is_empty() {
        return Err(AppError::BadRequest("task cannot be empty".to_string()));
    }

    let created = state.with_store(|store| store.add_action_item(id, item))?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PATCH /api/action-items/:id - Update one field
async fn update_action_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<ItemUpdate>,
) -> Result<Json<ActionItem>, AppError> {
    let id = parse_item_id(&id)?;
    let field = update.field();
    let item = state.with_store(|store| store.update_action_item(id, update))?;
    info!(item_id = %id, field, "Updated action item");
    Ok(Json(item))
}

/// POST /api/action-items/:id/toggle - Flip done/open
async fn toggle_action_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ActionItem>, AppError> {
    let id = parse_item_id(&id)?;
    let item = state.with_store(|store| store.toggle_done(id))?;
    Ok(Json(item))
}

/// DELETE /api/action-items/:id
async fn delete_action_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_item_id(&id)?;
    state.with_store(|store| store.delete_action_item(id))?;
    info!(item_id = %id, "Deleted action item");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/health - Independent database and LLM probes
///
/// Always answers 200; each probe reports "healthy" or "unhealthy".
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    let database = match state.with_store(|store| store.ping()) {
        Ok(()) => "healthy",
        Err(e) => {
            warn!("Database health check failed: {:?}", e);
            "unhealthy"
        }
    };

    let provider = state.extractor.provider();
    let params = state.extractor.config().params();
    let llm = match provider.complete("Hello", &params).await {
        Ok(_) => "healthy",
        Err(e) if e.is_soft() => "healthy",
        Err(e) => {
            warn!(provider = provider.name(), "LLM health check failed: {}", e);
            "unhealthy"
        }
    };

    Json(HealthCheckResponse {
        backend: "healthy".to_string(),
        database: database.to_string(),
        llm: llm.to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/api/extract", post(extract))
        .route("/api/transcripts", post(create_transcript).get(list_transcripts))
        .route("/api/transcripts/:id", get(get_transcript))
        .route(
            "/api/transcripts/:id/action-items",
            get(list_action_items).post(add_action_item),
        )
        .route(
            "/api/action-items/:id",
            patch(update_action_item).delete(delete_action_item),
        )
        .route("/api/action-items/:id/toggle", post(toggle_action_item))
        .route("/api/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use minutes_extractor::ExtractorConfig;
    use minutes_llm::MockProvider;
    use tower::ServiceExt; // for oneshot

    fn create_test_state(response: &str) -> AppState {
        let store = SqliteStore::new(":memory:").unwrap();
        let extractor = Extractor::new(
            AnyProvider::Mock(MockProvider::new(response)),
            ExtractorConfig::default(),
        );
        AppState::new(store, extractor, Limits::default())
    }

    #[test]
    fn test_length_check_uses_trimmed_chars() {
        let limits = Limits::default();
        assert!(check_transcript_length("   short    ", &limits).is_err());
        assert!(check_transcript_length("  0123456789  ", &limits).is_ok());
        // 10 two-byte characters
        assert!(check_transcript_length("éééééééééé", &limits).is_ok());
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = create_router(create_test_state("[]"));

        let request = Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_extract_rejects_short_transcript() {
        let app = create_router(create_test_state("[]"));

        let request = Request::builder()
            .method("POST")
            .uri("/api/extract")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"transcript": "   tiny   "}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bad_item_id_is_bad_request() {
        let app = create_router(create_test_state("[]"));

        let request = Request::builder()
            .method("POST")
            .uri("/api/action-items/not-a-uuid/toggle")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{ActionItem, ActionItemId, ItemFilter, ItemUpdate, NewActionItem, Transcript, TranscriptId};
use std::future::Future;

/// Sampling parameters sent with every completion request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    /// Sampling temperature; kept low so extraction is close to deterministic
    pub temperature: f32,

    /// Upper bound on completion length
    pub max_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            max_tokens: 1024,
        }
    }
}

/// Trait for LLM provider operations
///
/// One prompt in, one text completion out. Each vendor's request and response
/// envelope is handled by its own adapter in `minutes-llm`; callers never see
/// vendor-specific shapes.
pub trait LlmProvider: Send + Sync {
    /// Error type for LLM operations
    type Error;

    /// Short provider name for logs ("gemini", "openai", ...)
    fn name(&self) -> &str;

    /// Model identifier sent to the provider
    fn model(&self) -> &str;

    /// Send one prompt and return the raw text completion
    fn complete(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Trait for storing transcripts and their action items
///
/// Implemented by the infrastructure layer (minutes-store)
pub trait ActionItemStore {
    /// Error type for store operations
    type Error;

    /// Save a transcript
    fn insert_transcript(&mut self, transcript: &Transcript) -> Result<TranscriptId, Self::Error>;

    /// Get a transcript by ID
    fn get_transcript(&self, id: TranscriptId) -> Result<Option<Transcript>, Self::Error>;

    /// Most recent transcripts first
    fn list_transcripts(&self, limit: usize) -> Result<Vec<Transcript>, Self::Error>;

    /// Insert a batch of items for one transcript, preserving input order
    fn insert_action_items(
        &mut self,
        transcript_id: TranscriptId,
        items: Vec<NewActionItem>,
    ) -> Result<Vec<ActionItem>, Self::Error>;

    /// Items of one transcript in creation order
    fn list_action_items(
        &self,
        transcript_id: TranscriptId,
        filter: ItemFilter,
    ) -> Result<Vec<ActionItem>, Self::Error>;

    /// Get an action item by ID
    fn get_action_item(&self, id: ActionItemId) -> Result<Option<ActionItem>, Self::Error>;

    /// Update one field of an action item and return the updated item
    fn update_action_item(
        &mut self,
        id: ActionItemId,
        update: ItemUpdate,
    ) -> Result<ActionItem, Self::Error>;

    /// Flip the done flag and return the updated item
    fn toggle_done(&mut self, id: ActionItemId) -> Result<ActionItem, Self::Error>;

    /// Delete an action item
    fn delete_action_item(&mut self, id: ActionItemId) -> Result<(), Self::Error>;

    /// Cheap reachability probe for health checks
    fn ping(&self) -> Result<(), Self::Error>;
}

//! Minutes Domain Layer
//!
//! Core model for the meeting-minutes action item tracker. This crate has no
//! infrastructure dependencies: it defines the entities, identifiers, and the
//! trait boundaries that the storage, LLM, and service layers implement.
//!
//! ## Key Concepts
//!
//! - **Transcript**: the raw meeting text a user pasted in
//! - **Action Item**: a task with an optional owner and due date, linked to a transcript
//! - **Extracted Item**: an action item as produced by the model, before it is stored
//! - **Item Update**: a single-field edit applied to a stored action item
//!
//! ## Architecture
//!
//! - Only `uuid` is required (identifiers); `serde` is behind the `serde` feature
//! - Pure domain logic
//! - Trait definitions for every external interaction

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod action_item;
pub mod id;
pub mod traits;
pub mod transcript;

// Re-exports for convenience
pub use action_item::{ActionItem, ExtractedItem, ItemFilter, ItemUpdate, NewActionItem};
pub use id::{ActionItemId, TranscriptId};
pub use transcript::Transcript;

/// Current time as Unix milliseconds
///
/// Millisecond precision keeps creation order stable for items inserted in
/// one batch.
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Trim a free-text field, mapping empty input to `None`
///
/// # Examples
///
/// ```
/// use minutes_domain::normalize_optional;
///
/// assert_eq!(normalize_optional(Some("  Sam ")), Some("Sam".to_string()));
/// assert_eq!(normalize_optional(Some("   ")), None);
/// assert_eq!(normalize_optional(None), None);
/// ```
pub fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_millis_is_recent() {
        // 2020-01-01 in milliseconds
        assert!(now_millis() > 1_577_836_800_000);
    }

    #[test]
    fn test_normalize_optional() {
        assert_eq!(normalize_optional(Some("Friday")), Some("Friday".to_string()));
        assert_eq!(normalize_optional(Some("")), None);
        assert_eq!(normalize_optional(Some(" \t")), None);
    }
}

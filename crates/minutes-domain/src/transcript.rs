//! Transcript module - the source text action items are extracted from

use crate::TranscriptId;

/// A stored meeting transcript
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transcript {
    /// Unique identifier
    pub id: TranscriptId,

    /// Verbatim transcript text
    pub content: String,

    /// When the transcript was saved (Unix milliseconds)
    pub created_at: u64,
}

impl Transcript {
    /// Create a new transcript stamped with the current time
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: TranscriptId::new(),
            content: content.into(),
            created_at: crate::now_millis(),
        }
    }

    /// First `max_chars` characters of the content on a single line
    ///
    /// Used by history listings, which only show a preview.
    pub fn preview(&self, max_chars: usize) -> String {
        let flat: String = self
            .content
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        if flat.chars().count() <= max_chars {
            flat
        } else {
            let cut: String = flat.chars().take(max_chars).collect();
            format!("{}...", cut.trim_end())
        }
    }
}

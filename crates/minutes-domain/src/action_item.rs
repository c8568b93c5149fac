//! Action item module - tasks extracted from a transcript or added by hand

use crate::{normalize_optional, ActionItemId, TranscriptId};
use std::fmt;
use std::str::FromStr;

/// Task label used when a stored item is created without a description
pub const DEFAULT_TASK: &str = "Untitled task";

/// An action item as extracted from model output, before it is stored
///
/// `task` is never empty: the normalizer substitutes a positional
/// placeholder for elements without a usable description.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtractedItem {
    /// What needs to be done
    pub task: String,

    /// Who is responsible, if stated
    pub owner: Option<String>,

    /// When it is due, as free text ("Friday", "2025-03-01", ...)
    pub due_date: Option<String>,
}

impl ExtractedItem {
    /// Create an extracted item
    pub fn new(task: impl Into<String>, owner: Option<String>, due_date: Option<String>) -> Self {
        Self {
            task: task.into(),
            owner,
            due_date,
        }
    }
}

/// Input for creating a stored action item
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewActionItem {
    /// What needs to be done
    pub task: String,

    /// Who is responsible
    #[cfg_attr(feature = "serde", serde(default))]
    pub owner: Option<String>,

    /// When it is due
    #[cfg_attr(feature = "serde", serde(default))]
    pub due_date: Option<String>,
}

impl NewActionItem {
    /// Trim every field and apply defaults
    ///
    /// An empty task becomes [`DEFAULT_TASK`]; empty owner and due date
    /// become `None`.
    pub fn normalized(&self) -> Self {
        let task = self.task.trim();
        Self {
            task: if task.is_empty() {
                DEFAULT_TASK.to_string()
            } else {
                task.to_string()
            },
            owner: normalize_optional(self.owner.as_deref()),
            due_date: normalize_optional(self.due_date.as_deref()),
        }
    }
}

impl From<ExtractedItem> for NewActionItem {
    fn from(item: ExtractedItem) -> Self {
        Self {
            task: item.task,
            owner: item.owner,
            due_date: item.due_date,
        }
    }
}

/// A stored action item
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionItem {
    /// Unique identifier
    pub id: ActionItemId,

    /// Transcript the item belongs to
    pub transcript_id: TranscriptId,

    /// What needs to be done
    pub task: String,

    /// Who is responsible
    pub owner: Option<String>,

    /// When it is due
    pub due_date: Option<String>,

    /// Whether the item has been completed
    pub is_done: bool,

    /// When the item was created (Unix milliseconds)
    pub created_at: u64,
}

impl ActionItem {
    /// Create a new open action item for a transcript
    pub fn new(transcript_id: TranscriptId, item: NewActionItem, created_at: u64) -> Self {
        let item = item.normalized();
        Self {
            id: ActionItemId::new(),
            transcript_id,
            task: item.task,
            owner: item.owner,
            due_date: item.due_date,
            is_done: false,
            created_at,
        }
    }
}

/// A single-field edit to a stored action item
///
/// Serialized as a one-key object, e.g. `{"owner": "Sam"}` or
/// `{"is_done": true}`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ItemUpdate {
    /// Replace the task description
    Task(String),
    /// Replace or clear the owner
    Owner(Option<String>),
    /// Replace or clear the due date
    DueDate(Option<String>),
    /// Mark done or open
    IsDone(bool),
}

impl ItemUpdate {
    /// Trim text values and validate the update
    ///
    /// Empty owner/due date values clear the field. An empty task is
    /// rejected because every stored item must describe something.
    pub fn normalized(self) -> Result<Self, String> {
        match self {
            ItemUpdate::Task(task) => {
                let task = task.trim();
                if task.is_empty() {
                    Err("task cannot be empty".to_string())
                } else {
                    Ok(ItemUpdate::Task(task.to_string()))
                }
            }
            ItemUpdate::Owner(owner) => Ok(ItemUpdate::Owner(normalize_optional(owner.as_deref()))),
            ItemUpdate::DueDate(due) => Ok(ItemUpdate::DueDate(normalize_optional(due.as_deref()))),
            ItemUpdate::IsDone(done) => Ok(ItemUpdate::IsDone(done)),
        }
    }

    /// Name of the field this update touches
    pub fn field(&self) -> &'static str {
        match self {
            ItemUpdate::Task(_) => "task",
            ItemUpdate::Owner(_) => "owner",
            ItemUpdate::DueDate(_) => "due_date",
            ItemUpdate::IsDone(_) => "is_done",
        }
    }
}

/// Which action items to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ItemFilter {
    /// Every item
    #[default]
    All,
    /// Items not yet done
    Open,
    /// Completed items
    Done,
}

impl fmt::Display for ItemFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ItemFilter::All => "all",
            ItemFilter::Open => "open",
            ItemFilter::Done => "done",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ItemFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(ItemFilter::All),
            "open" => Ok(ItemFilter::Open),
            "done" => Ok(ItemFilter::Done),
            other => Err(format!("Unknown filter '{}': expected all, open, or done", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(done: bool) -> ActionItem {
        let mut item = ActionItem::new(
            TranscriptId::new(),
            NewActionItem {
                task: "Send report".to_string(),
                owner: Some("Sam".to_string()),
                due_date: None,
            },
            1,
        );
        item.is_done = done;
        item
    }

    #[test]
    fn test_new_item_is_open() {
        let item = stored(false);
        assert!(!item.is_done);
        assert_eq!(item.task, "Send report");
    }

    #[test]
    fn test_new_item_normalizes_fields() {
        let item = ActionItem::new(
            TranscriptId::new(),
            NewActionItem {
                task: "   ".to_string(),
                owner: Some("  ".to_string()),
                due_date: Some(" Friday ".to_string()),
            },
            1,
        );
        assert_eq!(item.task, DEFAULT_TASK);
        assert_eq!(item.owner, None);
        assert_eq!(item.due_date.as_deref(), Some("Friday"));
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("open".parse::<ItemFilter>().unwrap(), ItemFilter::Open);
        assert_eq!("DONE".parse::<ItemFilter>().unwrap(), ItemFilter::Done);
        assert!("pending".parse::<ItemFilter>().is_err());
        assert_eq!(ItemFilter::default(), ItemFilter::All);
    }

    #[test]
    fn test_update_normalization() {
        assert_eq!(
            ItemUpdate::Owner(Some("  ".to_string())).normalized().unwrap(),
            ItemUpdate::Owner(None)
        );
        assert_eq!(
            ItemUpdate::Task(" Draft agenda ".to_string()).normalized().unwrap(),
            ItemUpdate::Task("Draft agenda".to_string())
        );
        assert!(ItemUpdate::Task("  ".to_string()).normalized().is_err());
    }

    #[test]
    fn test_update_field_names() {
        assert_eq!(ItemUpdate::Task("x".to_string()).field(), "task");
        assert_eq!(ItemUpdate::DueDate(None).field(), "due_date");
        assert_eq!(ItemUpdate::IsDone(true).field(), "is_done");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_update_wire_format() {
        let update: ItemUpdate = serde_json::from_str(r#"{"is_done": true}"#).unwrap();
        assert_eq!(update, ItemUpdate::IsDone(true));

        let update: ItemUpdate = serde_json::from_str(r#"{"owner": null}"#).unwrap();
        assert_eq!(update, ItemUpdate::Owner(None));

        let json = serde_json::to_string(&ItemUpdate::DueDate(Some("Friday".into()))).unwrap();
        assert_eq!(json, r#"{"due_date":"Friday"}"#);
    }
}

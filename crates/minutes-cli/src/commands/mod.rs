//! Command implementations.

pub mod add;
pub mod delete;
pub mod done;
pub mod edit;
pub mod extract;
pub mod health;
pub mod history;
pub mod items;
pub mod profile;

pub use self::add::execute_add;
pub use self::delete::execute_delete;
pub use self::done::execute_done;
pub use self::edit::execute_edit;
pub use self::extract::execute_extract;
pub use self::health::execute_health;
pub use self::history::execute_history;
pub use self::items::execute_items;
pub use self::profile::execute_profile;

use crate::error::{CliError, Result};
use minutes_domain::{ActionItemId, TranscriptId};

pub(crate) fn parse_transcript_id(raw: &str) -> Result<TranscriptId> {
    TranscriptId::from_string(raw.trim())
        .map_err(|e| CliError::InvalidInput(format!("Invalid transcript ID '{}': {}", raw, e)))
}

pub(crate) fn parse_item_id(raw: &str) -> Result<ActionItemId> {
    ActionItemId::from_string(raw.trim())
        .map_err(|e| CliError::InvalidInput(format!("Invalid action item ID '{}': {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_parsing() {
        let id = TranscriptId::new();
        assert_eq!(parse_transcript_id(&format!(" {} ", id)).unwrap(), id);
        assert!(matches!(
            parse_item_id("not-an-id"),
            Err(CliError::InvalidInput(_))
        ));
    }
}

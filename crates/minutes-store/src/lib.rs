//! Minutes Storage Layer
//!
//! Implements the `ActionItemStore` trait on SQLite.
//!
//! # Architecture
//!
//! - Two flat tables: `transcripts` and `action_items` (foreign key to transcripts)
//! - Ids stored as 16-byte UUIDv7 blobs, timestamps as Unix milliseconds
//! - Items are listed in creation order; `rowid` breaks ties inside one batch
//!
//! # Examples
//!
//! ```no_run
//! use minutes_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for transcript and action item operations
//! ```

#![warn(missing_docs)]

use minutes_domain::traits::ActionItemStore;
use minutes_domain::{
    now_millis, ActionItem, ActionItemId, ItemFilter, ItemUpdate, NewActionItem, Transcript,
    TranscriptId,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

const ITEM_COLUMNS: &str = "id, transcript_id, task, owner, due_date, is_done, created_at";

/// SQLite-based implementation of ActionItemStore
///
/// # Thread Safety
///
/// SQLite connections are not `Sync`. Share a store across tasks behind a
/// `Mutex`, and never hold the lock across an `.await`.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use minutes_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("minutes.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    fn blob_error(column: usize, e: String) -> rusqlite::Error {
        rusqlite::Error::FromSqlConversionFailure(
            column,
            rusqlite::types::Type::Blob,
            Box::new(StoreError::InvalidData(e)),
        )
    }

    fn row_to_transcript(row: &Row<'_>) -> rusqlite::Result<Transcript> {
        let id_bytes: Vec<u8> = row.get(0)?;
        let id = TranscriptId::from_bytes(&id_bytes).map_err(|e| Self::blob_error(0, e))?;

        Ok(Transcript {
            id,
            content: row.get(1)?,
            created_at: row.get::<_, i64>(2)? as u64,
        })
    }

    fn row_to_item(row: &Row<'_>) -> rusqlite::Result<ActionItem> {
        let id_bytes: Vec<u8> = row.get(0)?;
        let id = ActionItemId::from_bytes(&id_bytes).map_err(|e| Self::blob_error(0, e))?;

        let transcript_bytes: Vec<u8> = row.get(1)?;
        let transcript_id =
            TranscriptId::from_bytes(&transcript_bytes).map_err(|e| Self::blob_error(1, e))?;

        Ok(ActionItem {
            id,
            transcript_id,
            task: row.get(2)?,
            owner: row.get(3)?,
            due_date: row.get(4)?,
            is_done: row.get(5)?,
            created_at: row.get::<_, i64>(6)? as u64,
        })
    }

    fn transcript_exists(&self, id: TranscriptId) -> Result<bool, StoreError> {
        let exists = self
            .conn
            .query_row(
                "SELECT 1 FROM transcripts WHERE id = ?1",
                params![&id.to_bytes()[..]],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        Ok(exists)
    }

    fn require_item(&self, id: ActionItemId) -> Result<ActionItem, StoreError> {
        self.get_action_item(id)?
            .ok_or_else(|| StoreError::NotFound(format!("action item {}", id)))
    }

    fn insert_item(conn: &Connection, item: &ActionItem) -> Result<(), StoreError> {
        conn.execute(
            "INSERT INTO action_items (id, transcript_id, task, owner, due_date, is_done, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                &item.id.to_bytes()[..],
                &item.transcript_id.to_bytes()[..],
                &item.task,
                &item.owner,
                &item.due_date,
                item.is_done,
                item.created_at as i64,
            ],
        )?;
        Ok(())
    }

    /// Add a single item to an existing transcript
    pub fn add_action_item(
        &mut self,
        transcript_id: TranscriptId,
        item: NewActionItem,
    ) -> Result<ActionItem, StoreError> {
        let mut created = self.insert_action_items(transcript_id, vec![item])?;
        created
            .pop()
            .ok_or_else(|| StoreError::InvalidData("insert returned no item".to_string()))
    }
}

impl ActionItemStore for SqliteStore {
    type Error = StoreError;

    fn insert_transcript(&mut self, transcript: &Transcript) -> Result<TranscriptId, Self::Error> {
        self.conn.execute(
            "INSERT INTO transcripts (id, content, created_at) VALUES (?1, ?2, ?3)",
            params![
                &transcript.id.to_bytes()[..],
                &transcript.content,
                transcript.created_at as i64,
            ],
        )?;
        debug!("Saved transcript {} ({} chars)", transcript.id, transcript.content.len());
        Ok(transcript.id)
    }

    fn get_transcript(&self, id: TranscriptId) -> Result<Option<Transcript>, Self::Error> {
        let transcript = self
            .conn
            .query_row(
                "SELECT id, content, created_at FROM transcripts WHERE id = ?1",
                params![&id.to_bytes()[..]],
                Self::row_to_transcript,
            )
            .optional()?;
        Ok(transcript)
    }

    fn list_transcripts(&self, limit: usize) -> Result<Vec<Transcript>, Self::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, content, created_at FROM transcripts
             ORDER BY created_at DESC, rowid DESC LIMIT ?1",
        )?;
        let transcripts = stmt
            .query_map(params![limit as i64], Self::row_to_transcript)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(transcripts)
    }

    fn insert_action_items(
        &mut self,
        transcript_id: TranscriptId,
        items: Vec<NewActionItem>,
    ) -> Result<Vec<ActionItem>, Self::Error> {
        if !self.transcript_exists(transcript_id)? {
            return Err(StoreError::NotFound(format!("transcript {}", transcript_id)));
        }

        let created_at = now_millis();
        let items: Vec<ActionItem> = items
            .into_iter()
            .map(|item| ActionItem::new(transcript_id, item, created_at))
            .collect();

        let tx = self.conn.transaction()?;
        for item in &items {
            Self::insert_item(&tx, item)?;
        }
        tx.commit()?;

        debug!("Saved {} action items for transcript {}", items.len(), transcript_id);
        Ok(items)
    }

    fn list_action_items(
        &self,
        transcript_id: TranscriptId,
        filter: ItemFilter,
    ) -> Result<Vec<ActionItem>, Self::Error> {
        let mut sql = format!(
            "SELECT {} FROM action_items WHERE transcript_id = ?1",
            ITEM_COLUMNS
        );
        match filter {
            ItemFilter::All => {}
            ItemFilter::Open => sql.push_str(" AND is_done = 0"),
            ItemFilter::Done => sql.push_str(" AND is_done = 1"),
        }
        sql.push_str(" ORDER BY created_at ASC, rowid ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let items = stmt
            .query_map(params![&transcript_id.to_bytes()[..]], Self::row_to_item)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    fn get_action_item(&self, id: ActionItemId) -> Result<Option<ActionItem>, Self::Error> {
        let item = self
            .conn
            .query_row(
                &format!("SELECT {} FROM action_items WHERE id = ?1", ITEM_COLUMNS),
                params![&id.to_bytes()[..]],
                Self::row_to_item,
            )
            .optional()?;
        Ok(item)
    }

    fn update_action_item(
        &mut self,
        id: ActionItemId,
        update: ItemUpdate,
    ) -> Result<ActionItem, Self::Error> {
        let update = update.normalized().map_err(StoreError::InvalidData)?;
        let id_bytes = id.to_bytes();

        let changed = match &update {
            ItemUpdate::Task(task) => self.conn.execute(
                "UPDATE action_items SET task = ?1 WHERE id = ?2",
                params![task, &id_bytes[..]],
            )?,
            ItemUpdate::Owner(owner) => self.conn.execute(
                "UPDATE action_items SET owner = ?1 WHERE id = ?2",
                params![owner, &id_bytes[..]],
            )?,
            ItemUpdate::DueDate(due) => self.conn.execute(
                "UPDATE action_items SET due_date = ?1 WHERE id = ?2",
                params![due, &id_bytes[..]],
            )?,
            ItemUpdate::IsDone(done) => self.conn.execute(
                "UPDATE action_items SET is_done = ?1 WHERE id = ?2",
                params![done, &id_bytes[..]],
            )?,
        };

        if changed == 0 {
            return Err(StoreError::NotFound(format!("action item {}", id)));
        }

        debug!("Updated {} of action item {}", update.field(), id);
        self.require_item(id)
    }

    fn toggle_done(&mut self, id: ActionItemId) -> Result<ActionItem, Self::Error> {
        let changed = self.conn.execute(
            "UPDATE action_items SET is_done = NOT is_done WHERE id = ?1",
            params![&id.to_bytes()[..]],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(format!("action item {}", id)));
        }

        self.require_item(id)
    }

    fn delete_action_item(&mut self, id: ActionItemId) -> Result<(), Self::Error> {
        let deleted = self.conn.execute(
            "DELETE FROM action_items WHERE id = ?1",
            params![&id.to_bytes()[..]],
        )?;

        if deleted == 0 {
            return Err(StoreError::NotFound(format!("action item {}", id)));
        }

        debug!("Deleted action item {}", id);
        Ok(())
    }

    fn ping(&self) -> Result<(), Self::Error> {
        self.conn
            .query_row("SELECT id FROM transcripts LIMIT 1", [], |_| Ok(()))
            .optional()?;
        Ok(())
    }
}

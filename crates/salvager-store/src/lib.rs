//! Salvager Storage Layer
//!
//! Implements the ChecklistStore trait on top of SQLite.
//!
//! # Architecture
//!
//! - One `slots` table of named JSON documents
//! - The checklist is a single slot holding a flat `{ "key": bool }` object,
//!   rewritten in full on every save
//!
//! # Examples
//!
//! ```no_run
//! use salvager_store::SqliteChecklistStore;
//!
//! let store = SqliteChecklistStore::new(":memory:", "salvager.checklist").unwrap();
//! // Store is now ready for checklist operations
//! ```

#![warn(missing_docs)]

use rusqlite::{params, Connection, OptionalExtension};
use salvager_domain::traits::{ChecklistEntries, ChecklistStore};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Well-known slot the checklist is stored under
pub const DEFAULT_CHECKLIST_SLOT: &str = "salvager.checklist";

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Slot contents are not valid JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-based implementation of ChecklistStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own
/// store instance.
pub struct SqliteChecklistStore {
    conn: Connection,
    slot: String,
}

impl SqliteChecklistStore {
    /// Open (or create) a store at `path`, reading and writing `slot`
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use salvager_store::{SqliteChecklistStore, DEFAULT_CHECKLIST_SLOT};
    ///
    /// let store = SqliteChecklistStore::new("checklist.db", DEFAULT_CHECKLIST_SLOT).unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P, slot: impl Into<String>) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let mut store = Self {
            conn,
            slot: slot.into(),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Slot name this store uses
    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// Initialize the database schema
    fn initialize_schema(&mut self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Decode a slot document into checklist entries
    ///
    /// Non-boolean values are skipped; anything but a JSON object is invalid.
    fn decode(raw: &str) -> Result<ChecklistEntries, StoreError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        let object = value.as_object().ok_or_else(|| {
            StoreError::InvalidData("Checklist slot is not a JSON object".to_string())
        })?;

        Ok(object
            .iter()
            .filter_map(|(key, value)| value.as_bool().map(|done| (key.clone(), done)))
            .collect())
    }
}

impl ChecklistStore for SqliteChecklistStore {
    type Error = StoreError;

    fn load(&self) -> Result<ChecklistEntries, Self::Error> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM slots WHERE slot = ?1",
                params![&self.slot],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(raw) => Self::decode(&raw),
            None => Ok(ChecklistEntries::new()),
        }
    }

    fn save(&mut self, entries: &ChecklistEntries) -> Result<(), Self::Error> {
        let value = serde_json::to_string(entries)?;
        let updated_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);

        self.conn.execute(
            "INSERT INTO slots (slot, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(slot) DO UPDATE SET
             value = excluded.value, updated_at = excluded.updated_at",
            params![&self.slot, value, updated_at],
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_skips_non_booleans() {
        let entries =
            SqliteChecklistStore::decode(r#"{"Refiner_1": true, "quest_q1": "yes", "quest_q2": false}"#)
                .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries.get("Refiner_1"), Some(&true));
        assert_eq!(entries.get("quest_q2"), Some(&false));
    }

    #[test]
    fn test_decode_rejects_non_objects() {
        assert!(matches!(
            SqliteChecklistStore::decode("[true]"),
            Err(StoreError::InvalidData(_))
        ));
        assert!(matches!(
            SqliteChecklistStore::decode("not json"),
            Err(StoreError::Serialization(_))
        ));
    }
}

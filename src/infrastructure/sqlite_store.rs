// src/infrastructure/sqlite_store.rs
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info, instrument};

use crate::application::KeyValueStore;
use crate::domain::DomainError;

/// Snapshots kept as rows of a single `kv` table.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DomainError> {
        let path = PathBuf::from(path.as_ref());
        debug!(?path, "Opening SQLite store");

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DomainError::Storage(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let conn = Connection::open(&path).map_err(storage_error)?;
        let store = Self::with_connection(conn)?;
        info!(?path, "Opened SQLite store");
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, DomainError> {
        Self::with_connection(Connection::open_in_memory().map_err(storage_error)?)
    }

    fn with_connection(conn: Connection) -> Result<Self, DomainError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )
        .map_err(storage_error)?;
        Ok(Self { conn })
    }
}

const UPSERT: &str =
    "INSERT INTO kv (key, value) VALUES (?1, ?2) ON CONFLICT(key) DO UPDATE SET value = excluded.value";

impl KeyValueStore for SqliteStore {
    #[instrument(level = "trace", skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(storage_error)
    }

    #[instrument(level = "trace", skip(self, value))]
    fn set(&mut self, key: &str, value: &str) -> Result<(), DomainError> {
        self.conn
            .execute(UPSERT, params![key, value])
            .map_err(storage_error)?;
        Ok(())
    }

    /// All keys of one checkpoint in a single transaction.
    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<(), DomainError> {
        let tx = self.conn.transaction().map_err(storage_error)?;
        for (key, value) in entries {
            tx.execute(UPSERT, params![key, value])
                .map_err(storage_error)?;
        }
        tx.commit().map_err(storage_error)
    }
}

fn storage_error(e: rusqlite::Error) -> DomainError {
    DomainError::Storage(format!("SQLite error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn given_missing_key_when_getting_then_returns_none() {
        let store = SqliteStore::open_in_memory().unwrap();

        assert_eq!(store.get("notes").unwrap(), None);
    }

    #[test]
    fn given_existing_key_when_setting_then_overwrites() {
        let mut store = SqliteStore::open_in_memory().unwrap();

        store.set("tags", "[]").unwrap();
        store.set("tags", r#"["x"]"#).unwrap();

        assert_eq!(store.get("tags").unwrap().as_deref(), Some(r#"["x"]"#));
    }

    #[test]
    fn given_batch_when_setting_many_then_all_keys_written() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let entries = [("notes", "[]".to_string()), ("tags", r#"["a"]"#.to_string())];

        store.set_many(&entries).unwrap();

        assert_eq!(store.get("notes").unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get("tags").unwrap().as_deref(), Some(r#"["a"]"#));
    }

    #[test]
    fn given_file_database_when_reopening_then_values_survive() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/notekeep.db");

        {
            let mut store = SqliteStore::open(&path).unwrap();
            store.set("folders", "[]").unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();

        assert_eq!(store.get("folders").unwrap().as_deref(), Some("[]"));
    }
}

// src/application/snapshot.rs
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::constants::{FOLDERS_KEY, NOTES_KEY, TAGS_KEY, TEMPLATES_KEY};
use crate::domain::{DomainError, Folder, Note, Template};

/// Local string key-value storage holding one JSON snapshot per collection.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Write several keys as one checkpoint.
    ///
    /// Backends that support transactions override this so a checkpoint is
    /// either fully written or not at all.
    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<(), DomainError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), DomainError> {
        (**self).set(key, value)
    }

    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<(), DomainError> {
        (**self).set_many(entries)
    }
}

/// Full state of all four collections, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub notes: Vec<Note>,
    pub folders: Vec<Folder>,
    pub templates: Vec<Template>,
    pub tags: Vec<String>,
}

impl Snapshot {
    /// Read all collections from `store`.
    ///
    /// Absent keys and keys holding malformed JSON both yield an empty
    /// collection; only backend failures are returned as errors.
    #[instrument(level = "debug", skip(store))]
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self, DomainError> {
        Ok(Self {
            notes: load_collection(store, NOTES_KEY)?,
            folders: load_collection(store, FOLDERS_KEY)?,
            templates: load_collection(store, TEMPLATES_KEY)?,
            tags: load_collection(store, TAGS_KEY)?,
        })
    }

    /// Serialize and write all four collections, overwriting previous snapshots.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), DomainError> {
        let entries = [
            (NOTES_KEY, serde_json::to_string(&self.notes)?),
            (FOLDERS_KEY, serde_json::to_string(&self.folders)?),
            (TEMPLATES_KEY, serde_json::to_string(&self.templates)?),
            (TAGS_KEY, serde_json::to_string(&self.tags)?),
        ];
        store.set_many(&entries)
    }
}

fn load_collection<T, S>(store: &S, key: &str) -> Result<Vec<T>, DomainError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        debug!(key, "No snapshot stored, starting empty");
        return Ok(Vec::new());
    };

    match serde_json::from_str(&raw) {
        Ok(items) => Ok(items),
        Err(e) => {
            warn!(key, error = %e, "Malformed snapshot, starting empty");
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::MockKeyValueStore;

    #[test]
    fn given_empty_store_when_loading_then_all_collections_empty() {
        let store = MockKeyValueStore::builder().build();

        let snapshot = Snapshot::load(&store).expect("Load should succeed");

        assert_eq!(snapshot, Snapshot::default());
    }

    #[test]
    fn given_malformed_notes_when_loading_then_other_keys_still_load() {
        // Arrange
        let store = MockKeyValueStore::builder()
            .with_value(NOTES_KEY, "{not json")
            .with_value(TAGS_KEY, r#"["work","home"]"#)
            .build();

        // Act
        let snapshot = Snapshot::load(&store).expect("Load should succeed");

        // Assert
        assert!(snapshot.notes.is_empty());
        assert_eq!(snapshot.tags, vec!["work".to_string(), "home".to_string()]);
    }

    #[test]
    fn given_snapshot_when_saving_then_writes_all_four_keys() {
        let mut store = MockKeyValueStore::builder().build();
        let snapshot = Snapshot {
            tags: vec!["work".to_string()],
            ..Default::default()
        };

        snapshot.save(&mut store).expect("Save should succeed");

        assert_eq!(store.get(NOTES_KEY).unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get(FOLDERS_KEY).unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get(TEMPLATES_KEY).unwrap().as_deref(), Some("[]"));
        assert_eq!(store.get(TAGS_KEY).unwrap().as_deref(), Some(r#"["work"]"#));
    }

    #[test]
    fn given_failing_backend_when_loading_then_returns_storage_error() {
        let store = MockKeyValueStore::builder().with_failing_reads().build();

        let result = Snapshot::load(&store);

        assert!(matches!(result, Err(DomainError::Storage(_))));
    }
}

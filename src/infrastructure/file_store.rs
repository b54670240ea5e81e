// src/infrastructure/file_store.rs
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, instrument};

use crate::application::KeyValueStore;
use crate::domain::DomainError;

/// One `<key>.json` file per snapshot inside a data directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self, DomainError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| {
            DomainError::Storage(format!(
                "Failed to create data directory {}: {}",
                dir.display(),
                e
            ))
        })?;
        debug!(?dir, "Opened file store");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    #[instrument(level = "trace", skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| DomainError::Storage(format!("Failed to read {}: {}", path.display(), e)))
    }

    /// Writes to a temp file next to the target and renames it into place,
    /// so a crash never leaves a half-written snapshot.
    #[instrument(level = "trace", skip(self, value))]
    fn set(&mut self, key: &str, value: &str) -> Result<(), DomainError> {
        let path = self.path_for(key);
        let mut tmp = NamedTempFile::new_in(&self.dir)
            .map_err(|e| DomainError::Storage(format!("Failed to create temp file: {}", e)))?;
        tmp.write_all(value.as_bytes())
            .map_err(|e| DomainError::Storage(format!("Failed to write snapshot {}: {}", key, e)))?;
        tmp.persist(&path).map_err(|e| {
            DomainError::Storage(format!("Failed to replace {}: {}", path.display(), e))
        })?;
        Ok(())
    }
}

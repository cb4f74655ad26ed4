//! Browser-style local storage: a persistent string-to-string map.
//!
//! The storefront keeps exactly one value here (the session token), but the
//! store is keyed so the file format matches what a browser profile holds.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur reading or writing local storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file could not be read or written.
    #[error("Storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The backing file exists but is not a JSON object of strings.
    #[error("Storage file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Persistent key-value storage scoped to one profile.
pub trait LocalStorage {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

// =============================================================================
// JSON file storage
// =============================================================================

/// Local storage persisted as a JSON object in a single file.
///
/// A missing file is an empty store; the file and its parent directory are
/// created on first write.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Storage backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(items).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(io_err)
    }
}

impl LocalStorage for JsonFileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.read_all()?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)
    }
}

// =============================================================================
// In-memory storage
// =============================================================================

/// Non-persistent storage, used for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
    writes: usize,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set_item` calls so far.
    #[must_use]
    pub const fn write_count(&self) -> usize {
        self.writes
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

//! Persistent key-value storage for the engagement widgets.
//!
//! Widgets never reach for a global store: every operation that reads or
//! writes persisted state takes a `&dyn KeyValueStore` / `&mut dyn
//! KeyValueStore`, so tests substitute [`MemoryStore`] and the binary uses
//! [`FileStore`].
//!
//! ## Keys
//!
//! | Key | Value |
//! |-----|-------|
//! | `comments` | JSON array of strings |
//! | `likeCount` | stringified non-negative integer |
//! | `dislikeCount` | stringified non-negative integer |
//!
//! ## Storage
//!
//! [`FileStore`] keeps the whole map in a single JSON object file and
//! rewrites it on every `set`. A missing or unparsable file loads as an empty
//! store, the same way a fresh browser profile has empty local storage.
//!
//! ## Typed access
//!
//! [`load_json`] and [`save_json`] layer serde on top of the raw string
//! values. A value that fails to parse falls back to the caller's default
//! instead of propagating; corrupt storage never takes down a widget.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Stored user comments.
pub const COMMENTS_KEY: &str = "comments";
/// Stored like counter.
pub const LIKE_COUNT_KEY: &str = "likeCount";
/// Stored dislike counter.
pub const DISLIKE_COUNT_KEY: &str = "dislikeCount";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A string-keyed store of string values.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
}

/// Read `key` and decode it as JSON, falling back to `default` when the key
/// is absent or the stored value does not parse as `T`.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str, default: T) -> T {
    let Some(raw) = store.get(key) else {
        return default;
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "stored value unparsable, using default");
            default
        }
    }
}

/// Encode `value` as JSON and write it under `key`.
pub fn save_json<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, raw)
}

// =============================================================================
// In-memory store
// =============================================================================

/// Non-persistent store. Used by tests and one-shot rendering.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

// =============================================================================
// File-backed store
// =============================================================================

/// Store persisted as one JSON object file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. Returns an empty store if the file doesn't
    /// exist or can't be parsed. Nothing is written until the first `set`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "store file corrupt, starting empty");
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        self.save()
    }
}

//! Durable keyed storage for game snapshots.
//!
//! A [`SnapshotStore`] keeps each saved game as one pretty-printed JSON
//! document, `<dir>/<key>.json`. The directory is an explicit
//! constructor argument; there is no ambient default path.
//!
//! # Example
//!
//! ```ignore
//! let store = SnapshotStore::new("saves");
//! store.save("sunday-match", &game.snapshot())?;
//! let snapshot = store.load("sunday-match")?;
//! let game = Game::from_snapshot(&snapshot)?;
//! ```

use chess_rules::GameSnapshot;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors produced by the snapshot store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Keys are limited to alphanumerics, '-' and '_' so they map
    /// directly onto file names.
    #[error("invalid save key '{0}': use letters, digits, '-' or '_'")]
    InvalidKey(String),

    /// No snapshot is stored under the key.
    #[error("no saved game named '{0}'")]
    NotFound(String),

    #[error("failed to access the save directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("saved game is not readable: {0}")]
    Format(#[from] serde_json::Error),
}

/// A directory of snapshot documents keyed by name.
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    /// Creates a store over the given directory. The directory is
    /// created lazily on the first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        SnapshotStore { dir: dir.into() }
    }

    /// Returns the directory this store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes a snapshot under `key`, replacing any previous save, and
    /// returns the path of the written document.
    pub fn save(&self, key: &str, snapshot: &GameSnapshot) -> Result<PathBuf, StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&path, json)?;
        Ok(path)
    }

    /// Reads the snapshot stored under `key`.
    pub fn load(&self, key: &str) -> Result<GameSnapshot, StoreError> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Err(StoreError::NotFound(key.to_string()));
        }
        let json = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Lists the keys of every stored snapshot, sorted.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }

    /// Deletes the snapshot stored under `key`.
    pub fn delete(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Err(StoreError::NotFound(key.to_string()));
        }
        fs::remove_file(path)?;
        Ok(())
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

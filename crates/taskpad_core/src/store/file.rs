//! Filesystem store backend: one file per key inside a base directory.
//!
//! # Invariants
//! - Keys are restricted to `[a-z0-9_-]` so they map directly to file
//!   names on every platform.
//! - Writes go through a temporary file and an atomic rename, so readers
//!   never observe a partially written record.

use std::fs;
use std::path::{Path, PathBuf};

use log::error;

use super::{PersistentStore, StoreError, StoreResult};

/// Durable store keeping each key as `<base_dir>/<key>.json`.
#[derive(Debug)]
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `base_dir`, creating the directory when
    /// missing.
    pub fn open(base_dir: impl AsRef<Path>) -> StoreResult<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn record_path(&self, key: &str) -> StoreResult<PathBuf> {
        validate_key(key)?;
        Ok(self.base_dir.join(format!("{key}.json")))
    }
}

fn validate_key(key: &str) -> StoreResult<()> {
    let acceptable = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
    if acceptable {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

impl PersistentStore for FileStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let path = self.record_path(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => {
                error!(
                    "event=store_read module=store status=error key={key} error={err}"
                );
                Err(err.into())
            }
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        let path = self.record_path(key)?;
        let staging = self.base_dir.join(format!("{key}.json.tmp"));
        fs::write(&staging, value)?;
        if let Err(err) = fs::rename(&staging, &path) {
            // leave no stale staging file behind before surfacing
            let _ = fs::remove_file(&staging);
            error!(
                "event=store_write module=store status=error key={key} error={err}"
            );
            return Err(err.into());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let path = self.record_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

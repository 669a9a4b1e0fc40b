use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

/// A disk-backed, content-addressed cache of serialized values, keyed by the
/// hashes produced by [`crate::cache_key::cache_key`].
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    /// Opens a cache rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entry_path(key).is_file()
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.entry_path(key);
        if !path.is_file() {
            return Ok(None);
        }
        let bytes = fs::read(path)?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Writes `value` for `key`, atomically: serializes to a sibling
    /// `.tmp` file and renames it into place so a concurrent reader never
    /// observes a partially written entry.
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.entry_path(key);
        let tmp_path = self.root.join(format!("{key}.json.tmp"));
        let bytes = serde_json::to_vec(value)?;
        fs::write(&tmp_path, bytes)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

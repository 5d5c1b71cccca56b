//! String key/value storage backends.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    foundation::error::{SlidesError, SlidesResult},
    foundation::fsio::write_atomic,
};

/// Key/value store holding raw snapshot blobs.
pub trait Storage {
    /// Raw value under `key`, if any.
    fn get_item(&self, key: &str) -> SlidesResult<Option<String>>;
    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> SlidesResult<()>;
    /// Delete `key`; deleting an absent key is not an error.
    fn remove_item(&mut self, key: &str) -> SlidesResult<()>;
}

/// Volatile storage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl MemoryStorage {
    /// Empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> SlidesResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> SlidesResult<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> SlidesResult<()> {
        self.items.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key under a root directory.
///
/// Writes go through a temp file and a rename, so a crash never leaves a torn blob.
#[derive(Clone, Debug)]
pub struct DirStorage {
    root: PathBuf,
}

impl DirStorage {
    /// Open (and create if needed) a storage directory.
    #[tracing::instrument(skip(root))]
    pub fn open(root: impl Into<PathBuf>) -> SlidesResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .with_context(|| format!("create store directory '{}'", root.display()))?;
        tracing::info!(path = %root.display(), "opened directory storage");
        Ok(Self { root })
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> SlidesResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        if !valid {
            return Err(SlidesError::validation(format!(
                "invalid storage key '{key}'"
            )));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl Storage for DirStorage {
    fn get_item(&self, key: &str) -> SlidesResult<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("read '{}'", path.display()))
                .into()),
        }
    }

    #[tracing::instrument(skip(self, value), fields(bytes = value.len()))]
    fn set_item(&mut self, key: &str, value: &str) -> SlidesResult<()> {
        let path = self.path_for(key)?;
        write_atomic(&path, value.as_bytes())?;
        tracing::debug!(path = %path.display(), "stored blob");
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> SlidesResult<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("remove '{}'", path.display()))
                .into()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/persist/storage.rs"]
mod tests;

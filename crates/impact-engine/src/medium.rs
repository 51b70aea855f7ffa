//! Host-provided key-value storage media.
//!
//! The engine stores one JSON document per key. [`MemoryMedium`] keeps
//! everything for the current session only; [`FileMedium`] writes one file
//! per key into a directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use impact_config::StorageConfig;

use crate::error::StorageError;

/// A local persistent key-value medium holding text values.
pub trait KvMedium {
    /// Read the value under `key`, `Ok(None)` if absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the medium cannot be written.
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the medium cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<M: KvMedium + ?Sized> KvMedium for Box<M> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Session-only medium backed by a `HashMap`.
#[derive(Debug, Default, Clone)]
pub struct MemoryMedium {
    entries: HashMap<String, String>,
}

impl MemoryMedium {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvMedium for MemoryMedium {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Directory-backed medium writing `{dir}/{key}.json`.
///
/// Writes go to a temporary sibling file that is then renamed over the
/// target, so a reader never sees a half-written document.
#[derive(Debug, Clone)]
pub struct FileMedium {
    dir: PathBuf,
}

impl FileMedium {
    /// Open a medium rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KvMedium for FileMedium {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Open the medium described by `config`.
///
/// An empty `data_dir` selects [`MemoryMedium`].
///
/// # Errors
///
/// Returns `StorageError` if the file-backed directory cannot be created.
pub fn open_medium(config: &StorageConfig) -> Result<Box<dyn KvMedium>, StorageError> {
    if config.is_persistent() {
        Ok(Box::new(FileMedium::open(&config.data_dir)?))
    } else {
        Ok(Box::new(MemoryMedium::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_medium_set_get_remove() {
        let mut medium = MemoryMedium::new();
        assert_eq!(medium.get("k").unwrap(), None);
        medium.set("k", "v".into()).unwrap();
        assert_eq!(medium.get("k").unwrap().as_deref(), Some("v"));
        medium.remove("k").unwrap();
        assert!(medium.is_empty());
    }

    #[test]
    fn file_medium_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let mut medium = FileMedium::open(dir.path()).unwrap();
        medium.set("research_app_store", "{\"a\":1}".into()).unwrap();

        let reopened = FileMedium::open(dir.path()).unwrap();
        assert_eq!(
            reopened.get("research_app_store").unwrap().as_deref(),
            Some("{\"a\":1}")
        );
        assert!(!dir.path().join("research_app_store.json.tmp").exists());
    }

    #[test]
    fn file_medium_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let mut medium = FileMedium::open(dir.path()).unwrap();
        assert_eq!(medium.get("absent").unwrap(), None);
        medium.remove("absent").unwrap();
    }

    #[test]
    fn file_medium_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut medium = FileMedium::open(dir.path()).unwrap();
        for key in ["../escape", "a/b", "", ".hidden"] {
            assert!(
                matches!(medium.set(key, String::new()), Err(StorageError::InvalidKey(_))),
                "key {key:?} should be rejected"
            );
        }
    }

    #[test]
    fn open_medium_selects_by_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            data_dir: dir.path().join("state").to_string_lossy().into_owned(),
            ..StorageConfig::default()
        };
        let mut medium = open_medium(&config).unwrap();
        medium.set("k", "v".into()).unwrap();
        assert!(dir.path().join("state").join("k.json").exists());

        let mut memory = open_medium(&StorageConfig::default()).unwrap();
        memory.set("k", "v".into()).unwrap();
        assert_eq!(memory.get("k").unwrap().as_deref(), Some("v"));
    }
}

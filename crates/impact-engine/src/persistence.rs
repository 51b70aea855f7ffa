//! Fail-soft, versioned snapshot persistence over a [`KvMedium`].
//!
//! `load` never fails: a missing key, an unreadable medium, or a malformed
//! document all yield the caller's default and a log line. `save` reports
//! success as a `bool` so callers can carry on in memory when the medium is
//! unhealthy.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageError;
use crate::medium::KvMedium;

/// Versioned JSON persistence over a storage medium.
pub struct Persistence<M> {
    medium: M,
    version: String,
    version_key: String,
}

impl<M: KvMedium> Persistence<M> {
    #[must_use]
    pub fn new(medium: M, version: impl Into<String>, version_key: impl Into<String>) -> Self {
        Self {
            medium,
            version: version.into(),
            version_key: version_key.into(),
        }
    }

    /// Serialize `value` as JSON and store it under `key`.
    ///
    /// Returns `false` (after logging) if serialization or the write fails.
    pub fn save<T: Serialize>(&mut self, key: &str, value: &T) -> bool {
        match self.try_save(key, value) {
            Ok(size) => {
                tracing::debug!(key, size, "saved to storage");
                true
            }
            Err(e) => {
                tracing::error!(key, error = %e, "failed to save to storage");
                false
            }
        }
    }

    fn try_save<T: Serialize>(&mut self, key: &str, value: &T) -> Result<usize, StorageError> {
        let serialized = serde_json::to_string(value)?;
        let size = serialized.len();
        self.medium.set(key, serialized)?;
        Ok(size)
    }

    /// Load and deserialize the document under `key`, or return `default`.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.try_load(key) {
            Ok(Some(value)) => {
                tracing::debug!(key, "loaded from storage");
                value
            }
            Ok(None) => {
                tracing::debug!(key, "no data found in storage");
                default
            }
            Err(e) => {
                tracing::error!(key, error = %e, "failed to load from storage; using default");
                default
            }
        }
    }

    fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        self.medium
            .get(key)?
            .map(|raw| serde_json::from_str(&raw))
            .transpose()
            .map_err(StorageError::from)
    }

    /// Remove `key`. Returns `false` (after logging) if the medium refuses.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.medium.remove(key) {
            Ok(()) => {
                tracing::debug!(key, "removed from storage");
                true
            }
            Err(e) => {
                tracing::error!(key, error = %e, "failed to remove from storage");
                false
            }
        }
    }

    /// Compare the stored version tag with the expected one.
    ///
    /// On mismatch the tag is rewritten and `false` is returned. No data
    /// migration happens yet.
    pub fn check_version(&mut self) -> bool {
        let key = self.version_key.clone();
        let stored: String = self.load(&key, "0.0".to_string());
        if stored == self.version {
            return true;
        }
        tracing::info!(
            stored = %stored,
            expected = %self.version,
            "storage version mismatch; rewriting version tag"
        );
        let version = self.version.clone();
        self.save(&key, &version);
        false
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[must_use]
    pub const fn medium(&self) -> &M {
        &self.medium
    }

    pub const fn medium_mut(&mut self) -> &mut M {
        &mut self.medium
    }
}

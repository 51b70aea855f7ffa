//! Persistence configuration.

use serde::{Deserialize, Serialize};

fn default_key_prefix() -> String {
    "research_app_".to_string()
}

fn default_store_key() -> String {
    "change_impact_store".to_string()
}

fn default_version() -> String {
    "1.0".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Namespace prepended to every key written to the storage medium.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,

    /// Key (without prefix) of the change impact store document.
    #[serde(default = "default_store_key")]
    pub store_key: String,

    /// Version tag written next to the store.
    #[serde(default = "default_version")]
    pub version: String,

    /// Directory for the file-backed medium. Empty means session-only memory.
    #[serde(default)]
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key_prefix: default_key_prefix(),
            store_key: default_store_key(),
            version: default_version(),
            data_dir: String::new(),
        }
    }
}

impl StorageConfig {
    /// Fully namespaced key of the store document.
    #[must_use]
    pub fn namespaced_store_key(&self) -> String {
        format!("{}{}", self.key_prefix, self.store_key)
    }

    /// Fully namespaced key of the version tag.
    #[must_use]
    pub fn namespaced_version_key(&self) -> String {
        format!("{}version", self.key_prefix)
    }

    /// Whether a file-backed medium is configured.
    #[must_use]
    pub const fn is_persistent(&self) -> bool {
        !self.data_dir.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespaced_keys() {
        let config = StorageConfig::default();
        assert_eq!(
            config.namespaced_store_key(),
            "research_app_change_impact_store"
        );
        assert_eq!(config.namespaced_version_key(), "research_app_version");
        assert!(!config.is_persistent());
    }
}

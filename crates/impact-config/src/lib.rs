//! # impact-config
//!
//! Layered configuration loading for the change impact engine using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`IMPACT_*` prefix, `__` as separator)
//! 2. Project-level `.impact/config.toml`
//! 3. User-level `~/.config/impact/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `IMPACT_STORAGE__DATA_DIR` -> `storage.data_dir`,
//! `IMPACT_LIMITS__MAX_CHANGES` -> `limits.max_changes`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use impact_config::ImpactConfig;
//!
//! let config = ImpactConfig::load_with_dotenv().expect("config");
//! if config.storage.is_persistent() {
//!     println!("Store lives in {}", config.storage.data_dir);
//! }
//! ```

mod error;
mod general;
mod limits;
mod notifications;
mod storage;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use limits::LimitsConfig;
pub use notifications::NotificationsConfig;
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ImpactConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl ImpactConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".impact/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("IMPACT_").split("__"))
    }

    /// Reject values the engine cannot run with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &str, reason: &str| ConfigError::InvalidValue {
            field: field.to_string(),
            reason: reason.to_string(),
        };

        if self.storage.store_key.trim().is_empty() {
            return Err(invalid("storage.store_key", "must not be empty"));
        }
        if self.limits.max_changes == 0 {
            return Err(invalid("limits.max_changes", "must be at least 1"));
        }
        if self.limits.max_analyses == 0 {
            return Err(invalid("limits.max_analyses", "must be at least 1"));
        }
        if self.general.event_capacity == 0 {
            return Err(invalid("general.event_capacity", "must be at least 1"));
        }
        Ok(())
    }

    /// Replace every value [`Self::validate`] would reject with its default.
    ///
    /// Valid values are kept as they are.
    #[must_use]
    pub fn or_defaults(mut self) -> Self {
        if self.storage.store_key.trim().is_empty() {
            self.storage.store_key = StorageConfig::default().store_key;
        }
        let limits = LimitsConfig::default();
        if self.limits.max_changes == 0 {
            self.limits.max_changes = limits.max_changes;
        }
        if self.limits.max_analyses == 0 {
            self.limits.max_analyses = limits.max_analyses;
        }
        if self.general.event_capacity == 0 {
            self.general.event_capacity = GeneralConfig::default().event_capacity;
        }
        self
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("impact").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ImpactConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.storage.is_persistent());
        assert!(config.notifications.show_in_decision_status);
        assert!(config.notifications.show_in_campaign_generator);
    }

    #[test]
    fn figment_builds_without_files() {
        let config: ImpactConfig = ImpactConfig::figment()
            .extract()
            .expect("should extract defaults");
        assert_eq!(config.limits.max_changes, 100);
        assert_eq!(config.storage.version, "1.0");
    }

    #[test]
    fn zero_caps_are_rejected() {
        let mut config = ImpactConfig::default();
        config.limits.max_analyses = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("limits.max_analyses"));
    }

    #[test]
    fn or_defaults_repairs_only_invalid_values() {
        let mut config = ImpactConfig::default();
        config.storage.store_key = "  ".into();
        config.storage.key_prefix = "brand_".into();
        config.limits.max_changes = 0;
        config.limits.max_analyses = 7;
        config.general.event_capacity = 0;
        assert!(config.validate().is_err());

        let repaired = config.or_defaults();
        assert!(repaired.validate().is_ok());
        assert_eq!(repaired.storage.store_key, "change_impact_store");
        assert_eq!(repaired.storage.key_prefix, "brand_");
        assert_eq!(repaired.limits.max_changes, 100);
        assert_eq!(repaired.limits.max_analyses, 7);
        assert_eq!(repaired.general.event_capacity, 256);
    }
}

//! Bounds on the in-memory logs.

use serde::{Deserialize, Serialize};

const fn default_max_changes() -> usize {
    100
}

const fn default_max_analyses() -> usize {
    100
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LimitsConfig {
    /// Most recent changes kept in the change log.
    #[serde(default = "default_max_changes")]
    pub max_changes: usize,

    /// Most recent analyses kept in the analysis log.
    #[serde(default = "default_max_analyses")]
    pub max_analyses: usize,

    /// Dismissed notifications kept after a dismissal. `0` keeps all of them.
    #[serde(default)]
    pub max_dismissed_notifications: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_changes: default_max_changes(),
            max_analyses: default_max_analyses(),
            max_dismissed_notifications: 0,
        }
    }
}

impl LimitsConfig {
    /// Archive cap for dismissed notifications, if one is configured.
    #[must_use]
    pub const fn dismissed_cap(&self) -> Option<usize> {
        match self.max_dismissed_notifications {
            0 => None,
            n => Some(n),
        }
    }
}

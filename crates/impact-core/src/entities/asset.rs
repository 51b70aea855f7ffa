use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{AssetPriority, AssetStatus, DecisionStatus};

/// Snapshot of a brand asset captured when a change is tracked.
///
/// The asset itself is owned by the host's entity container; the engine only
/// keeps the id and this copy.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssetSnapshot {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Percentage of applicable validation methods completed (0-100).
    #[serde(default)]
    pub research_coverage: Option<u8>,
    #[serde(default)]
    pub status: AssetStatus,
    #[serde(default)]
    pub priority: Option<AssetPriority>,
}

impl AssetSnapshot {
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: String::new(),
            research_coverage: None,
            status: AssetStatus::default(),
            priority: None,
        }
    }

    #[must_use]
    pub const fn with_coverage(mut self, coverage: u8) -> Self {
        self.research_coverage = Some(coverage);
        self
    }

    #[must_use]
    pub const fn with_status(mut self, status: AssetStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub const fn with_priority(mut self, priority: AssetPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Coverage with a missing value read as 0.
    #[must_use]
    pub fn coverage(&self) -> u8 {
        self.research_coverage.unwrap_or(0)
    }

    #[must_use]
    pub fn decision_status(&self) -> DecisionStatus {
        DecisionStatus::from_coverage(self.research_coverage)
    }

    /// Validated essential assets are flagged as possibly relevant to personas.
    #[must_use]
    pub fn is_persona_relevant(&self) -> bool {
        self.status == AssetStatus::Validated && self.priority == Some(AssetPriority::Essential)
    }
}

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::AssetSnapshot;
use crate::enums::ChangeType;
use crate::ids::{PREFIX_CHANGE, generate_id};

/// One tracked mutation of a brand asset. Never modified after creation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssetChange {
    pub id: String,
    /// Weak reference to the asset; the engine does not own it.
    pub asset_id: String,
    pub asset_title: String,
    pub change_type: ChangeType,
    pub timestamp: DateTime<Utc>,
    pub description: String,

    #[serde(default)]
    pub field_changed: Option<String>,
    #[serde(default)]
    pub old_value: Option<Value>,
    #[serde(default)]
    pub new_value: Option<Value>,

    #[serde(default)]
    pub research_added: bool,
    #[serde(default)]
    pub research_method_type: Option<String>,
    #[serde(default)]
    pub coverage_before: Option<u8>,
    #[serde(default)]
    pub coverage_after: Option<u8>,
}

impl AssetChange {
    /// Build the change record for a mutation of `current`.
    ///
    /// An empty `description` is replaced by [`describe_change`]. The first
    /// differing snapshot field, if any, is recorded in `field_changed`.
    #[must_use]
    pub fn record(
        current: &AssetSnapshot,
        previous: Option<&AssetSnapshot>,
        change_type: ChangeType,
        description: &str,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let description = if description.trim().is_empty() {
            describe_change(change_type, current, previous)
        } else {
            description.to_string()
        };
        let diff = previous.and_then(|prev| diff_snapshots(prev, current));

        Self {
            id: generate_id(PREFIX_CHANGE),
            asset_id: current.id.clone(),
            asset_title: current.title.clone(),
            change_type,
            timestamp,
            description,
            field_changed: diff.as_ref().map(|d| d.field.clone()),
            old_value: diff.as_ref().map(|d| d.old_value.clone()),
            new_value: diff.map(|d| d.new_value),
            research_added: change_type == ChangeType::ResearchAdded,
            research_method_type: None,
            coverage_before: previous.and_then(|p| p.research_coverage),
            coverage_after: current.research_coverage,
        }
    }

    /// Attach the research method that produced a `research-added` change.
    #[must_use]
    pub fn with_research_method(mut self, method: impl Into<String>) -> Self {
        self.research_method_type = Some(method.into());
        self
    }
}

/// The first field that differs between two snapshots of the same asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDiff {
    pub field: String,
    pub old_value: Value,
    pub new_value: Value,
}

/// Compare two snapshots field by field.
///
/// Fields are checked in the order content, title, status, researchCoverage,
/// priority; the first difference wins. Returns `None` when nothing the
/// snapshot tracks has changed.
#[must_use]
pub fn diff_snapshots(previous: &AssetSnapshot, current: &AssetSnapshot) -> Option<FieldDiff> {
    let diff = |field: &str, old_value: Value, new_value: Value| FieldDiff {
        field: field.to_string(),
        old_value,
        new_value,
    };

    if previous.content != current.content {
        return Some(diff(
            "content",
            Value::from(previous.content.as_str()),
            Value::from(current.content.as_str()),
        ));
    }
    if previous.title != current.title {
        return Some(diff(
            "title",
            Value::from(previous.title.as_str()),
            Value::from(current.title.as_str()),
        ));
    }
    if previous.status != current.status {
        return Some(diff(
            "status",
            Value::from(previous.status.as_str()),
            Value::from(current.status.as_str()),
        ));
    }
    if previous.research_coverage != current.research_coverage {
        return Some(diff(
            "researchCoverage",
            previous.research_coverage.map_or(Value::Null, Value::from),
            current.research_coverage.map_or(Value::Null, Value::from),
        ));
    }
    if previous.priority != current.priority {
        return Some(diff(
            "priority",
            previous.priority.map_or(Value::Null, |p| Value::from(p.as_str())),
            current.priority.map_or(Value::Null, |p| Value::from(p.as_str())),
        ));
    }
    None
}

/// Default description used when the entity container supplies none.
#[must_use]
pub fn describe_change(
    change_type: ChangeType,
    current: &AssetSnapshot,
    previous: Option<&AssetSnapshot>,
) -> String {
    match change_type {
        ChangeType::ResearchAdded => "New research added".to_string(),
        ChangeType::Validation => "Asset validated".to_string(),
        ChangeType::StatusChange => format!("Status changed to {}", current.status),
        ChangeType::ContentUpdate => match previous {
            Some(prev) if prev.content != current.content => "Content updated".to_string(),
            Some(prev) if prev.title != current.title => "Title changed".to_string(),
            _ => "Asset updated".to_string(),
        },
    }
}

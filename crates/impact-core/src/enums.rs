//! Tag enums for changes, decision status, impact levels, and notifications.
//!
//! All enums use kebab-case serialization via `#[serde(rename_all = "kebab-case")]`
//! so the persisted document carries the same tags the host application uses.
//! `NotificationState` provides `allowed_next_states()` to describe the
//! notification lifecycle.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ChangeType
// ---------------------------------------------------------------------------

/// What kind of mutation an entity container reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeType {
    ContentUpdate,
    ResearchAdded,
    Validation,
    StatusChange,
}

impl ChangeType {
    /// Whether this kind of change triggers decision-status recomputation.
    ///
    /// `StatusChange` refers to the asset's workflow status, not its decision
    /// status, and is excluded along with plain content edits.
    #[must_use]
    pub const fn recomputes_decision_status(self) -> bool {
        matches!(self, Self::ResearchAdded | Self::Validation)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ContentUpdate => "content-update",
            Self::ResearchAdded => "research-added",
            Self::Validation => "validation",
            Self::StatusChange => "status-change",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// DecisionStatus
// ---------------------------------------------------------------------------

/// Coverage at or above which a decision is safe.
pub const SAFE_COVERAGE: u8 = 80;

/// Coverage at or above which a decision is at risk rather than blocked.
pub const AT_RISK_COVERAGE: u8 = 50;

/// Decision readiness derived from research coverage.
///
/// ```text
/// coverage <  50  → blocked
/// 50 ≤ coverage < 80 → at-risk
/// coverage ≥  80  → safe
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DecisionStatus {
    Safe,
    AtRisk,
    Blocked,
}

impl DecisionStatus {
    /// Derive the status from a coverage percentage. Missing coverage counts as 0.
    #[must_use]
    pub fn from_coverage(coverage: Option<u8>) -> Self {
        match coverage.unwrap_or(0) {
            c if c >= SAFE_COVERAGE => Self::Safe,
            c if c >= AT_RISK_COVERAGE => Self::AtRisk,
            _ => Self::Blocked,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::AtRisk => "at-risk",
            Self::Blocked => "blocked",
        }
    }

    /// Phrase used in human-readable summaries.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Safe => "safe to decide",
            Self::AtRisk => "decision at risk",
            Self::Blocked => "blocked",
        }
    }
}

impl fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ImpactLevel
// ---------------------------------------------------------------------------

/// Severity of a tracked change's consequence for decision status.
///
/// Variants are ordered by severity, so `ImpactLevel::High > ImpactLevel::Low`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum ImpactLevel {
    None,
    Low,
    Medium,
    High,
}

impl ImpactLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Whether a change at this level warrants a notification.
    #[must_use]
    pub const fn is_notifiable(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AssetStatus
// ---------------------------------------------------------------------------

/// Workflow status of a brand asset, owned by the entity container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AssetStatus {
    #[default]
    AwaitingResearch,
    InDevelopment,
    ReadyToValidate,
    Validated,
}

impl AssetStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AwaitingResearch => "awaiting-research",
            Self::InDevelopment => "in-development",
            Self::ReadyToValidate => "ready-to-validate",
            Self::Validated => "validated",
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AssetPriority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AssetPriority {
    Essential,
    Recommended,
    NiceToHave,
}

impl AssetPriority {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Essential => "essential",
            Self::Recommended => "recommended",
            Self::NiceToHave => "nice-to-have",
        }
    }
}

impl fmt::Display for AssetPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// NotificationLocation
// ---------------------------------------------------------------------------

/// UI surface a notification may render in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationLocation {
    DecisionStatus,
    CampaignGenerator,
}

impl NotificationLocation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DecisionStatus => "decision-status",
            Self::CampaignGenerator => "campaign-generator",
        }
    }
}

impl fmt::Display for NotificationLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// NotificationState
// ---------------------------------------------------------------------------

/// Lifecycle state of a notification, derived from its `seen`/`dismissed` flags.
///
/// ```text
/// created → seen → dismissed
///         → dismissed
/// ```
///
/// Dismissing without seeing first is permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationState {
    Created,
    Seen,
    Dismissed,
}

impl NotificationState {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Created => &[Self::Seen, Self::Dismissed],
            Self::Seen => &[Self::Dismissed],
            Self::Dismissed => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Dismissed)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Seen => "seen",
            Self::Dismissed => "dismissed",
        }
    }
}

impl fmt::Display for NotificationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

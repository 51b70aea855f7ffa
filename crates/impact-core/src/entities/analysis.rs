use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::AssetChange;
use crate::enums::{DecisionStatus, ImpactLevel};

/// How a change affected the decision status of its asset.
///
/// Only ever embedded in an [`ImpactAnalysis`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DecisionImpact {
    pub decision_status_changed: bool,
    /// `None` when the status was not recomputed or no previous snapshot existed.
    #[serde(default)]
    pub previous_status: Option<DecisionStatus>,
    /// `None` when the status was not recomputed.
    #[serde(default)]
    pub new_status: Option<DecisionStatus>,
    #[serde(default)]
    pub affected_assets: Vec<String>,
    pub impact_level: ImpactLevel,
    pub summary: String,
}

impl DecisionImpact {
    /// An impact for a change that did not trigger recomputation.
    #[must_use]
    pub fn unchanged(summary: impl Into<String>) -> Self {
        Self {
            decision_status_changed: false,
            previous_status: None,
            new_status: None,
            affected_assets: Vec::new(),
            impact_level: ImpactLevel::None,
            summary: summary.into(),
        }
    }
}

/// Whether a downstream campaign has newer strategic input available.
///
/// Derived on demand, never persisted on its own.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CampaignImpact {
    pub campaign_id: String,
    pub has_newer_input: bool,
    pub affected_assets: Vec<String>,
    pub recalculation_suggested: bool,
    pub summary: String,
}

/// The analysis of one tracked change.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImpactAnalysis {
    pub change: AssetChange,
    pub decision_impact: DecisionImpact,
    /// Empty at creation; see [`ImpactAnalysis::with_campaign_impacts`].
    #[serde(default)]
    pub campaign_impacts: Vec<CampaignImpact>,
    /// Advisory only. Personas are never edited on the basis of this list.
    #[serde(default)]
    pub affected_personas: Vec<String>,
    pub persona_note: String,
    pub research_priority_note: String,
    pub analyzed_at: DateTime<Utc>,
}

impl ImpactAnalysis {
    #[must_use]
    pub fn asset_id(&self) -> &str {
        &self.change.asset_id
    }

    #[must_use]
    pub const fn impact_level(&self) -> ImpactLevel {
        self.decision_impact.impact_level
    }

    /// A change carries newer input for consumers when it moved the decision
    /// status or added research.
    #[must_use]
    pub const fn has_newer_input(&self) -> bool {
        self.decision_impact.decision_status_changed || self.change.research_added
    }

    /// Return a copy with campaign impacts attached. The original is untouched.
    #[must_use]
    pub fn with_campaign_impacts(&self, impacts: Vec<CampaignImpact>) -> Self {
        Self {
            campaign_impacts: impacts,
            ..self.clone()
        }
    }
}

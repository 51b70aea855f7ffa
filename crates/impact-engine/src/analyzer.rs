//! Impact analysis of a single tracked change.
//!
//! Everything here is a total function of its inputs: the same change and
//! snapshots always yield the same decision impact and the same summary
//! text. Nothing in this module edits personas or campaigns; the persona
//! list is advisory.

use chrono::{DateTime, Utc};

use impact_core::entities::{AssetChange, AssetSnapshot, DecisionImpact, ImpactAnalysis};
use impact_core::enums::{AT_RISK_COVERAGE, ChangeType, DecisionStatus, ImpactLevel};

/// Marker placed in `affected_personas` for validated essential assets.
pub const ALL_PERSONAS: &str = "all-personas";

/// Analyze `change`, stamping the analysis with the current time.
#[must_use]
pub fn analyze(
    change: &AssetChange,
    current: &AssetSnapshot,
    previous: Option<&AssetSnapshot>,
) -> ImpactAnalysis {
    analyze_at(change, current, previous, Utc::now())
}

/// Analyze `change` with an explicit analysis timestamp.
#[must_use]
pub fn analyze_at(
    change: &AssetChange,
    current: &AssetSnapshot,
    previous: Option<&AssetSnapshot>,
    analyzed_at: DateTime<Utc>,
) -> ImpactAnalysis {
    tracing::debug!(change_id = %change.id, asset_id = %current.id, "analyzing change impact");

    let decision_impact = decision_impact(change, current, previous);
    let affected_personas = affected_personas(current);
    let persona_note = persona_note(affected_personas.len());
    let research_priority_note = research_priority_note(change);

    ImpactAnalysis {
        change: change.clone(),
        decision_impact,
        campaign_impacts: Vec::new(),
        affected_personas,
        persona_note,
        research_priority_note,
        analyzed_at,
    }
}

/// Compute how `change` moved the decision status of `current`.
///
/// Only `research-added` and `validation` changes recompute the status. A
/// missing previous snapshot has no status, so any recomputed status counts
/// as a transition.
#[must_use]
pub fn decision_impact(
    change: &AssetChange,
    current: &AssetSnapshot,
    previous: Option<&AssetSnapshot>,
) -> DecisionImpact {
    if !change.change_type.recomputes_decision_status() {
        return DecisionImpact::unchanged(unrecomputed_summary(change.change_type));
    }

    let previous_status = previous.map(AssetSnapshot::decision_status);
    let new_status = current.decision_status();
    let changed = previous_status != Some(new_status);

    DecisionImpact {
        decision_status_changed: changed,
        previous_status,
        new_status: Some(new_status),
        affected_assets: vec![current.id.clone()],
        impact_level: classify(change.change_type, previous_status, new_status),
        summary: decision_summary(change.change_type, previous_status, new_status, current),
    }
}

/// Classify the severity of a recomputed status.
///
/// | transition | level |
/// |---|---|
/// | into `safe` or into `blocked` | high |
/// | any other status change | medium |
/// | unchanged, research added | low |
/// | unchanged otherwise | none |
#[must_use]
pub fn classify(
    change_type: ChangeType,
    previous: Option<DecisionStatus>,
    new: DecisionStatus,
) -> ImpactLevel {
    if previous == Some(new) {
        return if change_type == ChangeType::ResearchAdded {
            ImpactLevel::Low
        } else {
            ImpactLevel::None
        };
    }
    match new {
        DecisionStatus::Safe | DecisionStatus::Blocked => ImpactLevel::High,
        DecisionStatus::AtRisk => ImpactLevel::Medium,
    }
}

/// Human-readable summary of a recomputed status.
#[must_use]
pub fn decision_summary(
    change_type: ChangeType,
    previous: Option<DecisionStatus>,
    new: DecisionStatus,
    asset: &AssetSnapshot,
) -> String {
    let title = &asset.title;
    let coverage = asset.coverage();

    if previous == Some(new) {
        return if change_type == ChangeType::ResearchAdded {
            format!(
                "Research added to \"{title}\". Decision status remains {} ({coverage}% coverage).",
                new.label()
            )
        } else {
            format!("Update to \"{title}\" without impact on decision status.")
        };
    }

    match new {
        DecisionStatus::Safe => {
            format!("✓ \"{title}\" is now safe to decide ({coverage}% research coverage reached).")
        }
        DecisionStatus::Blocked => format!(
            "⚠ \"{title}\" is now blocked for decisions ({coverage}% coverage, minimum {AT_RISK_COVERAGE}% required)."
        ),
        DecisionStatus::AtRisk => format!(
            "\"{title}\" status changed to {} ({coverage}% coverage).",
            new.label()
        ),
    }
}

fn unrecomputed_summary(change_type: ChangeType) -> &'static str {
    match change_type {
        ChangeType::StatusChange => {
            "Workflow status change without new research. Decision status remains unchanged."
        }
        _ => "Content update without new research. Decision status remains unchanged.",
    }
}

fn affected_personas(asset: &AssetSnapshot) -> Vec<String> {
    if asset.is_persona_relevant() {
        vec![ALL_PERSONAS.to_string()]
    } else {
        Vec::new()
    }
}

fn persona_note(affected: usize) -> String {
    if affected > 0 {
        format!(
            "This change may be relevant to {affected} persona group(s). Check manually whether updates are needed."
        )
    } else {
        "This change likely has no direct impact on existing personas.".to_string()
    }
}

fn research_priority_note(change: &AssetChange) -> String {
    if change.research_added {
        "New research added. Consider whether research priorities need adjusting.".to_string()
    } else {
        "No new research input. Research priorities remain unchanged.".to_string()
    }
}

//! Text renderers for impact analyses. No side effects.

use serde::{Deserialize, Serialize};

use impact_core::entities::ImpactAnalysis;
use impact_core::enums::{DecisionStatus, ImpactLevel};

/// A titled, sectioned summary for tooltips and modals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedSummary {
    pub title: String,
    pub sections: Vec<SummarySection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarySection {
    pub label: String,
    pub content: String,
}

impl SummarySection {
    fn new(label: &str, content: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            content: content.into(),
        }
    }
}

/// One-line summary for badges and lists.
#[must_use]
pub fn format_short_summary(analysis: &ImpactAnalysis) -> String {
    let impact = &analysis.decision_impact;
    let title = &analysis.change.asset_title;

    if impact.impact_level == ImpactLevel::None {
        return "Content update - no impact on decisions".to_string();
    }
    if impact.impact_level == ImpactLevel::High && impact.new_status == Some(DecisionStatus::Safe) {
        return format!("✓ {title} is now safe to decide");
    }
    if analysis.change.research_added {
        return format!("New research added to {title}");
    }
    impact.summary.clone()
}

/// Multi-section summary. Persona and research sections appear only when relevant.
#[must_use]
pub fn format_detailed_summary(analysis: &ImpactAnalysis) -> DetailedSummary {
    let change = &analysis.change;
    let impact = &analysis.decision_impact;

    let mut sections = vec![
        SummarySection::new("What changed?", change.description.as_str()),
        SummarySection::new("Impact on decisions", impact.summary.as_str()),
    ];
    if impact.impact_level != ImpactLevel::None {
        sections.push(SummarySection::new("Personas", analysis.persona_note.as_str()));
    }
    if change.research_added {
        sections.push(SummarySection::new(
            "Research priorities",
            analysis.research_priority_note.as_str(),
        ));
    }

    DetailedSummary {
        title: format!("Change: {}", change.asset_title),
        sections,
    }
}

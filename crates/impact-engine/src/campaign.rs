//! Read-only staleness checks for downstream campaigns.

use impact_core::entities::{CampaignImpact, ChangeImpactStore, ImpactAnalysis};

/// Analyses in `store` that give `selected_assets` newer input, mapped to
/// campaign impacts in store order (most recent first).
///
/// An analysis qualifies when its asset is selected and it either moved the
/// decision status or added research. Neither the store nor the campaign is
/// modified.
#[must_use]
pub fn check_campaign_impacts(
    store: &ChangeImpactStore,
    campaign_id: &str,
    selected_assets: &[String],
) -> Vec<CampaignImpact> {
    if selected_assets.is_empty() {
        return Vec::new();
    }

    store
        .impact_analyses
        .iter()
        .filter(|analysis| selected_assets.iter().any(|id| id == analysis.asset_id()))
        .filter(|analysis| analysis.has_newer_input())
        .map(|analysis| campaign_impact(analysis, campaign_id))
        .collect()
}

/// Describe what one analysis means for one campaign.
#[must_use]
pub fn campaign_impact(analysis: &ImpactAnalysis, campaign_id: &str) -> CampaignImpact {
    let has_newer_input = analysis.has_newer_input();
    let title = &analysis.change.asset_title;
    let summary = if has_newer_input {
        format!("Newer strategic input available for \"{title}\". Consider recalculating.")
    } else {
        format!("Asset \"{title}\" updated, but no impact on strategy.")
    };

    CampaignImpact {
        campaign_id: campaign_id.to_string(),
        has_newer_input,
        affected_assets: vec![analysis.asset_id().to_string()],
        recalculation_suggested: has_newer_input,
        summary,
    }
}

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{AssetChange, ChangeNotification, ImpactAnalysis};
use crate::enums::NotificationLocation;
use crate::ids::{PREFIX_NOTIFICATION, generate_id};

/// Default cap on the change log.
pub const DEFAULT_MAX_CHANGES: usize = 100;

/// Default cap on the analysis log.
pub const DEFAULT_MAX_ANALYSES: usize = 100;

/// Aggregate root owning every change, analysis, and notification.
///
/// `changes` and `impact_analyses` are most-recent-first and bounded by the
/// caps passed to the append methods; the oldest entries are evicted first.
/// `notifications` is most-recent-first and unbounded unless the caller
/// trims dismissed entries with [`ChangeImpactStore::trim_dismissed`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChangeImpactStore {
    #[serde(default)]
    pub changes: Vec<AssetChange>,
    #[serde(default)]
    pub impact_analyses: Vec<ImpactAnalysis>,
    #[serde(default)]
    pub notifications: Vec<ChangeNotification>,
    pub last_analyzed_at: DateTime<Utc>,
}

impl Default for ChangeImpactStore {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl ChangeImpactStore {
    #[must_use]
    pub const fn new(last_analyzed_at: DateTime<Utc>) -> Self {
        Self {
            changes: Vec::new(),
            impact_analyses: Vec::new(),
            notifications: Vec::new(),
            last_analyzed_at,
        }
    }

    /// Prepend a change, keeping at most `cap` entries.
    pub fn append_change(&mut self, change: AssetChange, cap: usize) {
        self.changes.insert(0, change);
        self.changes.truncate(cap);
    }

    /// Prepend an analysis, keeping at most `cap` entries.
    pub fn append_analysis(&mut self, analysis: ImpactAnalysis, cap: usize) {
        self.analyzed_at(analysis.analyzed_at);
        self.impact_analyses.insert(0, analysis);
        self.impact_analyses.truncate(cap);
    }

    /// Prepend a notification, re-issuing its id if another notification
    /// already holds it.
    pub fn push_notification(&mut self, mut notification: ChangeNotification) {
        while self.notification(&notification.id).is_some() {
            notification.id = generate_id(PREFIX_NOTIFICATION);
        }
        self.notifications.insert(0, notification);
    }

    fn analyzed_at(&mut self, at: DateTime<Utc>) {
        if at > self.last_analyzed_at {
            self.last_analyzed_at = at;
        }
    }

    /// Most recently appended analysis for `asset_id`.
    #[must_use]
    pub fn latest_impact_for_asset(&self, asset_id: &str) -> Option<&ImpactAnalysis> {
        self.impact_analyses
            .iter()
            .find(|analysis| analysis.asset_id() == asset_id)
    }

    /// Most recently appended change for `asset_id`.
    #[must_use]
    pub fn latest_change_for_asset(&self, asset_id: &str) -> Option<&AssetChange> {
        self.changes.iter().find(|change| change.asset_id == asset_id)
    }

    #[must_use]
    pub fn notification(&self, id: &str) -> Option<&ChangeNotification> {
        self.notifications.iter().find(|n| n.id == id)
    }

    pub fn notification_mut(&mut self, id: &str) -> Option<&mut ChangeNotification> {
        self.notifications.iter_mut().find(|n| n.id == id)
    }

    /// Undismissed notifications, optionally restricted to one location.
    pub fn visible_notifications(
        &self,
        location: Option<NotificationLocation>,
    ) -> impl Iterator<Item = &ChangeNotification> {
        self.notifications
            .iter()
            .filter(move |n| n.is_visible(location))
    }

    /// Drop the earliest-dismissed notifications so that at most `keep` remain.
    ///
    /// Age is the `acknowledged_at` time; a dismissed notification without one
    /// counts as oldest. Undismissed notifications are never removed. Returns
    /// how many were dropped.
    pub fn trim_dismissed(&mut self, keep: usize) -> usize {
        let mut dismissed: Vec<(Option<DateTime<Utc>>, String)> = self
            .notifications
            .iter()
            .filter(|n| n.dismissed)
            .map(|n| (n.acknowledged_at, n.id.clone()))
            .collect();
        if dismissed.len() <= keep {
            return 0;
        }
        dismissed.sort_by(|a, b| b.0.cmp(&a.0));
        let kept: HashSet<String> = dismissed.into_iter().take(keep).map(|(_, id)| id).collect();

        let before = self.notifications.len();
        self.notifications
            .retain(|n| !n.dismissed || kept.contains(&n.id));
        before - self.notifications.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{AssetSnapshot, DecisionImpact};
    use crate::enums::ChangeType;
    use pretty_assertions::assert_eq;

    fn change(asset_id: &str, description: &str) -> AssetChange {
        let asset = AssetSnapshot::new(asset_id, "Asset");
        AssetChange::record(&asset, None, ChangeType::ContentUpdate, description, Utc::now())
    }

    fn analysis(asset_id: &str, description: &str) -> ImpactAnalysis {
        ImpactAnalysis {
            change: change(asset_id, description),
            decision_impact: DecisionImpact::unchanged("no impact"),
            campaign_impacts: Vec::new(),
            affected_personas: Vec::new(),
            persona_note: String::new(),
            research_priority_note: String::new(),
            analyzed_at: Utc::now(),
        }
    }

    #[test]
    fn append_change_keeps_most_recent_first_and_caps() {
        let mut store = ChangeImpactStore::default();
        for i in 0..150 {
            store.append_change(change("ast-1", &format!("change {i}")), DEFAULT_MAX_CHANGES);
        }

        assert_eq!(store.changes.len(), 100);
        assert_eq!(store.changes[0].description, "change 149");
        assert_eq!(store.changes[99].description, "change 50");
        let expected: Vec<String> = (50..150).rev().map(|i| format!("change {i}")).collect();
        let actual: Vec<String> = store.changes.iter().map(|c| c.description.clone()).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn latest_impact_returns_most_recent_for_asset() {
        let mut store = ChangeImpactStore::default();
        store.append_analysis(analysis("ast-1", "first"), DEFAULT_MAX_ANALYSES);
        store.append_analysis(analysis("ast-2", "other"), DEFAULT_MAX_ANALYSES);
        store.append_analysis(analysis("ast-1", "second"), DEFAULT_MAX_ANALYSES);

        let latest = store.latest_impact_for_asset("ast-1").unwrap();
        assert_eq!(latest.change.description, "second");
        assert!(store.latest_impact_for_asset("ast-missing").is_none());
    }

    #[test]
    fn append_analysis_advances_last_analyzed_at() {
        let mut store = ChangeImpactStore::new(DateTime::<Utc>::MIN_UTC);
        let a = analysis("ast-1", "first");
        let at = a.analyzed_at;
        store.append_analysis(a, DEFAULT_MAX_ANALYSES);
        assert_eq!(store.last_analyzed_at, at);
    }

    #[test]
    fn latest_change_returns_most_recent_for_asset() {
        let mut store = ChangeImpactStore::default();
        store.append_change(change("ast-1", "first"), DEFAULT_MAX_CHANGES);
        store.append_change(change("ast-2", "other"), DEFAULT_MAX_CHANGES);
        store.append_change(change("ast-1", "second"), DEFAULT_MAX_CHANGES);

        let latest = store.latest_change_for_asset("ast-1").unwrap();
        assert_eq!(latest.description, "second");
        assert_eq!(store.latest_change_for_asset("ast-2").unwrap().description, "other");
        assert!(store.latest_change_for_asset("ast-missing").is_none());
    }

    #[test]
    fn push_notification_reissues_duplicate_id() {
        let mut store = ChangeImpactStore::default();
        let first = ChangeNotification::new(analysis("ast-1", "a"), true, true);
        let mut second = ChangeNotification::new(analysis("ast-2", "b"), true, true);
        second.id.clone_from(&first.id);

        store.push_notification(first.clone());
        store.push_notification(second);

        assert_eq!(store.notifications.len(), 2);
        assert_eq!(store.notifications[1].id, first.id);
        assert_ne!(store.notifications[0].id, first.id);
        assert!(crate::ids::has_prefix(&store.notifications[0].id, PREFIX_NOTIFICATION));
        assert_eq!(
            store.notification(&first.id).unwrap().impact_analysis.change.asset_id,
            "ast-1"
        );
    }

    fn descriptions(store: &ChangeImpactStore) -> Vec<&str> {
        store
            .notifications
            .iter()
            .map(|n| n.impact_analysis.change.description.as_str())
            .collect()
    }

    #[test]
    fn trim_dismissed_keeps_latest_dismissals_and_all_undismissed() {
        let start = Utc::now();
        let mut store = ChangeImpactStore::default();
        for i in 0..5 {
            let mut n = ChangeNotification::new(analysis("ast-1", &format!("n{i}")), true, true);
            if i % 2 == 0 {
                n.dismiss(start + chrono::Duration::seconds(i));
            }
            store.push_notification(n);
        }
        // Order (newest first): n4(d) n3 n2(d) n1 n0(d)
        let dropped = store.trim_dismissed(1);
        assert_eq!(dropped, 2);
        assert_eq!(descriptions(&store), vec!["n4", "n3", "n1"]);
        assert_eq!(store.trim_dismissed(1), 0);
    }

    #[test]
    fn trim_dismissed_orders_by_acknowledgement_not_creation() {
        let start = Utc::now();
        let mut store = ChangeImpactStore::default();
        store.push_notification(ChangeNotification::new(analysis("ast-1", "old"), true, true));
        store.push_notification(ChangeNotification::new(analysis("ast-2", "new"), true, true));
        let old_id = store.notifications[1].id.clone();
        let new_id = store.notifications[0].id.clone();

        store.notification_mut(&new_id).unwrap().dismiss(start);
        store
            .notification_mut(&old_id)
            .unwrap()
            .dismiss(start + chrono::Duration::seconds(1));

        assert_eq!(store.trim_dismissed(1), 1);
        assert_eq!(descriptions(&store), vec!["old"]);
    }
}

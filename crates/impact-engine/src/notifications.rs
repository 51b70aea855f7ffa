//! Notification creation and seen/dismissed lifecycle.
//!
//! Notifications are never edited beyond their `seen`, `dismissed`, and
//! `acknowledged_at` fields. They are only removed by the optional
//! dismissed-notification archive cap.

use chrono::{DateTime, Utc};

use impact_core::entities::{ChangeImpactStore, ChangeNotification, ImpactAnalysis};
use impact_core::enums::NotificationLocation;

/// Build the notification for `analysis`, or `None` when it has no impact.
#[must_use]
pub fn create(
    analysis: &ImpactAnalysis,
    show_in_decision_status: bool,
    show_in_campaign_generator: bool,
) -> Option<ChangeNotification> {
    if !analysis.impact_level().is_notifiable() {
        return None;
    }
    let notification = ChangeNotification::new(
        analysis.clone(),
        show_in_decision_status,
        show_in_campaign_generator,
    );
    tracing::debug!(
        notification_id = %notification.id,
        asset_id = %analysis.asset_id(),
        impact = %analysis.impact_level(),
        "notification created"
    );
    Some(notification)
}

/// Undismissed notifications, newest first, optionally for one location.
#[must_use]
pub fn list(
    store: &ChangeImpactStore,
    location: Option<NotificationLocation>,
) -> Vec<ChangeNotification> {
    store.visible_notifications(location).cloned().collect()
}

/// Undismissed notifications not yet seen.
#[must_use]
pub fn unseen_count(store: &ChangeImpactStore, location: Option<NotificationLocation>) -> usize {
    store
        .visible_notifications(location)
        .filter(|n| !n.seen)
        .count()
}

/// Mark one notification seen. Returns whether anything changed.
pub fn mark_seen(store: &mut ChangeImpactStore, id: &str) -> bool {
    match store.notification_mut(id) {
        Some(notification) => notification.mark_seen(),
        None => {
            tracing::debug!(notification_id = id, "mark_seen on unknown notification ignored");
            false
        }
    }
}

/// Mark every visible notification seen. Returns the ids that changed.
pub fn mark_all_seen(
    store: &mut ChangeImpactStore,
    location: Option<NotificationLocation>,
) -> Vec<String> {
    store
        .notifications
        .iter_mut()
        .filter(|n| n.is_visible(location))
        .filter_map(|n| n.mark_seen().then(|| n.id.clone()))
        .collect()
}

/// Dismiss one notification, seen or not. Returns whether anything changed.
///
/// When `archive_cap` is set, the earliest-dismissed notifications beyond the
/// cap are dropped afterwards.
pub fn dismiss(
    store: &mut ChangeImpactStore,
    id: &str,
    at: DateTime<Utc>,
    archive_cap: Option<usize>,
) -> bool {
    let changed = match store.notification_mut(id) {
        Some(notification) => notification.dismiss(at),
        None => {
            tracing::debug!(notification_id = id, "dismiss on unknown notification ignored");
            false
        }
    };

    if changed {
        if let Some(cap) = archive_cap {
            let dropped = store.trim_dismissed(cap);
            if dropped > 0 {
                tracing::debug!(dropped, cap, "archived dismissed notifications");
            }
        }
    }
    changed
}

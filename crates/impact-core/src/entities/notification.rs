use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::ImpactAnalysis;
use crate::enums::{NotificationLocation, NotificationState};
use crate::errors::CoreError;
use crate::ids::{PREFIX_NOTIFICATION, generate_id};

/// User-facing notice derived from one non-trivial impact analysis.
///
/// Only `seen`, `dismissed`, and `acknowledged_at` change after creation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChangeNotification {
    pub id: String,
    pub impact_analysis: ImpactAnalysis,
    pub seen: bool,
    pub dismissed: bool,
    #[serde(default)]
    pub acknowledged_at: Option<DateTime<Utc>>,
    pub show_in_decision_status: bool,
    pub show_in_campaign_generator: bool,
}

impl ChangeNotification {
    #[must_use]
    pub fn new(
        impact_analysis: ImpactAnalysis,
        show_in_decision_status: bool,
        show_in_campaign_generator: bool,
    ) -> Self {
        Self {
            id: generate_id(PREFIX_NOTIFICATION),
            impact_analysis,
            seen: false,
            dismissed: false,
            acknowledged_at: None,
            show_in_decision_status,
            show_in_campaign_generator,
        }
    }

    #[must_use]
    pub const fn state(&self) -> NotificationState {
        if self.dismissed {
            NotificationState::Dismissed
        } else if self.seen {
            NotificationState::Seen
        } else {
            NotificationState::Created
        }
    }

    #[must_use]
    pub const fn shows_in(&self, location: NotificationLocation) -> bool {
        match location {
            NotificationLocation::DecisionStatus => self.show_in_decision_status,
            NotificationLocation::CampaignGenerator => self.show_in_campaign_generator,
        }
    }

    /// Whether the notification is listed for `location` (`None` = any).
    #[must_use]
    pub fn is_visible(&self, location: Option<NotificationLocation>) -> bool {
        !self.dismissed && location.is_none_or(|loc| self.shows_in(loc))
    }

    /// Move to `next`, setting the matching flag.
    ///
    /// Dismissal records `at` as the acknowledgement time.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition` if the lifecycle does not allow
    /// `next` from the current state.
    pub fn transition(&mut self, next: NotificationState, at: DateTime<Utc>) -> Result<(), CoreError> {
        let current = self.state();
        if !current.can_transition_to(next) {
            return Err(CoreError::InvalidTransition {
                kind: "notification".to_string(),
                id: self.id.clone(),
                from: current.to_string(),
                to: next.to_string(),
            });
        }
        match next {
            NotificationState::Created => {}
            NotificationState::Seen => self.seen = true,
            NotificationState::Dismissed => {
                self.dismissed = true;
                self.acknowledged_at = Some(at);
            }
        }
        Ok(())
    }

    /// Set `seen`. Returns `false` if already seen or dismissed.
    pub fn mark_seen(&mut self) -> bool {
        self.transition(NotificationState::Seen, Utc::now()).is_ok()
    }

    /// Set `dismissed` and record the acknowledgement time.
    ///
    /// `seen` is not required first. Returns `false` if already dismissed, in
    /// which case the original acknowledgement time is kept.
    pub fn dismiss(&mut self, at: DateTime<Utc>) -> bool {
        self.transition(NotificationState::Dismissed, at).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{AssetChange, AssetSnapshot, DecisionImpact};
    use crate::enums::{ChangeType, ImpactLevel};

    fn notification() -> ChangeNotification {
        let asset = AssetSnapshot::new("ast-1", "Vision");
        let change = AssetChange::record(&asset, None, ChangeType::ResearchAdded, "", Utc::now());
        let mut decision_impact = DecisionImpact::unchanged("Research added.");
        decision_impact.impact_level = ImpactLevel::Low;
        let analysis = ImpactAnalysis {
            change,
            decision_impact,
            campaign_impacts: Vec::new(),
            affected_personas: Vec::new(),
            persona_note: String::new(),
            research_priority_note: String::new(),
            analyzed_at: Utc::now(),
        };
        ChangeNotification::new(analysis, true, false)
    }

    #[test]
    fn new_notification_is_created_state() {
        let n = notification();
        assert_eq!(n.state(), NotificationState::Created);
        assert!(n.is_visible(None));
        assert!(n.is_visible(Some(NotificationLocation::DecisionStatus)));
        assert!(!n.is_visible(Some(NotificationLocation::CampaignGenerator)));
    }

    #[test]
    fn dismissed_notification_cannot_be_reopened() {
        let mut n = notification();
        let at = Utc::now();
        n.transition(NotificationState::Dismissed, at).unwrap();
        assert!(n.state().is_terminal());

        let err = n.transition(NotificationState::Seen, at).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Invalid state transition: notification {} from dismissed to seen", n.id)
        );
        assert!(!n.mark_seen());
        assert!(!n.seen);
        assert!(!n.is_visible(None));
    }

    #[test]
    fn seen_then_dismissed() {
        let mut n = notification();
        assert!(n.mark_seen());
        assert!(!n.mark_seen());
        assert_eq!(n.state(), NotificationState::Seen);
        assert!(n.dismiss(Utc::now()));
        assert_eq!(n.state(), NotificationState::Dismissed);
    }
}

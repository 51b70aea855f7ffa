//! Inbound change queue.
//!
//! Entity containers submit mutations through a [`ChangeSender`]; nothing is
//! analyzed at submission time. The owning [`crate::ImpactService`] drains
//! the queue once the host's current unit of work has finished, so analysis
//! only ever observes committed state. Each container can hold its own
//! sender; no registration replaces another.

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use impact_core::entities::AssetSnapshot;
use impact_core::enums::ChangeType;

use crate::error::TrackingError;

/// A mutation waiting to be analyzed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChange {
    pub current: AssetSnapshot,
    pub previous: Option<AssetSnapshot>,
    pub change_type: ChangeType,
    pub description: String,
    pub research_method: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl PendingChange {
    #[must_use]
    pub fn new(
        current: AssetSnapshot,
        previous: Option<AssetSnapshot>,
        change_type: ChangeType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            current,
            previous,
            change_type,
            description: description.into(),
            research_method: None,
            submitted_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_research_method(mut self, method: impl Into<String>) -> Self {
        self.research_method = Some(method.into());
        self
    }
}

/// Cloneable handle entity containers use to report mutations.
#[derive(Debug, Clone)]
pub struct ChangeSender {
    tx: mpsc::UnboundedSender<PendingChange>,
}

impl ChangeSender {
    /// Enqueue a pending change.
    ///
    /// # Errors
    ///
    /// Returns `TrackingError::MissingHandler` if the receiving service is gone.
    pub fn send(&self, pending: PendingChange) -> Result<(), TrackingError> {
        self.tx.send(pending).map_err(|e| TrackingError::MissingHandler {
            asset_id: e.0.current.id,
        })
    }

    /// Enqueue a change, logging and dropping it if nothing receives it.
    pub fn track(
        &self,
        current: AssetSnapshot,
        previous: Option<AssetSnapshot>,
        change_type: ChangeType,
        description: impl Into<String>,
    ) {
        tracing::debug!(asset_id = %current.id, %change_type, "queueing change");
        if let Err(e) = self.send(PendingChange::new(current, previous, change_type, description)) {
            tracing::warn!(error = %e, "tracked change lost");
        }
    }

    /// Whether a service is still receiving from this sender.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        !self.tx.is_closed()
    }
}

/// Create a connected sender/receiver pair.
pub(crate) fn change_queue() -> (ChangeSender, mpsc::UnboundedReceiver<PendingChange>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ChangeSender { tx }, rx)
}

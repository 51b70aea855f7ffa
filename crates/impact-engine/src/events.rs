//! Typed outbound event bus.
//!
//! Any number of observers may subscribe; each receives every event
//! published after it subscribed. Publishing with no subscribers is fine.

use tokio::sync::broadcast;

use impact_core::entities::{ChangeNotification, ImpactAnalysis};

/// Something the engine recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImpactEvent {
    /// A queued change was analyzed and appended to the store.
    ChangeTracked(Box<ImpactAnalysis>),
    /// The analysis of a tracked change warranted a notification.
    NotificationCreated(Box<ChangeNotification>),
    NotificationSeen { id: String },
    NotificationDismissed { id: String },
}

/// Broadcast channel for [`ImpactEvent`]s.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ImpactEvent>,
}

impl EventBus {
    /// Create a bus buffering up to `capacity` events per subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Register a new observer.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ImpactEvent> {
        self.sender.subscribe()
    }

    /// Deliver `event` to every current subscriber. Returns how many received it.
    pub fn publish(&self, event: ImpactEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subscriber_receives_every_event() {
        let bus = EventBus::new(8);
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        let delivered = bus.publish(ImpactEvent::NotificationSeen { id: "ntf-1".into() });
        assert_eq!(delivered, 2);

        for rx in [&mut first, &mut second] {
            assert_eq!(
                rx.try_recv().unwrap(),
                ImpactEvent::NotificationSeen { id: "ntf-1".into() }
            );
        }
    }

    #[test]
    fn publish_without_subscribers_is_not_an_error() {
        let bus = EventBus::new(8);
        assert_eq!(bus.subscriber_count(), 0);
        assert_eq!(bus.publish(ImpactEvent::NotificationDismissed { id: "ntf-1".into() }), 0);
    }

    #[test]
    fn dropped_subscriber_does_not_affect_others() {
        let bus = EventBus::new(8);
        let keep = bus.subscribe();
        drop(bus.subscribe());
        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(bus.publish(ImpactEvent::NotificationSeen { id: "x".into() }), 1);
        drop(keep);
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let bus = EventBus::new(0);
        let mut rx = bus.subscribe();
        bus.publish(ImpactEvent::NotificationSeen { id: "x".into() });
        assert!(rx.try_recv().is_ok());
    }
}

//! The engine facade hosts construct once and pass by reference.
//!
//! `ImpactService` owns the store, its persistence, the inbound change queue
//! and the outbound event bus. Entity containers hold [`ChangeSender`]s and
//! never call into the service while a mutation is in progress; the host
//! calls [`ImpactService::drain`] once its unit of work has committed.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{broadcast, mpsc};

use impact_config::ImpactConfig;
use impact_core::entities::{
    AssetChange, AssetSnapshot, CampaignImpact, ChangeImpactStore, ChangeNotification,
    ImpactAnalysis,
};
use impact_core::enums::{ChangeType, NotificationLocation};

use crate::events::{EventBus, ImpactEvent};
use crate::medium::{KvMedium, MemoryMedium, open_medium};
use crate::persistence::Persistence;
use crate::queue::{ChangeSender, PendingChange, change_queue};
use crate::summary::DetailedSummary;
use crate::{analyzer, campaign, notifications, summary};

/// Change tracking, impact analysis and notifications over one store.
///
/// Every mutation of the store is copy-on-write: callers holding an
/// [`Arc`] from [`ImpactService::store`] keep seeing the snapshot they took.
pub struct ImpactService<M: KvMedium = Box<dyn KvMedium>> {
    config: ImpactConfig,
    store: Arc<ChangeImpactStore>,
    persistence: Persistence<M>,
    sender: ChangeSender,
    receiver: mpsc::UnboundedReceiver<PendingChange>,
    events: EventBus,
}

impl ImpactService {
    /// Build a service on the medium named by `config.storage`.
    ///
    /// If the file-backed medium cannot be opened, the service runs
    /// session-only on a [`MemoryMedium`].
    #[must_use]
    pub fn from_config(config: ImpactConfig) -> Self {
        let medium = open_medium(&config.storage).unwrap_or_else(|e| {
            tracing::warn!(
                data_dir = %config.storage.data_dir,
                error = %e,
                "storage unavailable, continuing in memory"
            );
            Box::new(MemoryMedium::new())
        });
        Self::new(config, medium)
    }
}

impl<M: KvMedium> ImpactService<M> {
    /// Build a service over `medium`, restoring any previously saved store.
    ///
    /// A stored document that cannot be read yields an empty store. Config
    /// values that fail validation are replaced by their defaults.
    pub fn new(config: ImpactConfig, medium: M) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                tracing::warn!(error = %e, "invalid impact config, using defaults for rejected values");
                config.or_defaults()
            }
        };
        let mut persistence = Persistence::new(
            medium,
            config.storage.version.clone(),
            config.storage.namespaced_version_key(),
        );
        persistence.check_version();

        let store: ChangeImpactStore = persistence.load(
            &config.storage.namespaced_store_key(),
            ChangeImpactStore::default(),
        );
        tracing::info!(
            changes = store.changes.len(),
            analyses = store.impact_analyses.len(),
            notifications = store.notifications.len(),
            "change impact store loaded"
        );

        let (sender, receiver) = change_queue();
        let events = EventBus::new(config.general.event_capacity);

        Self {
            config,
            store: Arc::new(store),
            persistence,
            sender,
            receiver,
            events,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &ImpactConfig {
        &self.config
    }

    /// A new handle for an entity container to report mutations through.
    #[must_use]
    pub fn change_sender(&self) -> ChangeSender {
        self.sender.clone()
    }

    /// Queue a committed mutation for analysis on the next [`drain`](Self::drain).
    pub fn track_change(
        &self,
        current: AssetSnapshot,
        previous: Option<AssetSnapshot>,
        change_type: ChangeType,
        description: impl Into<String>,
    ) {
        self.sender.track(current, previous, change_type, description);
    }

    /// Number of changes queued but not yet analyzed.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    /// Analyze every queued change in submission order and persist once.
    ///
    /// Returns how many changes were processed.
    pub fn drain(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(pending) = self.receiver.try_recv() {
            self.record(pending);
            processed += 1;
        }
        if processed > 0 {
            self.persist();
        }
        processed
    }

    fn record(&mut self, pending: PendingChange) {
        let PendingChange {
            current,
            previous,
            change_type,
            description,
            research_method,
            submitted_at,
        } = pending;

        let mut change = AssetChange::record(
            &current,
            previous.as_ref(),
            change_type,
            &description,
            submitted_at,
        );
        if let Some(method) = research_method {
            change = change.with_research_method(method);
        }

        let analysis = analyzer::analyze(&change, &current, previous.as_ref());
        let notification = notifications::create(
            &analysis,
            self.config.notifications.show_in_decision_status,
            self.config.notifications.show_in_campaign_generator,
        );

        let limits = &self.config.limits;
        let store = Arc::make_mut(&mut self.store);
        store.append_change(change, limits.max_changes);
        store.append_analysis(analysis.clone(), limits.max_analyses);
        // The store may re-issue a colliding id; publish what was stored.
        let notification = notification.and_then(|n| {
            store.push_notification(n);
            store.notifications.first().cloned()
        });

        tracing::info!(
            asset_id = %current.id,
            %change_type,
            impact = %analysis.impact_level(),
            notified = notification.is_some(),
            "change tracked"
        );

        self.events
            .publish(ImpactEvent::ChangeTracked(Box::new(analysis)));
        if let Some(notification) = notification {
            self.events
                .publish(ImpactEvent::NotificationCreated(Box::new(notification)));
        }
    }

    /// Current store snapshot.
    #[must_use]
    pub fn store(&self) -> Arc<ChangeImpactStore> {
        Arc::clone(&self.store)
    }

    /// Register an observer for [`ImpactEvent`]s.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ImpactEvent> {
        self.events.subscribe()
    }

    /// Undismissed notifications, newest first.
    #[must_use]
    pub fn get_notifications(&self, location: Option<NotificationLocation>) -> Vec<ChangeNotification> {
        notifications::list(&self.store, location)
    }

    #[must_use]
    pub fn unseen_count(&self, location: Option<NotificationLocation>) -> usize {
        notifications::unseen_count(&self.store, location)
    }

    /// Mark one notification seen. Unknown or already-seen ids are a no-op.
    pub fn mark_seen(&mut self, id: &str) {
        if self.store.notification(id).is_none() {
            return;
        }
        if notifications::mark_seen(Arc::make_mut(&mut self.store), id) {
            self.persist();
            self.events
                .publish(ImpactEvent::NotificationSeen { id: id.to_string() });
        }
    }

    /// Mark every visible notification seen. Returns how many changed.
    pub fn mark_all_seen(&mut self, location: Option<NotificationLocation>) -> usize {
        if notifications::unseen_count(&self.store, location) == 0 {
            return 0;
        }
        let changed = notifications::mark_all_seen(Arc::make_mut(&mut self.store), location);
        self.persist();
        for id in &changed {
            self.events
                .publish(ImpactEvent::NotificationSeen { id: id.clone() });
        }
        changed.len()
    }

    /// Dismiss one notification whether or not it was seen.
    pub fn dismiss(&mut self, id: &str) {
        if self.store.notification(id).is_none_or(|n| n.dismissed) {
            return;
        }
        let cap = self.config.limits.dismissed_cap();
        if notifications::dismiss(Arc::make_mut(&mut self.store), id, Utc::now(), cap) {
            self.persist();
            self.events
                .publish(ImpactEvent::NotificationDismissed { id: id.to_string() });
        }
    }

    /// Most recent analysis recorded for `asset_id`.
    #[must_use]
    pub fn latest_impact_for_asset(&self, asset_id: &str) -> Option<ImpactAnalysis> {
        self.store.latest_impact_for_asset(asset_id).cloned()
    }

    /// Analyses giving `selected_assets` newer input, as campaign impacts.
    #[must_use]
    pub fn check_campaign_impacts(
        &self,
        campaign_id: &str,
        selected_assets: &[String],
    ) -> Vec<CampaignImpact> {
        campaign::check_campaign_impacts(&self.store, campaign_id, selected_assets)
    }

    #[must_use]
    pub fn format_short_summary(&self, analysis: &ImpactAnalysis) -> String {
        summary::format_short_summary(analysis)
    }

    #[must_use]
    pub fn format_detailed_summary(&self, analysis: &ImpactAnalysis) -> DetailedSummary {
        summary::format_detailed_summary(analysis)
    }

    /// Write the store to the medium. Returns `false` if the write failed;
    /// the in-memory store is unaffected either way.
    pub fn persist(&mut self) -> bool {
        let key = self.config.storage.namespaced_store_key();
        self.persistence.save(&key, self.store.as_ref())
    }

    #[must_use]
    pub const fn persistence(&self) -> &Persistence<M> {
        &self.persistence
    }
}

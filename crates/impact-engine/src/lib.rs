//! # impact-engine
//!
//! Change impact analysis and notifications for tracked brand assets.
//!
//! Entity containers report committed mutations through a [`ChangeSender`].
//! [`ImpactService::drain`] analyzes each queued change, appends it to the
//! bounded change log, raises a notification when the decision status is
//! affected, persists the store, and publishes an [`ImpactEvent`] to every
//! subscriber.
//!
//! The analyzer, summary renderers and campaign checks are plain functions
//! usable without a service.

pub mod analyzer;
pub mod campaign;
pub mod error;
pub mod events;
pub mod logging;
pub mod medium;
pub mod notifications;
pub mod persistence;
pub mod queue;
pub mod service;
pub mod summary;

pub use events::{EventBus, ImpactEvent};
pub use medium::{FileMedium, KvMedium, MemoryMedium};
pub use persistence::Persistence;
pub use queue::{ChangeSender, PendingChange};
pub use service::ImpactService;

//! Records owned by the change impact store.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` and use
//! camelCase field names, matching the persisted store document.

mod analysis;
mod asset;
mod change;
mod notification;
mod store;

pub use analysis::{CampaignImpact, DecisionImpact, ImpactAnalysis};
pub use asset::AssetSnapshot;
pub use change::{AssetChange, FieldDiff, describe_change, diff_snapshots};
pub use notification::ChangeNotification;
pub use store::{ChangeImpactStore, DEFAULT_MAX_ANALYSES, DEFAULT_MAX_CHANGES};

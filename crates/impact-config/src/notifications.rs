//! Where pipeline-created notifications are shown.

use serde::{Deserialize, Serialize};

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub show_in_decision_status: bool,

    #[serde(default = "default_true")]
    pub show_in_campaign_generator: bool,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            show_in_decision_status: true,
            show_in_campaign_generator: true,
        }
    }
}

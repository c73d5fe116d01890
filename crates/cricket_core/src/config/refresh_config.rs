//! Refresh cadence for the list and detail views.

use chrono::Duration;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Match list refresh period in seconds (default: 15)
    pub list_interval_secs: u32,
    /// Match detail refresh period in seconds (default: 5)
    pub detail_interval_secs: u32,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self { list_interval_secs: 15, detail_interval_secs: 5 }
    }
}

impl RefreshConfig {
    pub fn list_interval(&self) -> Duration {
        Duration::seconds(self.list_interval_secs as i64)
    }

    pub fn detail_interval(&self) -> Duration {
        Duration::seconds(self.detail_interval_secs as i64)
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.list_interval_secs == 0 || self.detail_interval_secs == 0 {
            return Err("refresh intervals must be at least one second".to_string());
        }
        Ok(())
    }
}

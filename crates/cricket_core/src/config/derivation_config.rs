use serde::{Deserialize, Serialize};

/// Timeline reconstruction settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Team total step that produces a milestone event (default: 50)
    pub milestone_step: u32,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self { milestone_step: 50 }
    }
}

/// Match format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InningsConfig {
    /// Overs per innings; an innings at this many overs is over (default: 50)
    pub overs_limit: u32,
}

impl Default for InningsConfig {
    fn default() -> Self {
        Self { overs_limit: 50 }
    }
}

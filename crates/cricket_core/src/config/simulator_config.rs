//! Live score simulator tunables.

use serde::{Deserialize, Serialize};

/// Probabilities and increments for one simulated tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Run the simulator over live matches at all (default: true)
    pub enabled: bool,
    /// Chance a live match is left alone on a tick (default: 0.5)
    pub idle_probability: f64,
    /// Chance the batting side scores once a tick is not idle (default: 0.3)
    pub score_probability: f64,
    /// Smallest run increment (default: 1)
    pub min_increment: u32,
    /// Largest run increment, inclusive (default: 6)
    pub max_increment: u32,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            idle_probability: 0.5,
            score_probability: 0.3,
            min_increment: 1,
            max_increment: 6,
        }
    }
}

impl SimulatorConfig {
    /// Increment bounds in ascending order, whatever order they were set in.
    pub fn increment_bounds(&self) -> (u32, u32) {
        if self.min_increment <= self.max_increment {
            (self.min_increment, self.max_increment)
        } else {
            (self.max_increment, self.min_increment)
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        for (name, p) in [("idle_probability", self.idle_probability), ("score_probability", self.score_probability)] {
            if !(0.0..=1.0).contains(&p) {
                return Err(format!("simulator.{name} must be within 0..=1, got {p}"));
            }
        }
        if self.min_increment == 0 || self.min_increment > self.max_increment {
            return Err(format!(
                "simulator increments must satisfy 1 <= min <= max, got {}..={}",
                self.min_increment, self.max_increment
            ));
        }
        Ok(())
    }
}

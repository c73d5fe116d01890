//! # Engine Configuration
//!
//! Every tunable of the simulator, the refresh cycle and the derivations in
//! one place, with presets.
//!
//! ```rust
//! use cricket_core::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let fixed = EngineConfig::deterministic();
//! assert!(!fixed.simulator.enabled);
//! # let _ = config;
//! ```

mod derivation_config;
mod refresh_config;
mod simulator_config;

pub use derivation_config::{InningsConfig, TimelineConfig};
pub use refresh_config::RefreshConfig;
pub use simulator_config::SimulatorConfig;

use std::path::Path;
use std::{env, fs};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Environment variable naming a JSON or YAML config file.
pub const CONFIG_PATH_ENV: &str = "CRICKET_CONFIG_PATH";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub simulator: SimulatorConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub timeline: TimelineConfig,
    #[serde(default)]
    pub innings: InningsConfig,
}

impl EngineConfig {
    /// Live feel: scores drift on every list refresh (default)
    pub fn realistic() -> Self {
        Self::default()
    }

    /// Scores only change when the source changes them.
    pub fn deterministic() -> Self {
        let mut cfg = Self::default();
        cfg.simulator.enabled = false;
        cfg
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load a file; `.yaml`/`.yml` are read as YAML, anything else as JSON.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            _ => Self::from_json(&content),
        }
    }

    /// Config from the file named by `CRICKET_CONFIG_PATH`, or the default
    /// when the variable is unset or blank.
    pub fn from_env() -> Result<Self> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };
        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }
        log::debug!("loading engine config from {CONFIG_PATH_ENV}='{path}'");
        Self::from_path(path)
    }

    pub fn validate(&self) -> Result<()> {
        self.simulator.validate().map_err(CoreError::InvalidConfig)?;
        self.refresh.validate().map_err(CoreError::InvalidConfig)?;
        if self.innings.overs_limit == 0 {
            return Err(CoreError::InvalidConfig("innings.overs_limit must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let cfg = EngineConfig::default();
        assert!(cfg.simulator.enabled);
        assert!((cfg.simulator.idle_probability - 0.5).abs() < 1e-9);
        assert!((cfg.simulator.score_probability - 0.3).abs() < 1e-9);
        assert_eq!(cfg.refresh.list_interval_secs, 15);
        assert_eq!(cfg.refresh.detail_interval().num_seconds(), 5);
        assert_eq!(cfg.timeline.milestone_step, 50);
        assert_eq!(cfg.innings.overs_limit, 50);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_deterministic_disables_simulator() {
        assert!(EngineConfig::realistic().simulator.enabled);
        assert!(!EngineConfig::deterministic().simulator.enabled);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let cfg = EngineConfig::from_json(r#"{"timeline": {"milestone_step": 25}}"#).unwrap();
        assert_eq!(cfg.timeline.milestone_step, 25);
        assert_eq!(cfg.refresh, RefreshConfig::default());
    }

    #[test]
    fn test_yaml_config() {
        let cfg = EngineConfig::from_yaml("simulator:\n  enabled: false\n  max_increment: 4\n").unwrap();
        assert!(!cfg.simulator.enabled);
        assert_eq!(cfg.simulator.max_increment, 4);
        assert_eq!(cfg.simulator.min_increment, 1);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = EngineConfig::from_json(r#"{"simulator": {"idle_probability": 1.5}}"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));

        let err = EngineConfig::from_json(r#"{"refresh": {"list_interval_secs": 0}}"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));

        let err = EngineConfig::from_json(r#"{"simulator": {"min_increment": 5, "max_increment": 2}}"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));
    }

    #[test]
    fn test_from_path_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let yaml = dir.path().join("engine.yaml");
        fs::write(&yaml, "innings:\n  overs_limit: 20\n").unwrap();
        assert_eq!(EngineConfig::from_path(&yaml).unwrap().innings.overs_limit, 20);

        let json = dir.path().join("engine.json");
        let mut file = fs::File::create(&json).unwrap();
        write!(file, r#"{{"refresh": {{"detail_interval_secs": 30}}}}"#).unwrap();
        assert_eq!(EngineConfig::from_path(&json).unwrap().refresh.detail_interval_secs, 30);

        let missing = EngineConfig::from_path(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(missing, CoreError::Io(_)));
    }
}

//! Runtime configuration
//!
//! Loaded from TOML; every field is optional:
//!
//! ```toml
//! tick_rate = 60
//! max_catchup_steps = 4
//! stats_interval_ms = 250
//! overrun_threshold_ms = 17
//! leave_on_error = false
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::LoopError;
use crate::stats::{DEFAULT_OVERRUN_THRESHOLD, DEFAULT_STATS_INTERVAL};
use crate::timing::{DEFAULT_MAX_CATCHUP_STEPS, DEFAULT_TICK_RATE, step_for_tick_rate};

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopConfig {
    /// Simulation rate in Hz (default: 60)
    #[serde(default = "default_tick_rate")]
    pub tick_rate: u32,
    /// Steps a single frame may contribute before the delta is clamped (default: 4)
    #[serde(default = "default_max_catchup_steps")]
    pub max_catchup_steps: u32,
    /// Length of a stats measurement window in milliseconds (default: 250)
    #[serde(default = "default_stats_interval_ms")]
    pub stats_interval_ms: u64,
    /// Frame duration counted as an overrun, in milliseconds (default: 17)
    #[serde(default = "default_overrun_threshold_ms")]
    pub overrun_threshold_ms: u64,
    /// Call `leave` on the current state when an option aborts the run (default: false)
    #[serde(default)]
    pub leave_on_error: bool,
}

fn default_tick_rate() -> u32 {
    DEFAULT_TICK_RATE
}
fn default_max_catchup_steps() -> u32 {
    DEFAULT_MAX_CATCHUP_STEPS
}
fn default_stats_interval_ms() -> u64 {
    DEFAULT_STATS_INTERVAL.as_millis() as u64
}
fn default_overrun_threshold_ms() -> u64 {
    DEFAULT_OVERRUN_THRESHOLD.as_millis() as u64
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            tick_rate: default_tick_rate(),
            max_catchup_steps: default_max_catchup_steps(),
            stats_interval_ms: default_stats_interval_ms(),
            overrun_threshold_ms: default_overrun_threshold_ms(),
            leave_on_error: false,
        }
    }
}

impl LoopConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self, LoopError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoopError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LoopError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("Loaded loop config from {}", path.display());
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), LoopError> {
        if self.tick_rate == 0 {
            return Err(LoopError::InvalidTickRate(self.tick_rate));
        }
        if self.max_catchup_steps == 0 {
            return Err(LoopError::Config(
                "max_catchup_steps must be at least 1".to_string(),
            ));
        }
        if self.stats_interval_ms == 0 {
            return Err(LoopError::Config(
                "stats_interval_ms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Fixed step for the configured tick rate
    pub fn step(&self) -> Result<Duration, LoopError> {
        step_for_tick_rate(self.tick_rate)
    }

    /// Length of a stats measurement window
    pub fn stats_interval(&self) -> Duration {
        Duration::from_millis(self.stats_interval_ms)
    }

    /// Frame duration counted as an overrun
    pub fn overrun_threshold(&self) -> Duration {
        Duration::from_millis(self.overrun_threshold_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_loop_config_default() {
        let config = LoopConfig::default();
        assert_eq!(config.tick_rate, 60);
        assert_eq!(config.max_catchup_steps, 4);
        assert_eq!(config.stats_interval(), Duration::from_millis(250));
        assert_eq!(config.overrun_threshold(), Duration::from_millis(17));
        assert!(!config.leave_on_error);
        assert_eq!(config.step().unwrap(), Duration::from_nanos(16_666_666));
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = LoopConfig::from_toml_str("").unwrap();
        assert_eq!(config, LoopConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let config = LoopConfig::from_toml_str(
            r#"
                tick_rate = 120
                leave_on_error = true
            "#,
        )
        .unwrap();
        assert_eq!(config.tick_rate, 120);
        assert!(config.leave_on_error);
        assert_eq!(config.max_catchup_steps, 4);
    }

    #[test]
    fn test_validation_errors() {
        assert!(matches!(
            LoopConfig::from_toml_str("tick_rate = 0"),
            Err(LoopError::InvalidTickRate(0))
        ));
        assert!(matches!(
            LoopConfig::from_toml_str("max_catchup_steps = 0"),
            Err(LoopError::Config(_))
        ));
        assert!(matches!(
            LoopConfig::from_toml_str("stats_interval_ms = 0"),
            Err(LoopError::Config(_))
        ));
        assert!(matches!(
            LoopConfig::from_toml_str("tick_rate = \"fast\""),
            Err(LoopError::Toml(_))
        ));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = LoopConfig {
            tick_rate: 30,
            overrun_threshold_ms: 34,
            ..LoopConfig::default()
        };
        let text = toml::to_string(&config).unwrap();
        assert_eq!(LoopConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loop.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "tick_rate = 100").unwrap();
        writeln!(file, "stats_interval_ms = 500").unwrap();
        drop(file);

        let config = LoopConfig::load(&path).unwrap();
        assert_eq!(config.step().unwrap(), Duration::from_millis(10));
        assert_eq!(config.stats_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = LoopConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, LoopError::Io { .. }));
        assert!(err.to_string().contains("missing.toml"));
    }
}

/*
[INPUT]:  Optional YAML configuration file and CLI overrides
[OUTPUT]: Parsed tracker configuration with defaults applied
[POS]:    Configuration layer - startup settings
[UPDATE]: When adding new configuration options
*/

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use car_build_core::TickInterval;

const APP_DIR: &str = "car-build-tracker";
const CONFIG_FILE: &str = "config.yaml";

/// Top-level configuration for the tracker
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TrackerConfig {
    /// Seconds between automatic steps; values below 1 are clamped to 1
    #[serde(default = "default_interval_seconds")]
    pub interval_seconds: u64,
    /// Start the auto-advance timer on launch
    #[serde(default = "default_auto_advance")]
    pub auto_advance: bool,
    /// Tracing filter directive, e.g. "info" or "car_build_core=debug"
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            interval_seconds: default_interval_seconds(),
            auto_advance: default_auto_advance(),
            log_level: None,
        }
    }
}

fn default_interval_seconds() -> u64 {
    TickInterval::DEFAULT_SECS
}

fn default_auto_advance() -> bool {
    true
}

impl TrackerConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_yaml_str(&content).with_context(|| format!("parse config {}", path.display()))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        // An empty document is valid and means "all defaults".
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// `<config_dir>/car-build-tracker/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load an explicit file, else the default file if present, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn tick_interval(&self) -> TickInterval {
        TickInterval::new(self.interval_seconds)
    }
}

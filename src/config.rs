// SPDX-License-Identifier: GPL-3.0-only
//! Host configuration
//!
//! Read-only settings for the command line host. Nothing is ever written
//! back, brightness values are not persisted.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const APP_DIR: &str = "ddc-monitor-control";
pub const CONFIG_FILE: &str = "config.json";

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Config {
    /// Deadline for probing all monitors, in milliseconds
    pub probe_timeout_ms: u64,
    /// Default step for relative adjustments (1-100)
    pub step: u32,
    /// Per-monitor settings keyed by display name
    pub monitors: HashMap<String, MonitorConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            probe_timeout_ms: default_probe_timeout_ms(),
            step: default_step(),
            monitors: HashMap::new(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct MonitorConfig {
    /// Minimum brightness percentage (0-100) that will be sent to hardware
    #[serde(default)]
    pub min_brightness: u16,
    /// Skip this monitor during enumeration
    #[serde(default)]
    pub ignored: bool,
}

fn default_probe_timeout_ms() -> u64 {
    5000
}

fn default_step() -> u32 {
    10
}

impl Config {
    /// `$XDG_CONFIG_HOME/ddc-monitor-control/config.json` or platform equivalent
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load the configuration
    ///
    /// An explicit path must exist. Without one the default location is
    /// tried and a missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            Some(path) => {
                debug!("no configuration at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => {
                debug!("no configuration directory, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::parse(&contents)?;
        debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.probe_timeout_ms == 0 {
            return Err(Error::Config("probe_timeout_ms must be positive".into()));
        }
        if !(1..=100).contains(&self.step) {
            return Err(Error::Config(format!(
                "step must be between 1 and 100, got {}",
                self.step
            )));
        }
        for (name, monitor) in &self.monitors {
            if monitor.min_brightness > 100 {
                return Err(Error::Config(format!(
                    "min_brightness for {name} must be at most 100, got {}",
                    monitor.min_brightness
                )));
            }
        }
        Ok(())
    }

    pub fn get_min_brightness(&self, name: &str) -> u16 {
        self.monitors.get(name).map(|m| m.min_brightness).unwrap_or(0)
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.monitors.get(name).map(|m| m.ignored).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::tempdir;

    #[test]
    fn test_defaults_for_empty_object() {
        let config = Config::parse("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.step, 10);
        assert_eq!(config.get_min_brightness("anything"), 0);
        assert!(!config.is_ignored("anything"));
    }

    #[test]
    fn test_loads_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"{
                "probe_timeout_ms": 2000,
                "monitors": {
                    "DELL U2415": { "min_brightness": 15 },
                    "Projector": { "ignored": true }
                }
            }"#,
        )
        .unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.probe_timeout_ms, 2000);
        assert_eq!(config.step, 10);
        assert_eq!(config.get_min_brightness("DELL U2415"), 15);
        assert!(!config.is_ignored("DELL U2415"));
        assert!(config.is_ignored("Projector"));
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = tempdir().unwrap();
        let err = Config::load(Some(dir.path().join("missing.json").as_path())).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            Config::parse(r#"{ "step": 0 }"#).unwrap_err(),
            Error::Config(_)
        ));
        assert!(matches!(
            Config::parse(r#"{ "probe_timeout_ms": 0 }"#).unwrap_err(),
            Error::Config(_)
        ));
        assert!(matches!(
            Config::parse(r#"{ "monitors": { "X": { "min_brightness": 120 } } }"#).unwrap_err(),
            Error::Config(_)
        ));
        assert!(matches!(
            Config::parse("not json").unwrap_err(),
            Error::Json(_)
        ));
    }
}

// SPDX-License-Identifier: MPL-2.0
//! This module handles the monitor's configuration, including loading and saving
//! it to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use sketch_monitor::config::{self, MonitorConfig};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Shorten the throttle window
//! config.report_interval_minutes = Some(10);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_dir = PathBuf::from("./temp_config_dir");
//! std::fs::create_dir_all(&temp_dir).unwrap();
//! let temp_file = temp_dir.join("test_settings.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded_config = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded_config.report_interval_minutes, Some(10));
//! std::fs::remove_dir_all(&temp_dir).unwrap();
//! ```

pub mod defaults;

use crate::domain::diagnostics::ReportInterval;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub use defaults::{
    DEFAULT_REPORT_INTERVAL_MINUTES, DEFAULT_SINK_CHANNEL_CAPACITY, DEFAULT_SUBSYSTEM,
    MAX_SINK_CHANNEL_CAPACITY, MIN_SINK_CHANNEL_CAPACITY,
};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "SketchMonitor";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Prefix of every report header.
    #[serde(default)]
    pub subsystem: Option<String>,
    /// Fixed-interval throttle window.
    #[serde(default)]
    pub report_interval_minutes: Option<u64>,
    /// Directory whose volume is reported as external storage.
    #[serde(default)]
    pub storage_dir: Option<PathBuf>,
    #[serde(default)]
    pub sink_channel_capacity: Option<usize>,
    /// Resource id to human-readable name, used to resolve `drawable://` URIs.
    #[serde(default)]
    pub resources: HashMap<String, String>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            subsystem: Some(DEFAULT_SUBSYSTEM.to_string()),
            report_interval_minutes: Some(DEFAULT_REPORT_INTERVAL_MINUTES),
            storage_dir: None,
            sink_channel_capacity: Some(DEFAULT_SINK_CHANNEL_CAPACITY),
            resources: HashMap::new(),
        }
    }
}

impl MonitorConfig {
    /// Header prefix, falling back to the default when unset or blank.
    #[must_use]
    pub fn subsystem(&self) -> &str {
        self.subsystem
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_SUBSYSTEM)
    }

    /// Throttle window, clamped to the valid range.
    #[must_use]
    pub fn report_interval(&self) -> ReportInterval {
        self.report_interval_minutes
            .map_or_else(ReportInterval::default, ReportInterval::from_minutes)
    }

    /// Volume probed for storage stats: the configured directory, else the
    /// platform data directory.
    #[must_use]
    pub fn storage_dir(&self) -> Option<PathBuf> {
        self.storage_dir.clone().or_else(dirs::data_dir)
    }

    #[must_use]
    pub fn sink_channel_capacity(&self) -> usize {
        self.sink_channel_capacity
            .unwrap_or(DEFAULT_SINK_CHANNEL_CAPACITY)
            .clamp(MIN_SINK_CHANNEL_CAPACITY, MAX_SINK_CHANNEL_CAPACITY)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<MonitorConfig> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(MonitorConfig::default())
}

pub fn save(config: &MonitorConfig) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<MonitorConfig> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(
                target: "sketch_monitor::config",
                path = %path.display(),
                error = %err,
                "invalid monitor config, using defaults"
            );
            Ok(MonitorConfig::default())
        }
    }
}

pub fn save_to_path(config: &MonitorConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::diagnostics::report_interval_bounds;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_fields() {
        let mut resources = HashMap::new();
        resources.insert("123".to_string(), "drawable/ic_launcher".to_string());
        let config = MonitorConfig {
            subsystem: Some("Gallery".to_string()),
            report_interval_minutes: Some(5),
            storage_dir: Some(PathBuf::from("/mnt/sdcard")),
            sink_channel_capacity: Some(16),
            resources,
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded, MonitorConfig::default());
    }

    #[test]
    fn load_from_missing_path_is_io_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let result = load_from_path(&temp_dir.path().join("absent.toml"));
        assert!(matches!(result, Err(crate::error::Error::Io(_))));
    }

    #[test]
    fn missing_fields_deserialize_as_none() {
        let config: MonitorConfig = toml::from_str("subsystem = \"Viewer\"").unwrap();
        assert_eq!(config.subsystem(), "Viewer");
        assert!(config.report_interval_minutes.is_none());
        assert_eq!(
            config.report_interval().minutes(),
            DEFAULT_REPORT_INTERVAL_MINUTES
        );
        assert!(config.resources.is_empty());
    }

    #[test]
    fn blank_subsystem_falls_back_to_default() {
        let config = MonitorConfig {
            subsystem: Some("   ".to_string()),
            ..MonitorConfig::default()
        };
        assert_eq!(config.subsystem(), DEFAULT_SUBSYSTEM);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = MonitorConfig {
            report_interval_minutes: Some(0),
            sink_channel_capacity: Some(1_000_000),
            ..MonitorConfig::default()
        };
        assert_eq!(
            config.report_interval().minutes(),
            report_interval_bounds::MIN
        );
        assert_eq!(config.sink_channel_capacity(), MAX_SINK_CHANNEL_CAPACITY);
    }

    #[test]
    fn explicit_storage_dir_wins() {
        let config = MonitorConfig {
            storage_dir: Some(PathBuf::from("/data/media")),
            ..MonitorConfig::default()
        };
        assert_eq!(config.storage_dir(), Some(PathBuf::from("/data/media")));
    }
}

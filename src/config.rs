use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub collector: CollectorConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    /// Seconds between collection cycles.
    pub sample_interval_secs: u64,
    /// Blocking window handed to the CPU sampler, in milliseconds.
    pub cpu_window_ms: u64,
    /// Hours of history to retain; clamped to (0, 24] at init.
    pub history_hours: u64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        CollectorConfig {
            sample_interval_secs: 60,
            cpu_window_ms: 1_000,
            history_hours: 24,
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("hostwatch").join("config.toml"))
}

pub fn load_config() -> MonitorConfig {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => MonitorConfig::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> MonitorConfig {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => MonitorConfig::default(),
    }
}

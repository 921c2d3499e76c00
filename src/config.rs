use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{MonitorError, Result};
use crate::monitor::MonitorSettings;
use crate::round::RoundTiming;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub targets: Vec<String>,
    /// Number of rounds to run, 0 for no limit.
    pub count: u64,
    pub interval_ms: u64,
    pub timeout_ms: u64,
    pub round_deadline_ms: u64,
    pub green_threshold: u64,
    pub yellow_threshold: u64,
}

/// Values given on the command line, layered over the saved config.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Replaces the configured targets when non-empty.
    pub targets: Vec<String>,
    pub count: Option<u64>,
    pub interval_ms: Option<u64>,
    pub timeout_ms: Option<u64>,
    pub round_deadline_ms: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
            count: 5,
            interval_ms: 1000,
            timeout_ms: 1000,
            round_deadline_ms: 3000,
            green_threshold: 100,
            yellow_threshold: 200,
        }
    }
}

impl AppConfig {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| MonitorError::Config("could not find config directory".to_string()))?
            .join("MultiPingMonitor");

        fs::create_dir_all(&config_dir)?;
        Ok(config_dir.join("config.json"))
    }

    /// Loads the saved config, falling back to defaults when there is none
    /// or it cannot be read.
    pub fn load() -> Self {
        match Self::get_config_path() {
            Ok(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|e| {
                warn!("ignoring config file {}: {e}", path.display());
                Self::default()
            }),
            Ok(_) => Self::default(),
            Err(e) => {
                warn!("no config directory: {e}");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if !overrides.targets.is_empty() {
            self.targets = overrides.targets;
        }
        if let Some(count) = overrides.count {
            self.count = count;
        }
        if let Some(interval_ms) = overrides.interval_ms {
            self.interval_ms = interval_ms;
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            self.timeout_ms = timeout_ms;
        }
        if let Some(round_deadline_ms) = overrides.round_deadline_ms {
            self.round_deadline_ms = round_deadline_ms;
        }
    }

    /// Merges `overrides`, validates the result and, when `save_path` is
    /// given, writes it there. Nothing is written unless the merge is valid.
    pub fn apply_and_persist(&mut self, overrides: ConfigOverrides, save_path: Option<&Path>) -> Result<()> {
        self.apply(overrides);
        self.validate()?;
        if let Some(path) = save_path {
            self.save_to(path)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 {
            return Err(MonitorError::Config("interval must be greater than zero".to_string()));
        }
        if self.timeout_ms == 0 {
            return Err(MonitorError::Config("probe timeout must be greater than zero".to_string()));
        }
        if self.round_deadline_ms == 0 {
            return Err(MonitorError::Config("round deadline must be greater than zero".to_string()));
        }
        if self.green_threshold > self.yellow_threshold {
            return Err(MonitorError::Config(format!(
                "green threshold ({} ms) is above yellow threshold ({} ms)",
                self.green_threshold, self.yellow_threshold
            )));
        }
        Ok(())
    }

    pub fn monitor_settings(&self) -> MonitorSettings {
        MonitorSettings {
            rounds: (self.count > 0).then_some(self.count),
            interval: Duration::from_millis(self.interval_ms),
            timing: RoundTiming {
                probe_timeout: Duration::from_millis(self.timeout_ms),
                round_deadline: Duration::from_millis(self.round_deadline_ms),
            },
        }
    }
}

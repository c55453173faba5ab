//! Shell configuration
//!
//! Built-in defaults, optionally replaced by a JSON file named by
//! `PHONEFRAME_CONFIG`. Missing fields keep their defaults.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use phoneframe_navigation::{InputResolver, Location};
use phoneframe_session::SessionSettings;

use crate::devices::{default_device_presets, DevicePreset, DEFAULT_DEVICE_WIDTH};
use crate::error::CoreError;
use crate::quick_links::{default_quick_links, QuickLink};
use crate::Result;

pub const CONFIG_PATH_ENV: &str = "PHONEFRAME_CONFIG";
pub const BIND_ADDRESS_ENV: &str = "PHONEFRAME_BIND";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default start location, also the target of the home button
    pub home: String,
    /// One-click navigation targets
    pub quick_links: Vec<QuickLink>,
    /// Phone frame widths
    pub device_presets: Vec<DevicePreset>,
    /// Preset selected for new sessions
    pub default_device: String,
    /// Entries shown in the recent-history list
    pub recent_history_limit: usize,
    /// Unconfirmed heartbeats before the frame counts as failed
    pub frame_retry_budget: u32,
    /// Page script heartbeat period
    pub heartbeat_interval_ms: u64,
    /// Sessions idle this long are dropped
    pub session_idle_timeout_secs: u64,
    /// HTTP listen address
    pub bind_address: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            home: "https://www.wikipedia.org".to_string(),
            quick_links: default_quick_links(),
            device_presets: default_device_presets(),
            default_device: "iPhone 14".to_string(),
            recent_history_limit: 10,
            frame_retry_budget: phoneframe_frame::DEFAULT_RETRY_BUDGET,
            heartbeat_interval_ms: 1000,
            session_idle_timeout_secs: 30 * 60,
            bind_address: "127.0.0.1:8501".to_string(),
        }
    }
}

impl Config {
    /// Build the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        let path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        let bind = std::env::var(BIND_ADDRESS_ENV).ok();
        Self::from_sources(path.as_deref(), bind)
    }

    pub fn from_sources(path: Option<&Path>, bind_address: Option<String>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(bind) = bind_address.filter(|b| !b.trim().is_empty()) {
            config.bind_address = bind.trim().to_string();
        }

        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_json(&raw)?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn validate(&self) -> Result<()> {
        let resolver = InputResolver::new();

        resolver
            .resolve(&self.home)
            .map_err(|e| CoreError::Config(format!("home: {}", e)))?;

        for link in &self.quick_links {
            link.resolve(&resolver)
                .map_err(|e| CoreError::Config(format!("quick link '{}': {}", link.name, e)))?;
        }

        if self.device_presets.is_empty() {
            return Err(CoreError::Config(
                "at least one device preset is required".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for preset in &self.device_presets {
            if preset.width == 0 {
                return Err(CoreError::Config(format!(
                    "device preset '{}' has zero width",
                    preset.name
                )));
            }
            if !names.insert(preset.name.as_str()) {
                return Err(CoreError::Config(format!(
                    "duplicate device preset '{}'",
                    preset.name
                )));
            }
        }

        if self.device(&self.default_device).is_none() {
            return Err(CoreError::Config(format!(
                "default device '{}' is not a configured preset",
                self.default_device
            )));
        }

        if self.frame_retry_budget == 0 {
            return Err(CoreError::Config(
                "frame_retry_budget must be positive".to_string(),
            ));
        }
        if self.heartbeat_interval_ms == 0 {
            return Err(CoreError::Config(
                "heartbeat_interval_ms must be positive".to_string(),
            ));
        }
        if self.recent_history_limit == 0 {
            return Err(CoreError::Config(
                "recent_history_limit must be positive".to_string(),
            ));
        }

        Ok(())
    }

    pub fn home_location(&self) -> Result<Location> {
        Ok(InputResolver::new().resolve(&self.home)?)
    }

    pub fn device(&self, name: &str) -> Option<&DevicePreset> {
        self.device_presets.iter().find(|p| p.name == name)
    }

    /// Preset for `name`, falling back to the default preset. An
    /// unvalidated config without presets gets the default width.
    pub fn device_or_default(&self, name: &str) -> DevicePreset {
        self.device(name)
            .or_else(|| self.device(&self.default_device))
            .or_else(|| self.device_presets.first())
            .cloned()
            .unwrap_or_else(|| DevicePreset::new(&self.default_device, DEFAULT_DEVICE_WIDTH))
    }

    pub fn session_settings(&self) -> Result<SessionSettings> {
        let idle_secs = i64::try_from(self.session_idle_timeout_secs).unwrap_or(i64::MAX);
        let idle_timeout = Duration::try_seconds(idle_secs).unwrap_or(Duration::MAX);

        Ok(SessionSettings {
            start: self.home_location()?,
            default_device: self.default_device.clone(),
            retry_budget: self.frame_retry_budget,
            idle_timeout,
        })
    }
}

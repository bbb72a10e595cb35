//! TOML-based application configuration.
//!
//! Stores the single tunable parameter set: the three phase durations
//! and the number of work segments before a long break.
//!
//! Configuration is stored at `~/.config/pomowatch/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::cycle::DEFAULT_WORK_SEGMENTS;
use crate::error::ConfigError;
use crate::session::PhaseDurations;

/// Returns `~/.config/pomowatch[-dev]/` based on POMOWATCH_ENV.
///
/// POMOWATCH_CONFIG_DIR overrides the location entirely (used by tests
/// and by hosts that manage their own config directory).
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    if let Ok(dir) = std::env::var("POMOWATCH_CONFIG_DIR") {
        let dir = PathBuf::from(dir);
        std::fs::create_dir_all(&dir)?;
        return Ok(dir);
    }

    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("POMOWATCH_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("pomowatch-dev")
    } else {
        base_dir.join("pomowatch")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Phase duration and cadence settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u32,
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u32,
    #[serde(default = "default_work_segments")]
    pub work_segments: u32,
}

fn default_work_minutes() -> u32 {
    25
}
fn default_short_break_minutes() -> u32 {
    5
}
fn default_long_break_minutes() -> u32 {
    20
}
fn default_work_segments() -> u32 {
    DEFAULT_WORK_SEGMENTS
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            work_segments: default_work_segments(),
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/pomowatch/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

impl Config {
    /// Path of the config file.
    pub fn path() -> Result<PathBuf, std::io::Error> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk; a missing file is replaced by a saved default.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be parsed, or if
    /// the default cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/pomowatch"),
            message: e.to_string(),
        })?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, returning the default on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path().map_err(|e| ConfigError::SaveFailed {
            path: PathBuf::from("~/.config/pomowatch"),
            message: e.to_string(),
        })?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Get a config value as a string by dotted key.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "schedule.work_minutes" => self.schedule.work_minutes,
            "schedule.short_break_minutes" => self.schedule.short_break_minutes,
            "schedule.long_break_minutes" => self.schedule.long_break_minutes,
            "schedule.work_segments" => self.schedule.work_segments,
            _ => return None,
        };
        Some(value.to_string())
    }

    /// Set a config value by dotted key and persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown, the value does not parse
    /// as a positive integer, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let parsed: u32 = value.parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("'{value}' is not an unsigned integer"),
        })?;
        if parsed == 0 {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        let slot = match key {
            "schedule.work_minutes" => &mut self.schedule.work_minutes,
            "schedule.short_break_minutes" => &mut self.schedule.short_break_minutes,
            "schedule.long_break_minutes" => &mut self.schedule.long_break_minutes,
            "schedule.work_segments" => &mut self.schedule.work_segments,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        };
        *slot = parsed;
        self.save()
    }

    /// Lower the schedule section into the engine's parameter set.
    pub fn durations(&self) -> PhaseDurations {
        PhaseDurations {
            work: Duration::from_secs(u64::from(self.schedule.work_minutes) * 60),
            short_break: Duration::from_secs(u64::from(self.schedule.short_break_minutes) * 60),
            long_break: Duration::from_secs(u64::from(self.schedule.long_break_minutes) * 60),
            work_segments: self.schedule.work_segments,
        }
    }
}

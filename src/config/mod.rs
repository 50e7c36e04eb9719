//! Configuration management module
//!
//! Handles loading and validation of application settings, and the room
//! configuration store edited from the configuration screen.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::models::{RoomConfig, RoomMap};
use crate::util::{is_valid_time_format, DEFAULT_TIME_FORMAT};
use crate::{RelcheckError, Result, APP_NAME, CONFIG_FILE};

pub mod store;

pub use store::ConfigurationStore;

/// Application settings read from `relcheck.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory the export document is written to before sharing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
    /// Program and arguments that receive the exported file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_command: Option<Vec<String>>,
    /// chrono format string for the entry time
    pub time_format: String,
    /// UI refresh interval
    #[serde(
        serialize_with = "serialize_duration",
        deserialize_with = "deserialize_duration"
    )]
    pub tick_rate: Duration,
    /// Rooms added after the defaults at startup
    pub preset_rooms: Vec<PresetRoom>,
}

/// Room seeded from the settings file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetRoom {
    pub name: String,
    #[serde(default)]
    pub testers: Vec<String>,
    #[serde(default)]
    pub other_parameter_titles: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            export_dir: None,
            share_command: None,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            tick_rate: Duration::from_millis(250),
            preset_rooms: Vec::new(),
        }
    }
}

fn serialize_duration<S: Serializer>(
    duration: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&humantime::format_duration(*duration).to_string())
}

fn deserialize_duration<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Duration, D::Error> {
    let raw = String::deserialize(deserializer)?;
    humantime::parse_duration(&raw).map_err(serde::de::Error::custom)
}

impl Settings {
    /// Load settings from the standard config file location
    /// Returns defaults if the file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load settings from an explicit path, defaults if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            RelcheckError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let settings = Self::from_toml(&content).map_err(|e| match e {
            RelcheckError::Config(msg) => {
                RelcheckError::Config(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })?;
        debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Parse and validate settings from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate the settings values
    pub fn validate(&self) -> Result<()> {
        if self.tick_rate.is_zero() {
            return Err(RelcheckError::Config(
                "tick_rate must be greater than 0".to_string(),
            ));
        }

        if self.time_format.trim().is_empty() {
            return Err(RelcheckError::Config(
                "time_format must not be empty".to_string(),
            ));
        }

        if !is_valid_time_format(&self.time_format) {
            return Err(RelcheckError::Config(format!(
                "time_format {:?} is not a valid strftime pattern",
                self.time_format
            )));
        }

        if let Some(command) = &self.share_command {
            if command.first().map_or(true, |program| program.trim().is_empty()) {
                return Err(RelcheckError::Config(
                    "share_command must name a program".to_string(),
                ));
            }
        }

        let mut seen: Vec<&str> = Vec::new();
        for preset in &self.preset_rooms {
            let name = preset.name.trim();
            if name.is_empty() {
                return Err(RelcheckError::Config(
                    "preset room names must not be blank".to_string(),
                ));
            }
            if seen.contains(&name) {
                return Err(RelcheckError::Config(format!(
                    "preset room {} is listed twice",
                    name
                )));
            }
            seen.push(name);
        }

        Ok(())
    }

    /// Set the export directory
    pub fn with_export_dir(mut self, dir: PathBuf) -> Self {
        self.export_dir = Some(dir);
        self
    }

    /// Set the share command
    pub fn with_share_command(mut self, command: Vec<String>) -> Self {
        self.share_command = Some(command);
        self
    }

    /// Directory used for the transient export file
    /// Uses $CACHE_HOME/relcheck unless overridden
    pub fn resolved_export_dir(&self) -> Result<PathBuf> {
        match &self.export_dir {
            Some(dir) => Ok(dir.clone()),
            None => {
                let cache_dir = dirs::cache_dir().ok_or_else(|| {
                    RelcheckError::Config("Unable to determine cache directory".to_string())
                })?;
                Ok(cache_dir.join(APP_NAME))
            }
        }
    }

    /// Initial room configuration: default rooms, then presets.
    ///
    /// A preset named like a default room fills in that room's lists.
    pub fn initial_rooms(&self) -> RoomMap {
        let mut rooms = RoomMap::with_defaults();
        for preset in &self.preset_rooms {
            let config = RoomConfig {
                testers: preset.testers.clone(),
                other_parameter_titles: preset.other_parameter_titles.clone(),
            };
            rooms.insert(preset.name.trim().to_string(), config.cleaned());
        }
        rooms
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/relcheck/relcheck.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            RelcheckError::Config("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::{model::Coordinates, provider::weatherapi::DEFAULT_BASE_URL, window::DayBoundary};

/// Environment variable holding the weatherapi.com key; wins over the config file.
pub const API_KEY_ENV: &str = "WEATHER_API_KEY";

pub const DEFAULT_FORECAST_DAYS: u8 = 4;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// window_boundary = "continue"
///
/// [default_location]
/// lat = 51.5
/// lon = -0.12
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// weatherapi.com key; `WEATHER_API_KEY` takes precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Quiet period before a typed query is searched.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    #[serde(default = "default_forecast_days")]
    pub forecast_days: u8,

    /// Length of the upcoming-hours window.
    #[serde(default = "default_window_hours")]
    pub window_hours: usize,

    #[serde(default)]
    pub window_boundary: DayBoundary,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Location fetched on startup.
    #[serde(default)]
    pub default_location: Coordinates,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_debounce_ms() -> u64 {
    500
}

const fn default_forecast_days() -> u8 {
    DEFAULT_FORECAST_DAYS
}

const fn default_window_hours() -> usize {
    crate::window::DEFAULT_WINDOW_HOURS
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            debounce_ms: default_debounce_ms(),
            forecast_days: default_forecast_days(),
            window_hours: default_window_hours(),
            window_boundary: DayBoundary::default(),
            timeout_secs: default_timeout_secs(),
            default_location: Coordinates::default(),
        }
    }
}

impl Config {
    /// API key from the environment, falling back to the config file.
    pub fn api_key(&self) -> Option<String> {
        self.api_key_with_env(std::env::var(API_KEY_ENV).ok())
    }

    /// Same as [`Config::api_key`] with the environment value passed in.
    pub fn api_key_with_env(&self, env_value: Option<String>) -> Option<String> {
        env_value
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.api_key.clone().filter(|key| !key.trim().is_empty()))
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

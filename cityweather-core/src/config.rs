use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::error::SearchError;

pub const DEFAULT_GEOCODING_URL: &str = "https://api.openweathermap.org/geo/1.0/direct";
pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Value shipped in sample configs; treated the same as no key at all.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY";

pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_key: Option<String>,

    /// Override for the geocoding endpoint.
    pub geocoding_url: Option<String>,

    /// Override for the current-weather endpoint.
    pub weather_url: Option<String>,
}

/// True when `key` cannot be a real credential.
pub fn is_placeholder_key(key: &str) -> bool {
    let key = key.trim();
    key.is_empty() || key == PLACEHOLDER_API_KEY
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read cityweather settings at {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Settings file {} is not valid cityweather TOML", path.display()))
    }

    /// [`Config::load`] followed by [`Config::apply_env_overrides`].
    pub fn load_with_env() -> Result<Self> {
        let mut cfg = Self::load()?;
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid cityweather settings TOML")
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Cannot create cityweather settings directory {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(self).context("Cannot encode cityweather settings")?;

        fs::write(&path, toml)
            .with_context(|| format!("Cannot write cityweather settings to {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "cityweather", "cityweather")
            .ok_or_else(|| anyhow!("No home directory found to keep cityweather settings in"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// A non-placeholder `OPENWEATHER_API_KEY` replaces the stored key.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !is_placeholder_key(&key) {
                self.api_key = Some(key.trim().to_string());
            }
        }
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key.trim().to_string());
    }

    /// The configured key, or `CredentialMissing` if absent or a placeholder.
    pub fn api_key(&self) -> Result<&str, SearchError> {
        match self.api_key.as_deref() {
            Some(key) if !is_placeholder_key(key) => Ok(key),
            _ => Err(SearchError::CredentialMissing),
        }
    }

    pub fn geocoding_url(&self) -> &str {
        self.geocoding_url.as_deref().unwrap_or(DEFAULT_GEOCODING_URL)
    }

    pub fn weather_url(&self) -> &str {
        self.weather_url.as_deref().unwrap_or(DEFAULT_WEATHER_URL)
    }
}

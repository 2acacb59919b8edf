use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    geocode::{GeocodingMode, nominatim::DEFAULT_USER_AGENT},
    units::UnitPreference,
};

/// Overrides `[openweather] api_key` when set.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

pub const DEFAULT_CITY: &str = "Madhapur";

/// OpenWeather credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenWeatherConfig {
    pub api_key: String,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Reverse geocoding mode, "tiered" or "simple".
    #[serde(default)]
    pub geocoding: Option<String>,

    /// Sent to Nominatim, which rejects anonymous clients.
    #[serde(default)]
    pub user_agent: Option<String>,

    /// City shown when the current position is unavailable.
    #[serde(default = "default_city")]
    pub default_city: String,

    /// Persisted unit preference.
    #[serde(default = "default_celsius")]
    pub celsius: bool,

    /// Example TOML:
    /// [openweather]
    /// api_key = "..."
    #[serde(default)]
    pub openweather: Option<OpenWeatherConfig>,

    #[serde(skip)]
    env_api_key: Option<String>,
}

fn default_city() -> String {
    DEFAULT_CITY.to_string()
}

fn default_celsius() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openweather: None,
            geocoding: None,
            user_agent: None,
            default_city: default_city(),
            celsius: default_celsius(),
            env_api_key: None,
        }
    }
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let mut cfg = Self::load_from(&path)?;
        cfg.env_api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty());
        Ok(cfg)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherdash", "weatherdash")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// API key from the environment, else from the file.
    pub fn api_key(&self) -> Result<&str> {
        self.env_api_key
            .as_deref()
            .or_else(|| self.openweather.as_ref().map(|ow| ow.api_key.as_str()))
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No OpenWeather API key configured.\n\
                     Hint: run `weatherdash configure` or set {API_KEY_ENV}."
                )
            })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.openweather = Some(OpenWeatherConfig { api_key });
    }

    pub fn geocoding_mode(&self) -> Result<GeocodingMode> {
        match self.geocoding.as_deref() {
            Some(mode) => GeocodingMode::try_from(mode),
            None => Ok(GeocodingMode::default()),
        }
    }

    /// Store geocoding mode as string.
    pub fn set_geocoding_mode(&mut self, mode: GeocodingMode) {
        self.geocoding = Some(mode.as_str().to_string());
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent
            .as_deref()
            .filter(|ua| !ua.trim().is_empty())
            .unwrap_or(DEFAULT_USER_AGENT)
    }

    pub fn units(&self) -> UnitPreference {
        UnitPreference::from_celsius_flag(self.celsius)
    }

    pub fn set_units(&mut self, units: UnitPreference) {
        self.celsius = units.is_celsius();
    }

    /// Record `units` in the config file at `path`, keeping its other settings.
    pub fn store_units(path: &Path, units: UnitPreference) -> Result<()> {
        let mut cfg = Self::load_from(path)?;
        cfg.set_units(units);
        cfg.save_to(path)
    }
}

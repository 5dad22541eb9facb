//! Configuration file support for Ironlog.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/ironlog/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub profile: ProfileConfig,

    #[serde(default)]
    pub progression: ProgressionConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Whose history is read and written
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_user")]
    pub user: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            user: default_user(),
        }
    }
}

/// Progressive-overload parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgressionConfig {
    /// Added to the last weight after a completed session
    #[serde(default = "default_increment_kg")]
    pub increment_kg: f64,

    /// Used when an exercise has neither history nor a baseline
    #[serde(default = "default_weight_kg")]
    pub default_weight_kg: f64,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            increment_kg: default_increment_kg(),
            default_weight_kg: default_weight_kg(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ironlog")
}

fn default_user() -> String {
    "me".into()
}

fn default_increment_kg() -> f64 {
    2.5
}

fn default_weight_kg() -> f64 {
    20.0
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        Self::load_or_default(&Self::default_config_path())
    }

    /// Load configuration from `path`, falling back to defaults if it is absent
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ironlog")
            .join("config.toml")
    }

    /// Reject values the resolver cannot use
    pub fn validate(&self) -> Result<()> {
        let p = &self.progression;
        if !p.increment_kg.is_finite() || p.increment_kg < 0.0 {
            return Err(Error::Config(format!(
                "progression.increment_kg must be a non-negative number, got {}",
                p.increment_kg
            )));
        }
        if !p.default_weight_kg.is_finite() || p.default_weight_kg < 0.0 {
            return Err(Error::Config(format!(
                "progression.default_weight_kg must be a non-negative number, got {}",
                p.default_weight_kg
            )));
        }
        if self.profile.user.trim().is_empty() {
            return Err(Error::Config("profile.user must not be empty".into()));
        }
        Ok(())
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

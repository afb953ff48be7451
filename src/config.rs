//! Configuration file handling
//!
//! TOML file at `~/.unibot/config.toml`, created with defaults on first
//! load. The provider API key can live in the file or in the
//! `GROQ_API_KEY` environment variable; the environment wins.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::provider::{DEFAULT_BASE_URL, DEFAULT_MODEL};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub base_url: String,
    pub model: String,
    /// Optional; `GROQ_API_KEY` overrides this
    pub api_key: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Corpus snapshot path; defaults to `~/.unibot/vector_store.json`
    pub data_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Config::default();
            config.save()?;
            return Ok(config);
        }

        let contents =
            fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Config =
            toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_string =
            toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, toml_string).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;

        Ok(home.join(".unibot").join("config.toml"))
    }

    /// API key resolution: environment first, then the config file
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var("GROQ_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .or_else(|| self.provider.api_key.clone())
    }
}

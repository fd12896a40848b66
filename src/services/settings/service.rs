use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::models::settings::AppConfig;

use super::project_dirs;

/// Reads and writes `config.toml`.
pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service for `config.toml` in the platform config directory.
    pub fn from_project_dirs() -> Option<Self> {
        project_dirs().map(|dirs| Self::new(dirs.config_dir().join("config.toml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the configuration. A missing file gives the defaults.
    pub fn get(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            log::info!(
                "No config at {}, using defaults",
                self.path.display()
            );
            return Ok(AppConfig::default());
        }

        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read config from {}", self.path.display()))?;
        let config: AppConfig = toml::from_str(&data)
            .with_context(|| format!("Failed to parse config at {}", self.path.display()))?;

        config
            .validate()
            .map_err(|e| anyhow!("Invalid settings in {}: {}", self.path.display(), e))?;
        Ok(config)
    }

    pub fn update(&self, config: &AppConfig) -> Result<()> {
        config
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {}", parent.display()))?;
        }

        let data = toml::to_string_pretty(config).context("Failed to serialize settings")?;
        fs::write(&self.path, data)
            .with_context(|| format!("Failed to write config to {}", self.path.display()))?;
        Ok(())
    }
}

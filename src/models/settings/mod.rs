// Settings module
// Application configuration read from config.toml

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::event::DEFAULT_LOCATION;
use crate::models::position::default_positions;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("At least one location must be configured")]
    NoLocations,
    #[error("Default location '{0}' is not in the location list")]
    UnknownDefaultLocation(String),
    #[error("At least one default position must be configured")]
    NoPositions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite file; `None` uses the platform data directory
    pub database_path: Option<PathBuf>,
    /// JSON snapshot written when the database cannot be saved to
    pub cache_path: Option<PathBuf>,
    pub default_location: String,
    pub locations: Vec<String>,
    pub default_positions: Vec<String>,
    /// Author recorded in the activity log
    pub user: String,
    /// env_logger filter used when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            cache_path: None,
            default_location: DEFAULT_LOCATION.to_string(),
            locations: vec![DEFAULT_LOCATION.to_string(), "Macau".to_string()],
            default_positions: default_positions(),
            user: "local".to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.locations.is_empty() {
            return Err(ConfigValidationError::NoLocations);
        }
        if !self.locations.contains(&self.default_location) {
            return Err(ConfigValidationError::UnknownDefaultLocation(
                self.default_location.clone(),
            ));
        }
        if self.default_positions.iter().all(|p| p.trim().is_empty()) {
            return Err(ConfigValidationError::NoPositions);
        }
        Ok(())
    }
}

// Settings service module
// Config file loading and platform paths for the database and cache

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::models::settings::AppConfig;

mod service;

pub use service::SettingsService;

const DATABASE_FILE: &str = "roster.db";
const CACHE_FILE: &str = "roster-cache.json";

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "KenBoyle", "InterpreterRoster")
}

/// Database location: the configured path, else the platform data directory,
/// else the working directory.
pub fn resolve_database_path(config: &AppConfig) -> PathBuf {
    if let Some(path) = &config.database_path {
        return path.clone();
    }
    match project_dirs() {
        Some(dirs) => dirs.data_dir().join(DATABASE_FILE),
        None => PathBuf::from(DATABASE_FILE),
    }
}

/// Local JSON cache used when the database cannot be written.
pub fn resolve_cache_path(config: &AppConfig) -> Option<PathBuf> {
    config
        .cache_path
        .clone()
        .or_else(|| project_dirs().map(|dirs| dirs.data_dir().join(CACHE_FILE)))
}

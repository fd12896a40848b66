//! Position catalog: the editable set of roster job roles.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub fn default_positions() -> Vec<String> {
    vec![
        "Show Director".to_string(),
        "Stage Director".to_string(),
        "Lighting".to_string(),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("Position name cannot be empty")]
    EmptyName,
    #[error("Position '{0}' already exists")]
    Duplicate(String),
    #[error("Position '{0}' does not exist")]
    Unknown(String),
    #[error("At least one position must remain")]
    LastPosition,
}

/// Ordered, duplicate-free list of positions. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct PositionCatalog {
    positions: Vec<String>,
}

impl Default for PositionCatalog {
    fn default() -> Self {
        Self {
            positions: default_positions(),
        }
    }
}

impl From<Vec<String>> for PositionCatalog {
    fn from(names: Vec<String>) -> Self {
        Self::from_names(names)
    }
}

impl From<PositionCatalog> for Vec<String> {
    fn from(catalog: PositionCatalog) -> Self {
        catalog.positions
    }
}

impl PositionCatalog {
    /// Build a catalog from stored names, dropping blanks and duplicates.
    /// Falls back to the defaults if nothing usable remains.
    pub fn from_names(names: impl IntoIterator<Item = String>) -> Self {
        let mut positions: Vec<String> = Vec::new();
        for name in names {
            let name = name.trim().to_string();
            if !name.is_empty() && !positions.contains(&name) {
                positions.push(name);
            }
        }
        if positions.is_empty() {
            return Self::default();
        }
        Self { positions }
    }

    pub fn names(&self) -> &[String] {
        &self.positions
    }

    /// The position used when an interpreter has none.
    pub fn first(&self) -> &str {
        self.positions.first().map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.iter().any(|p| p == name)
    }

    pub fn add(&mut self, name: &str) -> Result<(), PositionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PositionError::EmptyName);
        }
        if self.contains(name) {
            return Err(PositionError::Duplicate(name.to_string()));
        }
        self.positions.push(name.to_string());
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Result<(), PositionError> {
        if !self.contains(name) {
            return Err(PositionError::Unknown(name.to_string()));
        }
        if self.positions.len() <= 1 {
            return Err(PositionError::LastPosition);
        }
        self.positions.retain(|p| p != name);
        Ok(())
    }
}

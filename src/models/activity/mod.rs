//! Activity log entries recorded for roster and availability edits.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Number of entries the log view shows.
pub const RECENT_ACTIVITY_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub timestamp: DateTime<Local>,
    pub action: String,
    pub details: String,
    pub user: String,
}

impl ActivityEntry {
    pub fn now(action: impl Into<String>, details: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            action: action.into(),
            details: details.into(),
            user: user.into(),
        }
    }
}

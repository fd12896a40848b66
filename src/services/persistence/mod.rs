// Persistence service module
// Store boundary for the roster planner, its SQLite implementation and the
// local JSON cache

use std::fmt;

use anyhow::Result;

use crate::models::activity::ActivityEntry;
use crate::models::event::Event;
use crate::models::group::Group;
use crate::models::interpreter::Interpreter;
use crate::models::position::PositionCatalog;
use crate::services::availability::AssignmentMap;

pub mod snapshot;
pub mod sqlite_store;
pub mod state;

pub use snapshot::{load_snapshot, save_snapshot};
pub use sqlite_store::SqliteStore;
pub use state::PersistedState;

/// Where the planner reads and writes its collections.
///
/// Every save carries the full collection, never a delta.
#[cfg_attr(test, mockall::automock)]
pub trait RosterStore {
    fn load(&self) -> Result<PersistedState>;
    fn save_events(&self, events: &[Event]) -> Result<()>;
    fn save_interpreters(&self, interpreters: &[Interpreter]) -> Result<()>;
    fn save_assignments(&self, assignments: &AssignmentMap) -> Result<()>;
    fn save_groups(&self, groups: &[Group]) -> Result<()>;
    fn save_positions(&self, positions: &PositionCatalog) -> Result<()>;
    fn append_activity(&self, entry: &ActivityEntry) -> Result<()>;
    /// Newest first, at most `limit` entries.
    fn recent_activity(&self, limit: usize) -> Result<Vec<ActivityEntry>>;
    fn clear_activity(&self) -> Result<()>;
}

/// A save or load that failed. In-memory state is kept; the UI shows these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceWarning {
    /// What was being attempted, e.g. "save events"
    pub action: &'static str,
    pub message: String,
}

impl PersistenceWarning {
    pub fn new(action: &'static str, err: &anyhow::Error) -> Self {
        Self {
            action,
            message: format!("{:#}", err),
        }
    }
}

impl fmt::Display for PersistenceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Could not {}: {}", self.action, self.message)
    }
}

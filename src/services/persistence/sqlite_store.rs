//! SQLite-backed document store.
//!
//! Each collection is one JSON document in the `documents` table, always
//! written whole. The activity log is a regular table.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use rusqlite::{params, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::activity::ActivityEntry;
use crate::models::event::Event;
use crate::models::group::Group;
use crate::models::interpreter::Interpreter;
use crate::models::position::PositionCatalog;
use crate::services::availability::AssignmentMap;
use crate::services::database::Database;

use super::state::PersistedState;
use super::RosterStore;

const EVENTS: &str = "events";
const INTERPRETERS: &str = "interpreters";
const ASSIGNMENTS: &str = "assignments";
const GROUPS: &str = "groups";
const POSITIONS: &str = "positions";

pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Wrap an open database, creating the tables if needed.
    pub fn new(db: Database) -> Result<Self> {
        db.initialize_schema()?;
        Ok(Self { db })
    }

    pub fn open(path: &str) -> Result<Self> {
        Self::new(Database::new(path)?)
    }

    pub fn in_memory() -> Result<Self> {
        Self::open(":memory:")
    }

    fn read_document<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        let body: Option<String> = self
            .db
            .connection()
            .query_row(
                "SELECT body FROM documents WHERE name = ?1",
                [name],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("Failed to read {} document", name))?;

        body.map(|body| {
            serde_json::from_str(&body)
                .with_context(|| format!("Failed to deserialize {} document", name))
        })
        .transpose()
    }

    fn write_document<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
        let body = serde_json::to_string(value)
            .with_context(|| format!("Failed to serialize {} document", name))?;

        self.db
            .connection()
            .execute(
                "INSERT INTO documents (name, body, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(name) DO UPDATE SET body = excluded.body, updated_at = excluded.updated_at",
                params![name, body, Local::now().to_rfc3339()],
            )
            .with_context(|| format!("Failed to write {} document", name))?;

        log::debug!("Saved {} document", name);
        Ok(())
    }
}

impl RosterStore for SqliteStore {
    fn load(&self) -> Result<PersistedState> {
        let state = PersistedState {
            events: self.read_document(EVENTS)?.unwrap_or_default(),
            interpreters: self.read_document(INTERPRETERS)?.unwrap_or_default(),
            assignments: self.read_document(ASSIGNMENTS)?.unwrap_or_default(),
            groups: self.read_document(GROUPS)?.unwrap_or_default(),
            positions: self
                .read_document::<Vec<String>>(POSITIONS)?
                .map(PositionCatalog::from_names),
        };

        log::info!(
            "Loaded {} events, {} interpreters, {} groups",
            state.events.len(),
            state.interpreters.len(),
            state.groups.len()
        );
        Ok(state)
    }

    fn save_events(&self, events: &[Event]) -> Result<()> {
        self.write_document(EVENTS, events)
    }

    fn save_interpreters(&self, interpreters: &[Interpreter]) -> Result<()> {
        self.write_document(INTERPRETERS, interpreters)
    }

    fn save_assignments(&self, assignments: &AssignmentMap) -> Result<()> {
        self.write_document(ASSIGNMENTS, assignments)
    }

    fn save_groups(&self, groups: &[Group]) -> Result<()> {
        self.write_document(GROUPS, groups)
    }

    fn save_positions(&self, positions: &PositionCatalog) -> Result<()> {
        self.write_document(POSITIONS, positions)
    }

    fn append_activity(&self, entry: &ActivityEntry) -> Result<()> {
        self.db
            .connection()
            .execute(
                "INSERT INTO activity_log (timestamp, action, details, user) VALUES (?1, ?2, ?3, ?4)",
                params![
                    entry.timestamp.to_rfc3339(),
                    entry.action,
                    entry.details,
                    entry.user
                ],
            )
            .context("Failed to append activity entry")?;
        Ok(())
    }

    fn recent_activity(&self, limit: usize) -> Result<Vec<ActivityEntry>> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare(
            "SELECT timestamp, action, details, user FROM activity_log
             ORDER BY id DESC LIMIT ?1",
        )?;

        let rows = stmt
            .query_map([limit as i64], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to fetch activity log")?;

        rows.into_iter()
            .map(|(timestamp, action, details, user)| {
                let timestamp = DateTime::parse_from_rfc3339(&timestamp)
                    .with_context(|| format!("Invalid activity timestamp '{}'", timestamp))?
                    .with_timezone(&Local);
                Ok(ActivityEntry {
                    timestamp,
                    action,
                    details,
                    user,
                })
            })
            .collect()
    }

    fn clear_activity(&self) -> Result<()> {
        let removed = self
            .db
            .connection()
            .execute("DELETE FROM activity_log", [])
            .context("Failed to clear activity log")?;
        log::info!("Cleared {} activity entries", removed);
        Ok(())
    }
}

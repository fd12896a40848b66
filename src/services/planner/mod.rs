//! Planner session: owns the in-memory roster model and keeps the store in
//! step with it.
//!
//! Every mutation is applied to memory first. Saves carry whole collections;
//! a failed save leaves memory untouched, queues a [`PersistenceWarning`] and
//! writes the local JSON cache when one is configured. Operations are split
//! across focused submodules.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;

use crate::models::activity::{ActivityEntry, RECENT_ACTIVITY_LIMIT};
use crate::models::event::{Event, EventId};
use crate::models::group::Group;
use crate::models::interpreter::{Interpreter, InterpreterId};
use crate::models::position::PositionCatalog;
use crate::models::settings::AppConfig;
use crate::services::availability::AssignmentStore;
use crate::services::persistence::{
    load_snapshot, save_snapshot, PersistedState, PersistenceWarning, RosterStore,
};
use crate::services::roster::Roster;

pub mod availability;
pub mod directory;
pub mod events;
pub mod roster;
pub mod view;

pub use events::Suggestions;
pub use view::{RosterRow, RosterView};

pub struct Planner {
    store: Box<dyn RosterStore>,
    events: Vec<Event>,
    interpreters: Vec<Interpreter>,
    positions: PositionCatalog,
    assignments: AssignmentStore,
    active_event: Option<EventId>,
    roster: Roster,
    /// Groups loaded at startup, applied to the first event opened
    stored_groups: Option<Vec<Group>>,
    warnings: Vec<PersistenceWarning>,
    cache_path: Option<PathBuf>,
    default_location: String,
    user: String,
}

impl Planner {
    /// Load every collection from `store`.
    ///
    /// If the store cannot be read, the local cache is tried next, then an
    /// empty state; either way a warning is queued.
    pub fn open(store: Box<dyn RosterStore>, config: &AppConfig, cache_path: Option<PathBuf>) -> Self {
        let mut warnings = Vec::new();
        let state = match store.load() {
            Ok(state) => state,
            Err(err) => {
                log::warn!("Failed to load roster data: {:#}", err);
                warnings.push(PersistenceWarning::new("load roster data", &err));
                load_cached_state(cache_path.as_ref())
            }
        };

        let positions = state.positions.unwrap_or_else(|| {
            PositionCatalog::from_names(config.default_positions.iter().cloned())
        });

        Self {
            store,
            events: state.events,
            interpreters: state.interpreters,
            positions,
            assignments: AssignmentStore::from_map(state.assignments),
            active_event: None,
            roster: Roster::default(),
            stored_groups: Some(state.groups),
            warnings,
            cache_path,
            default_location: config.default_location.clone(),
            user: config.user.clone(),
        }
    }

    /// Re-read events, interpreters and positions after an external change.
    ///
    /// The open roster keeps whatever groups still fit the refreshed order,
    /// and an unflushed assign-mode session keeps its pending overrides.
    pub fn reload(&mut self) -> Result<()> {
        let state = self.store.load()?;
        self.events = state.events;
        self.interpreters = state.interpreters;
        if let Some(positions) = state.positions {
            self.positions = positions;
        }
        self.assignments.refresh(state.assignments);

        if let Some(event_id) = self.active_event.clone() {
            match self.event(&event_id) {
                Some(_) => {
                    let sequence = self.sequence_for(&event_id);
                    self.roster.replace_sequence(sequence);
                }
                None => {
                    log::info!("Active event {} disappeared on reload", event_id);
                    self.active_event = None;
                    self.roster = Roster::default();
                }
            }
        }
        Ok(())
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn event(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|event| &event.id == id)
    }

    pub fn interpreters(&self) -> &[Interpreter] {
        &self.interpreters
    }

    pub fn interpreter(&self, id: &InterpreterId) -> Option<&Interpreter> {
        self.interpreters.iter().find(|interpreter| &interpreter.id == id)
    }

    pub fn positions(&self) -> &PositionCatalog {
        &self.positions
    }

    pub fn assignments(&self) -> &AssignmentStore {
        &self.assignments
    }

    /// Groups of the open roster, or the stored ones if no event was opened yet.
    pub fn groups(&self) -> &[Group] {
        match (&self.active_event, &self.stored_groups) {
            (None, Some(stored)) => stored,
            _ => self.roster.groups().groups(),
        }
    }

    /// Warnings queued since the last call, oldest first.
    pub fn take_warnings(&mut self) -> Vec<PersistenceWarning> {
        std::mem::take(&mut self.warnings)
    }

    /// Everything the store holds, as currently known in memory.
    pub fn snapshot(&self) -> PersistedState {
        PersistedState {
            events: self.events.clone(),
            interpreters: self.interpreters.clone(),
            assignments: self.assignments.map().clone(),
            groups: self.groups().to_vec(),
            positions: Some(self.positions.clone()),
        }
    }

    pub fn recent_activity(&mut self) -> Vec<ActivityEntry> {
        match self.store.recent_activity(RECENT_ACTIVITY_LIMIT) {
            Ok(entries) => entries,
            Err(err) => {
                self.warn("load activity log", err);
                Vec::new()
            }
        }
    }

    pub fn clear_activity(&mut self) {
        let result = self.store.clear_activity();
        self.check("clear activity log", result);
    }

    // ========== Persistence helpers ==========

    fn save_events(&mut self) {
        let result = self.store.save_events(&self.events);
        self.check_with_cache("save events", result);
    }

    fn save_interpreters(&mut self) {
        let result = self.store.save_interpreters(&self.interpreters);
        self.check_with_cache("save interpreters", result);
    }

    fn save_assignments(&mut self) {
        let result = self.store.save_assignments(self.assignments.map());
        self.check_with_cache("save assignments", result);
    }

    fn save_groups(&mut self) {
        let result = self.store.save_groups(self.groups());
        self.check_with_cache("save groups", result);
    }

    fn save_positions(&mut self) {
        let result = self.store.save_positions(&self.positions);
        self.check_with_cache("save positions", result);
    }

    fn record(&mut self, action: &str, details: String) {
        let entry = ActivityEntry::now(action, details, self.user.as_str());
        let result = self.store.append_activity(&entry);
        self.check("record activity", result);
    }

    fn check(&mut self, action: &'static str, result: Result<()>) {
        if let Err(err) = result {
            self.warn(action, err);
        }
    }

    fn check_with_cache(&mut self, action: &'static str, result: Result<()>) {
        if let Err(err) = result {
            self.warn(action, err);
            self.write_cache();
        }
    }

    fn warn(&mut self, action: &'static str, err: anyhow::Error) {
        log::warn!("Failed to {}: {:#}", action, err);
        self.warnings.push(PersistenceWarning::new(action, &err));
    }

    fn write_cache(&self) {
        let Some(path) = &self.cache_path else {
            return;
        };
        match save_snapshot(path, &self.snapshot()) {
            Ok(()) => log::info!("Wrote local cache to {}", path.display()),
            Err(err) => log::warn!("Failed to write local cache: {:#}", err),
        }
    }

    /// Unused id of the form `<prefix>-<millis>`.
    fn fresh_id(&self, prefix: &str, taken: impl Fn(&str) -> bool) -> String {
        let mut stamp = Local::now().timestamp_millis();
        loop {
            let candidate = format!("{}-{}", prefix, stamp);
            if !taken(&candidate) {
                return candidate;
            }
            stamp += 1;
        }
    }
}

fn load_cached_state(cache_path: Option<&PathBuf>) -> PersistedState {
    let Some(path) = cache_path else {
        return PersistedState::default();
    };
    match load_snapshot(path) {
        Ok(state) => {
            log::info!("Loaded roster data from local cache {}", path.display());
            state
        }
        Err(err) => {
            log::warn!("Failed to load local cache: {:#}", err);
            PersistedState::default()
        }
    }
}

#[cfg(test)]
mod tests;

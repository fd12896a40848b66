//! Manual working-day overrides, edited one interpreter at a time.

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::NaiveDate;

use crate::models::interpreter::InterpreterId;

/// Per-date overrides for one interpreter. `true` = explicitly working.
pub type DayOverrides = BTreeMap<NaiveDate, bool>;

/// Overrides for every interpreter, in the shape they are persisted.
pub type AssignmentMap = BTreeMap<InterpreterId, DayOverrides>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentStore {
    overrides: AssignmentMap,
    /// Interpreter whose days are being edited
    active: Option<InterpreterId>,
}

impl AssignmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(overrides: AssignmentMap) -> Self {
        Self {
            overrides,
            active: None,
        }
    }

    pub fn map(&self) -> &AssignmentMap {
        &self.overrides
    }

    pub fn active(&self) -> Option<&InterpreterId> {
        self.active.as_ref()
    }

    /// Switch the interpreter being edited.
    ///
    /// The outgoing interpreter's overrides are handed to `flush` before the
    /// new one becomes active. The switch happens even if `flush` fails; its
    /// error is returned so the caller can warn about it.
    pub fn set_active<F>(&mut self, next: Option<InterpreterId>, flush: F) -> Result<()>
    where
        F: FnOnce(&InterpreterId, &AssignmentMap) -> Result<()>,
    {
        if self.active == next {
            return Ok(());
        }

        let flushed = match self.active.as_ref() {
            Some(outgoing) => flush(outgoing, &self.overrides),
            None => Ok(()),
        };

        log::debug!(
            "Assign mode: {:?} -> {:?}",
            self.active.as_ref().map(InterpreterId::as_str),
            next.as_ref().map(InterpreterId::as_str)
        );
        self.active = next;
        flushed
    }

    /// Record an override for the active interpreter. Returns false (and
    /// changes nothing) when no interpreter is active.
    pub fn set_day(&mut self, date: NaiveDate, working: bool) -> bool {
        let Some(active) = self.active.clone() else {
            log::warn!("Ignoring working-day change for {}: no interpreter in assign mode", date);
            return false;
        };
        self.overrides.entry(active).or_default().insert(date, working);
        true
    }

    /// Explicit override, or `None` when the day should be derived from events.
    pub fn get(&self, id: &InterpreterId, date: NaiveDate) -> Option<bool> {
        self.overrides.get(id)?.get(&date).copied()
    }

    pub fn days_for(&self, id: &InterpreterId) -> Option<&DayOverrides> {
        self.overrides.get(id)
    }

    /// Forget an interpreter entirely, ending their session without a flush.
    pub fn remove_interpreter(&mut self, id: &InterpreterId) -> bool {
        if self.active.as_ref() == Some(id) {
            self.active = None;
        }
        self.overrides.remove(id).is_some()
    }

    /// Take in overrides refreshed from storage, keeping the active session.
    ///
    /// The active interpreter's in-memory overrides win over the stored ones,
    /// since they may not have been flushed yet.
    pub fn refresh(&mut self, mut stored: AssignmentMap) {
        if let Some(active) = &self.active {
            if let Some(pending) = self.overrides.remove(active) {
                stored.insert(active.clone(), pending);
            }
        }
        self.overrides = stored;
    }
}

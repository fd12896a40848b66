use chrono::NaiveDate;

use super::Planner;
use crate::models::event::{Event, EventDraft, EventId, EventValidationError};
use crate::models::interpreter::{Interpreter, InterpreterId};
use crate::services::roster::RosterEntry;

/// Number of directory interpreters offered as one-click picks.
pub const QUICK_PICK_COUNT: usize = 12;

/// Interpreters that could still be assigned to an event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suggestions {
    /// Unassigned interpreters among the first [`QUICK_PICK_COUNT`] of the directory
    pub quick_picks: Vec<InterpreterId>,
    /// Every other unassigned interpreter, most used first
    pub others: Vec<InterpreterId>,
}

impl Planner {
    /// Create an event from form input. A missing location uses the
    /// configured default.
    pub fn create_event(&mut self, mut draft: EventDraft) -> Result<EventId, EventValidationError> {
        if draft.location.is_none() {
            draft.location = Some(self.default_location.clone());
        }
        let id = EventId::new(self.fresh_id("event", |candidate| {
            self.events.iter().any(|event| event.id.0 == candidate)
        }));
        let event = draft.build(id.clone())?;

        log::info!("Created event {} ({})", event.title, id);
        let details = format!("{} {} to {}", event.title, event.start, event.last_day());
        self.events.push(event);
        self.save_events();
        self.record("Create event", details);
        Ok(id)
    }

    /// Apply edited form input, keeping the event's roster. Returns false for
    /// an unknown event.
    pub fn update_event(
        &mut self,
        id: &EventId,
        mut draft: EventDraft,
    ) -> Result<bool, EventValidationError> {
        if draft.location.is_none() {
            draft.location = Some(self.default_location.clone());
        }
        let Some(event) = self.events.iter_mut().find(|event| &event.id == id) else {
            return Ok(false);
        };
        event.apply_draft(&draft)?;
        let details = format!("{} {} to {}", event.title, event.start, event.last_day());

        self.save_events();
        self.record("Update event", details);
        Ok(true)
    }

    /// Delete an event. Ends any assign-mode session first, flushing it, and
    /// closes the roster if the event was open.
    pub fn delete_event(&mut self, id: &EventId) -> bool {
        let Some(index) = self.events.iter().position(|event| &event.id == id) else {
            return false;
        };

        self.end_assign_mode();
        let event = self.events.remove(index);
        if self.active_event.as_ref() == Some(id) {
            self.close_roster();
        }

        log::info!("Deleted event {} ({})", event.title, id);
        self.save_events();
        self.record("Delete event", event.title);
        true
    }

    /// Add an interpreter to an event. Returns false if either is unknown or
    /// the interpreter is already assigned.
    pub fn assign_interpreter(&mut self, event_id: &EventId, interpreter_id: &InterpreterId) -> bool {
        let Some(interpreter) = self.interpreter(interpreter_id) else {
            return false;
        };
        let position = interpreter.position_or(self.positions.first()).to_string();
        let name = interpreter.name.clone();

        let Some(event) = self.events.iter_mut().find(|event| &event.id == event_id) else {
            return false;
        };
        if !event.assign(interpreter_id.clone()) {
            return false;
        }
        let details = format!("{} to {}", name, event.title);

        if self.active_event.as_ref() == Some(event_id) {
            self.roster
                .append(RosterEntry::new(interpreter_id.clone(), position));
        }
        self.save_events();
        self.record("Assign interpreter", details);
        true
    }

    pub fn unassign_interpreter(
        &mut self,
        event_id: &EventId,
        interpreter_id: &InterpreterId,
    ) -> bool {
        let Some(event) = self.events.iter_mut().find(|event| &event.id == event_id) else {
            return false;
        };
        if !event.unassign(interpreter_id) {
            return false;
        }
        let details = format!("{} from {}", interpreter_id, event.title);

        self.save_events();
        if self.active_event.as_ref() == Some(event_id) && self.roster.remove(interpreter_id) {
            self.save_groups();
        }
        self.record("Unassign interpreter", details);
        true
    }

    /// Candidates for an event: unassigned quick picks from the head of the
    /// directory, then the remaining unassigned interpreters by how many
    /// events already use them.
    pub fn suggestions(&self, event_id: &EventId) -> Option<Suggestions> {
        let event = self.event(event_id)?;
        let unassigned = |interpreter: &&Interpreter| !event.has_interpreter(&interpreter.id);

        let quick_picks = self
            .interpreters
            .iter()
            .take(QUICK_PICK_COUNT)
            .filter(unassigned)
            .map(|interpreter| interpreter.id.clone())
            .collect();

        let mut others: Vec<&Interpreter> = self
            .interpreters
            .iter()
            .skip(QUICK_PICK_COUNT)
            .filter(unassigned)
            .collect();
        others.sort_by_key(|interpreter| std::cmp::Reverse(self.usage_count(&interpreter.id)));

        Some(Suggestions {
            quick_picks,
            others: others.into_iter().map(|i| i.id.clone()).collect(),
        })
    }

    /// Number of events listing the interpreter.
    pub fn usage_count(&self, id: &InterpreterId) -> usize {
        self.events
            .iter()
            .filter(|event| event.has_interpreter(id))
            .count()
    }

    /// Events that have not finished by `today`, in stored order.
    pub fn upcoming_events(&self, today: NaiveDate) -> Vec<&Event> {
        self.events.iter().filter(|event| event.end > today).collect()
    }
}

use super::Planner;
use crate::models::event::EventId;
use crate::models::interpreter::InterpreterId;
use crate::services::roster::{GroupingError, Roster, RosterEntry, RosterSequence};

impl Planner {
    pub fn active_event(&self) -> Option<&EventId> {
        self.active_event.as_ref()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Open an event's roster.
    ///
    /// The first event opened after startup picks up the stored groups that
    /// still fit its order. Switching to another event afterwards drops all
    /// groups in memory; the stored groups are left alone until the next save.
    pub fn select_event(&mut self, id: &EventId) -> bool {
        if self.event(id).is_none() {
            return false;
        }
        if self.active_event.as_ref() == Some(id) {
            return true;
        }

        let sequence = self.sequence_for(id);
        match self.stored_groups.take() {
            Some(groups) => {
                self.roster = Roster::new(sequence, groups);
            }
            None => {
                self.roster.clear_all();
                self.roster.replace_sequence(sequence);
            }
        }

        log::debug!("Opened roster for event {}", id);
        self.active_event = Some(id.clone());
        true
    }

    pub(crate) fn close_roster(&mut self) {
        self.roster.clear_all();
        self.roster.replace_sequence(RosterSequence::new());
        self.active_event = None;
    }

    /// Roster entries for an event, in its stored order.
    pub(crate) fn sequence_for(&self, id: &EventId) -> RosterSequence {
        let default_position = self.positions.first();
        let Some(event) = self.event(id) else {
            return RosterSequence::new();
        };

        RosterSequence::from_entries(event.interpreter_ids.iter().map(|interpreter_id| {
            let position = self
                .interpreter(interpreter_id)
                .map(|interpreter| interpreter.position_or(default_position))
                .unwrap_or(default_position);
            RosterEntry::new(interpreter_id.clone(), position)
        }))
    }

    /// Drag-and-drop reorder of the open roster. The new order becomes the
    /// event's interpreter order.
    pub fn move_roster_entry(&mut self, id: &InterpreterId, before: Option<&InterpreterId>) -> bool {
        if !self.roster.move_entry(id, before) {
            return false;
        }
        self.sync_active_event_order();
        self.save_events();
        self.save_groups();
        true
    }

    pub fn begin_group(&mut self) {
        self.roster.begin_group();
    }

    pub fn toggle_group_selection(&mut self, id: &InterpreterId) -> bool {
        self.roster.toggle_selection(id)
    }

    /// Create a group from the selection. Errors are user errors; the
    /// selection is cleared and grouping mode stays open.
    pub fn confirm_group_selection(&mut self) -> Result<(), GroupingError> {
        let result = self.roster.confirm_selection();
        if let Err(err) = &result {
            log::debug!("Group selection rejected: {}", err);
        }
        result
    }

    /// Finish grouping. Saves and returns the final name if a group was named.
    pub fn commit_group_name(&mut self, name: &str) -> Option<String> {
        let committed = self.roster.commit_group_name(name)?;
        self.save_groups();
        self.record("Create group", committed.clone());
        Some(committed)
    }

    pub fn rename_group(&mut self, start_id: &InterpreterId, name: &str) -> Option<String> {
        let renamed = self.roster.rename_group(start_id, name)?;
        self.save_groups();
        Some(renamed)
    }

    /// "Clear settings": drop every group, in memory and in the store.
    pub fn clear_groups(&mut self) {
        self.roster.clear_all();
        if self.stored_groups.is_some() {
            self.stored_groups = Some(Vec::new());
        }
        self.save_groups();
        self.record("Clear groups", String::new());
    }

    fn sync_active_event_order(&mut self) {
        let Some(active) = self.active_event.clone() else {
            return;
        };
        let order = self.roster.ids();
        if let Some(event) = self.events.iter_mut().find(|event| event.id == active) {
            event.interpreter_ids = order;
        }
    }
}

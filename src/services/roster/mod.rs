//! Grouped, reorderable roster for the active event.
//!
//! [`Roster`] owns the entry order, the groups over it and the grouping
//! workflow, and runs group repair as part of every order mutation so a
//! reader never sees stale group spans.

use thiserror::Error;

use crate::models::group::{Group, RosterBand};
use crate::models::interpreter::InterpreterId;

pub mod grouping_mode;
pub mod groups;
pub mod sequence;

pub use grouping_mode::{GroupingModeController, GroupingState};
pub use groups::{GroupRepair, GroupSet};
pub use sequence::{RosterEntry, RosterSequence, SequenceChange};

/// User errors from the group creation workflow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupingError {
    #[error("Please select at least one interpreter to group.")]
    EmptySelection,
    #[error("Please select consecutive rows only (e.g., rows 1-3, not rows 1 and 3).")]
    NonConsecutiveSelection,
}

#[derive(Debug, Clone, Default)]
pub struct Roster {
    sequence: RosterSequence,
    groups: GroupSet,
    mode: GroupingModeController,
}

impl Roster {
    pub fn new(sequence: RosterSequence, groups: Vec<Group>) -> Self {
        let groups = GroupSet::from_groups(groups, &sequence);
        Self {
            sequence,
            groups,
            mode: GroupingModeController::new(),
        }
    }

    pub fn sequence(&self) -> &RosterSequence {
        &self.sequence
    }

    pub fn groups(&self) -> &GroupSet {
        &self.groups
    }

    pub fn mode(&self) -> &GroupingModeController {
        &self.mode
    }

    pub fn ids(&self) -> Vec<InterpreterId> {
        self.sequence.ids()
    }

    /// Drag-and-drop reorder. Returns true if the order changed.
    pub fn move_entry(&mut self, id: &InterpreterId, before: Option<&InterpreterId>) -> bool {
        let previous = self.sequence.ids();
        match self.sequence.move_entry(id, before) {
            Some(SequenceChange::Moved { from, to, .. }) => {
                log::debug!("Moved {} from row {} to row {}", id, from, to);
                let repairs = self.groups.on_reorder(id, &previous, &self.sequence);
                self.mode.apply_repairs(&repairs, &self.sequence);
                true
            }
            _ => false,
        }
    }

    pub fn append(&mut self, entry: RosterEntry) -> bool {
        if !self.sequence.append(entry) {
            return false;
        }
        let repairs = self.groups.revalidate(&self.sequence);
        self.mode.apply_repairs(&repairs, &self.sequence);
        true
    }

    pub fn remove(&mut self, id: &InterpreterId) -> bool {
        let previous = self.sequence.ids();
        if self.sequence.remove(id).is_none() {
            return false;
        }
        let repairs = self.groups.on_remove(id, &previous, &self.sequence);
        self.mode.apply_repairs(&repairs, &self.sequence);
        true
    }

    /// Replace the order after an external change, keeping groups that still fit.
    pub fn replace_sequence(&mut self, sequence: RosterSequence) {
        let previous = self.sequence.ids();
        self.sequence = sequence;
        let repairs = self.groups.on_replace(&previous, &self.sequence);
        self.mode.apply_repairs(&repairs, &self.sequence);
    }

    pub fn set_position(&mut self, id: &InterpreterId, position: &str) -> bool {
        match self.sequence.entry_mut(id) {
            Some(entry) => {
                entry.position = position.to_string();
                true
            }
            None => false,
        }
    }

    pub fn begin_group(&mut self) {
        self.mode.begin_group();
    }

    pub fn toggle_selection(&mut self, id: &InterpreterId) -> bool {
        self.mode.toggle(id, &self.sequence)
    }

    pub fn confirm_selection(&mut self) -> Result<(), GroupingError> {
        self.mode.confirm_selection(&mut self.groups, &self.sequence)
    }

    pub fn commit_group_name(&mut self, name: &str) -> Option<String> {
        self.mode.commit_name(name, &mut self.groups)
    }

    pub fn rename_group(&mut self, start_id: &InterpreterId, name: &str) -> Option<String> {
        self.groups.rename(start_id, name)
    }

    pub fn clear_all(&mut self) {
        self.mode.clear_all(&mut self.groups);
    }

    pub fn group_column_visible(&self) -> bool {
        self.mode.has_group_column() || !self.groups.is_empty()
    }

    pub fn render_bands(&self) -> Vec<RosterBand> {
        self.groups.render_bands(&self.sequence)
    }

    /// Displayed row numbers. Numbering restarts at 1 on the first row of
    /// each band spanning more than one row, and carries on through the rows
    /// after it. One-row bands are numbered like ungrouped rows.
    pub fn row_numbers(&self) -> Vec<usize> {
        let bands = self.render_bands();
        let mut number = 0;
        (0..self.sequence.len())
            .map(|row| {
                if bands
                    .iter()
                    .any(|band| band.first_row == row && band.row_span > 1)
                {
                    number = 1;
                } else {
                    number += 1;
                }
                number
            })
            .collect()
    }
}

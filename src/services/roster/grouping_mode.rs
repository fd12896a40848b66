//! Group creation workflow: Idle → Selecting → PendingName → Idle.

use crate::models::interpreter::InterpreterId;

use super::groups::{GroupRepair, GroupSet};
use super::sequence::RosterSequence;
use super::GroupingError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GroupingState {
    #[default]
    Idle,
    Selecting {
        selection: Vec<InterpreterId>,
    },
    /// A group was created and waits for its name. Tracked by start id.
    PendingName {
        start_id: InterpreterId,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupingModeController {
    state: GroupingState,
    /// Leading group column reserved in the roster layout
    group_column: bool,
}

impl GroupingModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GroupingState {
        &self.state
    }

    pub fn has_group_column(&self) -> bool {
        self.group_column
    }

    pub fn selection(&self) -> &[InterpreterId] {
        match &self.state {
            GroupingState::Selecting { selection } => selection,
            _ => &[],
        }
    }

    pub fn is_selected(&self, id: &InterpreterId) -> bool {
        self.selection().contains(id)
    }

    pub fn pending_group(&self) -> Option<&InterpreterId> {
        match &self.state {
            GroupingState::PendingName { start_id } => Some(start_id),
            _ => None,
        }
    }

    /// Enter selection mode and reserve the group column.
    pub fn begin_group(&mut self) {
        if self.state == GroupingState::Idle {
            log::debug!("Grouping mode: Idle -> Selecting");
            self.state = GroupingState::Selecting {
                selection: Vec::new(),
            };
            self.group_column = true;
        }
    }

    /// Toggle `id` in the selection. Returns whether it is now selected.
    /// Ignored outside `Selecting` and for ids not on the roster.
    pub fn toggle(&mut self, id: &InterpreterId, sequence: &RosterSequence) -> bool {
        let GroupingState::Selecting { selection } = &mut self.state else {
            return false;
        };
        if !sequence.contains(id) {
            return false;
        }
        if let Some(index) = selection.iter().position(|selected| selected == id) {
            selection.remove(index);
            false
        } else {
            selection.push(id.clone());
            true
        }
    }

    /// Turn the selection into an unnamed group.
    ///
    /// On a user error the selection is cleared and the controller stays in
    /// `Selecting`. Outside `Selecting` this does nothing.
    pub fn confirm_selection(
        &mut self,
        groups: &mut GroupSet,
        sequence: &RosterSequence,
    ) -> Result<(), GroupingError> {
        let GroupingState::Selecting { selection } = &mut self.state else {
            return Ok(());
        };
        let selected = std::mem::take(selection);

        let start_id = groups.create(&selected, "", sequence)?.start_id.clone();
        log::debug!("Grouping mode: Selecting -> PendingName ({})", start_id);
        self.state = GroupingState::PendingName { start_id };
        Ok(())
    }

    /// Finish the workflow.
    ///
    /// In `PendingName` the pending group gets `name` (blank becomes
    /// `Group N`) and the final name is returned. In `Selecting` nothing was
    /// created: the workflow is abandoned and, if no groups exist, the group
    /// column added for it is removed again.
    pub fn commit_name(&mut self, name: &str, groups: &mut GroupSet) -> Option<String> {
        match std::mem::take(&mut self.state) {
            GroupingState::PendingName { start_id } => {
                let committed = groups.rename(&start_id, name);
                if committed.is_none() {
                    log::debug!("Pending group {} vanished before it was named", start_id);
                }
                committed
            }
            GroupingState::Selecting { .. } => {
                if groups.is_empty() {
                    self.group_column = false;
                }
                None
            }
            GroupingState::Idle => None,
        }
    }

    /// Reset to `Idle`, drop every group and remove the group column.
    pub fn clear_all(&mut self, groups: &mut GroupSet) {
        self.state = GroupingState::Idle;
        self.group_column = false;
        groups.clear();
    }

    /// Keep the workflow consistent with a roster change.
    pub fn apply_repairs(&mut self, repairs: &[GroupRepair], sequence: &RosterSequence) {
        match &mut self.state {
            GroupingState::Selecting { selection } => {
                selection.retain(|id| sequence.contains(id));
            }
            GroupingState::PendingName { start_id } => {
                for repair in repairs {
                    match repair {
                        GroupRepair::Reanchored {
                            old_start,
                            new_start,
                        } if old_start == start_id => {
                            *start_id = new_start.clone();
                        }
                        GroupRepair::Dropped { start_id: dropped } if dropped == start_id => {
                            log::debug!("Pending group dropped by repair; back to Idle");
                            self.state = GroupingState::Idle;
                            return;
                        }
                        _ => {}
                    }
                }
            }
            GroupingState::Idle => {}
        }
    }
}

//! Named ranges over a roster sequence.
//!
//! Boundaries are interpreter ids. Indices are derived on demand from the
//! current sequence and never stored, so a reorder only needs a local check of
//! the groups the moved entry touched.

use crate::models::group::{default_group_name, Group, RosterBand};
use crate::models::interpreter::InterpreterId;

use super::sequence::RosterSequence;
use super::GroupingError;

/// What repair did to a group, keyed by the group's start id before repair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupRepair {
    Reanchored {
        old_start: InterpreterId,
        new_start: InterpreterId,
    },
    Dropped {
        start_id: InterpreterId,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupSet {
    /// Kept ordered by first row after every repair
    groups: Vec<Group>,
}

impl GroupSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore stored groups, dropping any that do not fit `sequence`.
    pub fn from_groups(groups: Vec<Group>, sequence: &RosterSequence) -> Self {
        let mut set = Self { groups };
        set.revalidate(sequence);
        set
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }

    /// True if the selected entries, ordered by roster position, form a run
    /// with no gaps. Empty and single selections are consecutive; a selection
    /// naming an id that is not on the roster is not.
    pub fn is_consecutive(selected: &[InterpreterId], sequence: &RosterSequence) -> bool {
        if selected.len() <= 1 {
            return selected.iter().all(|id| sequence.contains(id));
        }
        let Some(mut indices) = selected
            .iter()
            .map(|id| sequence.index_of(id))
            .collect::<Option<Vec<_>>>()
        else {
            return false;
        };
        indices.sort_unstable();
        indices.windows(2).all(|pair| pair[1] == pair[0] + 1)
    }

    /// Create a group spanning the selection. Existing groups that overlap the
    /// new range are dropped.
    pub fn create(
        &mut self,
        selected: &[InterpreterId],
        name: impl Into<String>,
        sequence: &RosterSequence,
    ) -> Result<&Group, GroupingError> {
        if selected.is_empty() {
            return Err(GroupingError::EmptySelection);
        }
        if !Self::is_consecutive(selected, sequence) {
            return Err(GroupingError::NonConsecutiveSelection);
        }

        let indices: Vec<usize> = selected
            .iter()
            .filter_map(|id| sequence.index_of(id))
            .collect();
        let (Some(&first), Some(&last)) = (indices.iter().min(), indices.iter().max()) else {
            return Err(GroupingError::EmptySelection);
        };

        self.groups.retain(|group| match span_of(group, sequence) {
            Some((start, end)) => {
                let overlaps = start <= last && first <= end;
                if overlaps {
                    log::debug!("Group '{}' superseded by new group", group.name);
                }
                !overlaps
            }
            None => false,
        });

        let start_id = sequence.get(first).map(|e| e.interpreter_id.clone());
        let end_id = sequence.get(last).map(|e| e.interpreter_id.clone());
        let (Some(start_id), Some(end_id)) = (start_id, end_id) else {
            return Err(GroupingError::EmptySelection);
        };

        self.groups.push(Group::new(start_id.clone(), end_id, name));
        self.sort_by_row(sequence);
        log::debug!("Created group over rows {}..={}", first, last);

        self.groups
            .iter()
            .find(|group| group.start_id == start_id)
            .ok_or(GroupingError::EmptySelection)
    }

    /// Name the group starting at `start_id`; a blank name becomes `Group N`.
    /// Returns the final name, or `None` if no such group exists.
    pub fn rename(&mut self, start_id: &InterpreterId, name: &str) -> Option<String> {
        let count = self.groups.len();
        let group = self.groups.iter_mut().find(|g| &g.start_id == start_id)?;
        group.name = match name.trim() {
            "" => default_group_name(count),
            trimmed => trimmed.to_string(),
        };
        Some(group.name.clone())
    }

    /// Repair after `moved` changed position. `previous` is the order before
    /// the move.
    ///
    /// A moved member stays in its group if it lands inside or directly next
    /// to the group's remaining members; otherwise it leaves and the boundaries
    /// re-anchor onto the remaining members. A group with no remaining members
    /// is dropped.
    pub fn on_reorder(
        &mut self,
        moved: &InterpreterId,
        previous: &[InterpreterId],
        sequence: &RosterSequence,
    ) -> Vec<GroupRepair> {
        let mut repairs = self.reanchor(moved, previous, sequence);
        repairs.extend(self.revalidate(sequence));
        repairs
    }

    /// Repair after `removed` left the sequence.
    pub fn on_remove(
        &mut self,
        removed: &InterpreterId,
        previous: &[InterpreterId],
        sequence: &RosterSequence,
    ) -> Vec<GroupRepair> {
        let mut repairs = self.reanchor(removed, previous, sequence);
        repairs.extend(self.revalidate(sequence));
        repairs
    }

    /// Repair after the whole order was replaced from outside, e.g. by a
    /// refreshed event. Every id missing from `sequence` is treated as removed.
    pub fn on_replace(
        &mut self,
        previous: &[InterpreterId],
        sequence: &RosterSequence,
    ) -> Vec<GroupRepair> {
        let mut repairs = Vec::new();
        for gone in previous.iter().filter(|id| !sequence.contains(id)) {
            repairs.extend(self.reanchor(gone, previous, sequence));
        }
        repairs.extend(self.revalidate(sequence));
        repairs
    }

    /// Drop groups whose boundaries no longer resolve in order, then drop any
    /// group overlapping an earlier one.
    pub fn revalidate(&mut self, sequence: &RosterSequence) -> Vec<GroupRepair> {
        let mut repairs = Vec::new();

        self.groups.retain(|group| {
            let valid = span_of(group, sequence).is_some();
            if !valid {
                log::debug!(
                    "Dropping group '{}': boundaries {}..{} no longer resolve",
                    group.name,
                    group.start_id,
                    group.end_id
                );
                repairs.push(GroupRepair::Dropped {
                    start_id: group.start_id.clone(),
                });
            }
            valid
        });

        self.sort_by_row(sequence);

        let mut last_end: Option<usize> = None;
        self.groups.retain(|group| {
            let Some((start, end)) = span_of(group, sequence) else {
                return false;
            };
            if last_end.is_some_and(|previous_end| start <= previous_end) {
                log::warn!("Dropping group '{}': it overlaps an earlier group", group.name);
                repairs.push(GroupRepair::Dropped {
                    start_id: group.start_id.clone(),
                });
                return false;
            }
            last_end = Some(end);
            true
        });

        repairs
    }

    /// One band per group, ordered by first row.
    pub fn render_bands(&self, sequence: &RosterSequence) -> Vec<RosterBand> {
        let mut bands: Vec<RosterBand> = self
            .groups
            .iter()
            .filter_map(|group| {
                let (start, end) = span_of(group, sequence)?;
                Some(RosterBand {
                    first_row: start,
                    row_span: end - start + 1,
                    name: group.name.clone(),
                })
            })
            .collect();
        bands.sort_by_key(|band| band.first_row);
        bands
    }

    fn reanchor(
        &mut self,
        member: &InterpreterId,
        previous: &[InterpreterId],
        sequence: &RosterSequence,
    ) -> Vec<GroupRepair> {
        let landed_at = sequence.index_of(member);
        let mut repairs = Vec::new();

        self.groups.retain_mut(|group| {
            let Some((old_start, old_end)) = span_in(group, previous) else {
                // Left for revalidate to report
                return true;
            };
            let old_members = &previous[old_start..=old_end];
            if !old_members.contains(member) {
                return true;
            }

            // Members other than `member` that are still on the roster
            let remaining: Vec<usize> = old_members
                .iter()
                .filter(|id| *id != member)
                .filter_map(|id| sequence.index_of(id))
                .collect();
            let (Some(&low), Some(&high)) = (remaining.iter().min(), remaining.iter().max())
            else {
                log::debug!("Dropping group '{}': no members remain", group.name);
                repairs.push(GroupRepair::Dropped {
                    start_id: group.start_id.clone(),
                });
                return false;
            };

            let (first, last) = match landed_at {
                Some(at) if at + 1 >= low && at <= high + 1 => (low.min(at), high.max(at)),
                _ => (low, high),
            };

            let (Some(start), Some(end)) = (sequence.get(first), sequence.get(last)) else {
                repairs.push(GroupRepair::Dropped {
                    start_id: group.start_id.clone(),
                });
                return false;
            };

            if group.start_id != start.interpreter_id {
                log::debug!(
                    "Re-anchoring group '{}' start {} -> {}",
                    group.name,
                    group.start_id,
                    start.interpreter_id
                );
                repairs.push(GroupRepair::Reanchored {
                    old_start: group.start_id.clone(),
                    new_start: start.interpreter_id.clone(),
                });
            }
            group.start_id = start.interpreter_id.clone();
            group.end_id = end.interpreter_id.clone();
            true
        });

        repairs
    }

    fn sort_by_row(&mut self, sequence: &RosterSequence) {
        self.groups
            .sort_by_key(|group| sequence.index_of(&group.start_id).unwrap_or(usize::MAX));
    }
}

/// Current `(start, end)` row indices of a group, if its boundaries resolve in order.
fn span_of(group: &Group, sequence: &RosterSequence) -> Option<(usize, usize)> {
    let start = sequence.index_of(&group.start_id)?;
    let end = sequence.index_of(&group.end_id)?;
    (start <= end).then_some((start, end))
}

fn span_in(group: &Group, ids: &[InterpreterId]) -> Option<(usize, usize)> {
    let start = ids.iter().position(|id| id == &group.start_id)?;
    let end = ids.iter().position(|id| id == &group.end_id)?;
    (start <= end).then_some((start, end))
}

//! Ordered roster entries for one event.
//!
//! The sequence knows nothing about groups; mutations report what changed so
//! the owning [`Roster`](super::Roster) can run group repair.

use crate::models::interpreter::InterpreterId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub interpreter_id: InterpreterId,
    pub position: String,
}

impl RosterEntry {
    pub fn new(interpreter_id: InterpreterId, position: impl Into<String>) -> Self {
        Self {
            interpreter_id,
            position: position.into(),
        }
    }
}

/// Result of a mutation that changed the order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceChange {
    Moved {
        id: InterpreterId,
        from: usize,
        to: usize,
    },
    Removed {
        id: InterpreterId,
        index: usize,
    },
}

/// Roster order. Interpreter ids are unique within a sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterSequence {
    entries: Vec<RosterEntry>,
}

impl RosterSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from entries, keeping the first occurrence of any repeated id.
    pub fn from_entries(entries: impl IntoIterator<Item = RosterEntry>) -> Self {
        let mut sequence = Self::new();
        for entry in entries {
            if !sequence.append(entry.clone()) {
                log::warn!("Ignoring duplicate roster entry {}", entry.interpreter_id);
            }
        }
        sequence
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RosterEntry> {
        self.entries.iter()
    }

    pub fn ids(&self) -> Vec<InterpreterId> {
        self.entries.iter().map(|e| e.interpreter_id.clone()).collect()
    }

    pub fn get(&self, index: usize) -> Option<&RosterEntry> {
        self.entries.get(index)
    }

    pub fn index_of(&self, id: &InterpreterId) -> Option<usize> {
        self.entries.iter().position(|e| &e.interpreter_id == id)
    }

    pub fn contains(&self, id: &InterpreterId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn entry_mut(&mut self, id: &InterpreterId) -> Option<&mut RosterEntry> {
        self.entries.iter_mut().find(|e| &e.interpreter_id == id)
    }

    /// Add at the tail. Returns false if the id is already present.
    pub fn append(&mut self, entry: RosterEntry) -> bool {
        if self.contains(&entry.interpreter_id) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Remove from any position. Missing ids are ignored.
    pub fn remove(&mut self, id: &InterpreterId) -> Option<SequenceChange> {
        let index = self.index_of(id)?;
        self.entries.remove(index);
        Some(SequenceChange::Removed {
            id: id.clone(),
            index,
        })
    }

    /// Move `id` to sit immediately before `before`, or to the end when
    /// `before` is `None`.
    ///
    /// Stale requests are no-ops: unknown `id`, unknown `before`,
    /// `id == before`, or a move that leaves the order unchanged.
    pub fn move_entry(
        &mut self,
        id: &InterpreterId,
        before: Option<&InterpreterId>,
    ) -> Option<SequenceChange> {
        if before == Some(id) {
            return None;
        }
        let from = self.index_of(id)?;
        if let Some(target) = before {
            self.index_of(target)?;
        }

        let entry = self.entries.remove(from);
        let to = match before {
            Some(target) => self.index_of(target).unwrap_or(self.entries.len()),
            None => self.entries.len(),
        };
        self.entries.insert(to, entry);

        if to == from {
            return None;
        }
        Some(SequenceChange::Moved {
            id: id.clone(),
            from,
            to,
        })
    }
}

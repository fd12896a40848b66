//! Roster group model.
//!
//! A group is a named, contiguous run of roster rows. Its boundaries are
//! stored as interpreter ids rather than row indices so they survive reorders.

use serde::{Deserialize, Serialize};

use crate::models::interpreter::InterpreterId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub start_id: InterpreterId,
    pub end_id: InterpreterId,
    /// Empty until the name is committed
    #[serde(default)]
    pub name: String,
}

impl Group {
    pub fn new(start_id: InterpreterId, end_id: InterpreterId, name: impl Into<String>) -> Self {
        Self {
            start_id,
            end_id,
            name: name.into(),
        }
    }
}

/// Name given to a group committed without one; `count` includes the group itself.
pub fn default_group_name(count: usize) -> String {
    format!("Group {}", count)
}

/// A merged label cell spanning consecutive roster rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterBand {
    /// Zero-based index of the first covered row
    pub first_row: usize,
    pub row_span: usize,
    pub name: String,
}

impl RosterBand {
    pub fn last_row(&self) -> usize {
        self.first_row + self.row_span - 1
    }

    pub fn contains_row(&self, row: usize) -> bool {
        row >= self.first_row && row <= self.last_row()
    }
}

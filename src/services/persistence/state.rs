use serde::{Deserialize, Serialize};

use crate::models::event::Event;
use crate::models::group::Group;
use crate::models::interpreter::Interpreter;
use crate::models::position::PositionCatalog;
use crate::services::availability::AssignmentMap;

/// Every stored collection, as loaded at startup or written to the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedState {
    pub events: Vec<Event>,
    pub interpreters: Vec<Interpreter>,
    pub assignments: AssignmentMap,
    pub groups: Vec<Group>,
    /// `None` when positions were never saved; the configured defaults apply
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positions: Option<PositionCatalog>,
}

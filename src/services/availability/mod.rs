//! Interpreter availability: manual working-day overrides and the per-day
//! highlight derived from them and from event assignments.

pub mod assignments;
pub mod classifier;
pub mod overlap;

pub use assignments::{AssignmentMap, AssignmentStore, DayOverrides};
pub use classifier::{Highlight, HighlightClassifier};
pub use overlap::EventOverlapIndex;

//! Per-day highlight for an interpreter's availability calendar.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::event::Event;
use crate::models::interpreter::InterpreterId;
use crate::utils::date::days_in_range;

use super::assignments::AssignmentStore;
use super::overlap::EventOverlapIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Highlight {
    None,
    /// Exactly one event claims the day
    Single,
    /// Two or more events claim the day
    Overlap,
    /// Manually marked as working
    Working,
}

impl Highlight {
    /// Event-derived class for a number of overlapping events.
    pub fn from_event_count(count: usize) -> Self {
        match count {
            0 => Highlight::None,
            1 => Highlight::Single,
            _ => Highlight::Overlap,
        }
    }

    /// Calendar CSS class, if the day is highlighted at all.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            Highlight::None => None,
            Highlight::Single => Some("interpreter-assigned"),
            Highlight::Overlap => Some("interpreter-overlap"),
            Highlight::Working => Some("interpreter-working"),
        }
    }
}

/// Combines manual overrides with event coverage.
///
/// A day manually marked working is always `Working`. Any other day,
/// including one explicitly marked not working, takes its class from the
/// number of events covering it.
pub struct HighlightClassifier<'a> {
    assignments: &'a AssignmentStore,
    overlap: EventOverlapIndex<'a>,
}

impl<'a> HighlightClassifier<'a> {
    pub fn new(assignments: &'a AssignmentStore, events: &'a [Event]) -> Self {
        Self {
            assignments,
            overlap: EventOverlapIndex::new(events),
        }
    }

    pub fn classify(&self, id: &InterpreterId, date: NaiveDate) -> Highlight {
        if self.assignments.get(id, date) == Some(true) {
            return Highlight::Working;
        }
        Highlight::from_event_count(self.overlap.count_assignments(id, date))
    }

    /// Classify every day in `[from, to)`.
    pub fn classify_range(
        &self,
        id: &InterpreterId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Vec<(NaiveDate, Highlight)> {
        days_in_range(from, to)
            .map(|date| (date, self.classify(id, date)))
            .collect()
    }
}

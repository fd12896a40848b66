use chrono::NaiveDate;

use super::Planner;
use crate::models::interpreter::InterpreterId;
use crate::services::availability::{Highlight, HighlightClassifier};

impl Planner {
    /// Interpreter whose working days are being edited, if any.
    pub fn assigning_interpreter(&self) -> Option<&InterpreterId> {
        self.assignments.active()
    }

    /// Toggle assign mode for `id`. Picking the active interpreter again ends
    /// the session; picking another one switches to it. The outgoing
    /// interpreter's overrides are saved before the switch.
    pub fn toggle_assign_mode(&mut self, id: &InterpreterId) -> Option<&InterpreterId> {
        if self.interpreter(id).is_none() {
            log::warn!("Cannot enter assign mode for unknown interpreter {}", id);
            return self.assignments.active();
        }
        let next = if self.assignments.active() == Some(id) {
            None
        } else {
            Some(id.clone())
        };
        self.switch_assign_mode(next);
        self.assignments.active()
    }

    pub fn end_assign_mode(&mut self) {
        self.switch_assign_mode(None);
    }

    fn switch_assign_mode(&mut self, next: Option<InterpreterId>) {
        let outgoing = self.assignments.active().cloned();
        let store = &self.store;
        let flushed = self
            .assignments
            .set_active(next, |_, map| store.save_assignments(map));

        match flushed {
            Ok(()) => {
                if let Some(outgoing) = outgoing {
                    if self.assignments.active() != Some(&outgoing) {
                        self.record("Save working days", outgoing.to_string());
                    }
                }
            }
            Err(err) => {
                self.warn("save assignments", err);
                self.write_cache();
            }
        }
    }

    /// Mark a day for the interpreter in assign mode and save the overrides.
    /// False if none is active.
    pub fn set_working_day(&mut self, date: NaiveDate, working: bool) -> bool {
        if !self.assignments.set_day(date, working) {
            return false;
        }
        self.save_assignments();
        true
    }

    pub fn classify(&self, id: &InterpreterId, date: NaiveDate) -> Highlight {
        HighlightClassifier::new(&self.assignments, &self.events).classify(id, date)
    }

    /// Highlights for every day in `[from, to)`, for the calendar grid.
    pub fn availability(
        &self,
        id: &InterpreterId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Vec<(NaiveDate, Highlight)> {
        HighlightClassifier::new(&self.assignments, &self.events).classify_range(id, from, to)
    }
}

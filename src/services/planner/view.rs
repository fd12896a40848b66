//! Read-only projection of the open roster for a renderer.

use chrono::NaiveDate;
use serde::Serialize;

use super::Planner;
use crate::models::event::EventId;
use crate::models::group::RosterBand;
use crate::models::interpreter::InterpreterId;
use crate::services::roster::GroupingState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterRow {
    /// Displayed number; restarts at 1 on each band
    pub number: usize,
    pub interpreter_id: InterpreterId,
    pub name: String,
    pub full_name: String,
    pub id_name: String,
    pub position: String,
    pub selected: bool,
    /// One flag per event day: explicitly marked working
    pub working_days: Vec<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterView {
    pub event_id: EventId,
    pub title: String,
    pub location: String,
    /// Event days, `[start, end)`
    pub days: Vec<NaiveDate>,
    pub rows: Vec<RosterRow>,
    pub bands: Vec<RosterBand>,
    pub group_column: bool,
    pub selecting: bool,
    pub pending_group: Option<InterpreterId>,
}

impl RosterView {
    /// Band covering `row`, if any.
    pub fn band_at(&self, row: usize) -> Option<&RosterBand> {
        self.bands.iter().find(|band| band.contains_row(row))
    }
}

impl Planner {
    /// View of the open roster, or `None` when no event is open.
    pub fn roster_view(&self) -> Option<RosterView> {
        let event = self.event(self.active_event.as_ref()?)?;
        let days = event.days();
        let numbers = self.roster.row_numbers();
        let mode = self.roster.mode();

        let rows = self
            .roster
            .sequence()
            .iter()
            .zip(numbers)
            .map(|(entry, number)| {
                let id = &entry.interpreter_id;
                let interpreter = self.interpreter(id);
                let name = interpreter.map_or_else(|| id.to_string(), |i| i.name.clone());
                RosterRow {
                    number,
                    interpreter_id: id.clone(),
                    full_name: interpreter.map_or_else(|| name.clone(), |i| i.full_name.clone()),
                    id_name: interpreter.map_or_else(String::new, |i| i.id_name.clone()),
                    name,
                    position: entry.position.clone(),
                    selected: mode.is_selected(id),
                    working_days: days
                        .iter()
                        .map(|day| self.assignments.get(id, *day) == Some(true))
                        .collect(),
                }
            })
            .collect();

        Some(RosterView {
            event_id: event.id.clone(),
            title: event.title.clone(),
            location: event.location.clone(),
            days,
            rows,
            bands: self.roster.render_bands(),
            group_column: self.roster.group_column_visible(),
            selecting: matches!(mode.state(), GroupingState::Selecting { .. }),
            pending_group: mode.pending_group().cloned(),
        })
    }
}

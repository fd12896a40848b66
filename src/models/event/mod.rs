// Event module
// Multi-day event that interpreters are assigned to

use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::interpreter::InterpreterId;
use crate::utils::date::days_in_range;

/// Location used when an event is entered without one.
pub const DEFAULT_LOCATION: &str = "Hong Kong";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventValidationError {
    #[error("Please enter Show Name and Start Date.")]
    MissingStartDate,
    #[error("Event title cannot be empty")]
    EmptyTitle,
    #[error("Event end date must be after its start date")]
    EndNotAfterStart,
}

/// A multi-day event.
///
/// `end` is exclusive: an event running 1-3 May inclusive has `end` = 4 May.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub location: String,
    #[serde(default)]
    pub interpreters_needed: u32,
    /// Assigned interpreters in roster order
    #[serde(default)]
    pub interpreter_ids: Vec<InterpreterId>,
}

/// Coverage state used to colour an event in the calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventStatus {
    Open(String),
    FullyAssigned(String),
}

impl Event {
    /// Create an event covering `[start, end)`.
    pub fn new(
        id: EventId,
        title: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, EventValidationError> {
        let event = Self {
            id,
            title: title.into(),
            start,
            end,
            location: DEFAULT_LOCATION.to_string(),
            interpreters_needed: 0,
            interpreter_ids: Vec::new(),
        };
        event.validate()?;
        Ok(event)
    }

    pub fn draft() -> EventDraft {
        EventDraft::new()
    }

    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.title.trim().is_empty() {
            return Err(EventValidationError::EmptyTitle);
        }
        if self.end <= self.start {
            return Err(EventValidationError::EndNotAfterStart);
        }
        Ok(())
    }

    /// True if `date` falls in `[start, end)`.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    /// Last day the event runs, for display and editing.
    pub fn last_day(&self) -> NaiveDate {
        self.end.pred_opt().unwrap_or(self.start)
    }

    /// Every day the event runs, in order.
    pub fn days(&self) -> Vec<NaiveDate> {
        days_in_range(self.start, self.end).collect()
    }

    pub fn has_interpreter(&self, id: &InterpreterId) -> bool {
        self.interpreter_ids.contains(id)
    }

    /// Append an interpreter; returns false if already assigned.
    pub fn assign(&mut self, id: InterpreterId) -> bool {
        if self.has_interpreter(&id) {
            return false;
        }
        self.interpreter_ids.push(id);
        true
    }

    pub fn unassign(&mut self, id: &InterpreterId) -> bool {
        let before = self.interpreter_ids.len();
        self.interpreter_ids.retain(|assigned| assigned != id);
        self.interpreter_ids.len() != before
    }

    /// Interpreters still required. Negative when over-assigned.
    pub fn interpreters_left(&self) -> i64 {
        i64::from(self.interpreters_needed) - self.interpreter_ids.len() as i64
    }

    pub fn is_fully_assigned(&self) -> bool {
        self.interpreters_left() == 0 && !self.interpreter_ids.is_empty()
    }

    pub fn status(&self) -> EventStatus {
        if self.is_fully_assigned() {
            EventStatus::FullyAssigned(self.location.clone())
        } else {
            EventStatus::Open(self.location.clone())
        }
    }

    /// Copy the editable fields of `draft` onto this event, keeping its roster.
    pub fn apply_draft(&mut self, draft: &EventDraft) -> Result<(), EventValidationError> {
        let mut updated = draft.clone().build(self.id.clone())?;
        updated.interpreter_ids = std::mem::take(&mut self.interpreter_ids);
        *self = updated;
        Ok(())
    }
}

/// Form input for creating or editing an event.
///
/// Dates here are inclusive, the way they are typed in; `build` converts the
/// last day into the exclusive `end`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub location: Option<String>,
    pub first_day: Option<NaiveDate>,
    pub last_day: Option<NaiveDate>,
    pub interpreters_needed: u32,
}

impl EventDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn first_day(mut self, day: NaiveDate) -> Self {
        self.first_day = Some(day);
        self
    }

    pub fn last_day(mut self, day: NaiveDate) -> Self {
        self.last_day = Some(day);
        self
    }

    pub fn interpreters_needed(mut self, count: u32) -> Self {
        self.interpreters_needed = count;
        self
    }

    /// Build the event
    pub fn build(self, id: EventId) -> Result<Event, EventValidationError> {
        let start = self.first_day.ok_or(EventValidationError::MissingStartDate)?;
        let last_day = self.last_day.unwrap_or(start);
        let end = last_day
            .checked_add_days(Days::new(1))
            .ok_or(EventValidationError::EndNotAfterStart)?;

        let title = match self.title.trim() {
            "" => "Untitled".to_string(),
            title => title.to_string(),
        };

        let location = self
            .location
            .filter(|location| !location.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string());

        let event = Event {
            id,
            title,
            start,
            end,
            location,
            interpreters_needed: self.interpreters_needed,
            interpreter_ids: Vec::new(),
        };

        event.validate()?;
        Ok(event)
    }
}

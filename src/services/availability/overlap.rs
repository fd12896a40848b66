//! Counts how many events claim an interpreter on a given day.

use chrono::NaiveDate;

use crate::models::event::Event;
use crate::models::interpreter::InterpreterId;

#[derive(Debug, Clone, Copy)]
pub struct EventOverlapIndex<'a> {
    events: &'a [Event],
}

impl<'a> EventOverlapIndex<'a> {
    pub fn new(events: &'a [Event]) -> Self {
        Self { events }
    }

    /// Events that list `id` and cover `date`. Event ends are exclusive.
    pub fn events_on<'i>(
        &self,
        id: &'i InterpreterId,
        date: NaiveDate,
    ) -> impl Iterator<Item = &'a Event> + 'i
    where
        'a: 'i,
    {
        self.events
            .iter()
            .filter(move |event| event.has_interpreter(id) && event.covers(date))
    }

    pub fn count_assignments(&self, id: &InterpreterId, date: NaiveDate) -> usize {
        self.events_on(id, date).count()
    }
}

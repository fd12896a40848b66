// Test fixtures - reusable test data
// Dates, events and directories shared by the integration tests
#![allow(dead_code)]

use chrono::NaiveDate;

use interpreter_roster::models::event::Event;
use interpreter_roster::models::interpreter::{Interpreter, InterpreterId};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Day `d` of May 2025
    pub fn may(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, d).unwrap()
    }

    /// Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }
}

/// Sample events for testing
pub mod events {
    use super::*;

    /// Event over `[start, end)` with `interpreters` assigned in order.
    pub fn event(id: &str, start: NaiveDate, end: NaiveDate, interpreters: &[&str]) -> Event {
        let mut event = Event::new(id.into(), id, start, end).unwrap();
        for interpreter in interpreters {
            event.assign((*interpreter).into());
        }
        event
    }

    /// E1 runs 1-3 May, E2 runs 3-5 May; both list interpreter "x".
    pub fn overlapping_pair() -> Vec<Event> {
        vec![
            event("E1", dates::may(1), dates::may(4), &["x"]),
            event("E2", dates::may(3), dates::may(6), &["x"]),
        ]
    }
}

/// Sample interpreter directories
pub mod interpreters {
    use super::*;

    pub fn directory(ids: &[&str]) -> Vec<Interpreter> {
        ids.iter()
            .map(|id| Interpreter::new(InterpreterId::from(*id), id, &id.to_uppercase()))
            .collect()
    }
}

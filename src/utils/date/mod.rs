// Date utility functions
// Calendar-day helpers shared by events, overrides and the month grid

use chrono::NaiveDate;

/// Storage and wire format for calendar days.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

pub fn parse_day(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DAY_FORMAT).ok()
}

pub fn format_day(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

/// Column header label, e.g. "18 May".
pub fn short_label(date: NaiveDate) -> String {
    date.format("%-d %b").to_string()
}

/// Iterate the days of `[start, end)`.
pub fn days_in_range(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start
        .iter_days()
        .take_while(move |day| *day < end)
}

/// First day of the month and first day of the following month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(chrono::Months::new(1))?;
    Some((first, next))
}

/// Parse "YYYY-MM" into the month's `[first, next_first)` bounds.
pub fn parse_month(value: &str) -> Option<(NaiveDate, NaiveDate)> {
    let (year, month) = value.trim().split_once('-')?;
    month_bounds(year.parse().ok()?, month.parse().ok()?)
}

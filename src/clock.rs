//! Canonical local calendar-date helpers.
//!
//! Every day-boundary decision in the engine (streak advancement, daily
//! stat resets, trend bucketing) goes through this module, so there is
//! exactly one notion of "today" and of where a week starts.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate};

/// Short weekday names indexed 0 = Sunday .. 6 = Saturday.
pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Local calendar date of a timestamp.
pub fn local_date(t: DateTime<Local>) -> NaiveDate {
    t.date_naive()
}

/// Weekday index with 0 = Sunday .. 6 = Saturday.
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_sunday() as usize
}

/// Short name of the weekday of `date`.
pub fn weekday_name(date: NaiveDate) -> &'static str {
    WEEKDAY_NAMES[weekday_index(date)]
}

/// Start of the week containing `date`. Weeks start on Sunday.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(weekday_index(date) as i64)
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("day 1 exists in every month")
}

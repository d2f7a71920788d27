//! Date helpers and fact builders.
//!
//! Fixture days are counted from Monday 2024-03-04, so `day(0)` is that
//! Monday and `at(1, 9, 0)` is Tuesday 09:00.

use chrono::{Days, NaiveDate, NaiveDateTime};
use rota_core::{Availability, AvailabilityKind, Employee, Shift};

/// Skill required by shifts built with [`shift`].
pub const DEFAULT_SKILL: &str = "nurse";

/// Builds a calendar date. Panics on an invalid date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

/// The fixture date `offset` days after the first fixture day.
pub fn day(offset: u32) -> NaiveDate {
    date(2024, 3, 4)
        .checked_add_days(Days::new(u64::from(offset)))
        .expect("fixture day in range")
}

/// A time of day on the fixture date `offset`.
pub fn at(offset: u32, hour: u32, minute: u32) -> NaiveDateTime {
    day(offset)
        .and_hms_opt(hour, minute, 0)
        .expect("valid fixture time")
}

pub fn employee(id: u64, skills: &[&str]) -> Employee {
    Employee::new(id, format!("Employee {}", id)).with_skills(skills.iter().copied())
}

/// An unassigned shift requiring [`DEFAULT_SKILL`].
pub fn shift(id: u64, start: NaiveDateTime, end: NaiveDateTime) -> Shift {
    shift_requiring(id, start, end, DEFAULT_SKILL)
}

pub fn shift_requiring(id: u64, start: NaiveDateTime, end: NaiveDateTime, skill: &str) -> Shift {
    Shift::new(id, start, end, "Ward A", skill)
}

/// A whole-day availability record.
pub fn availability(id: u64, employee: u64, date: NaiveDate, kind: AvailabilityKind) -> Availability {
    Availability::new(id, employee, date, kind)
}

use chrono::{NaiveDate, NaiveDateTime};

use super::{AvailabilityId, EmployeeId, MINUTES_PER_DAY};

/// How an employee feels about working on a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum AvailabilityKind {
    Unavailable,
    Undesired,
    Desired,
}

/// A half-open `[start, end)` window within an availability's date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// An employee's availability record for one calendar date.
///
/// Without a window the record covers the whole date.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Availability {
    pub id: AvailabilityId,
    pub employee: EmployeeId,
    pub date: NaiveDate,
    #[cfg_attr(feature = "serde", serde(rename = "availabilityType"))]
    pub kind: AvailabilityKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub window: Option<TimeWindow>,
}

impl Availability {
    pub fn new(
        id: impl Into<AvailabilityId>,
        employee: impl Into<EmployeeId>,
        date: NaiveDate,
        kind: AvailabilityKind,
    ) -> Self {
        Self {
            id: id.into(),
            employee: employee.into(),
            date,
            kind,
            window: None,
        }
    }

    pub fn with_window(mut self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.window = Some(TimeWindow::new(start, end));
        self
    }

    /// Minutes covered by this record: the window, or the whole date.
    pub fn duration_minutes(&self) -> i64 {
        self.window
            .map_or(MINUTES_PER_DAY, |window| window.duration_minutes())
    }
}

use chrono::{NaiveDate, NaiveDateTime};

use super::{EmployeeId, ShiftId};

/// A shift that needs to be staffed by an employee.
///
/// `employee` is the planning variable: the only field the search procedure
/// changes during a run. Everything else is fixed once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Shift {
    pub id: ShiftId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub location: String,
    pub required_skill: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub employee: Option<EmployeeId>,
    /// Pinned shifts keep their loaded assignment for the whole run.
    #[cfg_attr(feature = "serde", serde(default))]
    pub pinned: bool,
}

impl Shift {
    pub fn new(
        id: impl Into<ShiftId>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        location: impl Into<String>,
        required_skill: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            location: location.into(),
            required_skill: required_skill.into(),
            employee: None,
            pinned: false,
        }
    }

    pub fn with_employee(mut self, employee: impl Into<EmployeeId>) -> Self {
        self.employee = Some(employee.into());
        self
    }

    pub fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }

    /// Returns the length of the shift in whole minutes.
    #[inline]
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Returns the calendar date of the shift start.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Returns the overlap in minutes with another shift, or 0 if disjoint.
    ///
    /// Intervals are half-open: a shift ending at 17:00 does not overlap one
    /// starting at 17:00.
    #[inline]
    pub fn overlap_minutes(&self, other: &Shift) -> i64 {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start < end {
            (end - start).num_minutes()
        } else {
            0
        }
    }

    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.employee.is_some()
    }
}

use std::collections::{BTreeSet, HashMap};

use chrono::{NaiveDateTime, NaiveTime, TimeDelta};
use rota_core::{EmployeeId, Shift};

/// Assigned shifts per employee, ordered by start time.
///
/// Entries are `(start, position)` so two shifts starting at the same instant
/// stay distinct. Must reflect the current assignment before any match is
/// recomputed.
#[derive(Debug, Clone, Default)]
pub struct ShiftIndex {
    by_employee: HashMap<EmployeeId, BTreeSet<(NaiveDateTime, usize)>>,
    longest_shift: TimeDelta,
}

impl ShiftIndex {
    /// Indexes every assigned shift. The longest duration is taken over all
    /// shifts, assigned or not, since any of them may be assigned later.
    pub fn build(shifts: &[Shift]) -> Self {
        let mut index = Self {
            by_employee: HashMap::new(),
            longest_shift: shifts
                .iter()
                .map(|shift| shift.end - shift.start)
                .max()
                .unwrap_or_else(TimeDelta::zero),
        };
        for (position, shift) in shifts.iter().enumerate() {
            if let Some(employee) = shift.employee {
                index.insert(employee, shift.start, position);
            }
        }
        index
    }

    /// Returns true if the entry was not present.
    pub fn insert(&mut self, employee: EmployeeId, start: NaiveDateTime, position: usize) -> bool {
        self.by_employee
            .entry(employee)
            .or_default()
            .insert((start, position))
    }

    /// Returns true if the entry was present.
    pub fn remove(&mut self, employee: EmployeeId, start: NaiveDateTime, position: usize) -> bool {
        let Some(shifts) = self.by_employee.get_mut(&employee) else {
            return false;
        };
        let removed = shifts.remove(&(start, position));
        if shifts.is_empty() {
            self.by_employee.remove(&employee);
        }
        removed
    }

    /// Positions of the employee's shifts in start order.
    pub fn shifts_of(&self, employee: EmployeeId) -> impl Iterator<Item = usize> + '_ {
        self.by_employee
            .get(&employee)
            .into_iter()
            .flatten()
            .map(|&(_, position)| position)
    }

    /// Positions of the employee's shifts that can form a pair match with
    /// `shift`, excluding `shift` itself at `position`.
    ///
    /// `reach` is the furthest end-to-start distance a pair constraint looks
    /// at; `None` returns all of the employee's shifts. The window always
    /// covers the whole start date of `shift` and every shift that could
    /// overlap it.
    pub fn neighbors<'a>(
        &'a self,
        employee: EmployeeId,
        shift: &Shift,
        position: usize,
        reach: Option<TimeDelta>,
    ) -> impl Iterator<Item = usize> + 'a {
        let (lo, hi) = match reach {
            Some(reach) => self.window(shift, reach),
            None => (NaiveDateTime::MIN, NaiveDateTime::MAX),
        };
        self.by_employee
            .get(&employee)
            .into_iter()
            .flat_map(move |shifts| shifts.range((lo, 0)..=(hi, usize::MAX)))
            .map(|&(_, other)| other)
            .filter(move |&other| other != position)
    }

    pub fn longest_shift(&self) -> TimeDelta {
        self.longest_shift
    }

    /// Number of indexed shifts.
    pub fn len(&self) -> usize {
        self.by_employee.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_employee.is_empty()
    }

    fn window(&self, shift: &Shift, reach: TimeDelta) -> (NaiveDateTime, NaiveDateTime) {
        let day_start = shift.date().and_time(NaiveTime::MIN);
        let day_end = shift
            .date()
            .succ_opt()
            .map_or(NaiveDateTime::MAX, |next| next.and_time(NaiveTime::MIN));

        let earliest = shift
            .start
            .checked_sub_signed(self.longest_shift + reach)
            .unwrap_or(NaiveDateTime::MIN);
        let latest = shift
            .end
            .checked_add_signed(reach)
            .unwrap_or(NaiveDateTime::MAX);

        (earliest.min(day_start), latest.max(day_end))
    }
}

use std::collections::HashMap;

use chrono::NaiveDate;
use rota_core::{Availability, EmployeeId};

/// Availability positions keyed by employee and date. Built once; facts never
/// change during a run.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityIndex {
    by_employee_date: HashMap<(EmployeeId, NaiveDate), Vec<usize>>,
}

impl AvailabilityIndex {
    pub fn build(availabilities: &[Availability]) -> Self {
        let mut by_employee_date: HashMap<_, Vec<usize>> = HashMap::new();
        for (position, availability) in availabilities.iter().enumerate() {
            by_employee_date
                .entry((availability.employee, availability.date))
                .or_default()
                .push(position);
        }
        Self { by_employee_date }
    }

    /// Positions of the employee's availabilities on `date`.
    pub fn on(&self, employee: EmployeeId, date: NaiveDate) -> &[usize] {
        self.by_employee_date
            .get(&(employee, date))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.by_employee_date.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_employee_date.is_empty()
    }
}

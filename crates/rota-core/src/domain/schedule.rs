use std::collections::HashSet;
use std::hash::Hash;

use super::{Availability, Employee, Shift};
use crate::error::{Result, RotaError};

/// The fact base for one scoring run.
///
/// Employees and availabilities are fixed for the run; the only state that
/// changes is each shift's `employee`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    pub employees: Vec<Employee>,
    pub shifts: Vec<Shift>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub availabilities: Vec<Availability>,
}

impl Schedule {
    pub fn new(employees: Vec<Employee>, shifts: Vec<Shift>) -> Self {
        Self {
            employees,
            shifts,
            availabilities: Vec::new(),
        }
    }

    pub fn with_availabilities(mut self, availabilities: Vec<Availability>) -> Self {
        self.availabilities = availabilities;
        self
    }

    /// Returns the number of shifts that have an employee.
    pub fn assigned_count(&self) -> usize {
        self.shifts.iter().filter(|s| s.is_assigned()).count()
    }

    /// Checks every domain invariant of the fact base.
    ///
    /// Bad input is rejected, never normalized:
    /// - identities are unique within each collection
    /// - every shift ends after it starts
    /// - every assignment and availability references a known employee
    /// - an availability window lies on the availability's date and is non-empty
    pub fn validate(&self) -> Result<()> {
        ensure_unique("employee", self.employees.iter().map(|e| e.id))?;
        ensure_unique("shift", self.shifts.iter().map(|s| s.id))?;
        ensure_unique("availability", self.availabilities.iter().map(|a| a.id))?;

        let employee_ids: HashSet<_> = self.employees.iter().map(|e| e.id).collect();

        for shift in &self.shifts {
            if shift.end <= shift.start {
                return Err(RotaError::InvalidFacts(format!(
                    "shift {} ends at {} which is not after its start {}",
                    shift.id, shift.end, shift.start
                )));
            }
            if let Some(employee) = shift.employee {
                if !employee_ids.contains(&employee) {
                    return Err(RotaError::InvalidFacts(format!(
                        "shift {} is assigned to unknown employee {}",
                        shift.id, employee
                    )));
                }
            }
        }

        for availability in &self.availabilities {
            if !employee_ids.contains(&availability.employee) {
                return Err(RotaError::InvalidFacts(format!(
                    "availability {} belongs to unknown employee {}",
                    availability.id, availability.employee
                )));
            }
            if let Some(window) = availability.window {
                if window.end <= window.start {
                    return Err(RotaError::InvalidFacts(format!(
                        "availability {} has an empty window",
                        availability.id
                    )));
                }
                if window.start.date() != availability.date {
                    return Err(RotaError::InvalidFacts(format!(
                        "availability {} window starts on {} but its date is {}",
                        availability.id,
                        window.start.date(),
                        availability.date
                    )));
                }
            }
        }

        Ok(())
    }
}

fn ensure_unique<T>(kind: &str, ids: impl Iterator<Item = T>) -> Result<()>
where
    T: Copy + Eq + Hash + std::fmt::Display,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(RotaError::InvalidFacts(format!("duplicate {} id {}", kind, id)));
        }
    }
    Ok(())
}

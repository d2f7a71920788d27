//! Full evaluation from scratch.
//!
//! Builds its own per-employee grouping instead of going through the engine's
//! indexes, so it can serve as an independent check on incremental scoring.

use std::collections::HashMap;

use chrono::NaiveDate;
use rota_core::{Availability, Employee, EmployeeId, HardSoftScore, Schedule, Shift};

use crate::catalog::{ConstraintCatalog, MatchFacts};

/// One constraint instance found by evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRecord {
    /// Catalog index of the matched constraint.
    pub constraint: usize,
    pub facts: MatchFacts,
    /// Match weight before multiplier and sign.
    pub weight: i64,
    pub score: HardSoftScore,
}

/// Enumerates every active constraint instance of the schedule.
///
/// Unassigned shifts take part in nothing. Each unordered pair of shifts is
/// visited once.
pub fn enumerate_matches(schedule: &Schedule, catalog: &ConstraintCatalog) -> Vec<MatchRecord> {
    let employees: HashMap<EmployeeId, &Employee> =
        schedule.employees.iter().map(|e| (e.id, e)).collect();

    let mut availabilities: HashMap<(EmployeeId, NaiveDate), Vec<&Availability>> = HashMap::new();
    for availability in &schedule.availabilities {
        availabilities
            .entry((availability.employee, availability.date))
            .or_default()
            .push(availability);
    }

    let mut matches = Vec::new();
    let mut by_employee: HashMap<EmployeeId, Vec<&Shift>> = HashMap::new();

    for shift in &schedule.shifts {
        let Some(employee_id) = shift.employee else {
            continue;
        };

        if let Some(employee) = employees.get(&employee_id) {
            for (constraint, descriptor) in catalog.shift_constraints() {
                if let Some(weight) = descriptor.match_shift(shift, employee) {
                    matches.push(MatchRecord {
                        constraint,
                        facts: MatchFacts::Shift(shift.id),
                        weight,
                        score: descriptor.score_of(weight),
                    });
                }
            }
        }

        if let Some(on_date) = availabilities.get(&(employee_id, shift.date())) {
            for availability in on_date {
                for (constraint, descriptor) in catalog.availability_constraints() {
                    if let Some(weight) = descriptor.match_availability(shift, availability) {
                        matches.push(MatchRecord {
                            constraint,
                            facts: MatchFacts::ShiftAvailability(shift.id, availability.id),
                            weight,
                            score: descriptor.score_of(weight),
                        });
                    }
                }
            }
        }

        by_employee.entry(employee_id).or_default().push(shift);
    }

    for shifts in by_employee.values() {
        for (i, a) in shifts.iter().enumerate() {
            for b in &shifts[i + 1..] {
                for (constraint, descriptor) in catalog.pair_constraints() {
                    if let Some((facts, weight)) = descriptor.match_pair(a, b) {
                        matches.push(MatchRecord {
                            constraint,
                            facts,
                            weight,
                            score: descriptor.score_of(weight),
                        });
                    }
                }
            }
        }
    }

    matches
}

/// Scores the schedule from scratch.
pub fn evaluate(schedule: &Schedule, catalog: &ConstraintCatalog) -> HardSoftScore {
    enumerate_matches(schedule, catalog)
        .iter()
        .map(|m| m.score)
        .sum()
}

#[cfg(test)]
mod tests {
    use rota_core::AvailabilityKind;
    use rota_test::{at, availability, day, employee, shift, shift_requiring};

    use super::*;

    #[test]
    fn test_empty_schedule_scores_zero() {
        let catalog = ConstraintCatalog::standard();
        assert_eq!(evaluate(&Schedule::default(), &catalog), HardSoftScore::ZERO);
    }

    #[test]
    fn test_unassigned_shifts_score_nothing() {
        let catalog = ConstraintCatalog::standard();
        let schedule = Schedule::new(
            vec![employee(1, &[])],
            vec![
                shift(1, at(0, 9, 0), at(0, 17, 0)),
                shift(2, at(0, 10, 0), at(0, 18, 0)),
            ],
        )
        .with_availabilities(vec![availability(1, 1, day(0), AvailabilityKind::Unavailable)]);

        assert!(enumerate_matches(&schedule, &catalog).is_empty());
    }

    #[test]
    fn test_full_evaluation_sums_every_constraint() {
        let catalog = ConstraintCatalog::standard();
        let schedule = Schedule::new(
            vec![employee(1, &["nurse"])],
            vec![
                shift(1, at(0, 9, 0), at(0, 17, 0)).with_employee(1),
                shift_requiring(2, at(0, 16, 0), at(0, 20, 0), "doctor").with_employee(1),
            ],
        )
        .with_availabilities(vec![availability(1, 1, day(0), AvailabilityKind::Desired)]);

        // skill -1, overlap -60, one per day -1, desired +480 +240
        assert_eq!(
            evaluate(&schedule, &catalog),
            HardSoftScore::of(-62, 720)
        );
        assert_eq!(enumerate_matches(&schedule, &catalog).len(), 5);
    }
}

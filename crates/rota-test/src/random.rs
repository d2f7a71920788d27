//! Seeded random schedules.
//!
//! The same seed and shape always produce the same schedule. Every schedule
//! produced here passes `Schedule::validate`.

use chrono::TimeDelta;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rota_core::{Availability, AvailabilityKind, Employee, Schedule, Shift};

use crate::facts::day;

/// Skill pool for random employees and shifts.
pub const SKILLS: [&str; 3] = ["nurse", "doctor", "porter"];

const KINDS: [AvailabilityKind; 3] = [
    AvailabilityKind::Unavailable,
    AvailabilityKind::Undesired,
    AvailabilityKind::Desired,
];

/// Size of a random schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleShape {
    pub employees: usize,
    pub shifts: usize,
    pub days: u32,
    pub availabilities: usize,
    /// Probability that a shift starts out assigned.
    pub assigned_ratio: f64,
}

impl Default for ScheduleShape {
    fn default() -> Self {
        Self {
            employees: 6,
            shifts: 40,
            days: 7,
            availabilities: 12,
            assigned_ratio: 0.5,
        }
    }
}

/// Builds a random schedule.
///
/// Shifts start on the hour or half hour and last 4 to 12 hours, so they
/// cross midnight, overlap and sit within ten hours of each other often
/// enough to exercise every pair constraint.
pub fn random_schedule(seed: u64, shape: ScheduleShape) -> Schedule {
    let mut rng = StdRng::seed_from_u64(seed);
    let days = shape.days.max(1);

    let employees: Vec<Employee> = (0..shape.employees as u64)
        .map(|id| {
            let skills: Vec<&str> = SKILLS
                .iter()
                .copied()
                .filter(|_| rng.random_bool(0.5))
                .collect();
            Employee::new(id, format!("Employee {}", id)).with_skills(skills)
        })
        .collect();

    let shifts: Vec<Shift> = (0..shape.shifts as u64)
        .map(|id| {
            let start = day(rng.random_range(0..days))
                .and_hms_opt(rng.random_range(0..24), *[0, 30].choose(&mut rng).unwrap_or(&0), 0)
                .expect("valid shift start");
            let end = start + TimeDelta::minutes(rng.random_range(8..=24) * 30);
            let skill = *SKILLS.choose(&mut rng).expect("non-empty skill pool");
            let shift = Shift::new(id, start, end, format!("Location {}", id % 3), skill);
            if !employees.is_empty() && rng.random_bool(shape.assigned_ratio) {
                let employee = rng.random_range(0..employees.len());
                shift.with_employee(employees[employee].id)
            } else {
                shift
            }
        })
        .collect();

    let availabilities: Vec<Availability> = if employees.is_empty() {
        Vec::new()
    } else {
        (0..shape.availabilities as u64)
            .map(|id| {
                let employee = employees[rng.random_range(0..employees.len())].id;
                let date = day(rng.random_range(0..days));
                let kind = *KINDS.choose(&mut rng).expect("non-empty kind pool");
                let record = Availability::new(id, employee, date, kind);
                if rng.random_bool(0.25) {
                    let from = rng.random_range(0..20);
                    let start = date.and_hms_opt(from, 0, 0).expect("valid window start");
                    record.with_window(start, start + TimeDelta::hours(4))
                } else {
                    record
                }
            })
            .collect()
    };

    Schedule::new(employees, shifts).with_availabilities(availabilities)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_schedule() {
        let a = random_schedule(7, ScheduleShape::default());
        let b = random_schedule(7, ScheduleShape::default());
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_schedule_is_valid() {
        for seed in 0..20 {
            let schedule = random_schedule(seed, ScheduleShape::default());
            assert!(schedule.validate().is_ok(), "seed {} invalid", seed);
            assert_eq!(schedule.shifts.len(), 40);
        }
    }

    #[test]
    fn test_no_employees_means_no_assignments() {
        let shape = ScheduleShape {
            employees: 0,
            ..ScheduleShape::default()
        };
        let schedule = random_schedule(1, shape);
        assert_eq!(schedule.assigned_count(), 0);
        assert!(schedule.availabilities.is_empty());
    }
}

use rota_core::{AvailabilityKind, EmployeeId};
use rota_test::{at, availability, day, shift};

use super::*;

fn positions(iter: impl Iterator<Item = usize>) -> Vec<usize> {
    let mut v: Vec<usize> = iter.collect();
    v.sort_unstable();
    v
}

#[test]
fn test_build_indexes_assigned_shifts_only() {
    let shifts = vec![
        shift(0, at(0, 9, 0), at(0, 17, 0)).with_employee(1),
        shift(1, at(1, 9, 0), at(1, 21, 0)),
        shift(2, at(0, 6, 0), at(0, 8, 0)).with_employee(1),
    ];
    let index = ShiftIndex::build(&shifts);

    assert_eq!(index.len(), 2);
    assert_eq!(index.longest_shift(), chrono::TimeDelta::hours(12));
    let ordered: Vec<usize> = index.shifts_of(EmployeeId(1)).collect();
    assert_eq!(ordered, vec![2, 0]);
    assert_eq!(index.shifts_of(EmployeeId(9)).count(), 0);
}

#[test]
fn test_insert_and_remove() {
    let mut index = ShiftIndex::default();
    let e = EmployeeId(4);
    assert!(index.insert(e, at(0, 9, 0), 3));
    assert!(!index.insert(e, at(0, 9, 0), 3));
    assert!(index.insert(e, at(0, 9, 0), 5));
    assert_eq!(index.len(), 2);

    assert!(index.remove(e, at(0, 9, 0), 3));
    assert!(!index.remove(e, at(0, 9, 0), 3));
    assert!(index.remove(e, at(0, 9, 0), 5));
    assert!(index.is_empty());
}

#[test]
fn test_neighbors_cover_pair_reach() {
    let shifts = vec![
        shift(0, at(1, 9, 0), at(1, 17, 0)).with_employee(1),
        // ends 9h before shift 0 starts: inside rest reach
        shift(1, at(0, 20, 0), at(1, 0, 0)).with_employee(1),
        // starts 9h after shift 0 ends
        shift(2, at(2, 2, 0), at(2, 6, 0)).with_employee(1),
        // same date, late evening
        shift(3, at(1, 23, 0), at(1, 23, 30)).with_employee(1),
        // far away
        shift(4, at(4, 9, 0), at(4, 17, 0)).with_employee(1),
        // other employee
        shift(5, at(1, 10, 0), at(1, 12, 0)).with_employee(2),
    ];
    let index = ShiftIndex::build(&shifts);
    let reach = Some(chrono::TimeDelta::minutes(600));

    let found = positions(index.neighbors(EmployeeId(1), &shifts[0], 0, reach));
    assert_eq!(found, vec![1, 2, 3]);
}

#[test]
fn test_neighbors_without_reach_still_cover_same_day_and_overlap() {
    let shifts = vec![
        shift(0, at(1, 12, 0), at(1, 14, 0)).with_employee(1),
        // long shift from the previous day still running
        shift(1, at(0, 22, 0), at(1, 13, 0)).with_employee(1),
        shift(2, at(1, 0, 0), at(1, 1, 0)).with_employee(1),
        shift(3, at(2, 1, 0), at(2, 2, 0)).with_employee(1),
    ];
    let index = ShiftIndex::build(&shifts);

    let found = positions(index.neighbors(
        EmployeeId(1),
        &shifts[0],
        0,
        Some(chrono::TimeDelta::zero()),
    ));
    assert_eq!(found, vec![1, 2]);
}

#[test]
fn test_unbounded_neighbors_return_everything() {
    let shifts = vec![
        shift(0, at(0, 9, 0), at(0, 10, 0)).with_employee(1),
        shift(1, at(20, 9, 0), at(20, 10, 0)).with_employee(1),
    ];
    let index = ShiftIndex::build(&shifts);
    let found = positions(index.neighbors(EmployeeId(1), &shifts[0], 0, None));
    assert_eq!(found, vec![1]);
}

#[test]
fn test_availability_lookup() {
    let records = vec![
        availability(0, 1, day(0), AvailabilityKind::Desired),
        availability(1, 1, day(0), AvailabilityKind::Unavailable),
        availability(2, 1, day(1), AvailabilityKind::Undesired),
        availability(3, 2, day(0), AvailabilityKind::Desired),
    ];
    let index = AvailabilityIndex::build(&records);

    assert_eq!(index.on(EmployeeId(1), day(0)), &[0, 1]);
    assert_eq!(index.on(EmployeeId(1), day(1)), &[2]);
    assert_eq!(index.on(EmployeeId(2), day(1)), &[] as &[usize]);
    assert_eq!(index.len(), 4);
}

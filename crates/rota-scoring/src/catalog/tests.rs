use rota_config::ScoringConfig;
use rota_core::{AvailabilityKind, HardSoftScore, RotaError, ShiftId};
use rota_test::{at, availability, day, employee, shift, shift_requiring};

use super::*;

#[test]
fn test_standard_catalog_has_seven_constraints() {
    let catalog = ConstraintCatalog::standard();
    assert_eq!(catalog.len(), 7);
    assert_eq!(catalog.active().count(), 7);
    assert_eq!(catalog.shift_constraints().count(), 1);
    assert_eq!(catalog.pair_constraints().count(), 3);
    assert_eq!(catalog.availability_constraints().count(), 3);

    let hard = catalog.descriptors().iter().filter(|d| d.is_hard()).count();
    assert_eq!(hard, 5);
}

#[test]
fn test_find_by_short_and_full_name() {
    let catalog = ConstraintCatalog::standard();
    let short = catalog.find("One shift per day");
    assert!(short.is_some());
    assert_eq!(catalog.find("roster/One shift per day"), short);
    assert_eq!(catalog.find("Assign every shift"), None);
}

#[test]
fn test_required_skill_match() {
    let catalog = ConstraintCatalog::standard();
    let skill = &catalog.descriptors()[0];
    let nurse = employee(1, &["nurse"]);
    let s = shift_requiring(1, at(0, 9, 0), at(0, 17, 0), "doctor");

    assert_eq!(skill.match_shift(&s, &nurse), Some(1));
    assert_eq!(skill.score_of(1), HardSoftScore::of_hard(-1));

    let doctor = employee(2, &["doctor"]);
    assert_eq!(skill.match_shift(&s, &doctor), None);
}

#[test]
fn test_overlap_pair_is_canonical() {
    let catalog = ConstraintCatalog::standard();
    let overlap = &catalog.descriptors()[1];
    let a = shift(7, at(0, 9, 0), at(0, 17, 0));
    let b = shift(3, at(0, 16, 0), at(0, 20, 0));

    let forward = overlap.match_pair(&a, &b);
    let backward = overlap.match_pair(&b, &a);
    assert_eq!(forward, backward);
    assert_eq!(
        forward,
        Some((MatchFacts::ShiftPair(ShiftId(3), ShiftId(7)), 60))
    );
}

#[test]
fn test_touching_shifts_do_not_overlap() {
    let catalog = ConstraintCatalog::standard();
    let overlap = &catalog.descriptors()[1];
    let a = shift(1, at(0, 9, 0), at(0, 17, 0));
    let b = shift(2, at(0, 17, 0), at(0, 20, 0));
    assert_eq!(overlap.match_pair(&a, &b), None);
}

#[test]
fn test_minimum_rest_orders_by_time() {
    let catalog = ConstraintCatalog::standard();
    let rest = &catalog.descriptors()[2];
    let later = shift(1, at(0, 18, 0), at(0, 22, 0));
    let earlier = shift(2, at(0, 9, 0), at(0, 17, 0));

    assert_eq!(
        rest.match_pair(&later, &earlier),
        Some((MatchFacts::ShiftPair(ShiftId(2), ShiftId(1)), 540))
    );

    let rested = shift(3, at(1, 3, 0), at(1, 11, 0));
    assert_eq!(rest.match_pair(&earlier, &rested), None);
}

#[test]
fn test_rest_boundary_is_exclusive() {
    let catalog = ConstraintCatalog::standard();
    let rest = &catalog.descriptors()[2];
    let a = shift(1, at(0, 8, 0), at(0, 12, 0));
    let exactly_ten = shift(2, at(0, 22, 0), at(1, 2, 0));
    let one_short = shift(3, at(0, 21, 59), at(1, 2, 0));

    assert_eq!(rest.match_pair(&a, &exactly_ten), None);
    assert_eq!(
        rest.match_pair(&a, &one_short),
        Some((MatchFacts::ShiftPair(ShiftId(1), ShiftId(3)), 1))
    );
}

#[test]
fn test_overlapping_shifts_never_match_rest() {
    let catalog = ConstraintCatalog::standard();
    let rest = &catalog.descriptors()[2];
    let a = shift(1, at(0, 9, 0), at(0, 17, 0));
    let b = shift(2, at(0, 16, 0), at(0, 20, 0));
    assert_eq!(rest.match_pair(&a, &b), None);
}

#[test]
fn test_same_shift_never_pairs_with_itself() {
    let catalog = ConstraintCatalog::standard();
    let a = shift(1, at(0, 9, 0), at(0, 17, 0));
    for (_, descriptor) in catalog.pair_constraints() {
        assert_eq!(descriptor.match_pair(&a, &a), None);
    }
}

#[test]
fn test_availability_match_by_kind() {
    let catalog = ConstraintCatalog::standard();
    let s = shift(1, at(0, 9, 0), at(0, 17, 0));
    let desired = availability(1, 1, day(0), AvailabilityKind::Desired);

    let matched: Vec<_> = catalog
        .availability_constraints()
        .filter_map(|(_, d)| d.match_availability(&s, &desired).map(|w| d.score_of(w)))
        .collect();
    assert_eq!(matched, vec![HardSoftScore::of_soft(480)]);
}

#[test]
fn test_pair_reach_covers_minimum_rest() {
    let catalog = ConstraintCatalog::standard();
    assert_eq!(
        catalog.pair_reach(),
        Some(TimeDelta::minutes(MIN_REST_MINUTES))
    );

    let without_rest = ConstraintCatalog::standard()
        .with_multiplier("At least 10 hours between 2 shifts", 0)
        .unwrap();
    assert_eq!(without_rest.pair_reach(), Some(TimeDelta::zero()));
}

#[test]
fn test_from_config_applies_multipliers() {
    let config = ScoringConfig::new()
        .with_constraint_weight("Desired day for employee", 3)
        .with_constraint_weight("roster/Undesired day for employee", 0);
    let catalog = ConstraintCatalog::from_config(&config).unwrap();

    let desired = catalog.find("Desired day for employee").unwrap();
    assert_eq!(catalog.descriptors()[desired].multiplier, 3);
    assert_eq!(
        catalog.descriptors()[desired].score_of(10),
        HardSoftScore::of_soft(30)
    );
    assert_eq!(catalog.active().count(), 6);
    assert_eq!(catalog.availability_constraints().count(), 2);
}

#[test]
fn test_from_config_rejects_unknown_name() {
    let config = ScoringConfig::new().with_constraint_weight("Assign every shift", 1);
    let err = ConstraintCatalog::from_config(&config).unwrap_err();
    assert!(matches!(err, RotaError::Config(_)));
}

#[test]
fn test_negative_multiplier_rejected() {
    let err = ConstraintCatalog::standard()
        .with_multiplier("Required skill", -1)
        .unwrap_err();
    assert!(matches!(err, RotaError::Config(_)));
}

#[test]
fn test_oversized_multiplier_rejected() {
    let mut catalog = ConstraintCatalog::standard();
    let err = catalog.set_multiplier("Overlapping shifts", i64::MAX).unwrap_err();
    assert!(matches!(err, RotaError::Config(_)));

    // a rejected multiplier leaves the old one in place
    let index = catalog.find("Overlapping shifts").unwrap();
    assert_eq!(catalog.get(index).unwrap().multiplier, 1);

    catalog.set_multiplier("Overlapping shifts", MAX_WEIGHT_MULTIPLIER).unwrap();
    assert_eq!(
        catalog.get(index).unwrap().score_of(60),
        HardSoftScore::of_hard(-60 * MAX_WEIGHT_MULTIPLIER)
    );
}

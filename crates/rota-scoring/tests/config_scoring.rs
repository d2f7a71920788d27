//! Scoring driven by configuration text.

use rota_config::{EnvironmentMode, ScoringConfig};
use rota_core::{AvailabilityKind, EmployeeId, HardSoftScore, RotaError, Schedule, ShiftId};
use rota_scoring::ScoreEngine;
use rota_test::{at, availability, day, employee, shift};

fn schedule() -> Schedule {
    Schedule::new(
        vec![employee(1, &["nurse"])],
        vec![
            shift(1, at(0, 9, 0), at(0, 17, 0)),
            shift(2, at(0, 18, 0), at(0, 22, 0)),
        ],
    )
    .with_availabilities(vec![availability(1, 1, day(0), AvailabilityKind::Desired)])
}

#[test]
fn toml_weights_reach_the_engine() {
    let config = ScoringConfig::from_toml_str(
        r#"
        environment_mode = "full_assert"

        [constraint_weights]
        "At least 10 hours between 2 shifts" = 0
        "Desired day for employee" = 2
        "#,
    )
    .unwrap();
    let mut engine = ScoreEngine::with_config(schedule(), &config).unwrap();
    assert_eq!(engine.environment_mode(), EnvironmentMode::FullAssert);

    engine.assign(ShiftId(1), EmployeeId(1)).unwrap();
    let score = engine.assign(ShiftId(2), EmployeeId(1)).unwrap();

    // one per day only; desired 2 x (480 + 240)
    assert_eq!(score, HardSoftScore::of(-1, 1440));
}

#[test]
fn yaml_weights_reach_the_engine() {
    let config = ScoringConfig::from_yaml_str(
        r#"
environment_mode: fast_assert
constraint_weights:
  "One shift per day": 10
"#,
    )
    .unwrap();
    let mut engine = ScoreEngine::with_config(schedule(), &config).unwrap();

    engine.assign(ShiftId(1), EmployeeId(1)).unwrap();
    let score = engine.assign(ShiftId(2), EmployeeId(1)).unwrap();

    // rest shortfall 540, one per day 10 x 1
    assert_eq!(score, HardSoftScore::of(-550, 720));
}

#[test]
fn unknown_constraint_in_config_is_an_error() {
    let config = ScoringConfig::from_toml_str(
        r#"
        [constraint_weights]
        "Consecutive shifts" = 1
        "#,
    )
    .unwrap();
    let err = ScoreEngine::with_config(schedule(), &config).unwrap_err();
    assert!(matches!(err, RotaError::Config(_)));
}

#[test]
fn extreme_multiplier_is_rejected_before_scoring() {
    let config = ScoringConfig::new()
        .with_constraint_weight("Overlapping shifts", 1_000_000_000_000_000_000);
    let err = ScoreEngine::with_config(schedule(), &config).unwrap_err();
    assert!(matches!(err, RotaError::Config(_)));

    let config = ScoringConfig::new()
        .with_environment_mode(EnvironmentMode::FullAssert)
        .with_constraint_weight("Overlapping shifts", rota_config::MAX_WEIGHT_MULTIPLIER);
    let mut engine = ScoreEngine::with_config(
        Schedule::new(
            vec![employee(1, &["nurse"])],
            vec![
                shift(1, at(0, 9, 0), at(0, 17, 0)),
                shift(2, at(0, 16, 0), at(0, 20, 0)),
            ],
        ),
        &config,
    )
    .unwrap();
    engine.assign(ShiftId(1), EmployeeId(1)).unwrap();
    let score = engine.assign(ShiftId(2), EmployeeId(1)).unwrap();

    // 60 minutes of overlap at the largest multiplier, plus one per day
    assert_eq!(score, HardSoftScore::of_hard(-60 * rota_config::MAX_WEIGHT_MULTIPLIER - 1));
}

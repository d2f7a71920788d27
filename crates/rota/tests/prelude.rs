use rota::prelude::*;
use rota_test::{at, employee, shift};

#[test]
fn prelude_covers_a_scoring_run() {
    let schedule = Schedule::new(
        vec![employee(1, &["nurse"]), employee(2, &["nurse"])],
        vec![
            shift(1, at(0, 9, 0), at(0, 17, 0)),
            shift(2, at(0, 16, 0), at(0, 20, 0)),
        ],
    );
    let config = ScoringConfig::new().with_constraint_weight("Overlapping shifts", 2);
    let mut engine = ScoreEngine::with_config(schedule, &config).unwrap();

    engine.do_move(ChangeMove::assign(1u64, 1u64)).unwrap();
    let outcome = engine.do_move(ChangeMove::assign(2u64, 1u64)).unwrap();
    assert_eq!(outcome.score, HardSoftScore::of_hard(-121));
    assert!(!outcome.score.is_feasible());

    let score = engine.undo(outcome.undo).unwrap();
    assert!(score.is_feasible());

    let schedule = engine.into_schedule();
    assert_eq!(schedule.assigned_count(), 1);
    assert_eq!(schedule.shifts[0].employee, Some(EmployeeId(1)));
}

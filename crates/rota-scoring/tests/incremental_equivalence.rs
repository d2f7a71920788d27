//! Random move sequences must leave the running score equal to a full
//! evaluation of the resulting schedule.

use proptest::prelude::*;
use rota_core::{EmployeeId, ShiftId};
use rota_scoring::{enumerate_matches, ChangeMove, ScoreEngine};
use rota_test::{random_schedule, ScheduleShape};

const SHAPE: ScheduleShape = ScheduleShape {
    employees: 5,
    shifts: 30,
    days: 5,
    availabilities: 15,
    assigned_ratio: 0.4,
};

fn to_move((shift, employee): (u64, Option<u64>)) -> ChangeMove {
    ChangeMove {
        shift: ShiftId(shift),
        employee: employee.map(EmployeeId),
    }
}

fn move_strategy() -> impl Strategy<Value = (u64, Option<u64>)> {
    (0..SHAPE.shifts as u64, proptest::option::of(0..SHAPE.employees as u64))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn running_score_equals_full_evaluation(
        seed in 0u64..10_000,
        moves in prop::collection::vec(move_strategy(), 1..80),
    ) {
        let mut engine = ScoreEngine::initialize(random_schedule(seed, SHAPE)).unwrap();
        prop_assert_eq!(engine.current_score(), engine.recompute());

        for raw in moves {
            let change = to_move(raw);
            engine.do_move(change).unwrap();
            prop_assert_eq!(engine.current_score(), engine.recompute(), "after {}", change);
        }

        let mut expected: Vec<_> = enumerate_matches(engine.schedule(), engine.catalog())
            .into_iter()
            .map(|m| (m.constraint, m.facts, m.weight))
            .collect();
        expected.sort_unstable();
        let catalog = engine.catalog();
        let recorded: Vec<_> = engine
            .violations()
            .into_iter()
            .map(|m| (catalog.find(&m.constraint_ref.name).unwrap(), m.facts, m.weight))
            .collect();
        prop_assert_eq!(recorded, expected);
    }

    #[test]
    fn undo_sequence_restores_initial_state(
        seed in 0u64..10_000,
        moves in prop::collection::vec(move_strategy(), 1..40),
    ) {
        let mut engine = ScoreEngine::initialize(random_schedule(seed, SHAPE)).unwrap();
        let initial_score = engine.current_score();
        let initial_schedule = engine.schedule().clone();

        let mut undos = Vec::new();
        for raw in moves {
            undos.push(engine.do_move(to_move(raw)).unwrap().undo);
        }
        for undo in undos.into_iter().rev() {
            engine.undo(undo).unwrap();
        }

        prop_assert_eq!(engine.current_score(), initial_score);
        prop_assert_eq!(engine.schedule(), &initial_schedule);
    }
}

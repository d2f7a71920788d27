//! Incremental score engine.
//!
//! `ScoreEngine` owns the schedule for a run and is its single mutator. Every
//! move goes through the same cycle:
//!
//! 1. retract every recorded instance involving the moved shift
//! 2. update the shift index
//! 3. recompute the instances involving the shift through the indexes
//!
//! Only the moved shift's instances are touched, so a move costs
//! O(k log n) for k neighboring shifts.

mod moves;
#[cfg(feature = "parallel")]
mod parallel;


pub use moves::{ChangeMove, MoveOutcome};

use std::collections::HashMap;

use chrono::TimeDelta;
use rota_config::{EnvironmentMode, ScoringConfig};
use rota_core::{EmployeeId, HardSoftScore, Result, RotaError, Schedule, ShiftId};
use tracing::{debug, info, trace};

use crate::analysis::{ConstraintMatch, FactRef, IndictmentMap, ScoreExplanation};
use crate::catalog::{ConstraintCatalog, MatchFacts};
use crate::evaluate::{enumerate_matches, evaluate, MatchRecord};
use crate::index::{AvailabilityIndex, ShiftIndex};
use crate::ledger::{MatchEntry, MatchKey, MatchLedger};

/// Keeps the score of a schedule up to date under single-shift moves.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use rota_core::{Employee, HardSoftScore, Schedule, Shift};
/// use rota_scoring::ScoreEngine;
///
/// let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let schedule = Schedule::new(
///     vec![Employee::new(1u64, "Ann").with_skill("nurse")],
///     vec![
///         Shift::new(1u64, day.and_hms_opt(9, 0, 0).unwrap(), day.and_hms_opt(17, 0, 0).unwrap(), "Ward A", "nurse"),
///         Shift::new(2u64, day.and_hms_opt(16, 0, 0).unwrap(), day.and_hms_opt(20, 0, 0).unwrap(), "Ward A", "nurse"),
///     ],
/// );
///
/// let mut engine = ScoreEngine::initialize(schedule).unwrap();
/// assert_eq!(engine.current_score(), HardSoftScore::ZERO);
///
/// engine.assign(1u64.into(), 1u64.into()).unwrap();
/// let score = engine.assign(2u64.into(), 1u64.into()).unwrap();
///
/// // 60 minutes of overlap, and two shifts on one day
/// assert_eq!(score, HardSoftScore::of_hard(-61));
///
/// engine.unassign(2u64.into()).unwrap();
/// assert_eq!(engine.current_score(), HardSoftScore::ZERO);
/// ```
#[derive(Debug, Clone)]
pub struct ScoreEngine {
    schedule: Schedule,
    shift_positions: HashMap<ShiftId, usize>,
    employee_positions: HashMap<EmployeeId, usize>,
    shift_index: ShiftIndex,
    availability_index: AvailabilityIndex,
    catalog: ConstraintCatalog,
    pair_reach: Option<TimeDelta>,
    ledger: MatchLedger,
    score: HardSoftScore,
    environment_mode: EnvironmentMode,
}

impl ScoreEngine {
    /// Validates the schedule and scores it with the standard catalog.
    pub fn initialize(schedule: Schedule) -> Result<Self> {
        Self::with_catalog(
            schedule,
            ConstraintCatalog::standard(),
            EnvironmentMode::default(),
        )
    }

    /// Like [`initialize`](Self::initialize), with weight multipliers and the
    /// environment mode taken from `config`.
    pub fn with_config(schedule: Schedule, config: &ScoringConfig) -> Result<Self> {
        let catalog = ConstraintCatalog::from_config(config)?;
        Self::with_catalog(schedule, catalog, config.environment_mode)
    }

    /// Validates the schedule, builds the indexes and records every
    /// constraint instance found by a full evaluation.
    pub fn with_catalog(
        schedule: Schedule,
        catalog: ConstraintCatalog,
        environment_mode: EnvironmentMode,
    ) -> Result<Self> {
        schedule.validate()?;

        let shift_positions = schedule
            .shifts
            .iter()
            .enumerate()
            .map(|(position, shift)| (shift.id, position))
            .collect();
        let employee_positions = schedule
            .employees
            .iter()
            .enumerate()
            .map(|(position, employee)| (employee.id, position))
            .collect();

        let mut engine = Self {
            shift_index: ShiftIndex::build(&schedule.shifts),
            availability_index: AvailabilityIndex::build(&schedule.availabilities),
            pair_reach: catalog.pair_reach(),
            shift_positions,
            employee_positions,
            catalog,
            schedule,
            ledger: MatchLedger::default(),
            score: HardSoftScore::ZERO,
            environment_mode,
        };

        for record in enumerate_matches(&engine.schedule, &engine.catalog) {
            let contribution = engine.record(record);
            engine.score += contribution;
        }

        info!(
            event = "engine_init",
            employee_count = engine.schedule.employees.len(),
            shift_count = engine.schedule.shifts.len(),
            assigned_count = engine.schedule.assigned_count(),
            availability_count = engine.schedule.availabilities.len(),
            constraint_count = engine.catalog.active().count(),
            match_count = engine.ledger.len(),
            score = %engine.score,
        );

        Ok(engine)
    }

    /// Assigns `shift` to `employee`, moving it off its current employee if
    /// needed. Returns the new score.
    ///
    /// Assigning a shift to the employee it already has is a no-op.
    ///
    /// # Errors
    ///
    /// Fails without changing anything if either identity is unknown or the
    /// shift is pinned. In an asserted environment mode, also fails if the
    /// running score no longer agrees with its check.
    pub fn assign(&mut self, shift: ShiftId, employee: EmployeeId) -> Result<HardSoftScore> {
        let position = self.movable_position(shift)?;
        if !self.employee_positions.contains_key(&employee) {
            return Err(RotaError::UnknownEmployee(employee));
        }
        if self.schedule.shifts[position].employee == Some(employee) {
            debug!(event = "redundant_move", shift = %shift, employee = %employee);
            return Ok(self.score);
        }
        self.apply(position, Some(employee));
        self.check_score()?;
        Ok(self.score)
    }

    /// Unassigns `shift`. Returns the new score.
    ///
    /// Unassigning a shift without an employee is a no-op.
    ///
    /// # Errors
    ///
    /// Same as [`assign`](Self::assign).
    pub fn unassign(&mut self, shift: ShiftId) -> Result<HardSoftScore> {
        let position = self.movable_position(shift)?;
        if self.schedule.shifts[position].employee.is_none() {
            debug!(event = "redundant_move", shift = %shift);
            return Ok(self.score);
        }
        self.apply(position, None);
        self.check_score()?;
        Ok(self.score)
    }

    /// Applies a move and returns the new score together with its inverse.
    pub fn do_move(&mut self, change: ChangeMove) -> Result<MoveOutcome> {
        let position = self.locate_shift(change.shift)?;
        let undo = ChangeMove {
            shift: change.shift,
            employee: self.schedule.shifts[position].employee,
        };
        let score = match change.employee {
            Some(employee) => self.assign(change.shift, employee)?,
            None => self.unassign(change.shift)?,
        };
        Ok(MoveOutcome { score, undo })
    }

    /// Applies the inverse returned by [`do_move`](Self::do_move).
    pub fn undo(&mut self, undo: ChangeMove) -> Result<HardSoftScore> {
        self.do_move(undo).map(|outcome| outcome.score)
    }

    /// Returns the running score. Never recomputes.
    #[inline]
    pub fn current_score(&self) -> HardSoftScore {
        self.score
    }

    /// Scores the current schedule from scratch, ignoring every cache.
    pub fn recompute(&self) -> HardSoftScore {
        evaluate(&self.schedule, &self.catalog)
    }

    /// Every recorded constraint instance with its contribution, ordered by
    /// catalog position and facts.
    pub fn violations(&self) -> Vec<ConstraintMatch> {
        let mut keyed: Vec<_> = self.ledger.iter().collect();
        keyed.sort_unstable_by_key(|(key, _)| **key);

        keyed
            .into_iter()
            .filter_map(|(key, entry)| {
                let descriptor = self.catalog.get(key.constraint)?;
                let employee = self.employee_of_match(key.facts)?;
                Some(ConstraintMatch {
                    constraint_ref: descriptor.constraint_ref.clone(),
                    level: descriptor.level,
                    facts: key.facts,
                    justification: FactRef::of_match(key.facts, employee),
                    weight: entry.weight,
                    score: entry.score,
                })
            })
            .collect()
    }

    /// Per-constraint breakdown of the running score.
    pub fn explain(&self) -> ScoreExplanation {
        ScoreExplanation::from_matches(self.score, &self.catalog, self.violations())
    }

    /// Per-fact breakdown of the running score.
    pub fn indictments(&self) -> IndictmentMap {
        IndictmentMap::from_matches(&self.violations())
    }

    /// Returns the current employee of `shift`.
    pub fn employee_of(&self, shift: ShiftId) -> Result<Option<EmployeeId>> {
        let position = self.locate_shift(shift)?;
        Ok(self.schedule.shifts[position].employee)
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Consumes the engine and returns the schedule with its current
    /// assignment.
    pub fn into_schedule(self) -> Schedule {
        self.schedule
    }

    pub fn catalog(&self) -> &ConstraintCatalog {
        &self.catalog
    }

    pub fn environment_mode(&self) -> EnvironmentMode {
        self.environment_mode
    }

    /// Number of recorded constraint instances.
    pub fn match_count(&self) -> usize {
        self.ledger.len()
    }

    fn locate_shift(&self, shift: ShiftId) -> Result<usize> {
        self.shift_positions
            .get(&shift)
            .copied()
            .ok_or(RotaError::UnknownShift(shift))
    }

    fn movable_position(&self, shift: ShiftId) -> Result<usize> {
        let position = self.locate_shift(shift)?;
        if self.schedule.shifts[position].pinned {
            return Err(RotaError::PinnedShift(shift));
        }
        Ok(position)
    }

    /// Moves the shift at `position` to `target`. Identities have been
    /// checked by the caller.
    fn apply(&mut self, position: usize, target: Option<EmployeeId>) {
        let before = self.score;
        let (shift_id, start, previous) = {
            let shift = &self.schedule.shifts[position];
            (shift.id, shift.start, shift.employee)
        };

        if let Some(previous) = previous {
            self.score -= self.ledger.retract_shift(shift_id);
            self.shift_index.remove(previous, start, position);
        }

        self.schedule.shifts[position].employee = target;

        if let Some(target) = target {
            self.shift_index.insert(target, start, position);
            for record in self.matches_of(position) {
                let contribution = self.record(record);
                self.score += contribution;
            }
        }

        let delta = self.score - before;
        trace!(
            event = "move",
            shift = %shift_id,
            from = ?previous,
            to = ?target,
            hard_delta = delta.hard(),
            soft_delta = delta.soft(),
            score = %self.score,
        );
    }

    /// Constraint instances involving the assigned shift at `position`,
    /// found through the indexes.
    fn matches_of(&self, position: usize) -> Vec<MatchRecord> {
        let shift = &self.schedule.shifts[position];
        let Some(employee_id) = shift.employee else {
            return Vec::new();
        };
        let mut records = Vec::new();

        if let Some(&employee_position) = self.employee_positions.get(&employee_id) {
            let employee = &self.schedule.employees[employee_position];
            for (constraint, descriptor) in self.catalog.shift_constraints() {
                if let Some(weight) = descriptor.match_shift(shift, employee) {
                    records.push(MatchRecord {
                        constraint,
                        facts: MatchFacts::Shift(shift.id),
                        weight,
                        score: descriptor.score_of(weight),
                    });
                }
            }
        }

        for other in self
            .shift_index
            .neighbors(employee_id, shift, position, self.pair_reach)
        {
            let other = &self.schedule.shifts[other];
            for (constraint, descriptor) in self.catalog.pair_constraints() {
                if let Some((facts, weight)) = descriptor.match_pair(shift, other) {
                    records.push(MatchRecord {
                        constraint,
                        facts,
                        weight,
                        score: descriptor.score_of(weight),
                    });
                }
            }
        }

        for &availability in self.availability_index.on(employee_id, shift.date()) {
            let availability = &self.schedule.availabilities[availability];
            for (constraint, descriptor) in self.catalog.availability_constraints() {
                if let Some(weight) = descriptor.match_availability(shift, availability) {
                    records.push(MatchRecord {
                        constraint,
                        facts: MatchFacts::ShiftAvailability(shift.id, availability.id),
                        weight,
                        score: descriptor.score_of(weight),
                    });
                }
            }
        }

        records
    }

    /// Adds a record to the ledger. Returns the score it contributes.
    fn record(&mut self, record: MatchRecord) -> HardSoftScore {
        self.ledger.insert(
            MatchKey {
                constraint: record.constraint,
                facts: record.facts,
            },
            MatchEntry {
                weight: record.weight,
                score: record.score,
            },
        )
    }

    fn employee_of_match(&self, facts: MatchFacts) -> Option<EmployeeId> {
        let shift = facts.shifts().next()?;
        let position = *self.shift_positions.get(&shift)?;
        self.schedule.shifts[position].employee
    }

    /// Runs the check selected by the environment mode.
    fn check_score(&self) -> Result<()> {
        let expected = match self.environment_mode {
            EnvironmentMode::NonReproducible | EnvironmentMode::Reproducible => return Ok(()),
            EnvironmentMode::FastAssert => self.ledger.total(),
            EnvironmentMode::FullAssert => self.recompute(),
        };
        if expected != self.score {
            return Err(RotaError::ScoreCorruption {
                expected,
                actual: self.score,
            });
        }
        Ok(())
    }
}

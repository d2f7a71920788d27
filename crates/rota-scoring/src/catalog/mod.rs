//! The roster constraint catalog.
//!
//! Seven descriptors, fixed at construction. Weight multipliers are the only
//! thing configuration can change.

mod descriptor;

#[cfg(test)]
mod tests;

pub use descriptor::{
    ConstraintDescriptor, ConstraintKind, MatchFacts, PairFilter, PairJoiner, Pattern,
    ShiftFilter, Weigher,
};

use chrono::TimeDelta;
use rota_config::{ScoringConfig, MAX_WEIGHT_MULTIPLIER};
use rota_core::{AvailabilityKind, ImpactType, Result, RotaError, ScoreLevel};

/// Package shared by every catalog constraint.
pub const CATALOG_PACKAGE: &str = "roster";

/// Minimum rest between two shifts of one employee, in minutes.
pub const MIN_REST_MINUTES: i64 = 10 * 60;

/// An ordered set of constraint descriptors.
///
/// Descriptor positions are stable and double as constraint indices in the
/// engine's match ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintCatalog {
    descriptors: Vec<ConstraintDescriptor>,
    shift_constraints: Vec<usize>,
    pair_constraints: Vec<usize>,
    availability_constraints: Vec<usize>,
}

impl ConstraintCatalog {
    /// Builds a catalog from arbitrary descriptors.
    pub fn new(descriptors: Vec<ConstraintDescriptor>) -> Self {
        let mut catalog = Self {
            descriptors,
            shift_constraints: Vec::new(),
            pair_constraints: Vec::new(),
            availability_constraints: Vec::new(),
        };
        catalog.group_active();
        catalog
    }

    /// The seven roster constraints, all with multiplier 1.
    pub fn standard() -> Self {
        use ConstraintKind::*;
        use ImpactType::{Penalty, Reward};
        use ScoreLevel::{Hard, Soft};

        let same_employee_pair = |joiner, filter| Pattern::ShiftPair { joiner, filter };

        Self::new(vec![
            ConstraintDescriptor::new(
                RequiredSkill,
                "Required skill",
                Pattern::Shift(ShiftFilter::MissingRequiredSkill),
                Weigher::Unit,
                Hard,
                Penalty,
            ),
            ConstraintDescriptor::new(
                OverlappingShifts,
                "Overlapping shifts",
                same_employee_pair(PairJoiner::Overlapping, PairFilter::Always),
                Weigher::OverlapMinutes,
                Hard,
                Penalty,
            ),
            ConstraintDescriptor::new(
                MinimumRest,
                "At least 10 hours between 2 shifts",
                same_employee_pair(
                    PairJoiner::EndNotAfterStart,
                    PairFilter::GapShorterThan(MIN_REST_MINUTES),
                ),
                Weigher::GapShortfall(MIN_REST_MINUTES),
                Hard,
                Penalty,
            ),
            ConstraintDescriptor::new(
                OneShiftPerDay,
                "One shift per day",
                same_employee_pair(PairJoiner::SameStartDate, PairFilter::Always),
                Weigher::Unit,
                Hard,
                Penalty,
            ),
            ConstraintDescriptor::new(
                UnavailableEmployee,
                "Unavailable employee",
                Pattern::ShiftAvailability(AvailabilityKind::Unavailable),
                Weigher::ShiftMinutes,
                Hard,
                Penalty,
            ),
            ConstraintDescriptor::new(
                DesiredDay,
                "Desired day for employee",
                Pattern::ShiftAvailability(AvailabilityKind::Desired),
                Weigher::ShiftMinutes,
                Soft,
                Reward,
            ),
            ConstraintDescriptor::new(
                UndesiredDay,
                "Undesired day for employee",
                Pattern::ShiftAvailability(AvailabilityKind::Undesired),
                Weigher::ShiftMinutes,
                Soft,
                Penalty,
            ),
        ])
    }

    /// The standard catalog with multipliers taken from `config`.
    ///
    /// # Errors
    ///
    /// Returns `RotaError::Config` for a name that is not in the catalog or a
    /// multiplier outside `0..=MAX_WEIGHT_MULTIPLIER`.
    pub fn from_config(config: &ScoringConfig) -> Result<Self> {
        let mut catalog = Self::standard();
        for (name, &multiplier) in &config.constraint_weights {
            catalog.set_multiplier(name, multiplier)?;
        }
        Ok(catalog)
    }

    /// Sets the multiplier of the constraint with the given short or full name.
    pub fn set_multiplier(&mut self, name: &str, multiplier: i64) -> Result<()> {
        if !(0..=MAX_WEIGHT_MULTIPLIER).contains(&multiplier) {
            return Err(RotaError::Config(format!(
                "weight multiplier for '{}' must be between 0 and {}, got {}",
                name, MAX_WEIGHT_MULTIPLIER, multiplier
            )));
        }
        let index = self
            .find(name)
            .ok_or_else(|| RotaError::Config(format!("unknown constraint '{}'", name)))?;
        self.descriptors[index].multiplier = multiplier;
        self.group_active();
        Ok(())
    }

    /// Builder form of [`set_multiplier`](Self::set_multiplier).
    pub fn with_multiplier(mut self, name: &str, multiplier: i64) -> Result<Self> {
        self.set_multiplier(name, multiplier)?;
        Ok(self)
    }

    /// Finds a constraint by short name or `package/name`.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.descriptors.iter().position(|descriptor| {
            descriptor.name() == name || descriptor.constraint_ref.full_name() == name
        })
    }

    pub fn get(&self, index: usize) -> Option<&ConstraintDescriptor> {
        self.descriptors.get(index)
    }

    pub fn descriptors(&self) -> &[ConstraintDescriptor] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Active constraints with their catalog index.
    pub fn active(&self) -> impl Iterator<Item = (usize, &ConstraintDescriptor)> {
        self.descriptors
            .iter()
            .enumerate()
            .filter(|(_, descriptor)| descriptor.is_active())
    }

    /// Active single-shift constraints.
    pub fn shift_constraints(&self) -> impl Iterator<Item = (usize, &ConstraintDescriptor)> {
        self.indexed(&self.shift_constraints)
    }

    /// Active shift-pair constraints.
    pub fn pair_constraints(&self) -> impl Iterator<Item = (usize, &ConstraintDescriptor)> {
        self.indexed(&self.pair_constraints)
    }

    /// Active shift-availability constraints.
    pub fn availability_constraints(
        &self,
    ) -> impl Iterator<Item = (usize, &ConstraintDescriptor)> {
        self.indexed(&self.availability_constraints)
    }

    /// The furthest any active pair constraint reaches between two shifts.
    ///
    /// `None` means some pair constraint is unbounded and every shift of the
    /// employee has to be considered.
    pub fn pair_reach(&self) -> Option<TimeDelta> {
        self.pair_constraints()
            .map(|(_, descriptor)| descriptor.pair_reach())
            .try_fold(TimeDelta::zero(), |reach, next| next.map(|n| reach.max(n)))
    }

    fn indexed<'a>(
        &'a self,
        indices: &'a [usize],
    ) -> impl Iterator<Item = (usize, &'a ConstraintDescriptor)> + 'a {
        indices.iter().map(move |&i| (i, &self.descriptors[i]))
    }

    fn group_active(&mut self) {
        self.shift_constraints.clear();
        self.pair_constraints.clear();
        self.availability_constraints.clear();
        for (i, descriptor) in self.descriptors.iter().enumerate() {
            if !descriptor.is_active() {
                continue;
            }
            match descriptor.pattern {
                Pattern::Shift(_) => self.shift_constraints.push(i),
                Pattern::ShiftPair { .. } => self.pair_constraints.push(i),
                Pattern::ShiftAvailability(_) => self.availability_constraints.push(i),
            }
        }
    }
}

impl Default for ConstraintCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

//! Declarative constraint descriptors and their interpretation.
//!
//! A descriptor is plain data: which facts it matches (`Pattern`), how a
//! match is weighed (`Weigher`), which score level it lands on, and whether
//! it penalizes or rewards. Both the full evaluator and the incremental
//! engine call the `match_*` methods here, so the two can never disagree on
//! what a match is.

use chrono::TimeDelta;
use rota_core::{
    Availability, AvailabilityId, AvailabilityKind, ConstraintRef, Employee, HardSoftScore,
    ImpactType, ScoreLevel, Shift, ShiftId,
};

/// The seven rules of the roster catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    RequiredSkill,
    OverlappingShifts,
    MinimumRest,
    OneShiftPerDay,
    UnavailableEmployee,
    DesiredDay,
    UndesiredDay,
}

/// Filter applied to a single assigned shift and its employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftFilter {
    /// The employee lacks the shift's required skill.
    MissingRequiredSkill,
}

/// Join predicate between two assigned shifts of the same employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairJoiner {
    /// Half-open intervals intersect. Unordered.
    Overlapping,
    /// Both start on the same calendar date. Unordered.
    SameStartDate,
    /// The first ends no later than the second starts. Ordered by time.
    EndNotAfterStart,
}

/// Filter applied after a pair has been joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairFilter {
    Always,
    /// The gap between first end and second start is below the limit (minutes).
    GapShorterThan(i64),
}

/// What facts a constraint instance is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// One assigned shift.
    Shift(ShiftFilter),
    /// Two assigned shifts of the same employee.
    ShiftPair {
        joiner: PairJoiner,
        filter: PairFilter,
    },
    /// An assigned shift and one of its employee's availabilities on the
    /// shift's start date, of the given kind.
    ShiftAvailability(AvailabilityKind),
}

impl Pattern {
    /// Number of facts in one instance of this pattern.
    pub fn arity(&self) -> usize {
        match self {
            Pattern::Shift(_) => 1,
            Pattern::ShiftPair { .. } | Pattern::ShiftAvailability(_) => 2,
        }
    }
}

/// Non-negative weight of one match, before the multiplier and sign.
///
/// Pair weighers weigh zero on a lone shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weigher {
    /// Every match weighs 1.
    Unit,
    /// Length of the (first) shift in minutes.
    ShiftMinutes,
    /// Minutes the two shifts overlap.
    OverlapMinutes,
    /// Minutes the gap between the shifts falls short of the limit.
    GapShortfall(i64),
}

impl Weigher {
    fn weigh_shift(self, shift: &Shift) -> i64 {
        match self {
            Weigher::Unit => 1,
            Weigher::ShiftMinutes => shift.duration_minutes(),
            Weigher::OverlapMinutes | Weigher::GapShortfall(_) => 0,
        }
    }

    fn weigh_pair(self, first: &Shift, second: &Shift) -> i64 {
        match self {
            Weigher::Unit => 1,
            Weigher::ShiftMinutes => first.duration_minutes(),
            Weigher::OverlapMinutes => first.overlap_minutes(second),
            Weigher::GapShortfall(limit) => limit - gap_minutes(first, second),
        }
    }
}

/// The facts of one constraint instance, by identity.
///
/// Pairs are canonical: unordered joins put the lower shift id first,
/// ordered joins put the earlier shift first. Either way one pair of shifts
/// yields exactly one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MatchFacts {
    Shift(ShiftId),
    ShiftPair(ShiftId, ShiftId),
    ShiftAvailability(ShiftId, AvailabilityId),
}

impl MatchFacts {
    /// Returns true if `shift` takes part in this instance.
    pub fn involves(&self, shift: ShiftId) -> bool {
        match *self {
            MatchFacts::Shift(s) | MatchFacts::ShiftAvailability(s, _) => s == shift,
            MatchFacts::ShiftPair(a, b) => a == shift || b == shift,
        }
    }

    /// Shifts taking part in this instance.
    pub fn shifts(&self) -> impl Iterator<Item = ShiftId> {
        let (first, second) = match *self {
            MatchFacts::Shift(s) | MatchFacts::ShiftAvailability(s, _) => (s, None),
            MatchFacts::ShiftPair(a, b) => (a, Some(b)),
        };
        std::iter::once(first).chain(second)
    }
}

/// One entry of the constraint catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintDescriptor {
    pub kind: ConstraintKind,
    pub constraint_ref: ConstraintRef,
    pub pattern: Pattern,
    pub weigher: Weigher,
    pub level: ScoreLevel,
    pub impact: ImpactType,
    /// Non-negative multiplier applied to every match weight. Zero disables.
    pub multiplier: i64,
}

impl ConstraintDescriptor {
    pub fn new(
        kind: ConstraintKind,
        name: &str,
        pattern: Pattern,
        weigher: Weigher,
        level: ScoreLevel,
        impact: ImpactType,
    ) -> Self {
        Self {
            kind,
            constraint_ref: ConstraintRef::new(super::CATALOG_PACKAGE, name),
            pattern,
            weigher,
            level,
            impact,
            multiplier: 1,
        }
    }

    /// Returns the constraint name.
    pub fn name(&self) -> &str {
        &self.constraint_ref.name
    }

    pub fn is_hard(&self) -> bool {
        self.level.is_hard()
    }

    /// Returns true if matches of this constraint affect the score.
    pub fn is_active(&self) -> bool {
        self.multiplier > 0
    }

    /// Score of a single match of the given weight.
    ///
    /// The catalog bounds `multiplier`, so the product fits for any shift
    /// chrono can represent.
    #[inline]
    pub fn score_of(&self, weight: i64) -> HardSoftScore {
        HardSoftScore::of_level(self.level, self.impact.signum() * self.multiplier * weight)
    }

    /// Weighs an assigned shift against a single-shift pattern.
    pub fn match_shift(&self, shift: &Shift, employee: &Employee) -> Option<i64> {
        let Pattern::Shift(filter) = self.pattern else {
            return None;
        };
        let matched = match filter {
            ShiftFilter::MissingRequiredSkill => !employee.has_skill(&shift.required_skill),
        };
        matched.then(|| self.weigher.weigh_shift(shift))
    }

    /// Weighs two shifts of the same employee against a pair pattern.
    ///
    /// Argument order does not matter; the returned facts are canonical.
    pub fn match_pair(&self, a: &Shift, b: &Shift) -> Option<(MatchFacts, i64)> {
        let Pattern::ShiftPair { joiner, filter } = self.pattern else {
            return None;
        };
        if a.id == b.id {
            return None;
        }
        let (first, second) = join(joiner, a, b)?;
        let accepted = match filter {
            PairFilter::Always => true,
            PairFilter::GapShorterThan(limit) => gap_minutes(first, second) < limit,
        };
        accepted.then(|| {
            (
                MatchFacts::ShiftPair(first.id, second.id),
                self.weigher.weigh_pair(first, second),
            )
        })
    }

    /// Weighs a shift against an availability of the same employee on the
    /// shift's start date.
    pub fn match_availability(&self, shift: &Shift, availability: &Availability) -> Option<i64> {
        let Pattern::ShiftAvailability(kind) = self.pattern else {
            return None;
        };
        (availability.kind == kind).then(|| self.weigher.weigh_shift(shift))
    }

    /// How far apart two shifts can be and still match, measured from the
    /// end of one to the start of the other. `None` means unbounded.
    ///
    /// Same-date pairs are always reachable; the index covers the whole start
    /// date on top of this distance.
    pub fn pair_reach(&self) -> Option<TimeDelta> {
        match self.pattern {
            Pattern::ShiftPair {
                joiner: PairJoiner::EndNotAfterStart,
                filter: PairFilter::GapShorterThan(limit),
            } => Some(TimeDelta::minutes(limit.max(0))),
            Pattern::ShiftPair {
                joiner: PairJoiner::EndNotAfterStart,
                filter: PairFilter::Always,
            } => None,
            _ => Some(TimeDelta::zero()),
        }
    }
}

fn join<'a>(joiner: PairJoiner, a: &'a Shift, b: &'a Shift) -> Option<(&'a Shift, &'a Shift)> {
    let by_id = if a.id < b.id { (a, b) } else { (b, a) };
    match joiner {
        PairJoiner::Overlapping => (a.start < b.end && b.start < a.end).then_some(by_id),
        PairJoiner::SameStartDate => (a.date() == b.date()).then_some(by_id),
        PairJoiner::EndNotAfterStart => {
            if a.end <= b.start {
                Some((a, b))
            } else if b.end <= a.start {
                Some((b, a))
            } else {
                None
            }
        }
    }
}

#[inline]
fn gap_minutes(first: &Shift, second: &Shift) -> i64 {
    (second.start - first.end).num_minutes()
}

/// The bucket a constraint's contribution lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScoreLevel {
    /// Breaking it makes the roster infeasible.
    Hard,
    /// Preference; traded off once every hard rule holds.
    Soft,
}

impl ScoreLevel {
    /// Returns true for the hard level.
    #[inline]
    pub const fn is_hard(self) -> bool {
        matches!(self, ScoreLevel::Hard)
    }
}

//! Error types for rota

use thiserror::Error;

use crate::domain::{EmployeeId, ShiftId};
use crate::score::HardSoftScore;

/// Main error type for rota operations
#[derive(Debug, Error)]
pub enum RotaError {
    /// A move referenced a shift that is not part of the fact base
    #[error("Unknown shift: {0}")]
    UnknownShift(ShiftId),

    /// A move referenced an employee that is not part of the fact base
    #[error("Unknown employee: {0}")]
    UnknownEmployee(EmployeeId),

    /// The fact base violates a domain invariant
    #[error("Invalid facts: {0}")]
    InvalidFacts(String),

    /// A move tried to change the assignment of a pinned shift
    #[error("Shift {0} is pinned")]
    PinnedShift(ShiftId),

    /// The running score drifted from a full recalculation
    #[error("Score corruption: expected {expected}, incremental score was {actual}")]
    ScoreCorruption {
        expected: HardSoftScore,
        actual: HardSoftScore,
    },

    /// Error in scoring configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for rota operations
pub type Result<T> = std::result::Result<T, RotaError>;

//! Rota - incremental shift roster scoring in Rust
//!
//! Load employees, shifts and availabilities, then let a search procedure
//! move shifts between employees while the engine keeps the score current.
//!
//! # Example
//!
//! ```rust
//! use rota::prelude::*;
//!
//! // Score types are re-exported
//! let score = HardSoftScore::of(0, -100);
//! assert_eq!(score.hard(), 0);
//! assert_eq!(score.soft(), -100);
//! assert!(score.is_feasible());
//! ```

// Score types
pub use rota_core::{HardSoftScore, ScoreLevel};

// Domain facts
pub use rota_core::{
    Availability, AvailabilityId, AvailabilityKind, Employee, EmployeeId, Schedule, Shift,
    ShiftId, TimeWindow,
};

// Errors
pub use rota_core::{Result, RotaError};

// Configuration
pub use rota_config::{ConfigError, EnvironmentMode, ScoringConfig};

// Scoring
pub use rota_scoring::{
    ChangeMove, ConstraintAnalysis, ConstraintCatalog, ConstraintMatch, FactRef, IndictmentMap,
    MoveOutcome, ScoreEngine, ScoreExplanation,
};

#[cfg(feature = "console")]
pub mod console;

pub mod prelude {
    pub use super::HardSoftScore;
    pub use super::{Availability, AvailabilityKind, Employee, EmployeeId, Schedule, Shift, ShiftId};
    pub use super::{ChangeMove, ScoreEngine, ScoringConfig};
    pub use super::{Result, RotaError};
}

//! Rota Core - Core types for roster scoring
//!
//! This crate provides the fundamental abstractions for rota:
//! - Score types for representing schedule quality
//! - Constraint identification and impact classification
//! - Domain facts: employees, shifts, availabilities and the schedule
//! - The error type shared by every rota crate

pub mod constraint;
pub mod domain;
pub mod error;
pub mod score;

pub use constraint::{ConstraintRef, ImpactType};
pub use domain::{
    Availability, AvailabilityId, AvailabilityKind, Employee, EmployeeId, Schedule, Shift,
    ShiftId, TimeWindow,
};
pub use error::{Result, RotaError};
pub use score::{HardSoftScore, ScoreLevel};

//! Domain facts for roster scoring.
//!
//! - [`Employee`] - who can work, with a set of skills
//! - [`Shift`] - the planning entity; its employee is the only field a move changes
//! - [`Availability`] - an employee's stated preference or unavailability for a date
//! - [`Schedule`] - the fact base the engine is initialized from

mod availability;
mod employee;
mod ids;
mod schedule;
mod shift;


pub use availability::{Availability, AvailabilityKind, TimeWindow};
pub use employee::Employee;
pub use ids::{AvailabilityId, EmployeeId, ShiftId};
pub use schedule::Schedule;
pub use shift::Shift;

/// Minutes in one calendar day, the extent of a whole-day availability.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

//! Lookup structures kept beside the schedule.
//!
//! Both indexes store fact positions into the schedule's vectors, never the
//! facts themselves.

mod availability;
mod shift;

#[cfg(test)]
mod tests;

pub use availability::AvailabilityIndex;
pub use shift::ShiftIndex;

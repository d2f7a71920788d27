//! Shared test fixtures for rota crates.
//!
//! This crate provides fact builders and seeded random schedules for testing.
//! It does NOT depend on `rota-scoring` so the scoring crate can use it as a
//! dev-dependency.
//!
//! - [`facts`] - date helpers and one-line fact builders
//! - [`random`] - reproducible random schedules
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! rota-test = { workspace = true }
//! ```
//!
//! ```ignore
//! use rota_test::{at, employee, shift, random_schedule, ScheduleShape};
//! ```

pub mod facts;
pub mod random;

pub use facts::{at, availability, date, day, employee, shift, shift_requiring, DEFAULT_SKILL};
pub use random::{random_schedule, ScheduleShape, SKILLS};

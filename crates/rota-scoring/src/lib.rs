//! Incremental constraint scoring for shift rosters.
//!
//! This crate provides:
//! - A fixed catalog of declarative constraint descriptors (`ConstraintCatalog`)
//! - The index layer that keeps per-employee shift order and availability lookups
//! - A full evaluator that enumerates every constraint match from scratch
//! - `ScoreEngine`, which keeps a running score up to date as single shifts
//!   are assigned and unassigned
//! - Analysis types for score explanation
//!
//! # Architecture
//!
//! Constraints are data, not closures: each descriptor names its pattern,
//! join, filter and weigher, and both evaluators interpret the same
//! descriptors. A move only touches constraint instances that reference the
//! moved shift, so the engine retracts those from its match ledger and
//! recomputes them through the index layer.

pub mod analysis;
pub mod catalog;
pub mod engine;
pub mod evaluate;
pub mod index;

mod ledger;

pub use analysis::{
    ConstraintAnalysis, ConstraintMatch, FactRef, Indictment, IndictmentMap, ScoreExplanation,
};
pub use catalog::{
    ConstraintCatalog, ConstraintDescriptor, ConstraintKind, MatchFacts, PairFilter, PairJoiner,
    Pattern, ShiftFilter, Weigher,
};
pub use engine::{ChangeMove, MoveOutcome, ScoreEngine};
pub use evaluate::{enumerate_matches, evaluate, MatchRecord};
pub use index::{AvailabilityIndex, ShiftIndex};

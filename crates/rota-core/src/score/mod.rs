//! Score types for roster quality.

mod hard_soft;
mod level;


pub use hard_soft::HardSoftScore;
pub use level::ScoreLevel;

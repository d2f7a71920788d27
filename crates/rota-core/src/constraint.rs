//! Core constraint types.
//!
//! This module provides fundamental constraint identification and classification
//! types used throughout the constraint evaluation system.

use std::fmt;

/// Reference to a constraint for identification.
///
/// # Example
///
/// ```
/// use rota_core::ConstraintRef;
///
/// let cr = ConstraintRef::new("roster", "One shift per day");
/// assert_eq!(cr.full_name(), "roster/One shift per day");
///
/// let simple = ConstraintRef::new("", "Required skill");
/// assert_eq!(simple.full_name(), "Required skill");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintRef {
    /// Package/module containing the constraint.
    pub package: String,
    /// Name of the constraint.
    pub name: String,
}

impl ConstraintRef {
    /// Creates a new constraint reference.
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Returns the fully qualified name.
    pub fn full_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.package, self.name)
        }
    }
}

impl fmt::Display for ConstraintRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

/// Type of impact a constraint has on the score.
///
/// # Example
///
/// ```
/// use rota_core::ImpactType;
///
/// assert_eq!(ImpactType::Penalty.signum(), -1);
/// assert_eq!(ImpactType::Reward.signum(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImpactType {
    /// Penalize (subtract from score).
    Penalty,
    /// Reward (add to score).
    Reward,
}

impl ImpactType {
    /// Sign applied to a non-negative match weight.
    #[inline]
    pub const fn signum(self) -> i64 {
        match self {
            ImpactType::Penalty => -1,
            ImpactType::Reward => 1,
        }
    }
}

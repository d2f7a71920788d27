use std::fmt;

use rota_core::{EmployeeId, HardSoftScore, ShiftId};

/// Changes the employee of one shift. `employee: None` unassigns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChangeMove {
    pub shift: ShiftId,
    pub employee: Option<EmployeeId>,
}

impl ChangeMove {
    pub fn assign(shift: impl Into<ShiftId>, employee: impl Into<EmployeeId>) -> Self {
        Self {
            shift: shift.into(),
            employee: Some(employee.into()),
        }
    }

    pub fn unassign(shift: impl Into<ShiftId>) -> Self {
        Self {
            shift: shift.into(),
            employee: None,
        }
    }
}

impl fmt::Display for ChangeMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.employee {
            Some(employee) => write!(f, "{} -> {}", self.shift, employee),
            None => write!(f, "{} -> unassigned", self.shift),
        }
    }
}

/// Result of [`ScoreEngine::do_move`](super::ScoreEngine::do_move).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Score after the move.
    pub score: HardSoftScore,
    /// Move that restores the previous assignment.
    pub undo: ChangeMove,
}

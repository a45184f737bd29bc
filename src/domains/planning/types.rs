use crate::common::{InfeasibleKind, PlannerError};
use crate::domains::layout::SymbolGrid;
use serde::{Deserialize, Serialize};

/// Body of the planner submission: `{ "grid": string[][] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub grid: SymbolGrid,
}

/// Error body returned by the planner, e.g. `{ "error": "Deadlock detected: ..." }`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlannerErrorBody {
    pub error: String,
}

impl PlannerErrorBody {
    /// Maps a planner failure message onto the error the operator should see.
    pub fn classify(&self, status: Option<u16>) -> PlannerError {
        let lowered = self.error.to_lowercase();
        if lowered.contains("deadlock") {
            PlannerError::NoFeasiblePlan {
                kind: InfeasibleKind::Deadlock,
                message: self.error.clone(),
            }
        } else if lowered.contains("no valid path") {
            PlannerError::NoFeasiblePlan {
                kind: InfeasibleKind::NoPath,
                message: self.error.clone(),
            }
        } else {
            PlannerError::Unreachable {
                status,
                message: self.error.clone(),
            }
        }
    }
}

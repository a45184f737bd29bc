use crate::domains::layout::AgentEndpoint;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid grid dimensions {width}x{height}: minimum is 3x3, at most 26 rows")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Invalid agent count: {count}")]
    InvalidAgentCount { count: u32 },

    #[error("Unknown cell: {coordinate}")]
    UnknownCell { coordinate: String },

    #[error("No {role} slots left ({remaining} remaining)")]
    PlacementExhausted { role: AgentEndpoint, remaining: u32 },

    #[error("Incomplete layout: expected {expected} starts and ends, found {starts} starts and {ends} ends")]
    IncompleteLayout { expected: u32, starts: u32, ends: u32 },

    #[error("Invalid trace: {reason}")]
    InvalidTrace { reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl DomainError {
    /// Operator-facing text for an alert.
    pub fn user_alert(&self) -> String {
        match self {
            DomainError::InvalidDimensions { .. } => {
                "Please enter valid grid dimensions (minimum 3x3, at most 26 rows)".to_string()
            }
            DomainError::InvalidAgentCount { .. } => "Please enter at least one robot".to_string(),
            DomainError::PlacementExhausted { role, .. } => {
                format!("You can't place more {} points.", role)
            }
            DomainError::IncompleteLayout { .. } => {
                "Please place all start and end positions for each robot.".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfeasibleKind {
    Deadlock,
    NoPath,
}

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Planner unreachable (status {status:?}): {message}")]
    Unreachable { status: Option<u16>, message: String },

    #[error("No feasible plan ({kind:?}): {message}")]
    NoFeasiblePlan { kind: InfeasibleKind, message: String },

    #[error("Invalid planner response: {0}")]
    InvalidResponse(String),
}

impl PlannerError {
    pub fn user_alert(&self) -> String {
        match self {
            PlannerError::NoFeasiblePlan { kind: InfeasibleKind::Deadlock, .. } => {
                "Deadlock detected: Some bots cannot reach their goals due to the configuration"
                    .to_string()
            }
            PlannerError::NoFeasiblePlan { kind: InfeasibleKind::NoPath, .. } => {
                "No valid paths found for the current configuration".to_string()
            }
            PlannerError::Unreachable { .. } | PlannerError::InvalidResponse(_) => {
                "Impossible Scenarios - Please try again later.".to_string()
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Planner error: {0}")]
    Planner(#[from] PlannerError),

    #[error("A submission is already in flight")]
    SubmissionInFlight,

    #[error("Configuration error: {0}")]
    Configuration(#[from] anyhow::Error),
}

impl ApplicationError {
    pub fn user_alert(&self) -> String {
        match self {
            ApplicationError::Domain(e) => e.user_alert(),
            ApplicationError::Planner(e) => e.user_alert(),
            ApplicationError::SubmissionInFlight => {
                "A submission is already being planned, please wait.".to_string()
            }
            ApplicationError::Configuration(e) => format!("Configuration error: {}", e),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
pub type ApplicationResult<T> = Result<T, ApplicationError>;

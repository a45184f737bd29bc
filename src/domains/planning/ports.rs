use super::types::PlanRequest;
use crate::common::PlannerError;
use crate::domains::replay::Trace;
use async_trait::async_trait;

/// Port for the external planning service. One call is one submission; there is no retry.
#[async_trait]
pub trait PlannerClient: Send + Sync {
    async fn plan(&self, request: &PlanRequest) -> Result<Trace, PlannerError>;
}

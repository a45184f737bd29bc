use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::common::PlannerError;
use crate::config::PlannerConfig;
use crate::domains::planning::{PlanRequest, PlannerClient, PlannerErrorBody};
use crate::domains::replay::Trace;

/// Planner service reached over HTTP: `POST {endpoint}` with `{ "grid": [[...]] }`.
pub struct HttpPlannerClient {
    client: Client,
    endpoint: String,
}

impl HttpPlannerClient {
    pub fn new(config: &PlannerConfig) -> Result<Self, PlannerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| PlannerError::Unreachable {
                status: None,
                message: format!("Failed to build HTTP client: {}", e),
            })?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PlannerClient for HttpPlannerClient {
    async fn plan(&self, request: &PlanRequest) -> Result<Trace, PlannerError> {
        debug!(endpoint = %self.endpoint, rows = request.grid.len(), "submitting layout to planner");

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| PlannerError::Unreachable {
                status: None,
                message: format!("Failed to connect to planner: {}", e),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| PlannerError::Unreachable {
            status: Some(status.as_u16()),
            message: format!("Failed to read planner response: {}", e),
        })?;

        // The planner reports infeasible layouts as `{ "error": ... }`, whatever the status.
        if let Ok(error_body) = serde_json::from_str::<PlannerErrorBody>(&body) {
            let error = error_body.classify(Some(status.as_u16()));
            warn!(status = status.as_u16(), error = %error, "planner rejected layout");
            return Err(error);
        }

        if !status.is_success() {
            warn!(status = status.as_u16(), "planner returned non-success status");
            return Err(PlannerError::Unreachable {
                status: Some(status.as_u16()),
                message: format!("HTTP error! status: {} - {}", status, body),
            });
        }

        let trace: Trace = serde_json::from_str(&body)
            .map_err(|e| PlannerError::InvalidResponse(format!("Failed to parse trace: {}", e)))?;
        info!(steps = trace.time_log.len(), "planner returned trace");
        Ok(trace)
    }
}

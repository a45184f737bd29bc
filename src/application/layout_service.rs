// Layout Service - serializes authoring commands and planner submissions
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::common::{AggregateRoot, ApplicationError, ApplicationResult, DomainEvent};
use crate::domains::layout::{
    CellRole, GridConfigurator, LayoutEventPublisher, LayoutProjection, MarkerKind, OverwritePolicy,
    SymbolGrid,
};
use crate::domains::planning::{PlanRequest, PlannerClient};
use crate::domains::replay::Trace;
use crate::domains::DynLogger;

/// Clears the in-flight flag when the submission finishes, however it finishes.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

pub struct LayoutService {
    configurator: Mutex<GridConfigurator>,
    planner: Arc<dyn PlannerClient>,
    publisher: Option<LayoutEventPublisher>,
    logger: DynLogger,
    in_flight: AtomicBool,
}

impl LayoutService {
    pub fn new(
        width: usize,
        height: usize,
        agent_count: u32,
        policy: OverwritePolicy,
        planner: Arc<dyn PlannerClient>,
        logger: DynLogger,
    ) -> ApplicationResult<Self> {
        let layout_id = uuid::Uuid::new_v4().to_string();
        let mut configurator = GridConfigurator::new(layout_id, width, height, agent_count, policy)?;
        for event in configurator.take_uncommitted() {
            logger.info(&format!("{} {}", event.event_type(), event.aggregate_id()));
        }
        Ok(Self {
            configurator: Mutex::new(configurator),
            planner,
            publisher: None,
            logger,
            in_flight: AtomicBool::new(false),
        })
    }

    pub fn with_publisher(mut self, publisher: LayoutEventPublisher) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub async fn create_grid(&self, width: usize, height: usize, agent_count: u32) -> ApplicationResult<LayoutProjection> {
        let mut configurator = self.configurator.lock().await;
        let result = configurator.create_grid(width, height, agent_count);
        self.commit(&mut configurator, result).await?;
        Ok(LayoutProjection::from(&*configurator))
    }

    pub async fn set_agent_count(&self, agent_count: u32) -> ApplicationResult<LayoutProjection> {
        let mut configurator = self.configurator.lock().await;
        let result = configurator.set_agent_count(agent_count);
        self.commit(&mut configurator, result).await?;
        Ok(LayoutProjection::from(&*configurator))
    }

    pub async fn place_marker(&self, coordinate: &str, kind: MarkerKind) -> ApplicationResult<Option<String>> {
        let mut configurator = self.configurator.lock().await;
        let result = configurator.place_marker(coordinate, kind);
        self.commit(&mut configurator, result).await
    }

    pub async fn remove_marker(&self, coordinate: &str) -> ApplicationResult<CellRole> {
        let mut configurator = self.configurator.lock().await;
        let result = configurator.remove_marker(coordinate);
        self.commit(&mut configurator, result).await
    }

    pub async fn projection(&self) -> LayoutProjection {
        LayoutProjection::from(&*self.configurator.lock().await)
    }

    pub async fn serialize(&self) -> SymbolGrid {
        self.configurator.lock().await.serialize()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Sends the current layout to the planner. Incomplete layouts never reach the network,
    /// and only one submission may be outstanding at a time.
    pub async fn submit(&self) -> ApplicationResult<Trace> {
        let request = {
            let configurator = self.configurator.lock().await;
            if let Err(e) = configurator.is_submittable() {
                self.logger.warn(&format!("Submission rejected: {}", e));
                return Err(e.into());
            }
            PlanRequest {
                grid: configurator.serialize(),
            }
        };

        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or_else(|| {
            self.logger.warn("Submission rejected: another submission is in flight");
            ApplicationError::SubmissionInFlight
        })?;

        self.logger.info(&format!(
            "Submitting {}x{} layout to planner",
            request.grid.first().map(Vec::len).unwrap_or(0),
            request.grid.len()
        ));
        match self.planner.plan(&request).await {
            Ok(trace) => {
                self.logger.info(&format!("Planner returned {} steps", trace.time_log.len()));
                Ok(trace)
            }
            Err(e) => {
                self.logger.error(&format!("Planner submission failed: {}", e));
                Err(e.into())
            }
        }
    }

    /// Drains the events a command produced, logging and publishing them.
    async fn commit<T>(
        &self,
        configurator: &mut GridConfigurator,
        result: crate::common::DomainResult<T>,
    ) -> ApplicationResult<T> {
        let events = configurator.take_uncommitted();
        let value = match result {
            Ok(value) => value,
            Err(e) => {
                self.logger.warn(&e.user_alert());
                return Err(e.into());
            }
        };
        for event in &events {
            self.logger.info(&format!("{} {}", event.event_type(), event.aggregate_id()));
        }
        if let Some(publisher) = &self.publisher {
            if let Err(e) = publisher.publish(events).await {
                self.logger.warn(&e);
            }
        }
        Ok(value)
    }
}

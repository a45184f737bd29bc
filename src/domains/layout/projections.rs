// Layout projections - read model for the authoring view
use super::aggregate::{AgentEndpoint, GridConfigurator};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutProjection {
    pub layout_id: String,
    pub width: usize,
    pub height: usize,
    pub agent_count: u32,
    pub starts_remaining: u32,
    pub ends_remaining: u32,
    pub starts_placed: u32,
    pub ends_placed: u32,
    pub obstacles_placed: u32,
    pub submittable: bool,
}

impl From<&GridConfigurator> for LayoutProjection {
    fn from(configurator: &GridConfigurator) -> Self {
        let grid = configurator.grid();
        let counters = configurator.counters();
        Self {
            layout_id: configurator.id.clone(),
            width: grid.width,
            height: grid.height,
            agent_count: counters.agent_count(),
            starts_remaining: counters.remaining(AgentEndpoint::Start),
            ends_remaining: counters.remaining(AgentEndpoint::End),
            starts_placed: grid.start_count(),
            ends_placed: grid.end_count(),
            obstacles_placed: grid.obstacle_count(),
            submittable: configurator.is_submittable().is_ok(),
        }
    }
}

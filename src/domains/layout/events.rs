use super::aggregate::CellRole;
use crate::common::DomainEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LayoutEvent {
    GridCreated {
        layout_id: String,
        width: usize,
        height: usize,
        agent_count: u32,
        timestamp: DateTime<Utc>,
    },
    MarkerPlaced {
        layout_id: String,
        coordinate: String,
        role: CellRole,
        timestamp: DateTime<Utc>,
    },
    MarkerRemoved {
        layout_id: String,
        coordinate: String,
        previous: CellRole,
        timestamp: DateTime<Utc>,
    },
}

impl DomainEvent for LayoutEvent {
    fn event_type(&self) -> &'static str {
        match self {
            LayoutEvent::GridCreated { .. } => "GridCreated",
            LayoutEvent::MarkerPlaced { .. } => "MarkerPlaced",
            LayoutEvent::MarkerRemoved { .. } => "MarkerRemoved",
        }
    }

    fn aggregate_id(&self) -> &str {
        match self {
            LayoutEvent::GridCreated { layout_id, .. } => layout_id,
            LayoutEvent::MarkerPlaced { layout_id, .. } => layout_id,
            LayoutEvent::MarkerRemoved { layout_id, .. } => layout_id,
        }
    }

    fn event_version(&self) -> u64 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            LayoutEvent::GridCreated { timestamp, .. } => *timestamp,
            LayoutEvent::MarkerPlaced { timestamp, .. } => *timestamp,
            LayoutEvent::MarkerRemoved { timestamp, .. } => *timestamp,
        }
    }
}

use super::counters::{AgentEndpoint, PlacementCounters};
use super::grid::{CellRole, Grid, SymbolGrid};
use crate::common::{AggregateRoot, DomainError, DomainResult};
use crate::domains::layout::events::LayoutEvent;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// What the operator drops onto a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerKind {
    Obstacle,
    Start,
    End,
}

impl MarkerKind {
    fn endpoint(self) -> Option<AgentEndpoint> {
        match self {
            MarkerKind::Obstacle => None,
            MarkerKind::Start => Some(AgentEndpoint::Start),
            MarkerKind::End => Some(AgentEndpoint::End),
        }
    }
}

/// How a placement treats a start/end marker already sitting on the target cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OverwritePolicy {
    /// Overwrite without giving the old slot back. The overwritten slot stays consumed.
    #[default]
    Keep,
    /// Give the old slot back before placing.
    Reclaim,
}

fn endpoint_of(role: &CellRole) -> Option<AgentEndpoint> {
    match role {
        CellRole::Start(_) => Some(AgentEndpoint::Start),
        CellRole::End(_) => Some(AgentEndpoint::End),
        CellRole::Empty | CellRole::Obstacle => None,
    }
}

/// Layout aggregate: the grid and its placement counters, changed only together through events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfigurator {
    pub id: String,
    pub policy: OverwritePolicy,
    grid: Grid,
    counters: PlacementCounters,
    pub version: u64,
    #[serde(skip)]
    uncommitted_events: Vec<LayoutEvent>,
}

impl GridConfigurator {
    pub fn new(
        id: String,
        width: usize,
        height: usize,
        agent_count: u32,
        policy: OverwritePolicy,
    ) -> DomainResult<Self> {
        if agent_count == 0 {
            return Err(DomainError::InvalidAgentCount { count: agent_count });
        }
        let grid = Grid::create(width, height)?;
        let mut configurator = Self {
            id: id.clone(),
            policy,
            grid,
            counters: PlacementCounters::new(agent_count),
            version: 0,
            uncommitted_events: Vec::new(),
        };

        configurator.add_event(LayoutEvent::GridCreated {
            layout_id: id,
            width,
            height,
            agent_count,
            timestamp: Utc::now(),
        });
        Ok(configurator)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn counters(&self) -> &PlacementCounters {
        &self.counters
    }

    pub fn agent_count(&self) -> u32 {
        self.counters.agent_count()
    }

    /// Rebuilds an empty grid and fresh counters. Rejected dimensions leave the layout untouched.
    pub fn create_grid(&mut self, width: usize, height: usize, agent_count: u32) -> DomainResult<()> {
        if agent_count == 0 {
            return Err(DomainError::InvalidAgentCount { count: agent_count });
        }
        Grid::create(width, height)?;
        self.record(LayoutEvent::GridCreated {
            layout_id: self.id.clone(),
            width,
            height,
            agent_count,
            timestamp: Utc::now(),
        })
    }

    /// Changing the agent count resets the layout so counters and cells stay consistent.
    pub fn set_agent_count(&mut self, agent_count: u32) -> DomainResult<()> {
        self.create_grid(self.grid.width, self.grid.height, agent_count)
    }

    /// Places a marker and returns the issued agent label for start/end markers.
    pub fn place_marker(&mut self, coordinate: &str, kind: MarkerKind) -> DomainResult<Option<String>> {
        let (coordinate, current) = self.locate(coordinate)?;

        let reclaimed = match self.policy {
            OverwritePolicy::Reclaim => endpoint_of(&current).map(|_| current.clone()),
            OverwritePolicy::Keep => None,
        };
        let mut counters = self.counters;
        if let Some(endpoint) = reclaimed.as_ref().and_then(endpoint_of) {
            counters = counters.release(endpoint);
        }

        let role = match kind.endpoint() {
            None => CellRole::Obstacle,
            Some(endpoint) => {
                let (label, _) = counters.try_reserve(endpoint).ok_or(
                    DomainError::PlacementExhausted {
                        role: endpoint,
                        remaining: 0,
                    },
                )?;
                match endpoint {
                    AgentEndpoint::Start => CellRole::Start(label),
                    AgentEndpoint::End => CellRole::End(label),
                }
            }
        };

        if let Some(previous) = reclaimed {
            self.record(LayoutEvent::MarkerRemoved {
                layout_id: self.id.clone(),
                coordinate: coordinate.clone(),
                previous,
                timestamp: Utc::now(),
            })?;
        }
        let issued = role.agent_label().map(str::to_string);
        self.record(LayoutEvent::MarkerPlaced {
            layout_id: self.id.clone(),
            coordinate,
            role,
            timestamp: Utc::now(),
        })?;
        Ok(issued)
    }

    /// Picks a marker back up, returning the role the cell had.
    pub fn remove_marker(&mut self, coordinate: &str) -> DomainResult<CellRole> {
        let (coordinate, previous) = self.locate(coordinate)?;
        self.record(LayoutEvent::MarkerRemoved {
            layout_id: self.id.clone(),
            coordinate,
            previous: previous.clone(),
            timestamp: Utc::now(),
        })?;
        Ok(previous)
    }

    pub fn is_submittable(&self) -> DomainResult<()> {
        let expected = self.agent_count();
        let starts = self.grid.start_count();
        let ends = self.grid.end_count();
        if starts != expected || ends != expected {
            return Err(DomainError::IncompleteLayout { expected, starts, ends });
        }
        Ok(())
    }

    pub fn serialize(&self) -> SymbolGrid {
        self.grid.to_symbols()
    }

    /// Canonical label and current role of the addressed cell.
    fn locate(&self, coordinate: &str) -> DomainResult<(String, CellRole)> {
        self.grid
            .cell(coordinate)
            .map(|cell| (cell.coordinate.clone(), cell.role.clone()))
            .ok_or_else(|| DomainError::UnknownCell {
                coordinate: coordinate.to_string(),
            })
    }
}

impl AggregateRoot for GridConfigurator {
    type Event = LayoutEvent;

    fn aggregate_id(&self) -> &str {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) -> DomainResult<()> {
        match event {
            LayoutEvent::GridCreated { width, height, agent_count, .. } => {
                self.grid = Grid::create(*width, *height)?;
                self.counters = PlacementCounters::new(*agent_count);
            }
            LayoutEvent::MarkerPlaced { coordinate, role, .. } => {
                let grid = self.grid.with_cell_role(coordinate, role.clone())?;
                if let Some(endpoint) = endpoint_of(role) {
                    let (_, counters) = self.counters.try_reserve(endpoint).ok_or(
                        DomainError::PlacementExhausted {
                            role: endpoint,
                            remaining: 0,
                        },
                    )?;
                    self.counters = counters;
                }
                self.grid = grid;
            }
            LayoutEvent::MarkerRemoved { coordinate, previous, .. } => {
                let grid = self.grid.with_cell_role(coordinate, CellRole::Empty)?;
                if let Some(endpoint) = endpoint_of(previous) {
                    self.counters = self.counters.release(endpoint);
                }
                self.grid = grid;
            }
        }
        self.version += 1;
        Ok(())
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn mark_events_as_committed(&mut self) {
        self.uncommitted_events.clear();
    }

    fn add_event(&mut self, event: Self::Event) {
        self.uncommitted_events.push(event);
    }
}

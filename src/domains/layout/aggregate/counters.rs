use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of an agent's two markers a slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentEndpoint {
    Start,
    End,
}

impl AgentEndpoint {
    pub fn label_prefix(self) -> &'static str {
        match self {
            AgentEndpoint::Start => "A",
            AgentEndpoint::End => "B",
        }
    }
}

impl fmt::Display for AgentEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentEndpoint::Start => write!(f, "Start"),
            AgentEndpoint::End => write!(f, "End"),
        }
    }
}

/// Remaining start/end slots for `agent_count` agents plus the next label index per role.
///
/// Values are immutable: reservations and releases return the updated counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementCounters {
    agent_count: u32,
    start_remaining: u32,
    end_remaining: u32,
    next_start_index: u32,
    next_end_index: u32,
}

impl PlacementCounters {
    pub fn new(agent_count: u32) -> Self {
        Self {
            agent_count,
            start_remaining: agent_count,
            end_remaining: agent_count,
            next_start_index: 1,
            next_end_index: 1,
        }
    }

    pub fn agent_count(&self) -> u32 {
        self.agent_count
    }

    pub fn remaining(&self, role: AgentEndpoint) -> u32 {
        match role {
            AgentEndpoint::Start => self.start_remaining,
            AgentEndpoint::End => self.end_remaining,
        }
    }

    pub fn next_index(&self, role: AgentEndpoint) -> u32 {
        match role {
            AgentEndpoint::Start => self.next_start_index,
            AgentEndpoint::End => self.next_end_index,
        }
    }

    /// Claims one slot, returning the issued label and the updated counters.
    /// `None` when no slot of that role is left.
    pub fn try_reserve(&self, role: AgentEndpoint) -> Option<(String, PlacementCounters)> {
        let mut next = *self;
        let (remaining, index) = next.fields_mut(role);
        if *remaining == 0 {
            return None;
        }
        *remaining -= 1;
        let label = format!("{}{}", role.label_prefix(), index);
        *index += 1;
        Some((label, next))
    }

    /// Gives one slot back. Clamped so remaining never exceeds the agent count and the next
    /// index never drops below 1.
    pub fn release(&self, role: AgentEndpoint) -> PlacementCounters {
        let agent_count = self.agent_count;
        let mut next = *self;
        let (remaining, index) = next.fields_mut(role);
        if *index <= 1 || *remaining >= agent_count {
            return *self;
        }
        *remaining += 1;
        *index -= 1;
        next
    }

    fn fields_mut(&mut self, role: AgentEndpoint) -> (&mut u32, &mut u32) {
        match role {
            AgentEndpoint::Start => (&mut self.start_remaining, &mut self.next_start_index),
            AgentEndpoint::End => (&mut self.end_remaining, &mut self.next_end_index),
        }
    }
}

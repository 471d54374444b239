//! Per-agent motion state.
//!
//! Each agent enrolled in a flock has a [`MotionState`] holding its ground
//! plane velocity (world units per tick) and its [`ArrivalPhase`]. The phase
//! only ever advances `Moving → Settling → Arrived`; a fresh move order is the
//! only way back to `Moving`.

use glam::Vec2;
use hashbrown::HashMap;

use crate::agent::AgentId;
use crate::error::MovementError;

/// Arrival lifecycle stage of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArrivalPhase {
    /// Travelling towards the flock's destination.
    Moving,
    /// Near the destination and spreading out to find a place to stop.
    Settling,
    /// Stopped.
    Arrived,
}

/// Velocity and arrival phase of one agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionState {
    /// Ground-plane velocity in world units per tick.
    pub velocity: Vec2,
    /// Current arrival phase.
    pub phase: ArrivalPhase,
}

impl MotionState {
    /// State given to an agent on its first move order.
    pub const START: Self = Self {
        velocity: Vec2::ZERO,
        phase: ArrivalPhase::Moving,
    };

    /// State of an agent that has come to rest.
    pub const ARRIVED: Self = Self {
        velocity: Vec2::ZERO,
        phase: ArrivalPhase::Arrived,
    };

    /// Whether the agent has stopped.
    #[must_use]
    pub fn has_arrived(&self) -> bool {
        self.phase == ArrivalPhase::Arrived
    }
}

/// Motion state for every enrolled agent.
#[derive(Debug, Default, Clone)]
pub struct MotionStateTable {
    states: HashMap<AgentId, MotionState>,
}

impl MotionStateTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// State of `id`, if the agent has been enrolled.
    #[must_use]
    pub fn get(&self, id: AgentId) -> Option<&MotionState> {
        self.states.get(&id)
    }

    /// Mutable state of `id`, if the agent has been enrolled.
    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut MotionState> {
        self.states.get_mut(&id)
    }

    /// Phase of `id`, if the agent has been enrolled.
    #[must_use]
    pub fn phase(&self, id: AgentId) -> Option<ArrivalPhase> {
        self.get(id).map(|state| state.phase)
    }

    /// Velocity of `id`; agents without state are treated as stationary.
    #[must_use]
    pub fn velocity_or_zero(&self, id: AgentId) -> Vec2 {
        self.get(id).map_or(Vec2::ZERO, |state| state.velocity)
    }

    /// Inserts or replaces the state of `id`.
    pub fn insert(&mut self, id: AgentId, state: MotionState) -> Option<MotionState> {
        self.states.insert(id, state)
    }

    /// Removes the state of `id`.
    pub fn remove(&mut self, id: AgentId) -> Option<MotionState> {
        self.states.remove(&id)
    }

    /// Ensures `additional` more entries fit without reallocating.
    ///
    /// # Errors
    /// Returns [`MovementError::Allocation`] if the table cannot grow.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), MovementError> {
        self.states
            .try_reserve(additional)
            .map_err(|_| MovementError::allocation("motion state table"))
    }

    /// Number of tracked agents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether no agent is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.states.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn unknown_agents_are_stationary() {
        let table = MotionStateTable::new();
        assert_eq!(table.velocity_or_zero(AgentId(9)), Vec2::ZERO);
        assert!(table.phase(AgentId(9)).is_none());
    }

    #[rstest]
    fn phases_are_ordered_by_progress() {
        assert!(ArrivalPhase::Moving < ArrivalPhase::Settling);
        assert!(ArrivalPhase::Settling < ArrivalPhase::Arrived);
    }

    #[rstest]
    fn insert_then_remove() {
        let mut table = MotionStateTable::new();
        table.try_reserve(4).expect("small reservation");
        table.insert(AgentId(1), MotionState::START);
        assert_eq!(table.phase(AgentId(1)), Some(ArrivalPhase::Moving));
        assert_eq!(table.remove(AgentId(1)), Some(MotionState::START));
        assert!(table.is_empty());
    }
}

//! Agents steered by the movement subsystem.
//!
//! Agents are owned by the host (an ECS world, a scripting layer, a test). The
//! core refers to them by [`AgentId`] and resolves identifiers through an
//! [`AgentStore`] every time it needs one, so an agent that disappears from the
//! host simply stops resolving instead of leaving a dangling reference.

use std::fmt;

use glam::{Quat, Vec3};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Stable identifier of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub u32);

impl From<u32> for AgentId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl AgentId {
    /// Returns the raw identifier.
    #[must_use]
    pub const fn into_inner(self) -> u32 {
        self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Movable unit as seen by the steering code.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    /// Identifier used for flock membership and motion state.
    pub id: AgentId,
    /// World-space position; `y` is height above the ground plane.
    pub position: Vec3,
    /// World-space orientation.
    pub rotation: Quat,
    /// Top speed in world units per second.
    pub max_speed: f32,
    /// Radius used for selection and personal space.
    pub selection_radius: f32,
    /// Static structures never join a flock.
    pub immovable: bool,
}

impl Agent {
    /// Creates a movable agent at `position` facing the default direction.
    #[must_use]
    pub const fn new(id: AgentId, position: Vec3, max_speed: f32, selection_radius: f32) -> Self {
        Self {
            id,
            position,
            rotation: Quat::IDENTITY,
            max_speed,
            selection_radius,
            immovable: false,
        }
    }

    /// Marks the agent as immovable.
    #[must_use]
    pub const fn immovable(mut self) -> Self {
        self.immovable = true;
        self
    }

    /// Whether the agent may be enrolled in a flock.
    ///
    /// # Examples
    /// ```
    /// use flock_steer::{Agent, AgentId};
    /// use glam::Vec3;
    /// assert!(Agent::new(AgentId(1), Vec3::ZERO, 30.0, 1.0).can_move());
    /// assert!(!Agent::new(AgentId(2), Vec3::ZERO, 0.0, 1.0).can_move());
    /// assert!(!Agent::new(AgentId(3), Vec3::ZERO, 30.0, 1.0).immovable().can_move());
    /// ```
    #[must_use]
    pub fn can_move(&self) -> bool {
        !self.immovable && self.max_speed > 0.0
    }
}

/// Lookup of live agents by identifier.
pub trait AgentStore {
    /// Returns the agent with `id`, if it still exists.
    fn agent(&self, id: AgentId) -> Option<&Agent>;
    /// Returns the agent with `id` for mutation, if it still exists.
    fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent>;
}

/// In-memory [`AgentStore`] keyed by identifier.
#[derive(Debug, Default, Clone)]
pub struct AgentRegistry {
    agents: HashMap<AgentId, Agent>,
}

impl AgentRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an agent, returning the previous entry.
    pub fn insert(&mut self, agent: Agent) -> Option<Agent> {
        self.agents.insert(agent.id, agent)
    }

    /// Removes an agent from the registry.
    pub fn remove(&mut self, id: AgentId) -> Option<Agent> {
        self.agents.remove(&id)
    }

    /// Number of registered agents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether the registry holds no agents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Iterates all agents in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    /// Identifiers of all registered agents, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<AgentId> {
        let mut ids: Vec<_> = self.agents.keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

impl AgentStore for AgentRegistry {
    fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(&id)
    }
}

impl FromIterator<Agent> for AgentRegistry {
    fn from_iter<I: IntoIterator<Item = Agent>>(iter: I) -> Self {
        Self {
            agents: iter.into_iter().map(|agent| (agent.id, agent)).collect(),
        }
    }
}

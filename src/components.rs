//! ECS component types used by the movement adapter.
//! Tags steerable units, immovable units and destination marker entities.
use bevy::prelude::*;
use serde::Serialize;

use crate::agent::{Agent, AgentId};
use crate::marker::MarkerId;

/// Unit that can join a flock.
///
/// Position and orientation are read from and written back to the entity's
/// [`Transform`].
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SteeringAgent {
    pub id: AgentId,
    pub max_speed: f32,
    pub selection_radius: f32,
}

impl SteeringAgent {
    #[must_use]
    pub const fn new(id: AgentId, max_speed: f32, selection_radius: f32) -> Self {
        Self {
            id,
            max_speed,
            selection_radius,
        }
    }

    /// Agent record for this unit at `transform`.
    #[must_use]
    pub fn to_agent(&self, transform: &Transform, immovable: bool) -> Agent {
        let mut agent = Agent::new(
            self.id,
            transform.translation,
            self.max_speed,
            self.selection_radius,
        );
        agent.rotation = transform.rotation;
        if immovable {
            agent = agent.immovable();
        }
        agent
    }
}

/// Marks a unit that never joins a flock, such as a building.
#[derive(Component, Debug, Default, Clone, Copy, Serialize)]
pub struct Immovable;

/// Entity rendering a destination marker.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerVisual(pub MarkerId);

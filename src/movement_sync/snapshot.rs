//! Copies of ECS units handed to the movement core.

use bevy::prelude::*;
use hashbrown::HashMap;
use log::warn;

use crate::agent::{AgentId, AgentRegistry};
use crate::components::SteeringAgent;
use crate::events::MotionEvent;

use super::{MotionEnded, MotionStarted};

/// Agents captured from the world together with their owning entities.
#[derive(Debug, Default)]
pub(super) struct AgentSnapshot {
    pub agents: AgentRegistry,
    entities: HashMap<AgentId, Entity>,
}

impl AgentSnapshot {
    pub fn capture<'a>(
        units: impl IntoIterator<Item = (Entity, &'a SteeringAgent, &'a Transform, bool)>,
    ) -> Self {
        let mut snapshot = Self::default();
        for (entity, unit, transform, immovable) in units {
            if let Some(previous) = snapshot.entities.insert(unit.id, entity) {
                warn!(
                    "agent {} is attached to both {previous:?} and {entity:?}; using the latter",
                    unit.id
                );
            }
            snapshot.agents.insert(unit.to_agent(transform, immovable));
        }
        snapshot
    }

    /// Triggers the ECS counterpart of every core notification.
    pub fn trigger(&self, commands: &mut Commands, events: Vec<MotionEvent>) {
        for event in events {
            let agent = event.agent();
            let Some(&entity) = self.entities.get(&agent) else {
                warn!("motion event for agent {agent} without an entity");
                continue;
            };
            match event {
                MotionEvent::Started(_) => commands.trigger(MotionStarted { entity, agent }),
                MotionEvent::Ended(_) => commands.trigger(MotionEnded { entity, agent }),
            }
        }
    }
}

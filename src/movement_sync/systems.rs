//! Scheduled systems of the movement adapter.

use bevy::prelude::*;
use log::debug;

use crate::agent::AgentStore;
use crate::components::{Immovable, MarkerVisual, SteeringAgent};
use crate::movement::TickReport;

use super::snapshot::AgentSnapshot;
use super::FlockMovement;

type UnitQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static SteeringAgent,
        &'static mut Transform,
        Has<Immovable>,
    ),
>;

/// Advances every flock by one fixed tick.
///
/// Flock members whose entity was despawned or lost its [`SteeringAgent`]
/// are missing from the snapshot, so the core forgets them.
pub fn movement_tick_system(
    mut commands: Commands,
    mut movement: ResMut<FlockMovement>,
    mut units: UnitQuery<'_, '_>,
) {
    if movement.is_idle() {
        return;
    }
    let mut snapshot = AgentSnapshot::capture(units.iter());
    let mut events = Vec::new();
    let report = movement.tick(&mut snapshot.agents, &mut events);
    if report != TickReport::default() {
        debug!("{report:?}");
    }

    for (_, unit, mut transform, _) in &mut units {
        let Some(agent) = snapshot.agents.agent(unit.id) else {
            continue;
        };
        if transform.translation != agent.position || transform.rotation != agent.rotation {
            transform.translation = agent.position;
            transform.rotation = agent.rotation;
        }
    }
    snapshot.trigger(&mut commands, events);
}

/// Despawns marker entities whose animation has finished.
pub fn reap_markers_system(
    mut commands: Commands,
    mut movement: ResMut<FlockMovement>,
    visuals: Query<(Entity, &MarkerVisual)>,
) {
    let reaped = movement.markers_mut().reap();
    if reaped.is_empty() {
        return;
    }
    for (entity, MarkerVisual(marker)) in &visuals {
        if reaped.contains(marker) {
            commands.entity(entity).despawn();
        }
    }
}

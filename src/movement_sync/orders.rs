//! Observers turning host events into core calls.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::{debug, warn};

use crate::components::{Immovable, MarkerVisual, SteeringAgent};
use crate::constants::MARKER_SCALE;

use super::snapshot::AgentSnapshot;
use super::{
    FlockMovement, MarkerAnimationFinished, MoveOrder, MovementSyncError,
    MovementSyncErrorContext,
};

type SelectionQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static SteeringAgent,
        &'static Transform,
        Has<Immovable>,
    ),
>;

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
pub(super) fn handle_move_order(
    event: On<MoveOrder>,
    mut commands: Commands,
    mut movement: ResMut<FlockMovement>,
    units: SelectionQuery<'_, '_>,
) {
    let MoveOrder {
        selection,
        destination,
    } = event.event();
    let snapshot = AgentSnapshot::capture(units.iter_many(selection));
    let ids = snapshot.agents.ids();
    if ids.len() < selection.len() {
        warn!(
            "{} selected entities are not steering agents",
            selection.len() - ids.len()
        );
    }

    let mut events = Vec::new();
    match movement.issue_move_order(&snapshot.agents, &ids, *destination, &mut events) {
        Ok(Some(marker)) => {
            movement.markers_mut().begin_playback(marker);
            commands.spawn((
                MarkerVisual(marker),
                Transform::from_translation(*destination).with_scale(Vec3::splat(MARKER_SCALE)),
            ));
        }
        Ok(None) => debug!("move order without steering agents ignored"),
        Err(e) => commands.trigger(MovementSyncError::new(
            MovementSyncErrorContext::Order,
            e.to_string(),
        )),
    }
    snapshot.trigger(&mut commands, events);
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
pub(super) fn handle_marker_finished(
    event: On<MarkerAnimationFinished>,
    mut movement: ResMut<FlockMovement>,
) {
    movement
        .markers_mut()
        .on_animation_finished(event.event().marker);
}

//! Bevy plugin wiring the movement core into the schedule.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::{debug, error};

use crate::movement::MovementSystem;
use crate::settings::MovementSettings;
use crate::terrain::FlatTerrain;

use super::orders::{handle_marker_finished, handle_move_order};
use super::{
    movement_tick_system, reap_markers_system, MotionEnded, MotionStarted, MovementSyncError,
    MovementSyncErrorContext,
};

/// Half extent of the map used when no terrain is configured.
const DEFAULT_MAP_HALF_EXTENT: f32 = 1024.0;

/// The movement core shared by the adapter's systems and observers.
#[derive(Resource, Debug, Deref, DerefMut)]
pub struct FlockMovement(pub MovementSystem);

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_sync_error(event: On<MovementSyncError>) {
    let MovementSyncError { context, detail } = event.event();
    error!("movement sync error during {context:?}: {detail}");
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_motion_started(event: On<MotionStarted>) {
    let MotionStarted { entity, agent } = event.event();
    debug!("agent {agent} ({entity:?}) started moving");
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_motion_ended(event: On<MotionEnded>) {
    let MotionEnded { entity, agent } = event.event();
    debug!("agent {agent} ({entity:?}) stopped");
}

/// Bevy plugin steering every [`SteeringAgent`](crate::components::SteeringAgent)
/// at the configured fixed rate.
#[derive(Debug, Clone)]
pub struct FlockMovementPlugin {
    /// Tuning applied to the movement core.
    ///
    /// A [`MovementSettings`] resource already present when the plugin is
    /// built takes precedence. Settings are read once at build time.
    pub settings: MovementSettings,
    /// Playable area.
    pub terrain: FlatTerrain,
}

impl Default for FlockMovementPlugin {
    fn default() -> Self {
        Self {
            settings: MovementSettings::default(),
            terrain: FlatTerrain::square(DEFAULT_MAP_HALF_EXTENT),
        }
    }
}

impl Plugin for FlockMovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(log_sync_error);

        let settings = app
            .world()
            .get_resource::<MovementSettings>()
            .cloned()
            .unwrap_or_else(|| self.settings.clone());
        let movement = match MovementSystem::new(settings.clone(), self.terrain) {
            Ok(movement) => movement,
            Err(e) => {
                app.world_mut().trigger(MovementSyncError::new(
                    MovementSyncErrorContext::Init,
                    e.to_string(),
                ));
                return;
            }
        };

        app.insert_resource(Time::<Fixed>::from_hz(f64::from(settings.tick_hz)));
        app.insert_resource(settings);
        app.insert_resource(FlockMovement(movement));

        app.add_observer(handle_move_order);
        app.add_observer(handle_marker_finished);
        app.add_observer(log_motion_started);
        app.add_observer(log_motion_ended);

        app.add_systems(FixedUpdate, movement_tick_system);
        app.add_systems(Update, reap_markers_system);
    }
}

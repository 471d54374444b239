//! Synchronisation between Bevy ECS and the movement core.
//!
//! Units carry a [`SteeringAgent`](crate::components::SteeringAgent) and a
//! `Transform`. Each fixed tick their transforms are snapshotted into an
//! [`AgentRegistry`](crate::AgentRegistry), the core advances, and the new
//! positions and orientations are written back. Move orders arrive as
//! triggered [`MoveOrder`] events; motion notifications leave as
//! [`MotionStarted`] and [`MotionEnded`].

mod events;
mod orders;
mod plugin;
mod snapshot;
mod systems;

pub use events::{
    MarkerAnimationFinished, MotionEnded, MotionStarted, MoveOrder, MovementSyncError,
    MovementSyncErrorContext,
};
pub use plugin::{FlockMovement, FlockMovementPlugin};
pub use systems::{movement_tick_system, reap_markers_system};

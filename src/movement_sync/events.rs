//! Events exchanged between the host and the movement adapter.

use bevy::prelude::*;
use thiserror::Error;

use crate::agent::AgentId;
use crate::marker::MarkerId;

/// Player order sending the selected units to `destination`.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct MoveOrder {
    /// Selected unit entities; entities without a steering agent are ignored.
    pub selection: Vec<Entity>,
    /// World-space point picked by the player.
    pub destination: Vec3,
}

/// A stationary unit received a move order.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionStarted {
    pub entity: Entity,
    pub agent: AgentId,
}

/// A unit reached its destination and stopped.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionEnded {
    pub entity: Entity,
    pub agent: AgentId,
}

/// The renderer finished playing a destination marker's animation.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerAnimationFinished {
    pub marker: MarkerId,
}

/// Context carried by [`MovementSyncError`] events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementSyncErrorContext {
    /// Failure surfaced while building the plugin.
    Init,
    /// Failure surfaced while handling a move order.
    Order,
}

/// Event raised when the movement adapter hits an error path.
#[derive(Event, Debug, Clone, Error)]
#[error("{context:?}: {detail}")]
pub struct MovementSyncError {
    /// Where the failure occurred.
    pub context: MovementSyncErrorContext,
    /// Description of the underlying error.
    pub detail: String,
}

impl MovementSyncError {
    #[must_use]
    pub fn new(context: MovementSyncErrorContext, detail: impl Into<String>) -> Self {
        Self {
            context,
            detail: detail.into(),
        }
    }
}

//! Library crate providing flock-based unit movement for realtime strategy
//! games.
//! Re-exports the movement core, its collaborator contracts and the Bevy
//! adapter for the demo binary and tests.
pub mod adjacency;
pub mod agent;
pub mod components;
pub mod constants;
pub mod error;
pub mod events;
pub mod flock;
pub mod logging;
pub mod marker;
pub mod motion;
pub mod movement;
pub mod movement_sync;
pub mod physics;
pub mod settings;
pub mod steering;
pub mod terrain;
pub mod vector_math;
pub use constants::*;

// Re-export commonly used items
pub use agent::{Agent, AgentId, AgentRegistry, AgentStore};
pub use components::{Immovable, MarkerVisual, SteeringAgent};
pub use error::{MovementError, SettingsError};
pub use events::{DiscardEvents, MotionEvent, MotionEventSink};
pub use flock::{Flock, FlockRegistry};
pub use logging::init as init_logging;
pub use marker::{MarkerId, MarkerSet, MarkerState, MoveMarker};
pub use motion::{ArrivalPhase, MotionState, MotionStateTable};
pub use movement::{MovementSystem, TickReport};
pub use movement_sync::{
    movement_tick_system, reap_markers_system, FlockMovement, FlockMovementPlugin,
    MarkerAnimationFinished, MotionEnded, MotionStarted, MoveOrder, MovementSyncError,
    MovementSyncErrorContext,
};
pub use physics::applied_acceleration;
pub use settings::MovementSettings;
pub use terrain::{FlatTerrain, Terrain};
pub use vector_math::{direction, truncate};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use flock_steer::prelude::*;
    //! ```

    pub use crate::applied_acceleration;
    pub use crate::{Agent, AgentId, AgentRegistry, AgentStore};
    pub use crate::{ArrivalPhase, MotionEvent, MotionEventSink};
    pub use crate::{FlatTerrain, Terrain};
    pub use crate::{FlockMovementPlugin, MoveOrder, SteeringAgent};
    pub use crate::{MovementSettings, MovementSystem};
}

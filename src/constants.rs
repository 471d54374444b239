//! Steering and flocking constants used across the movement systems.
//!
//! These are the defaults baked into [`MovementSettings`](crate::MovementSettings);
//! a settings document may override any of them at start-up.

/// Every agent is simulated with the same mass so equal forces yield equal
/// accelerations.
pub const AGENT_MASS: f32 = 1.0;
/// Lengths below this are treated as zero when deriving directions.
pub const EPSILON: f32 = 1.0 / 1024.0;
/// Upper bound on the magnitude of any steering force.
pub const MAX_FORCE: f32 = 1.0;
/// Rate of the fixed simulation tick in hertz.
pub const TICK_HZ: u32 = 30;

/// Weight of separation while an agent is moving.
pub const MOVE_SEPARATION_FORCE_SCALE: f32 = 1.6;
/// Weight of the arrive behaviour while moving.
pub const MOVE_ARRIVE_FORCE_SCALE: f32 = 0.7;
/// Weight of cohesion while moving.
pub const MOVE_COHESION_FORCE_SCALE: f32 = 0.1;
/// Weight of alignment while moving.
pub const MOVE_ALIGN_FORCE_SCALE: f32 = 0.1;
/// Weight of separation once an agent is settling.
pub const SETTLE_SEPARATION_FORCE_SCALE: f32 = 3.2;

/// Distance to the flock target under which a moving agent has arrived.
pub const ARRIVE_THRESHOLD_DIST: f32 = 5.0;
/// Gap kept between moving flock-mates before separation pushes.
pub const MOVE_SEPARATION_BUFFER_DIST: f32 = 8.0;
/// Wider gap kept between settling flock-mates.
pub const SETTLE_SEPARATION_BUFFER_DIST: f32 = 14.0;
/// Flock-mates within this distance pull an agent towards their centre.
pub const COHESION_NEIGHBOUR_RADIUS: f32 = 25.0;
/// Flock-mates within this distance contribute to alignment.
pub const ALIGN_NEIGHBOUR_RADIUS: f32 = 10.0;
/// Inside this radius the arrive behaviour decelerates linearly.
pub const ARRIVE_SLOWING_RADIUS: f32 = 10.0;
/// Gap added to both selection radii when testing flock-mate adjacency.
pub const ADJACENCY_SEP_DIST: f32 = 10.0;

/// Fraction of max speed below which a settling agent stops.
pub const SETTLE_STOP_TOLERANCE: f32 = 0.05;

/// Uniform scale applied to destination markers.
pub const MARKER_SCALE: f32 = 2.0;
/// One-shot animation clip played by destination markers.
pub const MARKER_CLIP: &str = "Converge";
/// Playback rate of [`MARKER_CLIP`] in frames per second.
pub const MARKER_CLIP_FPS: u32 = 48;

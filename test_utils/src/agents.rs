//! Convenience constructors for agents used in tests.

use flock_steer::{Agent, AgentId, AgentRegistry};
use glam::Vec3;

/// Top speed given to test agents, in world units per second.
pub const TEST_MAX_SPEED: f32 = 30.0;
/// Selection radius given to test agents.
pub const TEST_RADIUS: f32 = 1.0;

/// A movable agent standing on the ground at `(x, z)`.
///
/// # Examples
/// ```
/// use test_utils::agents::unit;
/// let agent = unit(3, 1.0, 2.0);
/// assert_eq!(agent.id.into_inner(), 3);
/// assert_eq!(agent.position.z, 2.0);
/// ```
#[must_use]
pub fn unit(id: u32, x: f32, z: f32) -> Agent {
    Agent::new(AgentId(id), Vec3::new(x, 0.0, z), TEST_MAX_SPEED, TEST_RADIUS)
}

/// `count` agents in rows of `columns`, `spacing` apart, starting at
/// `(x, z)`. Identifiers start at 1.
///
/// # Examples
/// ```
/// use test_utils::agents::grid;
/// let agents = grid(6, 3, 2.0, (0.0, 0.0));
/// assert_eq!(agents.len(), 6);
/// ```
#[must_use]
pub fn grid(count: u32, columns: u32, spacing: f32, origin: (f32, f32)) -> AgentRegistry {
    let columns = columns.max(1);
    (0..count)
        .map(|i| {
            let column = (i % columns) as f32;
            let row = (i / columns) as f32;
            unit(
                i + 1,
                origin.0 + column * spacing,
                origin.1 + row * spacing,
            )
        })
        .collect()
}

/// Identifiers `1..=count`.
#[must_use]
pub fn ids(count: u32) -> Vec<AgentId> {
    (1..=count).map(AgentId).collect()
}

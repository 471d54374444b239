//! Flock-based movement of player-controlled units.
//!
//! [`MovementSystem`] owns the flock registry, the motion state table and the
//! destination markers. Hosts construct one per simulation (nothing here is
//! global) and drive it through two entry points:
//!
//! - [`MovementSystem::issue_move_order`] / [`MovementSystem::form_flock`]
//!   when the player orders the current selection somewhere;
//! - [`MovementSystem::tick`] at the fixed simulation rate.
//!
//! Agents themselves stay with the host and are reached through an
//! [`AgentStore`](crate::AgentStore).

mod form;
mod tick;

#[cfg(test)]
mod tests;

use std::fmt;

use glam::Vec3;
use log::info;

use crate::agent::AgentId;
use crate::error::MovementError;
use crate::flock::FlockRegistry;
use crate::marker::{MarkerId, MarkerSet};
use crate::motion::{MotionState, MotionStateTable};
use crate::settings::MovementSettings;
use crate::terrain::Terrain;

pub use tick::TickReport;

/// Owner of all flocking state for one simulation.
pub struct MovementSystem {
    settings: MovementSettings,
    terrain: Box<dyn Terrain + Send + Sync>,
    flocks: FlockRegistry,
    states: MotionStateTable,
    markers: MarkerSet,
}

impl fmt::Debug for MovementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MovementSystem")
            .field("settings", &self.settings)
            .field("flocks", &self.flocks.len())
            .field("states", &self.states.len())
            .field("markers", &self.markers.len())
            .finish_non_exhaustive()
    }
}

impl MovementSystem {
    /// Initialises an empty movement system on `terrain`.
    ///
    /// # Errors
    /// Returns [`MovementError::InvalidSettings`] if `settings` fail
    /// validation.
    pub fn new(
        settings: MovementSettings,
        terrain: impl Terrain + Send + Sync + 'static,
    ) -> Result<Self, MovementError> {
        settings.validate()?;
        info!("movement system ready at {} Hz", settings.tick_hz);
        Ok(Self {
            settings,
            terrain: Box::new(terrain),
            flocks: FlockRegistry::new(),
            states: MotionStateTable::new(),
            markers: MarkerSet::new(),
        })
    }

    /// Active settings.
    #[must_use]
    pub const fn settings(&self) -> &MovementSettings {
        &self.settings
    }

    /// Active flocks.
    #[must_use]
    pub const fn flocks(&self) -> &FlockRegistry {
        &self.flocks
    }

    /// Motion state of every enrolled agent.
    #[must_use]
    pub const fn motion_states(&self) -> &MotionStateTable {
        &self.states
    }

    /// Motion state of one agent.
    #[must_use]
    pub fn motion_state(&self, id: AgentId) -> Option<&MotionState> {
        self.states.get(id)
    }

    /// Destination markers.
    #[must_use]
    pub const fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// Destination markers, for hosts relaying animation callbacks.
    pub fn markers_mut(&mut self) -> &mut MarkerSet {
        &mut self.markers
    }

    /// Whether no flock is moving.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.flocks.is_empty()
    }

    /// Forgets an agent the host has destroyed.
    ///
    /// The agent leaves its flock (destroying the flock if it empties) and its
    /// motion state is evicted.
    pub fn forget_agent(&mut self, id: AgentId) {
        self.flocks.remove_agent(id);
        if self.states.remove(id).is_some() {
            info!("evicted motion state of destroyed agent {id}");
        }
    }

    /// Releases every flock, motion state and marker.
    ///
    /// Returns the markers that were alive so the host can destroy whatever
    /// it rendered for them.
    pub fn shutdown(&mut self) -> Vec<MarkerId> {
        info!(
            "shutting down movement: {} flock(s), {} marker(s)",
            self.flocks.len(),
            self.markers.len()
        );
        self.flocks.clear();
        self.states.clear();
        self.markers.clear()
    }

    /// Spawns a destination marker at `position`.
    pub fn spawn_marker(&mut self, position: Vec3) -> MarkerId {
        self.markers.spawn(position)
    }
}

//! Flocks: groups of agents travelling to a shared destination.
//!
//! Membership is stored as identifiers, never as references to agents. Members
//! are kept sorted so every pass over a flock visits agents in the same order,
//! which keeps the integrator deterministic.

use glam::Vec2;
use log::info;

use crate::agent::AgentId;
use crate::error::MovementError;

/// A group of agents sharing one destination.
#[derive(Debug, Clone, PartialEq)]
pub struct Flock {
    members: Vec<AgentId>,
    target: Vec2,
}

impl Flock {
    /// Builds a flock from `members`, dropping duplicates.
    ///
    /// The membership list is sorted in place, so no allocation happens here;
    /// callers reserve the list up front.
    #[must_use]
    pub fn new(mut members: Vec<AgentId>, target: Vec2) -> Self {
        members.sort_unstable();
        members.dedup();
        Self { members, target }
    }

    /// Ground-plane destination of the flock.
    #[must_use]
    pub const fn target(&self) -> Vec2 {
        self.target
    }

    /// Members in ascending identifier order.
    #[must_use]
    pub fn members(&self) -> &[AgentId] {
        &self.members
    }

    /// Whether `id` belongs to this flock.
    #[must_use]
    pub fn contains(&self, id: AgentId) -> bool {
        self.members.binary_search(&id).is_ok()
    }

    /// Removes `id`, returning whether it was a member.
    pub fn remove(&mut self, id: AgentId) -> bool {
        match self.members.binary_search(&id) {
            Ok(index) => {
                self.members.remove(index);
                true
            }
            Err(_) => false,
        }
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the flock has no members left.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Every active flock.
#[derive(Debug, Default, Clone)]
pub struct FlockRegistry {
    flocks: Vec<Flock>,
}

impl FlockRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes `id` from every flock and destroys flocks left empty.
    ///
    /// Returns the number of flocks destroyed.
    pub fn remove_agent(&mut self, id: AgentId) -> usize {
        let before = self.flocks.len();
        self.flocks.retain_mut(|flock| {
            flock.remove(id);
            !flock.is_empty()
        });
        let destroyed = before - self.flocks.len();
        if destroyed > 0 {
            info!("removing agent {id} emptied {destroyed} flock(s)");
        }
        destroyed
    }

    /// Ensures one more flock fits without reallocating.
    ///
    /// # Errors
    /// Returns [`MovementError::Allocation`] if the registry cannot grow.
    pub fn try_reserve_one(&mut self) -> Result<(), MovementError> {
        self.flocks
            .try_reserve(1)
            .map_err(|_| MovementError::allocation("flock registry"))
    }

    /// Adds a flock.
    pub fn push(&mut self, flock: Flock) {
        self.flocks.push(flock);
    }

    /// Removes the flock at `index`; the last flock takes its slot.
    pub fn swap_remove(&mut self, index: usize) -> Option<Flock> {
        (index < self.flocks.len()).then(|| self.flocks.swap_remove(index))
    }

    /// Flock at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Flock> {
        self.flocks.get(index)
    }

    /// The flock `id` belongs to, if any.
    #[must_use]
    pub fn flock_of(&self, id: AgentId) -> Option<&Flock> {
        self.flocks.iter().find(|flock| flock.contains(id))
    }

    /// Iterates active flocks.
    pub fn iter(&self) -> std::slice::Iter<'_, Flock> {
        self.flocks.iter()
    }

    /// Number of active flocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flocks.len()
    }

    /// Whether no flock is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flocks.is_empty()
    }

    /// Releases every flock.
    pub fn clear(&mut self) {
        self.flocks.clear();
    }
}

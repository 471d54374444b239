//! Turning a selection into a flock.

use glam::{Vec2, Vec3};
use log::{debug, info, warn};

use crate::agent::{AgentId, AgentStore};
use crate::error::MovementError;
use crate::events::{MotionEvent, MotionEventSink};
use crate::flock::Flock;
use crate::marker::MarkerId;
use crate::motion::{ArrivalPhase, MotionState};
use crate::vector_math::ground_plane;

use super::MovementSystem;

impl MovementSystem {
    /// Sends `selection` towards `target` as a new flock.
    ///
    /// Immovable agents, agents with zero max speed and identifiers that no
    /// longer resolve are left out. The remaining agents leave whatever flock
    /// they were in (flocks left empty are destroyed) and form a new one.
    /// Agents keep their current velocity; a stopped agent is restarted and a
    /// [`MotionEvent::Started`] is emitted for it, as for an agent moving for
    /// the first time. Agents already on the move are switched back to
    /// [`ArrivalPhase::Moving`] without a notification.
    ///
    /// A selection with no eligible agent changes nothing.
    ///
    /// # Errors
    /// Returns [`MovementError::Allocation`] if storage for the new flock or
    /// its motion state cannot be reserved; existing flocks and motion state
    /// are untouched in that case.
    pub fn form_flock<S, E>(
        &mut self,
        agents: &S,
        selection: &[AgentId],
        target: Vec2,
        events: &mut E,
    ) -> Result<(), MovementError>
    where
        S: AgentStore + ?Sized,
        E: MotionEventSink + ?Sized,
    {
        let mut members = Vec::new();
        members
            .try_reserve(selection.len())
            .map_err(|_| MovementError::allocation("flock membership"))?;
        for &id in selection {
            match agents.agent(id) {
                Some(agent) if agent.can_move() => members.push(id),
                Some(_) => debug!("agent {id} cannot move; left out of the flock"),
                None => warn!("selected agent {id} no longer exists"),
            }
        }
        members.sort_unstable();
        members.dedup();

        self.flocks.try_reserve_one()?;
        self.states.try_reserve(members.len())?;

        for &id in &members {
            self.flocks.remove_agent(id);
        }
        if members.is_empty() {
            debug!("move order to {target} had no movable agents");
            return Ok(());
        }

        for &id in &members {
            self.enrol(id, events);
        }
        info!(
            "formed flock of {} agent(s) heading to {target}",
            members.len()
        );
        self.flocks.push(Flock::new(members, target));
        Ok(())
    }

    fn enrol<E: MotionEventSink + ?Sized>(&mut self, id: AgentId, events: &mut E) {
        if let Some(state) = self.states.get_mut(id) {
            if state.has_arrived() {
                events.emit(MotionEvent::Started(id));
            }
            state.phase = ArrivalPhase::Moving;
        } else {
            self.states.insert(id, MotionState::START);
            events.emit(MotionEvent::Started(id));
        }
    }

    /// Handles a player's move order for `selection`.
    ///
    /// Empty selections are ignored. Otherwise the selection forms a flock
    /// heading for `destination` and a marker is spawned there; the marker's
    /// identifier is returned.
    ///
    /// # Errors
    /// Propagates [`MovementError::Allocation`] from
    /// [`MovementSystem::form_flock`]; no marker is spawned then.
    pub fn issue_move_order<S, E>(
        &mut self,
        agents: &S,
        selection: &[AgentId],
        destination: Vec3,
        events: &mut E,
    ) -> Result<Option<MarkerId>, MovementError>
    where
        S: AgentStore + ?Sized,
        E: MotionEventSink + ?Sized,
    {
        if selection.is_empty() {
            return Ok(None);
        }
        self.form_flock(agents, selection, ground_plane(destination), events)?;
        Ok(Some(self.spawn_marker(destination)))
    }
}

//! Fixed-rate integration of every flock.

use glam::Vec2;
use log::{debug, error, info, warn};

use crate::adjacency::adjacent_members;
use crate::agent::{AgentId, AgentStore};
use crate::events::{MotionEvent, MotionEventSink};
use crate::flock::Flock;
use crate::motion::{ArrivalPhase, MotionState, MotionStateTable};
use crate::physics::applied_acceleration;
use crate::settings::MovementSettings;
use crate::steering::SteeringContext;
use crate::terrain::Terrain;
use crate::vector_math::{facing_rotation, ground_plane, lift, truncate};
use crate::EPSILON;

use super::MovementSystem;

/// What happened during one tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Flocks destroyed because every member had arrived.
    pub flocks_disbanded: usize,
    /// Agents that stopped this tick.
    pub agents_arrived: usize,
    /// Agents that started settling this tick.
    pub agents_settling: usize,
}

/// Borrowed pieces of [`MovementSystem`] needed to step one flock.
struct FlockStep<'a, S: ?Sized, E: ?Sized> {
    flock: &'a Flock,
    agents: &'a mut S,
    states: &'a mut MotionStateTable,
    settings: &'a MovementSettings,
    terrain: &'a dyn Terrain,
    events: &'a mut E,
    report: &'a mut TickReport,
}

impl MovementSystem {
    /// Advances every flock by one fixed tick.
    ///
    /// Members that no longer resolve through `agents` are forgotten before
    /// anything moves, as if the host had called
    /// [`forget_agent`](MovementSystem::forget_agent) for them.
    ///
    /// Flocks whose members have all arrived are disbanded first and their
    /// members' motion state is released. Every other flock has its members
    /// steered, moved and re-oriented in ascending identifier order, so later
    /// members observe the updated positions of earlier ones.
    pub fn tick<S, E>(&mut self, agents: &mut S, events: &mut E) -> TickReport
    where
        S: AgentStore + ?Sized,
        E: MotionEventSink + ?Sized,
    {
        let mut report = TickReport::default();
        self.forget_unresolved(&*agents);
        // Back to front: a swap-removed slot is refilled by a flock that has
        // already been visited.
        let mut index = self.flocks.len();
        while index > 0 {
            index -= 1;
            if self.all_arrived(index) {
                self.disband(index);
                report.flocks_disbanded += 1;
                continue;
            }
            let Some(flock) = self.flocks.get(index) else {
                continue;
            };
            let mut step = FlockStep {
                flock,
                agents: &mut *agents,
                states: &mut self.states,
                settings: &self.settings,
                terrain: self.terrain.as_ref(),
                events: &mut *events,
                report: &mut report,
            };
            for &id in flock.members() {
                step.member(id);
            }
        }
        report
    }

    fn forget_unresolved<S: AgentStore + ?Sized>(&mut self, agents: &S) {
        let vanished: Vec<AgentId> = self
            .flocks
            .iter()
            .flat_map(Flock::members)
            .copied()
            .filter(|&id| agents.agent(id).is_none())
            .collect();
        for id in vanished {
            warn!("flock member {id} no longer exists; forgetting it");
            self.forget_agent(id);
        }
    }

    fn all_arrived(&self, index: usize) -> bool {
        self.flocks.get(index).is_some_and(|flock| {
            flock.members().iter().all(|&id| {
                !matches!(
                    self.states.phase(id),
                    Some(ArrivalPhase::Moving | ArrivalPhase::Settling)
                )
            })
        })
    }

    fn disband(&mut self, index: usize) {
        if let Some(flock) = self.flocks.swap_remove(index) {
            for &id in flock.members() {
                self.states.remove(id);
            }
            info!(
                "flock of {} agent(s) arrived at {}; disbanded",
                flock.len(),
                flock.target()
            );
        }
    }
}

impl<S, E> FlockStep<'_, S, E>
where
    S: AgentStore + ?Sized,
    E: MotionEventSink + ?Sized,
{
    fn steering_force(&self, id: AgentId) -> Option<Vec2> {
        let agent = self.agents.agent(id)?;
        let ctx = SteeringContext::new(self.flock, &*self.agents, &*self.states, self.settings);
        match ctx.total_force(agent) {
            Ok(force) => Some(force),
            Err(err) => {
                error!("{err}");
                None
            }
        }
    }

    fn member(&mut self, id: AgentId) {
        let Some(force) = self.steering_force(id) else {
            return;
        };
        let Some(&state) = self.states.get(id) else {
            return;
        };
        let accel = applied_acceleration(force, self.settings.agent_mass).unwrap_or(Vec2::ZERO);
        let Some(agent) = self.agents.agent_mut(id) else {
            return;
        };

        let max_speed = agent.max_speed;
        let start = ground_plane(agent.position);
        // Arrival is judged from where the agent stood when the tick began.
        let to_target = start.distance(self.flock.target());
        let velocity = truncate(state.velocity + accel, self.settings.max_step(max_speed));
        let ground = self.terrain.clamp_to_bounds(start + velocity);
        agent.position = lift(ground, self.terrain.height_at(ground));
        if velocity.length() > EPSILON {
            agent.rotation = facing_rotation(velocity);
        }

        let next = match state.phase {
            ArrivalPhase::Moving if to_target < self.settings.arrive_threshold => self.arrive(id),
            ArrivalPhase::Moving if self.touches_stopped_mate(id) => {
                debug!("agent {id} is near a stopped flock-mate; settling");
                self.report.agents_settling += 1;
                MotionState {
                    velocity,
                    phase: ArrivalPhase::Settling,
                }
            }
            ArrivalPhase::Settling
                if velocity.length() < self.settings.settle_stop_tolerance * max_speed =>
            {
                self.arrive(id)
            }
            phase => MotionState { velocity, phase },
        };
        if let Some(slot) = self.states.get_mut(id) {
            *slot = next;
        }
    }

    fn arrive(&mut self, id: AgentId) -> MotionState {
        debug!("agent {id} arrived");
        self.events.emit(MotionEvent::Ended(id));
        self.report.agents_arrived += 1;
        MotionState::ARRIVED
    }

    fn touches_stopped_mate(&self, id: AgentId) -> bool {
        let Some(agent) = self.agents.agent(id) else {
            return false;
        };
        adjacent_members(agent, self.flock, &*self.agents, self.settings)
            .into_iter()
            .any(|mate| {
                matches!(
                    self.states.phase(mate),
                    Some(ArrivalPhase::Settling | ArrivalPhase::Arrived)
                )
            })
    }
}

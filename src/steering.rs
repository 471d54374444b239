//! Steering behaviours for flock members.
//!
//! Every behaviour is a pure function of one agent, its flock, the agents the
//! flock refers to and the motion state table. Forces live on the ground plane
//! and are expressed in world units per tick squared; each behaviour and the
//! final blend are clamped to [`MovementSettings::max_force`].
//!
//! | phase    | blend                                                   |
//! |----------|---------------------------------------------------------|
//! | Moving   | separation (moving buffer), arrive, cohesion, alignment |
//! | Settling | separation (settling buffer) only                       |
//! | Arrived  | none                                                    |

use glam::Vec2;

use crate::agent::{Agent, AgentStore};
use crate::error::MovementError;
use crate::flock::Flock;
use crate::motion::{ArrivalPhase, MotionStateTable};
use crate::settings::MovementSettings;
use crate::vector_math::{direction, ground_plane, truncate};
use crate::EPSILON;

/// Flock-mate seen from the agent being steered.
#[derive(Debug, Clone, Copy)]
struct Mate<'a> {
    agent: &'a Agent,
    /// Ground-plane offset from the steered agent to the mate.
    offset: Vec2,
    distance: f32,
}

/// Everything the behaviours read while steering members of one flock.
pub struct SteeringContext<'a, S: AgentStore + ?Sized> {
    /// Flock whose members are being steered.
    pub flock: &'a Flock,
    /// Resolves member identifiers.
    pub agents: &'a S,
    /// Velocities and phases of the members.
    pub states: &'a MotionStateTable,
    /// Weights, radii and limits.
    pub settings: &'a MovementSettings,
}

impl<'a, S: AgentStore + ?Sized> SteeringContext<'a, S> {
    /// Bundles the inputs of the steering behaviours.
    pub const fn new(
        flock: &'a Flock,
        agents: &'a S,
        states: &'a MotionStateTable,
        settings: &'a MovementSettings,
    ) -> Self {
        Self {
            flock,
            agents,
            states,
            settings,
        }
    }

    fn mates(&self, agent: &'a Agent) -> impl Iterator<Item = Mate<'a>> + '_ {
        let origin = ground_plane(agent.position);
        self.flock
            .members()
            .iter()
            .filter(move |&&id| id != agent.id)
            .filter_map(move |&id| self.agents.agent(id))
            .map(move |mate| {
                let offset = ground_plane(mate.position) - origin;
                Mate {
                    agent: mate,
                    offset,
                    distance: offset.length(),
                }
            })
    }

    fn desired_velocity(&self, agent: &Agent) -> (Vec2, f32) {
        let to_target = self.flock.target() - ground_plane(agent.position);
        let desired = direction(to_target) * self.settings.max_step(agent.max_speed);
        (desired, to_target.length())
    }

    /// Steers straight at the flock target at full speed.
    ///
    /// This is the unclamped primitive behind [`SteeringContext::arrive`].
    #[must_use]
    pub fn seek(&self, agent: &Agent) -> Vec2 {
        let (desired, _) = self.desired_velocity(agent);
        desired - self.states.velocity_or_zero(agent.id)
    }

    /// Like [`SteeringContext::seek`] but decelerates linearly to a halt
    /// inside the slowing radius.
    #[must_use]
    pub fn arrive(&self, agent: &Agent) -> Vec2 {
        let (mut desired, distance) = self.desired_velocity(agent);
        let slowing_radius = self.settings.slowing_radius;
        if distance < slowing_radius {
            desired *= distance / slowing_radius;
        }
        truncate(
            desired - self.states.velocity_or_zero(agent.id),
            self.settings.max_force,
        )
    }

    /// Matches the mean velocity of moving mates within the align radius.
    #[must_use]
    pub fn alignment(&self, agent: &'a Agent) -> Vec2 {
        let mut sum = Vec2::ZERO;
        let mut count = 0_u16;
        for mate in self.mates(agent) {
            if mate.distance >= self.settings.align_radius {
                continue;
            }
            let velocity = self.states.velocity_or_zero(mate.agent.id);
            if velocity.length() < EPSILON {
                continue;
            }
            sum += velocity;
            count = count.saturating_add(1);
        }
        if count == 0 {
            return Vec2::ZERO;
        }
        let mean = sum / f32::from(count);
        truncate(
            mean - self.states.velocity_or_zero(agent.id),
            self.settings.max_force,
        )
    }

    /// Pulls towards the centroid of mates within the cohesion radius.
    #[must_use]
    pub fn cohesion(&self, agent: &'a Agent) -> Vec2 {
        let mut sum = Vec2::ZERO;
        let mut count = 0_u16;
        for mate in self.mates(agent) {
            if mate.distance < self.settings.cohesion_radius {
                sum += ground_plane(mate.agent.position);
                count = count.saturating_add(1);
            }
        }
        if count == 0 {
            return Vec2::ZERO;
        }
        let centroid = sum / f32::from(count);
        truncate(
            centroid - ground_plane(agent.position),
            self.settings.max_force,
        )
    }

    /// Pushes away from mates inside `selection_radius + buffer`.
    ///
    /// Closer mates push harder; the contribution falls off linearly to zero
    /// at the edge of the radius.
    #[must_use]
    pub fn separation(&self, agent: &'a Agent, buffer: f32) -> Vec2 {
        let radius = agent.selection_radius + buffer;
        let mut sum = Vec2::ZERO;
        let mut count = 0_u16;
        for mate in self.mates(agent) {
            if mate.distance < radius {
                sum += mate.offset * (1.0 - mate.distance / radius);
                count = count.saturating_add(1);
            }
        }
        if count == 0 {
            return Vec2::ZERO;
        }
        truncate(-sum / f32::from(count), self.settings.max_force)
    }

    /// Blends the behaviours according to the agent's arrival phase.
    ///
    /// # Errors
    /// Returns [`MovementError::MissingMotionState`] if `agent` has never
    /// been enrolled.
    pub fn total_force(&self, agent: &'a Agent) -> Result<Vec2, MovementError> {
        let phase = self
            .states
            .phase(agent.id)
            .ok_or(MovementError::MissingMotionState(agent.id))?;
        let settings = self.settings;
        let force = match phase {
            ArrivalPhase::Moving => {
                self.separation(agent, settings.move_separation_buffer)
                    * settings.move_separation_weight
                    + self.arrive(agent) * settings.move_arrive_weight
                    + self.cohesion(agent) * settings.move_cohesion_weight
                    + self.alignment(agent) * settings.move_align_weight
            }
            ArrivalPhase::Settling => {
                self.separation(agent, settings.settle_separation_buffer)
                    * settings.settle_separation_weight
            }
            ArrivalPhase::Arrived => Vec2::ZERO,
        };
        Ok(truncate(force, settings.max_force))
    }
}

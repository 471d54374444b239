//! Adjacency between flock-mates.
//!
//! Two members are adjacent when the gap between their selection circles is at
//! most [`MovementSettings::adjacency_gap`]. The tick integrator uses this to
//! notice that an agent has bumped into a neighbour that already stopped; the
//! steering behaviours use their own, larger radii.

use crate::agent::{Agent, AgentId, AgentStore};
use crate::flock::Flock;
use crate::settings::MovementSettings;
use crate::vector_math::ground_plane;

/// Members of `flock` adjacent to `agent`, in ascending identifier order.
///
/// Brute force over the flock. Members that no longer resolve are ignored.
#[must_use]
pub fn adjacent_members<S: AgentStore + ?Sized>(
    agent: &Agent,
    flock: &Flock,
    agents: &S,
    settings: &MovementSettings,
) -> Vec<AgentId> {
    let origin = ground_plane(agent.position);
    flock
        .members()
        .iter()
        .filter(|&&id| id != agent.id)
        .filter_map(|&id| agents.agent(id))
        .filter(|other| {
            let reach = agent.selection_radius + other.selection_radius + settings.adjacency_gap;
            origin.distance(ground_plane(other.position)) <= reach
        })
        .map(|other| other.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::AgentRegistry;
    use glam::{Vec2, Vec3};
    use rstest::rstest;

    fn unit(id: u32, x: f32, radius: f32) -> Agent {
        Agent::new(AgentId(id), Vec3::new(x, 3.0, 0.0), 20.0, radius)
    }

    #[rstest]
    #[case(11.0, true)]
    #[case(12.0, true)]
    #[case(12.5, false)]
    fn boundary_is_inclusive(#[case] gap: f32, #[case] adjacent: bool) {
        let agents: AgentRegistry = [unit(1, 0.0, 1.0), unit(2, gap, 1.0)].into_iter().collect();
        let flock = Flock::new(vec![AgentId(1), AgentId(2)], Vec2::ZERO);
        let agent = agents.agent(AgentId(1)).expect("agent 1");
        let found = adjacent_members(agent, &flock, &agents, &MovementSettings::default());
        assert_eq!(found.contains(&AgentId(2)), adjacent);
        assert!(!found.contains(&AgentId(1)), "an agent is never its own neighbour");
    }

    #[rstest]
    fn height_does_not_matter() {
        let mut high = unit(2, 5.0, 1.0);
        high.position.y = 400.0;
        let agents: AgentRegistry = [unit(1, 0.0, 1.0), high].into_iter().collect();
        let flock = Flock::new(vec![AgentId(1), AgentId(2)], Vec2::ZERO);
        let agent = agents.agent(AgentId(1)).expect("agent 1");
        assert_eq!(
            adjacent_members(agent, &flock, &agents, &MovementSettings::default()),
            vec![AgentId(2)]
        );
    }
}

//! Tests for flock formation, tick integration and lifecycle of the movement
//! system.
use super::*;
use crate::agent::{Agent, AgentRegistry, AgentStore};
use crate::events::{DiscardEvents, MotionEvent};
use crate::flock::Flock;
use crate::motion::ArrivalPhase;
use crate::terrain::{FlatTerrain, MockTerrain};
use approx::assert_relative_eq;
use glam::{Vec2, Vec3};
use rstest::{fixture, rstest};

fn unit(id: u32, x: f32, z: f32) -> Agent {
    Agent::new(AgentId(id), Vec3::new(x, 0.0, z), 30.0, 1.0)
}

fn ids(raw: &[u32]) -> Vec<AgentId> {
    raw.iter().copied().map(AgentId).collect()
}

#[fixture]
fn system() -> MovementSystem {
    MovementSystem::new(MovementSettings::default(), FlatTerrain::square(500.0))
        .expect("default settings are valid")
}

#[fixture]
fn line() -> AgentRegistry {
    (1..=4).map(|i| unit(i, i as f32 * 3.0, 0.0)).collect()
}

#[rstest]
fn invalid_settings_are_rejected() {
    let settings = MovementSettings {
        tick_hz: 0,
        ..MovementSettings::default()
    };
    assert!(matches!(
        MovementSystem::new(settings, FlatTerrain::square(1.0)),
        Err(MovementError::InvalidSettings(_))
    ));
}

#[rstest]
fn forming_a_flock_starts_every_new_agent(mut system: MovementSystem, line: AgentRegistry) {
    let mut events = Vec::new();
    system
        .form_flock(&line, &ids(&[3, 1, 2, 1]), Vec2::new(40.0, 0.0), &mut events)
        .expect("form flock");

    assert_eq!(system.flocks().len(), 1);
    let flock = system.flocks().get(0).expect("new flock");
    assert_eq!(flock.members(), ids(&[1, 2, 3]).as_slice());
    assert_eq!(flock.target(), Vec2::new(40.0, 0.0));
    assert_eq!(
        events,
        vec![
            MotionEvent::Started(AgentId(1)),
            MotionEvent::Started(AgentId(2)),
            MotionEvent::Started(AgentId(3)),
        ]
    );
    for id in ids(&[1, 2, 3]) {
        let state = system.motion_state(id).expect("enrolled");
        assert_eq!(state.phase, ArrivalPhase::Moving);
        assert_eq!(state.velocity, Vec2::ZERO);
    }
}

#[rstest]
fn ineligible_agents_are_filtered(mut system: MovementSystem) {
    let mut agents: AgentRegistry = [unit(1, 0.0, 0.0), unit(2, 1.0, 0.0).immovable()]
        .into_iter()
        .collect();
    let mut parked = unit(3, 2.0, 0.0);
    parked.max_speed = 0.0;
    agents.insert(parked);

    let mut events = Vec::new();
    system
        .form_flock(&agents, &ids(&[1, 2, 3, 99]), Vec2::ZERO, &mut events)
        .expect("form flock");

    assert_eq!(system.flocks().get(0).map(Flock::members), Some(ids(&[1]).as_slice()));
    assert!(system.motion_state(AgentId(2)).is_none());
    assert!(system.motion_state(AgentId(3)).is_none());
    assert_eq!(events, vec![MotionEvent::Started(AgentId(1))]);
}

#[rstest]
fn all_ineligible_selection_is_a_no_op(mut system: MovementSystem) {
    let agents: AgentRegistry = [unit(1, 0.0, 0.0).immovable()].into_iter().collect();
    let mut events = Vec::new();
    system
        .form_flock(&agents, &ids(&[1]), Vec2::ONE, &mut events)
        .expect("form flock");
    assert!(system.flocks().is_empty());
    assert!(system.motion_states().is_empty());
    assert!(events.is_empty());
}

#[rstest]
fn reforming_moves_agents_between_flocks(mut system: MovementSystem, line: AgentRegistry) {
    system
        .form_flock(&line, &ids(&[1, 2]), Vec2::new(50.0, 0.0), &mut DiscardEvents)
        .expect("first flock");
    system
        .form_flock(&line, &ids(&[3, 4]), Vec2::new(-50.0, 0.0), &mut DiscardEvents)
        .expect("second flock");
    system
        .form_flock(&line, &ids(&[2, 3]), Vec2::new(0.0, 50.0), &mut DiscardEvents)
        .expect("third flock");

    assert_eq!(system.flocks().len(), 3);
    for id in ids(&[1, 2, 3, 4]) {
        let owners = system.flocks().iter().filter(|f| f.contains(id)).count();
        assert_eq!(owners, 1, "agent {id} must belong to exactly one flock");
    }

    system
        .form_flock(&line, &ids(&[1, 4]), Vec2::ZERO, &mut DiscardEvents)
        .expect("fourth flock");
    // The first two flocks lost their last member and were destroyed.
    assert_eq!(system.flocks().len(), 2);
}

#[rstest]
fn reissuing_an_order_does_not_restart_moving_agents(
    mut system: MovementSystem,
    mut line: AgentRegistry,
) {
    let selection = ids(&[1, 2]);
    let target = Vec2::new(80.0, 0.0);
    system
        .form_flock(&line, &selection, target, &mut DiscardEvents)
        .expect("form flock");
    system.tick(&mut line, &mut DiscardEvents);
    let velocity = system.motion_state(AgentId(1)).expect("enrolled").velocity;
    assert!(velocity.length() > 0.0);

    let mut events = Vec::new();
    system
        .form_flock(&line, &selection, target, &mut events)
        .expect("form flock again");
    assert!(events.is_empty(), "moving agents must not be restarted");
    assert_eq!(system.flocks().len(), 1);
    let state = system.motion_state(AgentId(1)).expect("enrolled");
    assert_eq!(state.phase, ArrivalPhase::Moving);
    assert_eq!(state.velocity, velocity, "momentum carries over");
}

#[rstest]
fn settling_agent_is_forced_back_to_moving(mut system: MovementSystem, line: AgentRegistry) {
    system
        .form_flock(&line, &ids(&[1]), Vec2::ZERO, &mut DiscardEvents)
        .expect("form flock");
    if let Some(state) = system.states.get_mut(AgentId(1)) {
        state.phase = ArrivalPhase::Settling;
    }
    let mut events = Vec::new();
    system
        .form_flock(&line, &ids(&[1]), Vec2::new(9.0, 9.0), &mut events)
        .expect("re-form");
    assert!(events.is_empty());
    assert_eq!(
        system.motion_state(AgentId(1)).map(|s| s.phase),
        Some(ArrivalPhase::Moving)
    );
}

#[rstest]
fn arrived_agent_restarts_with_notification(mut system: MovementSystem, line: AgentRegistry) {
    system
        .form_flock(&line, &ids(&[1, 2]), Vec2::ZERO, &mut DiscardEvents)
        .expect("form flock");
    system.states.insert(AgentId(1), MotionState::ARRIVED);

    let mut events = Vec::new();
    system
        .form_flock(&line, &ids(&[1, 2]), Vec2::new(20.0, 20.0), &mut events)
        .expect("re-form");
    assert_eq!(events, vec![MotionEvent::Started(AgentId(1))]);
}

#[rstest]
fn velocity_and_force_stay_bounded(mut system: MovementSystem) {
    let mut agents: AgentRegistry = (0..25)
        .map(|i| unit(i + 1, (i % 5) as f32 * 1.5, (i / 5) as f32 * 1.5))
        .collect();
    let selection = agents.ids();
    system
        .form_flock(&agents, &selection, Vec2::new(120.0, -60.0), &mut DiscardEvents)
        .expect("form flock");

    let cap = system.settings().max_step(30.0);
    for _ in 0..600 {
        system.tick(&mut agents, &mut DiscardEvents);
        for state in selection.iter().filter_map(|&id| system.motion_state(id)) {
            assert!(state.velocity.length() <= cap + 1e-5);
        }
        if system.is_idle() {
            break;
        }
    }
    assert!(system.is_idle(), "the flock should arrive and disband");
    assert!(system.motion_states().is_empty(), "states evicted on disband");
}

#[rstest]
fn phases_never_regress(mut system: MovementSystem) {
    let mut agents: AgentRegistry = (0..9)
        .map(|i| unit(i + 1, (i % 3) as f32 * 2.0, (i / 3) as f32 * 2.0))
        .collect();
    let selection = agents.ids();
    system
        .form_flock(&agents, &selection, Vec2::new(30.0, 30.0), &mut DiscardEvents)
        .expect("form flock");

    let mut last: Vec<ArrivalPhase> = vec![ArrivalPhase::Moving; selection.len()];
    let mut ended = Vec::new();
    for _ in 0..400 {
        system.tick(&mut agents, &mut ended);
        for (slot, &id) in last.iter_mut().zip(&selection) {
            // Evicted state means the flock disbanded with the agent arrived.
            let phase = system
                .motion_state(id)
                .map_or(ArrivalPhase::Arrived, |s| s.phase);
            assert!(phase >= *slot, "agent {id} went from {slot:?} to {phase:?}");
            *slot = phase;
        }
    }
    assert!(last.iter().all(|&p| p == ArrivalPhase::Arrived));
    for &id in &selection {
        let count = ended
            .iter()
            .filter(|&&e| e == MotionEvent::Ended(id))
            .count();
        assert_eq!(count, 1, "agent {id} should stop exactly once");
    }
}

#[rstest]
fn moving_agent_settles_next_to_a_stopped_mate(mut system: MovementSystem) {
    let mut agents: AgentRegistry = [unit(1, 0.0, 0.0), unit(2, 6.0, 0.0)].into_iter().collect();
    system
        .form_flock(&agents, &ids(&[1, 2]), Vec2::new(0.0, 200.0), &mut DiscardEvents)
        .expect("form flock");
    system.states.insert(AgentId(1), MotionState::ARRIVED);

    let report = system.tick(&mut agents, &mut DiscardEvents);
    assert_eq!(report.agents_settling, 1);
    assert_eq!(
        system.motion_state(AgentId(2)).map(|s| s.phase),
        Some(ArrivalPhase::Settling)
    );

    // Per-tick speed is far below the stop tolerance, so settling ends next tick.
    let mut events = Vec::new();
    let report = system.tick(&mut agents, &mut events);
    assert_eq!(report.agents_arrived, 1);
    assert_eq!(events, vec![MotionEvent::Ended(AgentId(2))]);
    assert_eq!(
        system.motion_state(AgentId(2)).map(|s| s.velocity),
        Some(Vec2::ZERO)
    );
}

#[rstest]
fn tick_consults_terrain_for_every_moving_member() {
    let mut terrain = MockTerrain::new();
    terrain
        .expect_clamp_to_bounds()
        .times(2)
        .returning(|p| p.clamp(Vec2::splat(-10.0), Vec2::splat(10.0)));
    terrain.expect_height_at().times(2).returning(|_| 7.5);
    let mut system =
        MovementSystem::new(MovementSettings::default(), terrain).expect("valid settings");

    let mut agents: AgentRegistry = [unit(1, 9.9, 0.0), unit(2, -40.0, 0.0)].into_iter().collect();
    system
        .form_flock(&agents, &ids(&[1, 2]), Vec2::new(100.0, 0.0), &mut DiscardEvents)
        .expect("form flock");
    system.tick(&mut agents, &mut DiscardEvents);

    let first = agents.agent(AgentId(1)).expect("agent 1");
    assert_relative_eq!(first.position.x, 10.0);
    assert_relative_eq!(first.position.y, 7.5);
    let second = agents.agent(AgentId(2)).expect("agent 2");
    assert_relative_eq!(second.position.x, -10.0);
}

#[rstest]
fn orientation_follows_velocity(mut system: MovementSystem) {
    let mut agents: AgentRegistry = [unit(1, 0.0, 0.0)].into_iter().collect();
    system
        .form_flock(&agents, &ids(&[1]), Vec2::new(0.0, 100.0), &mut DiscardEvents)
        .expect("form flock");
    system.tick(&mut agents, &mut DiscardEvents);
    let agent = agents.agent(AgentId(1)).expect("agent");
    // Heading straight down +z is the identity orientation.
    assert_relative_eq!(agent.rotation.y, 0.0, epsilon = 1e-5);
    assert_relative_eq!(agent.rotation.w, 1.0, epsilon = 1e-5);

    let mut agents: AgentRegistry = [unit(2, 0.0, 0.0)].into_iter().collect();
    system
        .form_flock(&agents, &ids(&[2]), Vec2::new(100.0, 0.0), &mut DiscardEvents)
        .expect("form flock");
    system.tick(&mut agents, &mut DiscardEvents);
    let agent = agents.agent(AgentId(2)).expect("agent");
    let half = -std::f32::consts::FRAC_PI_4;
    assert_relative_eq!(agent.rotation.y, half.sin(), epsilon = 1e-5);
}

#[rstest]
fn forgetting_an_agent_destroys_its_emptied_flock(
    mut system: MovementSystem,
    line: AgentRegistry,
) {
    system
        .form_flock(&line, &ids(&[1, 2]), Vec2::new(60.0, 0.0), &mut DiscardEvents)
        .expect("form flock");

    system.forget_agent(AgentId(2));
    assert!(system.motion_state(AgentId(2)).is_none());
    assert_eq!(system.flocks().len(), 1);

    system.forget_agent(AgentId(1));
    assert!(system.flocks().is_empty(), "emptied flock is destroyed at once");
}

#[rstest]
fn unresolved_member_is_dropped_and_survivor_arrives(mut system: MovementSystem) {
    let mut agents: AgentRegistry = [unit(1, 0.0, 0.0), unit(2, 3.0, 0.0)].into_iter().collect();
    system
        .form_flock(&agents, &ids(&[1, 2]), Vec2::new(30.0, 0.0), &mut DiscardEvents)
        .expect("form flock");
    agents.remove(AgentId(2));

    system.tick(&mut agents, &mut DiscardEvents);
    assert!(system.motion_state(AgentId(2)).is_none());
    assert_eq!(
        system.flocks().get(0).map(Flock::members),
        Some(ids(&[1]).as_slice())
    );

    let mut events = Vec::new();
    for _ in 0..2000 {
        system.tick(&mut agents, &mut events);
        if system.is_idle() {
            break;
        }
    }
    assert!(system.is_idle(), "the surviving member's flock should disband");
    assert!(system.motion_states().is_empty());
    assert_eq!(events, vec![MotionEvent::Ended(AgentId(1))]);
}

#[rstest]
fn flock_of_unresolved_members_is_destroyed_on_tick(
    mut system: MovementSystem,
    line: AgentRegistry,
) {
    system
        .form_flock(&line, &ids(&[1, 2]), Vec2::new(60.0, 0.0), &mut DiscardEvents)
        .expect("form flock");
    let mut empty = AgentRegistry::new();
    let report = system.tick(&mut empty, &mut DiscardEvents);
    assert_eq!(report, TickReport::default());
    assert!(system.is_idle());
    assert!(system.motion_states().is_empty());
}

#[rstest]
fn move_order_spawns_marker(mut system: MovementSystem, line: AgentRegistry) {
    let none = system
        .issue_move_order(&line, &[], Vec3::ONE, &mut DiscardEvents)
        .expect("empty order");
    assert!(none.is_none());
    assert!(system.markers().is_empty());

    let marker = system
        .issue_move_order(&line, &ids(&[1]), Vec3::new(5.0, 2.0, 7.0), &mut DiscardEvents)
        .expect("order")
        .expect("marker for non-empty selection");
    assert_eq!(
        system.markers().get(marker).map(|m| m.position),
        Some(Vec3::new(5.0, 2.0, 7.0))
    );
    assert_eq!(
        system.flocks().flock_of(AgentId(1)).map(Flock::target),
        Some(Vec2::new(5.0, 7.0))
    );
}

#[rstest]
fn shutdown_releases_everything(mut system: MovementSystem, line: AgentRegistry) {
    let marker = system
        .issue_move_order(&line, &ids(&[1, 2]), Vec3::ZERO, &mut DiscardEvents)
        .expect("order");
    assert_eq!(system.shutdown(), marker.into_iter().collect::<Vec<_>>());
    assert!(system.flocks().is_empty());
    assert!(system.motion_states().is_empty());
    assert!(system.markers().is_empty());
}

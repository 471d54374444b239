//! Driving a movement system in tests.

use flock_steer::{
    AgentRegistry, FlatTerrain, MotionEvent, MovementSettings, MovementSystem, TickReport,
};

/// Half extent of the map used by [`movement`].
pub const TEST_MAP_HALF_EXTENT: f32 = 1000.0;

/// A movement system with default settings on a large flat map.
///
/// # Panics
/// Panics if the default settings fail validation.
#[must_use]
pub fn movement() -> MovementSystem {
    MovementSystem::new(
        MovementSettings::default(),
        FlatTerrain::square(TEST_MAP_HALF_EXTENT),
    )
    .unwrap_or_else(|e| panic!("default settings rejected: {e}"))
}

/// Outcome of [`run_until_idle`].
#[derive(Debug, Default)]
pub struct Run {
    /// Ticks executed.
    pub ticks: u32,
    /// Notifications emitted while ticking.
    pub events: Vec<MotionEvent>,
    /// Reports of every tick, in order.
    pub reports: Vec<TickReport>,
}

impl Run {
    /// Number of `Ended` notifications.
    #[must_use]
    pub fn arrivals(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, MotionEvent::Ended(_)))
            .count()
    }
}

/// Ticks `system` until no flock remains or `max_ticks` have run.
pub fn run_until_idle(
    system: &mut MovementSystem,
    agents: &mut AgentRegistry,
    max_ticks: u32,
) -> Run {
    let mut run = Run::default();
    while !system.is_idle() && run.ticks < max_ticks {
        let report = system.tick(agents, &mut run.events);
        run.reports.push(report);
        run.ticks += 1;
    }
    run
}

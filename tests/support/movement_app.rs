//! Headless Bevy app hosting the flock movement plugin for integration tests.

use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use flock_steer::{
    AgentId, FlockMovementPlugin, MotionEnded, MotionStarted, MovementSyncError, SteeringAgent,
};
use rspec::{block::Suite, ConfigurationBuilder, Logger, Runner};

/// Wrapper that forwards `Send` and `Sync` because access is mutex-guarded.
#[derive(Debug)]
pub struct ThreadSafeApp(pub App);

impl Deref for ThreadSafeApp {
    type Target = App;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for ThreadSafeApp {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

// SAFETY: rspec fixtures must be `Clone + Send + Sync`; suites run serially
// and every access to the wrapped `App` goes through the mutex.
unsafe impl Send for ThreadSafeApp {}
unsafe impl Sync for ThreadSafeApp {}

/// Shared pointer type for the wrapped app.
pub type SharedApp = Arc<Mutex<ThreadSafeApp>>;

/// Locks the shared app, recovering from a poisoned mutex.
pub fn lock_app(app: &SharedApp) -> MutexGuard<'_, ThreadSafeApp> {
    app.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Runs an rspec suite serially so the shared app is never contended.
pub fn run_serial<T>(suite: &Suite<T>)
where
    T: Clone + Send + Sync + std::fmt::Debug,
{
    let logger = Arc::new(Logger::new(std::io::stdout()));
    let config = ConfigurationBuilder::default()
        .parallel(false)
        .exit_on_failure(true)
        .build()
        .unwrap_or_else(|e| panic!("rspec configuration failed: {e}"));
    Runner::new(config, vec![logger]).run(suite);
}

/// Notifications observed by the test app, in trigger order.
#[derive(Resource, Default, Debug)]
pub struct MotionLog {
    pub started: Vec<AgentId>,
    pub ended: Vec<AgentId>,
    pub errors: Vec<String>,
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must take On<T> by value."
)]
fn record_started(event: On<MotionStarted>, mut log: ResMut<MotionLog>) {
    log.started.push(event.event().agent);
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must take On<T> by value."
)]
fn record_ended(event: On<MotionEnded>, mut log: ResMut<MotionLog>) {
    log.ended.push(event.event().agent);
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must take On<T> by value."
)]
fn record_error(event: On<MovementSyncError>, mut log: ResMut<MotionLog>) {
    log.errors.push(event.event().to_string());
}

/// App with `MinimalPlugins`, the movement plugin and a [`MotionLog`].
pub fn movement_app(plugin: FlockMovementPlugin) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(MotionLog::default());
    app.add_observer(record_started);
    app.add_observer(record_ended);
    app.add_observer(record_error);
    app.add_plugins(plugin);
    app
}

/// Spawns a steering unit standing at `(x, z)`.
pub fn spawn_unit(app: &mut App, id: u32, x: f32, z: f32) -> Entity {
    app.world_mut()
        .spawn((
            SteeringAgent::new(AgentId(id), 30.0, 1.0),
            Transform::from_xyz(x, 0.0, z),
        ))
        .id()
}

/// Runs one fixed simulation step regardless of elapsed wall-clock time.
pub fn fixed_step(app: &mut App) {
    app.world_mut().run_schedule(FixedUpdate);
}

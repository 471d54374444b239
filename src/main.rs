//! Headless driver: sends a grid of agents to a destination and reports how
//! the flock arrived.
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use flock_steer::vector_math::ground_plane;
use flock_steer::{
    init_logging, Agent, AgentId, AgentRegistry, FlatTerrain, MotionEvent, MovementSettings,
    MovementSystem,
};
use glam::{Vec2, Vec3};
use log::{debug, info, warn};

/// Half extent of the square demo map.
const MAP_HALF_EXTENT: f32 = 1024.0;
/// Selection radius of every demo agent.
const AGENT_RADIUS: f32 = 1.0;

/// Flock steering demo
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of agents in the selection
    #[arg(long, default_value_t = 16)]
    agents: u16,
    /// Distance between neighbouring agents in the starting grid
    #[arg(long, default_value_t = 3.0)]
    spacing: f32,
    /// Destination on the ground plane
    #[arg(
        long,
        num_args = 2,
        value_names = ["X", "Z"],
        allow_negative_numbers = true,
        default_values_t = [60.0, 40.0]
    )]
    target: Vec<f32>,
    /// Top speed of every agent in world units per second
    #[arg(long, default_value_t = 30.0)]
    max_speed: f32,
    /// Give up after this many ticks
    #[arg(long, default_value_t = 3000)]
    max_ticks: u32,
    /// JSON document overriding movement settings
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Lays `count` agents out in a square grid centred on the origin.
fn grid(count: u16, spacing: f32, max_speed: f32) -> AgentRegistry {
    let columns = (1..=count).find(|c| c.saturating_mul(*c) >= count).unwrap_or(1);
    let offset = f32::from(columns - 1) * spacing / 2.0;
    (0..count)
        .map(|i| {
            let x = f32::from(i % columns) * spacing - offset;
            let z = f32::from(i / columns) * spacing - offset;
            Agent::new(
                AgentId(u32::from(i) + 1),
                Vec3::new(x, 0.0, z),
                max_speed,
                AGENT_RADIUS,
            )
        })
        .collect()
}

/// Largest ground-plane distance from `target` over all agents.
fn spread(agents: &AgentRegistry, target: Vec2) -> f32 {
    agents
        .iter()
        .map(|agent| ground_plane(agent.position).distance(target))
        .fold(0.0, f32::max)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let [x, z] = args.target.as_slice() else {
        bail!("--target takes exactly two coordinates");
    };
    let target = Vec2::new(*x, *z);

    let settings = match &args.settings {
        Some(path) => MovementSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => MovementSettings::default(),
    };
    let tick_hz = settings.tick_hz;
    let mut movement = MovementSystem::new(settings, FlatTerrain::square(MAP_HALF_EXTENT))
        .context("initialising movement")?;

    let mut agents = grid(args.agents, args.spacing, args.max_speed);
    let selection = agents.ids();
    let mut events = Vec::new();
    movement
        .issue_move_order(&agents, &selection, Vec3::new(target.x, 0.0, target.y), &mut events)
        .context("issuing move order")?;
    info!(
        "sent {} agent(s) to {target}; initial spread {:.1}",
        selection.len(),
        spread(&agents, target)
    );

    let mut ticks = 0_u32;
    while !movement.is_idle() && ticks < args.max_ticks {
        movement.tick(&mut agents, &mut events);
        ticks += 1;
    }

    let arrived = events
        .iter()
        .filter(|event| matches!(event, MotionEvent::Ended(_)))
        .count();
    info!(
        "{arrived}/{} agent(s) arrived after {ticks} tick(s) ({:.2} s); final spread {:.1}",
        selection.len(),
        f64::from(ticks) / f64::from(tick_hz),
        spread(&agents, target)
    );
    if !movement.is_idle() {
        warn!("flock still moving after {ticks} tick(s)");
    }

    let released = movement.shutdown();
    debug!("released {} marker(s)", released.len());
    Ok(())
}

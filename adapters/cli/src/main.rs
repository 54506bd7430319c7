#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Maze Runner session.

mod autopilot;
mod maze_export;

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use maze_runner_core::{Event, GamePhase};
use maze_runner_session::{Session, SessionConfig};
use maze_runner_system_bootstrap::Bootstrap;
use maze_runner_world::MazeLoader;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::autopilot::Autopilot;

/// Plays a maze with the autopilot and reports the outcome.
#[derive(Debug, Parser)]
#[command(name = "maze-runner", version)]
struct CliArgs {
    /// JSON maze source; a generated maze is used when omitted or invalid.
    #[arg(long, value_name = "PATH")]
    maze: Option<PathBuf>,
    /// TOML session configuration.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for the fallback maze generator, overriding the configuration.
    #[arg(long)]
    seed: Option<u64>,
    /// Maximum number of ticks to simulate.
    #[arg(long, default_value_t = 3_600)]
    ticks: u32,
    /// Simulated milliseconds per tick.
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u64).range(1..))]
    dt_ms: u64,
    /// Writes the maze that was played to this path in JSON source notation.
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,
}

/// Entry point for the Maze Runner command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("maze_runner=info".parse()?))
        .init();

    let args = CliArgs::parse();
    let mut config = match &args.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SessionConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.generator_seed = seed;
    }

    let mut loader = MazeLoader::new();
    let maze = Bootstrap.prepare_maze(&mut loader, args.maze.as_deref(), config.generator_seed);
    if let Some(path) = &args.export {
        maze_export::write(path, &maze)?;
        info!(path = %path.display(), "exported maze");
    }

    info!(size = maze.size(), keys = maze.keys().len(), "maze ready");
    let mut session = Session::new(maze, &config);
    let _ = session.start();

    let dt = Duration::from_millis(args.dt_ms);
    let mut autopilot = Autopilot::new(config.tuning.player.look_sensitivity);
    for _ in 0..args.ticks {
        let input = autopilot.next_input(session.world());
        for event in session.tick(dt, &input) {
            report(&event);
        }
        if session.status().phase.is_terminal() {
            break;
        }
    }

    let status = session.status();
    let outcome = match status.phase {
        GamePhase::Victory => "escaped",
        GamePhase::Defeat => "caught",
        _ => "out of time",
    };
    println!(
        "{outcome}: {}/{} keys in {}",
        status.collected_keys,
        status.total_keys,
        status.clock_label()
    );
    Ok(())
}

fn report(event: &Event) {
    match event {
        Event::KeyCollected {
            collected, total, ..
        } => info!(collected, total, "key collected"),
        Event::ExitLocked { missing } => info!(missing, "exit is locked"),
        Event::PhaseChanged { from, to } => info!(?from, ?to, "phase changed"),
        _ => {}
    }
}

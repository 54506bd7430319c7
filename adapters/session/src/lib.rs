#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-step game session that wires the systems around the world.

use std::{sync::Arc, time::Duration};

use maze_runner_core::{Command, Event, FrameSnapshot, GamePhase, GameStatus, PlayerInput};
use maze_runner_system_collision::CollisionResolver;
use maze_runner_system_interaction::Interaction;
use maze_runner_system_movement::Movement;
use maze_runner_system_pursuit::Pursuit;
use maze_runner_world::{self as world, query, MazeModel, World};
use tracing::trace;

mod config;

pub use config::{ConfigError, SessionConfig};

/// One playthrough of a maze, driven one tick at a time by the caller.
#[derive(Debug)]
pub struct Session {
    world: World,
    movement: Movement,
    pursuit: Pursuit,
    interaction: Interaction,
}

impl Session {
    /// Creates an idle session on the provided maze.
    #[must_use]
    pub fn new(maze: Arc<MazeModel>, config: &SessionConfig) -> Self {
        let tuning = config.tuning.clone();
        let movement = Movement::new(&tuning.player);
        let pursuit = Pursuit::new(&tuning.enemy);
        let interaction = Interaction::new(&tuning.interaction);
        Self {
            world: World::new(maze, tuning, config.exit_policy),
            movement,
            pursuit,
            interaction,
        }
    }

    /// Starts a fresh run from any phase.
    pub fn start(&mut self) -> Vec<Event> {
        self.pursuit.reset();
        self.execute(Command::StartGame)
    }

    /// Suspends a running game.
    pub fn pause(&mut self) -> Vec<Event> {
        self.execute(Command::PauseGame)
    }

    /// Continues a paused game.
    pub fn resume(&mut self) -> Vec<Event> {
        self.execute(Command::ResumeGame)
    }

    /// Pauses a running game or resumes a paused one.
    pub fn toggle_pause(&mut self) -> Vec<Event> {
        match query::phase(&self.world) {
            GamePhase::Running => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => Vec::new(),
        }
    }

    /// Returns agents and keys to their initial state and resumes running.
    pub fn restart(&mut self) -> Vec<Event> {
        self.pursuit.reset();
        self.execute(Command::RestartGame)
    }

    /// Advances the simulation by `dt` using the provided player input.
    ///
    /// Order per tick: clock, player, enemy, interactions. Nothing happens
    /// unless the game is running.
    pub fn tick(&mut self, dt: Duration, input: &PlayerInput) -> Vec<Event> {
        let mut events = self.execute(Command::Tick { dt });
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return events;
        }

        let mut commands = Vec::new();
        {
            let resolver =
                CollisionResolver::new(query::grid_view(&self.world), query::spatial(&self.world));
            self.movement.handle(
                input,
                &query::player(&self.world),
                &resolver,
                dt,
                &mut commands,
            );
        }
        self.apply_all(&mut commands, &mut events);

        self.pursuit.handle(
            &query::player(&self.world),
            &query::enemy(&self.world),
            query::grid_view(&self.world),
            query::spatial(&self.world),
            dt,
            &mut commands,
        );
        self.apply_all(&mut commands, &mut events);

        self.interaction.handle(
            &query::player(&self.world),
            &query::enemy(&self.world),
            &query::key_view(&self.world),
            query::spatial(&self.world),
            query::exit_cell(&self.world),
            &mut commands,
        );
        self.apply_all(&mut commands, &mut events);

        events
    }

    /// Phase and progress of the run.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        query::status(&self.world)
    }

    /// State exposed to rendering and UI collaborators.
    #[must_use]
    pub fn snapshot(&self) -> FrameSnapshot {
        query::frame_snapshot(&self.world)
    }

    /// Read-only access to the world for adapters that need richer queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    fn execute(&mut self, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);
        events
    }

    fn apply_all(&mut self, commands: &mut Vec<Command>, events: &mut Vec<Event>) {
        for command in commands.drain(..) {
            trace!(?command, "applying system command");
            world::apply(&mut self.world, command, events);
        }
    }
}

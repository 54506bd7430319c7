#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maze Runner.

use std::{f32::consts::TAU, sync::Arc, time::Duration};

use maze_runner_core::{Command, Event, GridCoord, KeyId, SpatialIndex, Tuning, WorldPosition};
use tracing::{debug, warn};

mod exit;
mod generator;
mod loader;
mod maze;
mod state;

pub use exit::{locate_exit, ExitPolicy};
pub use generator::{generate, DEFAULT_MAZE_SIZE, MIN_GENERATED_SIZE};
pub use loader::{LoadError, MazeLoader, MazeSource, SourcePoint};
pub use maze::{Landmark, MazeError, MazeModel};

use state::GameStateMachine;

/// Represents the authoritative Maze Runner world state.
#[derive(Debug)]
pub struct World {
    maze: Arc<MazeModel>,
    spatial: SpatialIndex,
    tuning: Tuning,
    exit: GridCoord,
    enemy_spawn: GridCoord,
    player: Player,
    enemy: Enemy,
    keys: Vec<Key>,
    state: GameStateMachine,
    tick_index: u64,
}

impl World {
    /// Creates an idle world for the provided maze.
    #[must_use]
    pub fn new(maze: Arc<MazeModel>, tuning: Tuning, exit_policy: ExitPolicy) -> Self {
        let spatial = SpatialIndex::new(maze.size(), tuning.cell_size);
        let exit = locate_exit(&maze, exit_policy);
        let enemy_spawn = enemy_spawn_cell(&maze, &spatial);
        let keys = maze
            .keys()
            .iter()
            .enumerate()
            .map(|(index, cell)| Key {
                id: KeyId::new(u32::try_from(index).unwrap_or(u32::MAX)),
                cell: *cell,
                collected: false,
            })
            .collect::<Vec<_>>();
        let total_keys = u32::try_from(keys.len()).unwrap_or(u32::MAX);

        let player = Player {
            position: spatial.grid_to_world(maze.start()),
            facing: 0.0,
        };
        let enemy = Enemy::idle_at(spatial.grid_to_world(enemy_spawn));

        debug!(
            ?exit,
            ?enemy_spawn,
            ?exit_policy,
            total_keys,
            "world initialised"
        );

        Self {
            maze,
            spatial,
            tuning,
            exit,
            enemy_spawn,
            player,
            enemy,
            keys,
            state: GameStateMachine::new(total_keys),
            tick_index: 0,
        }
    }

    fn reset_agents(&mut self) {
        self.player = Player {
            position: self.spatial.grid_to_world(self.maze.start()),
            facing: 0.0,
        };
        self.enemy = Enemy::idle_at(self.spatial.grid_to_world(self.enemy_spawn));
    }

    fn reset_keys(&mut self) {
        for key in &mut self.keys {
            key.collected = false;
        }
    }

    fn collect_key(&mut self, key_id: KeyId, out_events: &mut Vec<Event>) {
        let Some(key) = self.keys.iter_mut().find(|key| key.id == key_id) else {
            warn!(key = key_id.get(), "ignoring collection of unknown key");
            return;
        };
        if key.collected {
            return;
        }
        if !self.state.record_key() {
            return;
        }
        key.collected = true;

        let status = self.state.status();
        debug!(
            key = key_id.get(),
            collected = status.collected_keys,
            total = status.total_keys,
            "key collected"
        );
        out_events.push(Event::KeyCollected {
            key: key_id,
            collected: status.collected_keys,
            total: status.total_keys,
        });
    }

    fn assign_enemy_path(&mut self, path: Vec<GridCoord>, out_events: &mut Vec<Event>) {
        let view = self.maze.view();
        if let Some(outside) = path.iter().find(|cell| !view.contains(**cell)) {
            warn!(?outside, "rejecting enemy path that leaves the grid");
            return;
        }

        let waypoints = path.len();
        self.enemy.path = path;
        self.enemy.path_index = 0;
        out_events.push(Event::EnemyPathAssigned { waypoints });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StartGame => {
            world.reset_agents();
            world.reset_keys();
            world.state.start(out_events);
        }
        Command::RestartGame => {
            world.reset_agents();
            world.reset_keys();
            world.tick_index = 0;
            world.state.start(out_events);
            out_events.push(Event::SessionReset);
        }
        Command::PauseGame => world.state.pause(out_events),
        Command::ResumeGame => world.state.resume(out_events),
        Command::Tick { dt } => {
            if world.state.advance(dt) {
                world.tick_index = world.tick_index.saturating_add(1);
                out_events.push(Event::TimeAdvanced { dt });
            }
        }
        Command::CapturePlayer => world.state.signal_defeat(out_events),
        Command::ReachExit => {
            if !world.state.is_running() {
                return;
            }
            let status = world.state.status();
            if status.all_keys_collected() {
                world.state.signal_victory(out_events);
            } else {
                out_events.push(Event::ExitLocked {
                    missing: status.keys_remaining(),
                });
            }
        }
        command if !world.state.is_running() => {
            debug!(?command, "ignoring agent command outside a running game");
        }
        Command::TurnPlayer { facing } => {
            world.player.facing = facing.rem_euclid(TAU);
        }
        Command::MovePlayer { to } => {
            world.player.position = to;
        }
        Command::SetEnemyTarget { target } => {
            world.enemy.target = Some(target);
        }
        Command::AssignEnemyPath { path } => world.assign_enemy_path(path, out_events),
        Command::AdvanceEnemy { dt } => {
            let threshold = world.tuning.enemy.arrival_threshold;
            let speed = world.tuning.enemy.move_speed;
            if world.enemy.advance(dt, speed, threshold, &world.spatial) {
                out_events.push(Event::EnemyArrived);
            }
        }
        Command::CollectKey { key } => world.collect_key(key, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::sync::Arc;

    use maze_runner_core::{
        EnemySnapshot, FrameSnapshot, GamePhase, GameStatus, GridCoord, GridView, KeySnapshot,
        KeyView, PlayerSnapshot, SpatialIndex, Tuning,
    };

    use super::{MazeModel, World};

    /// Provides shared access to the maze the world runs on.
    #[must_use]
    pub fn maze(world: &World) -> &Arc<MazeModel> {
        &world.maze
    }

    /// Read-only view of the maze cells.
    #[must_use]
    pub fn grid_view(world: &World) -> GridView<'_> {
        world.maze.view()
    }

    /// Grid/world coordinate mapping used by the world.
    #[must_use]
    pub fn spatial(world: &World) -> SpatialIndex {
        world.spatial
    }

    /// Tuning the world was created with.
    #[must_use]
    pub fn tuning(world: &World) -> &Tuning {
        &world.tuning
    }

    /// Cell the player must reach to win.
    #[must_use]
    pub fn exit_cell(world: &World) -> GridCoord {
        world.exit
    }

    /// Cell the enemy starts from.
    #[must_use]
    pub fn enemy_spawn(world: &World) -> GridCoord {
        world.enemy_spawn
    }

    /// Number of ticks simulated since the last restart.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Captures the player's state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        PlayerSnapshot {
            position: world.player.position,
            facing: world.player.facing,
            move_speed: world.tuning.player.move_speed,
            collision_radius: world.tuning.player.collision_radius,
        }
    }

    /// Captures the enemy's state.
    #[must_use]
    pub fn enemy(world: &World) -> EnemySnapshot {
        EnemySnapshot {
            position: world.enemy.position,
            target: world.enemy.target,
            path: world.enemy.path.clone(),
            path_index: world.enemy.path_index,
            move_speed: world.tuning.enemy.move_speed,
            collision_radius: world.tuning.enemy.collision_radius,
            detection_radius: world.tuning.enemy.detection_radius,
        }
    }

    /// Captures every key of the maze.
    #[must_use]
    pub fn key_view(world: &World) -> KeyView {
        KeyView::from_snapshots(
            world
                .keys
                .iter()
                .map(|key| KeySnapshot {
                    id: key.id,
                    cell: key.cell,
                    collected: key.collected,
                })
                .collect(),
        )
    }

    /// Phase and progress of the session.
    #[must_use]
    pub fn status(world: &World) -> GameStatus {
        world.state.status()
    }

    /// Active phase of the session.
    #[must_use]
    pub fn phase(world: &World) -> GamePhase {
        world.state.status().phase
    }

    /// Snapshot consumed by rendering and UI collaborators after a tick.
    #[must_use]
    pub fn frame_snapshot(world: &World) -> FrameSnapshot {
        let status = world.state.status();
        FrameSnapshot {
            player_position: world.player.position,
            player_facing: world.player.facing,
            enemy_position: world.enemy.position,
            grid_size: world.maze.size(),
            cells: world.maze.cells().to_vec(),
            collected_keys: world
                .keys
                .iter()
                .filter(|key| key.collected)
                .map(|key| key.id)
                .collect(),
            phase: status.phase,
            collected_count: status.collected_keys,
            total_keys: status.total_keys,
            elapsed_seconds: status.elapsed_seconds(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Player {
    position: WorldPosition,
    facing: f32,
}

#[derive(Clone, Debug)]
struct Enemy {
    position: WorldPosition,
    target: Option<WorldPosition>,
    path: Vec<GridCoord>,
    path_index: usize,
}

impl Enemy {
    fn idle_at(position: WorldPosition) -> Self {
        Self {
            position,
            target: None,
            path: Vec::new(),
            path_index: 0,
        }
    }

    /// Follows the path for `dt`, returning `true` when the last waypoint is consumed.
    fn advance(
        &mut self,
        dt: Duration,
        speed: f32,
        arrival_threshold: f32,
        spatial: &SpatialIndex,
    ) -> bool {
        if self.path.is_empty() {
            return false;
        }

        if self.skip_reached_waypoints(arrival_threshold, spatial) {
            return true;
        }

        let Some(waypoint) = self.path.get(self.path_index).copied() else {
            return self.finish_path();
        };
        let goal = spatial.grid_to_world(waypoint);
        let remaining = self.position.distance(goal);
        let step = speed * dt.as_secs_f32();
        if step >= remaining {
            self.position = goal;
        } else {
            let scale = step / remaining;
            self.position = self.position.offset(
                (goal.x() - self.position.x()) * scale,
                (goal.z() - self.position.z()) * scale,
            );
        }

        if self.position.distance(goal) < arrival_threshold {
            self.path_index += 1;
            if self.path_index >= self.path.len() {
                return self.finish_path();
            }
        }
        false
    }

    /// Drops waypoints the enemy already stands on.
    ///
    /// A fresh path starts at the enemy's own cell; when a successor exists the
    /// enemy heads for it directly instead of recentring first.
    fn skip_reached_waypoints(&mut self, arrival_threshold: f32, spatial: &SpatialIndex) -> bool {
        if self.path_index == 0
            && self.path.len() > 1
            && self.path.first() == Some(&spatial.world_to_grid(self.position))
        {
            self.path_index = 1;
        }

        while let Some(waypoint) = self.path.get(self.path_index).copied() {
            if self.position.distance(spatial.grid_to_world(waypoint)) >= arrival_threshold {
                return false;
            }
            self.path_index += 1;
        }
        self.finish_path()
    }

    fn finish_path(&mut self) -> bool {
        self.path.clear();
        self.path_index = 0;
        true
    }
}

#[derive(Clone, Copy, Debug)]
struct Key {
    id: KeyId,
    cell: GridCoord,
    collected: bool,
}

/// Walkable cell closest to the grid centre, preferring cells other than the start.
fn enemy_spawn_cell(maze: &MazeModel, spatial: &SpatialIndex) -> GridCoord {
    let size = maze.size();
    let view = maze.view();
    let mut best: Option<(f32, GridCoord)> = None;

    for row in 0..size {
        for column in 0..size {
            let cell = GridCoord::new(row, column);
            if !view.is_walkable(cell) || cell == maze.start() {
                continue;
            }
            let distance = spatial.grid_to_world(cell).distance(WorldPosition::ORIGIN);
            if best.map_or(true, |(closest, _)| distance < closest) {
                best = Some((distance, cell));
            }
        }
    }

    best.map_or(maze.end(), |(_, cell)| cell)
}

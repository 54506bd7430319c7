#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Runner simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then reports [`Event`] values.
//! Systems read immutable snapshots and respond exclusively with new command
//! batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

mod spatial;
mod tuning;

pub use spatial::SpatialIndex;
pub use tuning::{EnemyTuning, InteractionTuning, PlayerTuning, Tuning};

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Starts a fresh run from any phase.
    StartGame,
    /// Suspends a running game.
    PauseGame,
    /// Resumes a paused game.
    ResumeGame,
    /// Resets agents, keys and the clock, then resumes running.
    RestartGame,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Sets the facing of the player, measured as a yaw in radians.
    TurnPlayer {
        /// New yaw of the player.
        facing: f32,
    },
    /// Moves the player to an already collision-resolved position.
    MovePlayer {
        /// Destination of the player in world space.
        to: WorldPosition,
    },
    /// Stores the position the enemy is chasing.
    SetEnemyTarget {
        /// Position the enemy should pursue.
        target: WorldPosition,
    },
    /// Replaces the enemy's waypoint list and rewinds it to the first waypoint.
    AssignEnemyPath {
        /// Ordered waypoints, starting at the enemy's current cell.
        path: Vec<GridCoord>,
    },
    /// Moves the enemy along its waypoint list for the provided delta time.
    AdvanceEnemy {
        /// Duration of simulated time the enemy travels for.
        dt: Duration,
    },
    /// Marks a key as collected by the player.
    CollectKey {
        /// Identifier of the collected key.
        key: KeyId,
    },
    /// Reports that the enemy caught the player.
    CapturePlayer,
    /// Reports that the player stands on the exit cell.
    ReachExit,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces a transition of the game phase.
    PhaseChanged {
        /// Phase that was active before the transition.
        from: GamePhase,
        /// Phase that is active after the transition.
        to: GamePhase,
    },
    /// Confirms that a key was collected for the first time.
    KeyCollected {
        /// Identifier of the collected key.
        key: KeyId,
        /// Number of keys collected so far.
        collected: u32,
        /// Number of keys in the maze.
        total: u32,
    },
    /// Notice that the exit was reached without every key.
    ExitLocked {
        /// Number of keys still missing.
        missing: u32,
    },
    /// Confirms that the enemy received a fresh path.
    EnemyPathAssigned {
        /// Number of waypoints in the new path.
        waypoints: usize,
    },
    /// Reports that the enemy consumed the last waypoint of its path.
    EnemyArrived,
    /// Confirms that agents and keys were returned to their initial state.
    SessionReset,
}

/// Lifecycle phase of a game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Level loaded but not started.
    Idle,
    /// Simulation ticking.
    Running,
    /// Simulation suspended.
    Paused,
    /// Player escaped with every key.
    Victory,
    /// Player was caught by the enemy.
    Defeat,
}

impl GamePhase {
    /// Reports whether the phase ends the run until a restart.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat)
    }
}

/// Content of a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Open floor.
    Path,
    /// Solid wall that blocks movement and planning.
    Wall,
    /// Open floor that hosts a key.
    KeySpot,
}

impl CellKind {
    /// Decodes the numeric cell representation used by maze sources.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Path),
            1 => Some(Self::Wall),
            2 => Some(Self::KeySpot),
            _ => None,
        }
    }

    /// Numeric representation used by maze sources.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Path => 0,
            Self::Wall => 1,
            Self::KeySpot => 2,
        }
    }

    /// Reports whether agents may occupy the cell.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        !matches!(self, Self::Wall)
    }
}

/// Location of a single grid cell expressed as row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    row: u32,
    column: u32,
}

impl GridCoord {
    /// Creates a new grid coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Computes the Manhattan distance between two coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: GridCoord) -> u32 {
        self.row.abs_diff(other.row) + self.column.abs_diff(other.column)
    }

    /// Reports whether the two coordinates share an edge.
    #[must_use]
    pub fn is_adjacent(self, other: GridCoord) -> bool {
        self.manhattan_distance(other) == 1
    }
}

/// Continuous position on the ground plane.
///
/// `x` grows with the column index and `z` with the row index. Height is
/// owned by the rendering collaborators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPosition {
    x: f32,
    z: f32,
}

impl WorldPosition {
    /// World origin, which maps to the centre of the grid.
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Creates a new world position.
    #[must_use]
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    /// Horizontal coordinate following the columns.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Depth coordinate following the rows.
    #[must_use]
    pub const fn z(&self) -> f32 {
        self.z
    }

    /// Returns the position displaced by the provided components.
    #[must_use]
    pub fn offset(self, dx: f32, dz: f32) -> Self {
        Self::new(self.x + dx, self.z + dz)
    }

    /// Euclidean distance between two positions.
    #[must_use]
    pub fn distance(self, other: WorldPosition) -> f32 {
        (self.x - other.x).hypot(self.z - other.z)
    }
}

/// Unique identifier assigned to a key, matching its index in the maze source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KeyId(u32);

impl KeyId {
    /// Creates a new key identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Raw movement flags supplied by the input collaborator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MovementIntent {
    /// Move along the facing direction.
    pub forward: bool,
    /// Move against the facing direction.
    pub backward: bool,
    /// Strafe to the left of the facing direction.
    pub left: bool,
    /// Strafe to the right of the facing direction.
    pub right: bool,
}

impl MovementIntent {
    /// Intent that requests no movement.
    pub const IDLE: Self = Self {
        forward: false,
        backward: false,
        left: false,
        right: false,
    };

    /// Local `(strafe, advance)` axes in `{-1, 0, 1}`; opposing flags cancel.
    #[must_use]
    pub fn local_axes(&self) -> (f32, f32) {
        let strafe = f32::from(u8::from(self.right)) - f32::from(u8::from(self.left));
        let advance = f32::from(u8::from(self.forward)) - f32::from(u8::from(self.backward));
        (strafe, advance)
    }

    /// Reports whether no axis is requested.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.local_axes() == (0.0, 0.0)
    }
}

/// Complete per-tick player input.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlayerInput {
    /// Movement flags for the tick.
    pub intent: MovementIntent,
    /// Yaw change requested by look input, before sensitivity scaling.
    pub look_delta: f32,
}

impl PlayerInput {
    /// Creates an input carrying only movement flags.
    #[must_use]
    pub const fn moving(intent: MovementIntent) -> Self {
        Self {
            intent,
            look_delta: 0.0,
        }
    }
}

/// Read-only view into the maze cells.
#[derive(Clone, Copy, Debug)]
pub struct GridView<'a> {
    cells: &'a [CellKind],
    size: u32,
}

impl<'a> GridView<'a> {
    /// Captures a new grid view backed by the provided row-major cells.
    #[must_use]
    pub fn new(cells: &'a [CellKind], size: u32) -> Self {
        Self { cells, size }
    }

    /// Number of rows and columns of the square grid.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Returns the cell at the coordinate, if it lies within the grid.
    #[must_use]
    pub fn cell(&self, coord: GridCoord) -> Option<CellKind> {
        self.cell_at(i64::from(coord.row()), i64::from(coord.column()))
    }

    /// Returns the cell at signed indices, if they lie within the grid.
    #[must_use]
    pub fn cell_at(&self, row: i64, column: i64) -> Option<CellKind> {
        let size = i64::from(self.size);
        if row < 0 || column < 0 || row >= size || column >= size {
            return None;
        }
        let index = usize::try_from(row * size + column).ok()?;
        self.cells.get(index).copied()
    }

    /// Reports whether the coordinate lies inside the grid and is not a wall.
    #[must_use]
    pub fn is_walkable(&self, coord: GridCoord) -> bool {
        self.cell(coord).map_or(false, CellKind::is_walkable)
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub fn contains(&self, coord: GridCoord) -> bool {
        coord.row() < self.size && coord.column() < self.size
    }

    /// Returns an iterator over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = CellKind> + 'a {
        self.cells.iter().copied()
    }
}

/// Immutable representation of the player used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Position of the player on the ground plane.
    pub position: WorldPosition,
    /// Yaw of the player in radians.
    pub facing: f32,
    /// Distance travelled per second at full intent.
    pub move_speed: f32,
    /// Half side of the player's collision square.
    pub collision_radius: f32,
}

/// Immutable representation of the enemy used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Position of the enemy on the ground plane.
    pub position: WorldPosition,
    /// Position the enemy is chasing, if any was set.
    pub target: Option<WorldPosition>,
    /// Waypoints of the current path.
    pub path: Vec<GridCoord>,
    /// Index of the waypoint the enemy is heading to.
    pub path_index: usize,
    /// Distance travelled per second along the path.
    pub move_speed: f32,
    /// Half side of the enemy's collision square.
    pub collision_radius: f32,
    /// Range within which the enemy replans toward its target.
    pub detection_radius: f32,
}

impl EnemySnapshot {
    /// Reports whether the enemy is following a path.
    #[must_use]
    pub fn is_following(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Immutable representation of a single key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeySnapshot {
    /// Identifier of the key.
    pub id: KeyId,
    /// Cell that hosts the key.
    pub cell: GridCoord,
    /// Indicates whether the player already picked the key up.
    pub collected: bool,
}

/// Read-only snapshot describing all keys of the maze.
#[derive(Clone, Debug, Default)]
pub struct KeyView {
    snapshots: Vec<KeySnapshot>,
}

impl KeyView {
    /// Creates a new key view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<KeySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured key snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &KeySnapshot> {
        self.snapshots.iter()
    }

    /// Iterator over the keys that are still waiting to be collected.
    pub fn uncollected(&self) -> impl Iterator<Item = &KeySnapshot> {
        self.snapshots.iter().filter(|key| !key.collected)
    }
}

/// Phase and progress bookkeeping of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameStatus {
    /// Active phase.
    pub phase: GamePhase,
    /// Keys collected during the current run.
    pub collected_keys: u32,
    /// Keys present in the maze.
    pub total_keys: u32,
    /// Simulated time spent running.
    pub elapsed: Duration,
}

impl GameStatus {
    /// Reports whether every key has been collected.
    #[must_use]
    pub const fn all_keys_collected(&self) -> bool {
        self.collected_keys >= self.total_keys
    }

    /// Number of keys still missing.
    #[must_use]
    pub const fn keys_remaining(&self) -> u32 {
        self.total_keys.saturating_sub(self.collected_keys)
    }

    /// Elapsed running time in seconds.
    #[must_use]
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    /// Elapsed running time formatted as `MM:SS` for HUD display.
    #[must_use]
    pub fn clock_label(&self) -> String {
        let seconds = self.elapsed.as_secs();
        format!("{:02}:{:02}", seconds / 60, seconds % 60)
    }
}

/// Per-tick snapshot consumed by rendering and UI collaborators.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSnapshot {
    /// Position of the player.
    pub player_position: WorldPosition,
    /// Yaw of the player in radians.
    pub player_facing: f32,
    /// Position of the enemy.
    pub enemy_position: WorldPosition,
    /// Number of rows and columns of the maze.
    pub grid_size: u32,
    /// Row-major maze cells.
    pub cells: Vec<CellKind>,
    /// Identifiers of the keys collected so far.
    pub collected_keys: Vec<KeyId>,
    /// Active phase.
    pub phase: GamePhase,
    /// Number of keys collected so far.
    pub collected_count: u32,
    /// Number of keys present in the maze.
    pub total_keys: u32,
    /// Simulated running time in seconds.
    pub elapsed_seconds: f32,
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{CellKind, GamePhase, GameStatus, GridCoord, GridView, MovementIntent};

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = GridCoord::new(1, 1);
        let destination = GridCoord::new(3, 4);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
        assert!(origin.is_adjacent(GridCoord::new(1, 2)));
        assert!(!origin.is_adjacent(GridCoord::new(2, 2)));
    }

    #[test]
    fn cell_codes_follow_source_format() {
        assert_eq!(CellKind::from_code(0), Some(CellKind::Path));
        assert_eq!(CellKind::from_code(1), Some(CellKind::Wall));
        assert_eq!(CellKind::from_code(2), Some(CellKind::KeySpot));
        assert_eq!(CellKind::from_code(3), None);
        assert_eq!(CellKind::from_code(-1), None);
        assert!(CellKind::KeySpot.is_walkable());
        assert!(!CellKind::Wall.is_walkable());
    }

    #[test]
    fn opposing_intents_cancel() {
        let intent = MovementIntent {
            forward: true,
            backward: true,
            left: false,
            right: true,
        };
        assert_eq!(intent.local_axes(), (1.0, 0.0));
        assert!(MovementIntent::IDLE.is_idle());
    }

    #[test]
    fn grid_view_rejects_out_of_bounds_cells() {
        let cells = [
            CellKind::Wall,
            CellKind::Path,
            CellKind::KeySpot,
            CellKind::Wall,
        ];
        let view = GridView::new(&cells, 2);
        assert_eq!(view.cell(GridCoord::new(1, 0)), Some(CellKind::KeySpot));
        assert_eq!(view.cell_at(-1, 0), None);
        assert_eq!(view.cell(GridCoord::new(0, 2)), None);
        assert!(view.is_walkable(GridCoord::new(0, 1)));
        assert!(!view.is_walkable(GridCoord::new(5, 5)));
    }

    #[test]
    fn clock_label_formats_minutes_and_seconds() {
        let status = GameStatus {
            phase: GamePhase::Running,
            collected_keys: 1,
            total_keys: 3,
            elapsed: Duration::from_millis(125_900),
        };
        assert_eq!(status.clock_label(), "02:05");
        assert_eq!(status.keys_remaining(), 2);
        assert!(!status.all_keys_collected());
    }

    #[test]
    fn terminal_phases_are_victory_and_defeat() {
        assert!(GamePhase::Victory.is_terminal());
        assert!(GamePhase::Defeat.is_terminal());
        assert!(!GamePhase::Paused.is_terminal());
    }
}

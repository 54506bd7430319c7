//! Seeded fallback maze generator used when no valid source is available.

use maze_runner_core::{CellKind, GridCoord};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::maze::MazeModel;

/// Side length of generated mazes when the caller has no preference.
pub const DEFAULT_MAZE_SIZE: u32 = 15;

/// Smallest side length that fits the start, exit and three distinct keys.
pub const MIN_GENERATED_SIZE: u32 = 9;

const WALL_PROBABILITY: f64 = 0.3;

/// Generates a solvable maze with a random interior.
///
/// Border cells are walls and every interior cell is a wall with a fixed
/// probability. The start `(1, 1)`, the exit `(size - 2, size - 2)` and three
/// keys are forced to plain paths, each key with its interior neighbourhood,
/// and a 4-connected corridor is carved from the start to every key and from
/// every key to the exit. Routes are guaranteed to exist, not to be short or unique.
/// Sizes below [`MIN_GENERATED_SIZE`] are raised to it.
#[must_use]
pub fn generate(size: u32, seed: u64) -> MazeModel {
    let size = size.max(MIN_GENERATED_SIZE);
    let mut canvas = Canvas::walled(size);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    for row in 1..size - 1 {
        for column in 1..size - 1 {
            let cell = if rng.gen_bool(WALL_PROBABILITY) {
                CellKind::Wall
            } else {
                CellKind::Path
            };
            canvas.set(GridCoord::new(row, column), cell);
        }
    }

    let start = GridCoord::new(1, 1);
    let end = GridCoord::new(size - 2, size - 2);
    let keys = vec![
        GridCoord::new(3, 3),
        GridCoord::new(3, size - 3),
        GridCoord::new(size / 2, size / 2),
    ];

    for key in &keys {
        canvas.clear_neighbourhood(*key);
    }
    for key in &keys {
        canvas.carve(start, *key);
        canvas.carve(*key, end);
    }

    for coord in keys.iter().chain([&start, &end]) {
        canvas.set(*coord, CellKind::Path);
    }

    info!(size, seed, keys = keys.len(), "generated fallback maze");
    MazeModel::from_parts(size, canvas.cells, start, end, keys)
}

struct Canvas {
    size: u32,
    cells: Vec<CellKind>,
}

impl Canvas {
    fn walled(size: u32) -> Self {
        let count = (size as usize) * (size as usize);
        Self {
            size,
            cells: vec![CellKind::Wall; count],
        }
    }

    fn index(&self, coord: GridCoord) -> usize {
        coord.row() as usize * self.size as usize + coord.column() as usize
    }

    fn set(&mut self, coord: GridCoord, cell: CellKind) {
        let index = self.index(coord);
        if let Some(slot) = self.cells.get_mut(index) {
            *slot = cell;
        }
    }

    fn open(&mut self, coord: GridCoord) {
        let index = self.index(coord);
        if let Some(slot) = self.cells.get_mut(index) {
            if *slot == CellKind::Wall {
                *slot = CellKind::Path;
            }
        }
    }

    fn is_interior(&self, row: i64, column: i64) -> bool {
        let upper = i64::from(self.size) - 1;
        row > 0 && column > 0 && row < upper && column < upper
    }

    fn clear_neighbourhood(&mut self, centre: GridCoord) {
        for row_offset in -1..=1 {
            for column_offset in -1..=1 {
                let row = i64::from(centre.row()) + row_offset;
                let column = i64::from(centre.column()) + column_offset;
                if !self.is_interior(row, column) {
                    continue;
                }
                if let (Ok(row), Ok(column)) = (u32::try_from(row), u32::try_from(column)) {
                    self.open(GridCoord::new(row, column));
                }
            }
        }
    }

    /// Opens a 4-connected corridor, stepping the axis with more distance left.
    fn carve(&mut self, from: GridCoord, to: GridCoord) {
        let mut row = from.row();
        let mut column = from.column();
        self.open(from);

        while row != to.row() || column != to.column() {
            let row_gap = row.abs_diff(to.row());
            let column_gap = column.abs_diff(to.column());
            if column_gap >= row_gap {
                column = step_toward(column, to.column());
            } else {
                row = step_toward(row, to.row());
            }
            self.open(GridCoord::new(row, column));
        }
    }
}

fn step_toward(value: u32, target: u32) -> u32 {
    if value < target {
        value + 1
    } else {
        value - 1
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    fn reachable_from(maze: &MazeModel, origin: GridCoord) -> Vec<GridCoord> {
        let view = maze.view();
        let mut seen = vec![origin];
        let mut queue = VecDeque::from([origin]);
        while let Some(cell) = queue.pop_front() {
            let row = i64::from(cell.row());
            let column = i64::from(cell.column());
            for (dr, dc) in [(-1, 0), (0, 1), (1, 0), (0, -1)] {
                let Some(kind) = view.cell_at(row + dr, column + dc) else {
                    continue;
                };
                if !kind.is_walkable() {
                    continue;
                }
                let next = GridCoord::new((row + dr) as u32, (column + dc) as u32);
                if !seen.contains(&next) {
                    seen.push(next);
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    #[test]
    fn generated_mazes_are_solvable() {
        for seed in 0..32 {
            let maze = generate(DEFAULT_MAZE_SIZE, seed);
            let reachable = reachable_from(&maze, maze.start());
            assert!(reachable.contains(&maze.end()), "seed {seed} has no exit route");
            for key in maze.keys() {
                assert!(reachable.contains(key), "seed {seed} strands key {key:?}");
            }
        }
    }

    #[test]
    fn generation_is_deterministic_for_same_seed() {
        assert_eq!(generate(21, 7), generate(21, 7));
        assert_ne!(generate(21, 7).cells(), generate(21, 8).cells());
    }

    #[test]
    fn border_stays_walled_and_landmarks_are_open() {
        let maze = generate(DEFAULT_MAZE_SIZE, 3);
        let size = maze.size();
        for index in 0..size {
            for coord in [
                GridCoord::new(0, index),
                GridCoord::new(size - 1, index),
                GridCoord::new(index, 0),
                GridCoord::new(index, size - 1),
            ] {
                assert_eq!(maze.cell(coord), Some(CellKind::Wall));
            }
        }
        assert_eq!(maze.cell(maze.start()), Some(CellKind::Path));
        assert_eq!(maze.cell(maze.end()), Some(CellKind::Path));
        for key in maze.keys() {
            assert_eq!(maze.cell(*key), Some(CellKind::Path));
        }
        assert_eq!(
            maze.keys(),
            &[
                GridCoord::new(3, 3),
                GridCoord::new(3, 12),
                GridCoord::new(7, 7)
            ]
        );
    }

    #[test]
    fn key_neighbourhoods_are_open() {
        let maze = generate(DEFAULT_MAZE_SIZE, 11);
        for key in maze.keys() {
            for row in key.row() - 1..=key.row() + 1 {
                for column in key.column() - 1..=key.column() + 1 {
                    let cell = maze.cell(GridCoord::new(row, column)).expect("in bounds");
                    assert!(cell.is_walkable(), "cell ({row}, {column}) is walled");
                }
            }
        }
    }

    #[test]
    fn small_sizes_are_raised_to_the_minimum() {
        assert_eq!(generate(3, 1).size(), MIN_GENERATED_SIZE);
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! A* route planning over the maze grid.

use std::{cmp::Reverse, collections::BinaryHeap};

use maze_runner_core::{GridCoord, GridView};
use tracing::trace;

/// Finds a shortest 4-connected route from `start` to `goal`.
///
/// Convenience wrapper that plans with a throwaway [`PathPlanner`].
#[must_use]
pub fn find_path(view: GridView<'_>, start: GridCoord, goal: GridCoord) -> Vec<GridCoord> {
    PathPlanner::default().plan(view, start, goal)
}

/// Reusable A* planner that keeps its scratch buffers between calls.
#[derive(Debug, Default)]
pub struct PathPlanner {
    g_scores: Vec<u32>,
    parents: Vec<Option<usize>>,
    closed: Vec<bool>,
    open: BinaryHeap<Reverse<OpenEntry>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenEntry {
    f_score: u32,
    sequence: u64,
    node: usize,
}

impl PathPlanner {
    /// Plans a route from `start` to `goal`, both inclusive.
    ///
    /// Returns an empty route when either endpoint lies outside the grid, the
    /// goal is a wall, or no route exists. A start inside a wall is expanded
    /// like any other cell.
    pub fn plan(&mut self, view: GridView<'_>, start: GridCoord, goal: GridCoord) -> Vec<GridCoord> {
        if !view.contains(start) || !view.contains(goal) || !view.is_walkable(goal) {
            return Vec::new();
        }
        if start == goal {
            return vec![start];
        }

        let size = view.size();
        self.prepare(size);

        let start_index = index_of(start, size);
        let goal_index = index_of(goal, size);
        let mut sequence = 0_u64;

        self.g_scores[start_index] = 0;
        self.open.push(Reverse(OpenEntry {
            f_score: start.manhattan_distance(goal),
            sequence,
            node: start_index,
        }));

        while let Some(Reverse(entry)) = self.open.pop() {
            if self.closed[entry.node] {
                continue;
            }
            if entry.node == goal_index {
                let route = self.reconstruct(goal_index, size);
                trace!(?start, ?goal, waypoints = route.len(), "route found");
                return route;
            }
            self.closed[entry.node] = true;

            let current = coord_of(entry.node, size);
            let tentative = self.g_scores[entry.node].saturating_add(1);
            for neighbour in neighbours(current, size) {
                let index = index_of(neighbour, size);
                if self.closed[index] || !view.is_walkable(neighbour) {
                    continue;
                }
                if tentative >= self.g_scores[index] {
                    continue;
                }
                self.g_scores[index] = tentative;
                self.parents[index] = Some(entry.node);
                sequence += 1;
                self.open.push(Reverse(OpenEntry {
                    f_score: tentative.saturating_add(neighbour.manhattan_distance(goal)),
                    sequence,
                    node: index,
                }));
            }
        }

        trace!(?start, ?goal, "no route");
        Vec::new()
    }

    fn prepare(&mut self, size: u32) {
        let count = (size as usize) * (size as usize);
        self.g_scores.clear();
        self.g_scores.resize(count, u32::MAX);
        self.parents.clear();
        self.parents.resize(count, None);
        self.closed.clear();
        self.closed.resize(count, false);
        self.open.clear();
    }

    fn reconstruct(&self, goal_index: usize, size: u32) -> Vec<GridCoord> {
        let mut route = vec![coord_of(goal_index, size)];
        let mut cursor = goal_index;
        while let Some(parent) = self.parents[cursor] {
            route.push(coord_of(parent, size));
            cursor = parent;
        }
        route.reverse();
        route
    }
}

fn index_of(coord: GridCoord, size: u32) -> usize {
    coord.row() as usize * size as usize + coord.column() as usize
}

fn coord_of(index: usize, size: u32) -> GridCoord {
    let size = size as usize;
    GridCoord::new((index / size) as u32, (index % size) as u32)
}

/// North, east, south, west neighbours that lie inside the grid.
fn neighbours(coord: GridCoord, size: u32) -> impl Iterator<Item = GridCoord> {
    let row = coord.row();
    let column = coord.column();
    [
        row.checked_sub(1).map(|r| GridCoord::new(r, column)),
        (column + 1 < size).then(|| GridCoord::new(row, column + 1)),
        (row + 1 < size).then(|| GridCoord::new(row + 1, column)),
        column.checked_sub(1).map(|c| GridCoord::new(row, c)),
    ]
    .into_iter()
    .flatten()
}

#[cfg(test)]
mod tests {
    use maze_runner_core::CellKind;

    use super::*;

    fn grid(rows: &[&str]) -> (Vec<CellKind>, u32) {
        let cells = rows
            .iter()
            .flat_map(|row| {
                row.chars().map(|ch| match ch {
                    '#' => CellKind::Wall,
                    'k' => CellKind::KeySpot,
                    _ => CellKind::Path,
                })
            })
            .collect();
        (cells, rows.len() as u32)
    }

    #[test]
    fn bordered_grid_route_has_five_cells() {
        let (cells, size) = grid(&["#####", "#...#", "#.k.#", "#...#", "#####"]);
        let view = GridView::new(&cells, size);

        let route = find_path(view, GridCoord::new(1, 1), GridCoord::new(3, 3));

        assert_eq!(route.len(), 5);
        assert_eq!(route.first(), Some(&GridCoord::new(1, 1)));
        assert_eq!(route.last(), Some(&GridCoord::new(3, 3)));
        assert!(route.windows(2).all(|pair| pair[0].is_adjacent(pair[1])));
    }

    #[test]
    fn equal_cost_ties_follow_discovery_order() {
        let (cells, size) = grid(&["...", "...", "..."]);
        let view = GridView::new(&cells, size);

        let route = find_path(view, GridCoord::new(0, 0), GridCoord::new(1, 1));

        assert_eq!(
            route,
            vec![
                GridCoord::new(0, 0),
                GridCoord::new(0, 1),
                GridCoord::new(1, 1)
            ]
        );
    }

    #[test]
    fn start_equal_to_goal_returns_single_cell() {
        let (cells, size) = grid(&["...", "...", "..."]);
        let view = GridView::new(&cells, size);
        assert_eq!(
            find_path(view, GridCoord::new(2, 2), GridCoord::new(2, 2)),
            vec![GridCoord::new(2, 2)]
        );
    }

    #[test]
    fn walled_or_outside_goal_returns_empty() {
        let (cells, size) = grid(&["..#", "...", "..."]);
        let view = GridView::new(&cells, size);
        assert!(find_path(view, GridCoord::new(0, 0), GridCoord::new(0, 2)).is_empty());
        assert!(find_path(view, GridCoord::new(0, 0), GridCoord::new(5, 0)).is_empty());
        assert!(find_path(view, GridCoord::new(7, 7), GridCoord::new(0, 0)).is_empty());
    }

    #[test]
    fn start_inside_wall_is_still_expanded() {
        let (cells, size) = grid(&["#..", "...", "..."]);
        let view = GridView::new(&cells, size);
        let route = find_path(view, GridCoord::new(0, 0), GridCoord::new(0, 2));
        assert_eq!(route.len(), 3);
    }

    #[test]
    fn planner_reuses_buffers_across_grid_sizes() {
        let mut planner = PathPlanner::default();
        let (small, small_size) = grid(&["...", "...", "..."]);
        let (large, large_size) = grid(&[".....", ".###.", ".....", ".###.", "....."]);

        assert_eq!(
            planner
                .plan(
                    GridView::new(&large, large_size),
                    GridCoord::new(0, 0),
                    GridCoord::new(4, 4)
                )
                .len(),
            9
        );
        assert_eq!(
            planner
                .plan(
                    GridView::new(&small, small_size),
                    GridCoord::new(0, 0),
                    GridCoord::new(2, 2)
                )
                .len(),
            5
        );
    }
}

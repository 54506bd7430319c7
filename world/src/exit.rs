//! Selection of the exit cell the player must reach.

use maze_runner_core::{GridCoord, GridView};
use serde::Deserialize;

use crate::maze::MazeModel;

/// Strategy used to decide which cell counts as the exit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitPolicy {
    /// The `end` declared by the maze source is the exit.
    #[default]
    Declared,
    /// Scan the border for an opening, ignoring the declared `end`.
    BorderScan,
}

/// Resolves the exit cell of the maze under the provided policy.
#[must_use]
pub fn locate_exit(maze: &MazeModel, policy: ExitPolicy) -> GridCoord {
    match policy {
        ExitPolicy::Declared => maze.end(),
        ExitPolicy::BorderScan => scan_border(maze.view()),
    }
}

/// Finds a walkable border cell, preferring the generator's exit openings.
///
/// Falls back to the first border opening that leads into the interior, then
/// to any walkable border cell, and finally to the corner `(size-2, size-2)`.
fn scan_border(view: GridView<'_>) -> GridCoord {
    let size = view.size();
    let near = size.saturating_sub(2);
    let far = size.saturating_sub(1);

    let preferred = [GridCoord::new(near, far), GridCoord::new(far, near)];
    if let Some(cell) = preferred.into_iter().find(|cell| view.is_walkable(*cell)) {
        return cell;
    }

    let border: Vec<GridCoord> = (0..size)
        .flat_map(|row| (0..size).map(move |column| GridCoord::new(row, column)))
        .filter(|cell| is_border(*cell, size) && view.is_walkable(*cell))
        .collect();

    border
        .iter()
        .copied()
        .find(|cell| opens_inward(view, *cell))
        .or_else(|| border.first().copied())
        .unwrap_or(GridCoord::new(near, near))
}

fn is_border(cell: GridCoord, size: u32) -> bool {
    let last = size.saturating_sub(1);
    cell.row() == 0 || cell.column() == 0 || cell.row() == last || cell.column() == last
}

fn opens_inward(view: GridView<'_>, cell: GridCoord) -> bool {
    let row = i64::from(cell.row());
    let column = i64::from(cell.column());
    [(-1, 0), (0, 1), (1, 0), (0, -1)]
        .into_iter()
        .any(|(dr, dc)| {
            let (r, c) = (row + dr, column + dc);
            let Some(kind) = view.cell_at(r, c) else {
                return false;
            };
            let (Ok(r), Ok(c)) = (u32::try_from(r), u32::try_from(c)) else {
                return false;
            };
            kind.is_walkable() && !is_border(GridCoord::new(r, c), view.size())
        })
}

#[cfg(test)]
mod tests {
    use maze_runner_core::CellKind;

    use super::*;

    fn maze_from_rows(rows: &[&str]) -> MazeModel {
        let size = rows.len() as u32;
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
        MazeModel::new(
            size,
            cells,
            GridCoord::new(1, 1),
            GridCoord::new(size - 2, size - 2),
            Vec::new(),
        )
        .expect("valid maze")
    }

    #[test]
    fn declared_policy_uses_source_end() {
        let maze = maze_from_rows(&["#####", "#...#", "#...#", "#....", "#####"]);
        assert_eq!(locate_exit(&maze, ExitPolicy::Declared), GridCoord::new(3, 3));
    }

    #[test]
    fn border_scan_prefers_generator_opening() {
        let maze = maze_from_rows(&["#.###", "#...#", "#...#", "#....", "#####"]);
        assert_eq!(
            locate_exit(&maze, ExitPolicy::BorderScan),
            GridCoord::new(3, 4)
        );
    }

    #[test]
    fn border_scan_prefers_openings_into_the_interior() {
        let maze = maze_from_rows(&[".####", "#...#", "#...#", "#...#", "##.##"]);
        assert_eq!(
            locate_exit(&maze, ExitPolicy::BorderScan),
            GridCoord::new(4, 2)
        );
    }

    #[test]
    fn border_scan_falls_back_to_first_border_opening() {
        let maze = maze_from_rows(&[".####", "##..#", "#...#", "#...#", "#####"]);
        assert_eq!(
            locate_exit(&maze, ExitPolicy::BorderScan),
            GridCoord::new(0, 0)
        );
    }

    #[test]
    fn border_scan_falls_back_to_corner() {
        let maze = maze_from_rows(&["#####", "#...#", "#...#", "#...#", "#####"]);
        assert_eq!(
            locate_exit(&maze, ExitPolicy::BorderScan),
            GridCoord::new(3, 3)
        );
    }
}

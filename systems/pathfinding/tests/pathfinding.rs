use std::collections::VecDeque;

use maze_runner_core::{GridCoord, GridView};
use maze_runner_system_pathfinding::{find_path, PathPlanner};
use maze_runner_world::{generate, DEFAULT_MAZE_SIZE};

fn bfs_distance(view: GridView<'_>, start: GridCoord, goal: GridCoord) -> Option<usize> {
    let size = view.size() as usize;
    let mut distance = vec![None; size * size];
    let index = |cell: GridCoord| cell.row() as usize * size + cell.column() as usize;
    distance[index(start)] = Some(0_usize);
    let mut queue = VecDeque::from([start]);

    while let Some(cell) = queue.pop_front() {
        let here = distance[index(cell)].expect("queued cells have a distance");
        if cell == goal {
            return Some(here);
        }
        let row = i64::from(cell.row());
        let column = i64::from(cell.column());
        for (dr, dc) in [(-1, 0), (0, 1), (1, 0), (0, -1)] {
            let walkable = view
                .cell_at(row + dr, column + dc)
                .is_some_and(|kind| kind.is_walkable());
            if !walkable {
                continue;
            }
            let next = GridCoord::new((row + dr) as u32, (column + dc) as u32);
            if distance[index(next)].is_none() {
                distance[index(next)] = Some(here + 1);
                queue.push_back(next);
            }
        }
    }
    None
}

fn walkable_cells(view: GridView<'_>) -> Vec<GridCoord> {
    let size = view.size();
    (0..size)
        .flat_map(|row| (0..size).map(move |column| GridCoord::new(row, column)))
        .filter(|cell| view.is_walkable(*cell))
        .collect()
}

#[test]
fn routes_match_breadth_first_distances() {
    let mut planner = PathPlanner::default();

    for seed in 0..8 {
        let maze = generate(DEFAULT_MAZE_SIZE, seed);
        let view = maze.view();
        let cells = walkable_cells(view);
        let start = maze.start();

        for goal in cells.iter().copied().step_by(5) {
            let route = planner.plan(view, start, goal);
            match bfs_distance(view, start, goal) {
                Some(distance) => {
                    assert_eq!(route.len(), distance + 1, "seed {seed} goal {goal:?}");
                    assert_eq!(route.first(), Some(&start));
                    assert_eq!(route.last(), Some(&goal));
                    for pair in route.windows(2) {
                        assert!(pair[0].is_adjacent(pair[1]));
                        assert!(view.is_walkable(pair[1]));
                    }
                }
                None => assert!(route.is_empty(), "seed {seed} goal {goal:?}"),
            }
        }
    }
}

#[test]
fn every_generated_landmark_is_routable() {
    for seed in 0..16 {
        let maze = generate(DEFAULT_MAZE_SIZE, seed);
        let view = maze.view();
        assert!(!find_path(view, maze.start(), maze.end()).is_empty());
        for key in maze.keys() {
            assert!(!find_path(view, maze.start(), *key).is_empty());
        }
    }
}

#[test]
fn sealed_goal_yields_empty_route() {
    use maze_runner_core::CellKind::{Path, Wall};

    let cells = vec![
        Path, Path, Wall, Path, //
        Path, Path, Wall, Path, //
        Wall, Wall, Wall, Path, //
        Path, Path, Path, Path, //
    ];
    let view = GridView::new(&cells, 4);

    assert!(find_path(view, GridCoord::new(0, 0), GridCoord::new(3, 3)).is_empty());
    assert_eq!(
        find_path(view, GridCoord::new(0, 3), GridCoord::new(3, 0)).len(),
        7
    );
}

use glam::Vec2;
use maze_runner_core::{CellKind, GridCoord, GridView, SpatialIndex, WorldPosition};
use maze_runner_system_collision::CollisionResolver;
use maze_runner_world::{generate, DEFAULT_MAZE_SIZE};

#[test]
fn diagonal_push_into_wall_slides_along_free_axis() {
    let mut cells = vec![CellKind::Path; 25];
    for column in 0..5 {
        cells[column] = CellKind::Wall;
    }
    let spatial = SpatialIndex::new(5, 2.0);
    let resolver = CollisionResolver::new(GridView::new(&cells, 5), spatial);
    let from = spatial.grid_to_world(GridCoord::new(1, 1));

    let to = resolver.resolve(from, Vec2::new(0.2, -0.8), 0.3);

    assert!((to.x() - (from.x() + 0.2)).abs() < 1e-6);
    assert_eq!(to.z(), from.z());
}

#[test]
fn push_straight_into_wall_holds_position() {
    let mut cells = vec![CellKind::Path; 25];
    cells[5] = CellKind::Wall;
    let spatial = SpatialIndex::new(5, 2.0);
    let resolver = CollisionResolver::new(GridView::new(&cells, 5), spatial);
    let from = spatial.grid_to_world(GridCoord::new(1, 1));

    let to = resolver.resolve(from, Vec2::new(-0.9, 0.0), 0.3);

    assert_eq!(to, from);
}

#[test]
fn resolved_positions_stay_clear_of_walls() {
    let maze = generate(DEFAULT_MAZE_SIZE, 5);
    let spatial = SpatialIndex::new(maze.size(), 2.0);
    let resolver = CollisionResolver::new(maze.view(), spatial);
    let radius = 0.3;

    let directions = [
        Vec2::new(1.0, 0.0),
        Vec2::new(0.7, 0.7),
        Vec2::new(0.0, 1.0),
        Vec2::new(-0.7, 0.7),
        Vec2::new(-1.0, 0.0),
        Vec2::new(-0.7, -0.7),
        Vec2::new(0.0, -1.0),
        Vec2::new(0.7, -0.7),
    ];

    let mut position: WorldPosition = spatial.grid_to_world(maze.start());
    assert!(!resolver.is_blocked(position, radius));

    for step in 0..400 {
        let direction = directions[(step / 7) % directions.len()];
        position = resolver.resolve(position, direction * 0.15, radius);
        assert!(
            !resolver.is_blocked(position, radius),
            "step {step} ended inside a wall at {position:?}"
        );
    }
}

use maze_runner_core::{GridCoord, MovementIntent, PlayerInput};
use maze_runner_system_movement::facing_toward;
use maze_runner_system_pathfinding::PathPlanner;
use maze_runner_world::{query, World};
use tracing::debug;

/// Distance from a cell centre at which the autopilot steers for the next cell.
const CENTRE_TOLERANCE: f32 = 0.5;

/// Steers the player through the same input surface a human would use.
///
/// Visits the nearest uncollected key first and heads for the exit once every
/// key is collected.
#[derive(Debug)]
pub(crate) struct Autopilot {
    planner: PathPlanner,
    look_sensitivity: f32,
    goal: Option<GridCoord>,
    route: Vec<GridCoord>,
}

impl Autopilot {
    pub(crate) fn new(look_sensitivity: f32) -> Self {
        Self {
            planner: PathPlanner::default(),
            look_sensitivity,
            goal: None,
            route: Vec::new(),
        }
    }

    /// Produces the input for the next tick.
    pub(crate) fn next_input(&mut self, world: &World) -> PlayerInput {
        let spatial = query::spatial(world);
        let player = query::player(world);
        let cell = spatial.world_to_grid(player.position);
        let goal = choose_goal(world, cell);

        if self.goal != Some(goal) || !self.route.contains(&cell) {
            self.route = self.planner.plan(query::grid_view(world), cell, goal);
            self.goal = Some(goal);
            debug!(?cell, ?goal, waypoints = self.route.len(), "autopilot planned route");
        }

        let Some(index) = self.route.iter().position(|step| *step == cell) else {
            return PlayerInput::default();
        };
        let centre = spatial.grid_to_world(cell);
        let waypoint = if player.position.distance(centre) > CENTRE_TOLERANCE {
            cell
        } else {
            self.route.get(index + 1).copied().unwrap_or(cell)
        };

        let target = spatial.grid_to_world(waypoint);
        if player.position.distance(target) < f32::EPSILON {
            return PlayerInput::default();
        }

        let desired = facing_toward(player.position, target);
        PlayerInput {
            intent: MovementIntent {
                forward: true,
                ..MovementIntent::IDLE
            },
            look_delta: (desired - player.facing) / self.look_sensitivity.max(f32::EPSILON),
        }
    }
}

fn choose_goal(world: &World, from: GridCoord) -> GridCoord {
    query::key_view(world)
        .uncollected()
        .map(|key| key.cell)
        .min_by_key(|cell| cell.manhattan_distance(from))
        .unwrap_or_else(|| query::exit_cell(world))
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use maze_runner_core::{CellKind, EnemyTuning, GamePhase, InteractionTuning, Tuning};
    use maze_runner_session::{Session, SessionConfig};
    use maze_runner_world::MazeModel;

    use super::*;

    fn open_maze() -> Arc<MazeModel> {
        let rows = [
            "#######",
            "#.....#",
            "#.###.#",
            "#.#k#.#",
            "#.#.#.#",
            "#.....#",
            "#######",
        ];
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
        Arc::new(
            MazeModel::new(
                7,
                cells,
                GridCoord::new(1, 1),
                GridCoord::new(5, 5),
                vec![GridCoord::new(3, 3)],
            )
            .expect("valid maze"),
        )
    }

    #[test]
    fn autopilot_collects_keys_and_escapes() {
        let config = SessionConfig {
            tuning: Tuning {
                enemy: EnemyTuning {
                    detection_radius: 0.0,
                    ..EnemyTuning::default()
                },
                interaction: InteractionTuning {
                    capture_radius: 0.0,
                    ..InteractionTuning::default()
                },
                ..Tuning::default()
            },
            ..SessionConfig::default()
        };
        let mut session = Session::new(open_maze(), &config);
        let mut autopilot = Autopilot::new(config.tuning.player.look_sensitivity);
        let _ = session.start();

        for _ in 0..2_000 {
            if session.status().phase != GamePhase::Running {
                break;
            }
            let input = autopilot.next_input(session.world());
            let _ = session.tick(Duration::from_millis(20), &input);
        }

        let status = session.status();
        assert_eq!(status.collected_keys, 1);
        assert_eq!(status.phase, GamePhase::Victory);
    }
}

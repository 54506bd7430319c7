#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Enemy pursuit system that tracks the player and replans routes while in range.

use std::time::Duration;

use maze_runner_core::{
    Command, EnemySnapshot, EnemyTuning, GridView, PlayerSnapshot, SpatialIndex,
};
use maze_runner_system_pathfinding::PathPlanner;
use tracing::debug;

/// Pure system that steers the enemy toward the player.
#[derive(Debug)]
pub struct Pursuit {
    planner: PathPlanner,
    replan_interval: u32,
    ticks_since_replan: u32,
}

impl Pursuit {
    /// Creates the system from the enemy's tuning.
    #[must_use]
    pub fn new(tuning: &EnemyTuning) -> Self {
        Self {
            planner: PathPlanner::default(),
            replan_interval: tuning.replan_interval.max(1),
            ticks_since_replan: u32::MAX,
        }
    }

    /// Forgets replanning cadence so the next in-range tick plans immediately.
    pub fn reset(&mut self) {
        self.ticks_since_replan = u32::MAX;
    }

    /// Emits the target update, an optional replan and the enemy advance for a tick.
    pub fn handle(
        &mut self,
        player: &PlayerSnapshot,
        enemy: &EnemySnapshot,
        view: GridView<'_>,
        spatial: SpatialIndex,
        dt: Duration,
        out: &mut Vec<Command>,
    ) {
        let target = player.position;
        out.push(Command::SetEnemyTarget { target });

        self.ticks_since_replan = self.ticks_since_replan.saturating_add(1);
        let in_range = enemy.position.distance(target) <= enemy.detection_radius;
        if in_range && self.ticks_since_replan >= self.replan_interval {
            let from = spatial.world_to_grid(enemy.position);
            let to = spatial.world_to_grid(target);
            let path = self.planner.plan(view, from, to);
            debug!(?from, ?to, waypoints = path.len(), "enemy replanned");
            out.push(Command::AssignEnemyPath { path });
            self.ticks_since_replan = 0;
        }

        out.push(Command::AdvanceEnemy { dt });
    }
}

impl Default for Pursuit {
    fn default() -> Self {
        Self::new(&EnemyTuning::default())
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Proximity checks for key pickup, capture and reaching the exit.

use maze_runner_core::{
    Command, EnemySnapshot, GridCoord, InteractionTuning, KeyView, PlayerSnapshot, SpatialIndex,
};
use tracing::debug;

/// Pure system evaluated once per tick against freshly updated positions.
#[derive(Clone, Copy, Debug)]
pub struct Interaction {
    key_radius: f32,
    capture_radius: f32,
}

impl Interaction {
    /// Creates the system from the interaction tuning.
    #[must_use]
    pub fn new(tuning: &InteractionTuning) -> Self {
        Self {
            key_radius: tuning.key_radius,
            capture_radius: tuning.capture_radius,
        }
    }

    /// Emits pickups first, then capture, then the exit check.
    pub fn handle(
        &self,
        player: &PlayerSnapshot,
        enemy: &EnemySnapshot,
        keys: &KeyView,
        spatial: SpatialIndex,
        exit: GridCoord,
        out: &mut Vec<Command>,
    ) {
        let pickup_reach = self.key_radius + player.collision_radius;
        for key in keys.uncollected() {
            let distance = player.position.distance(spatial.grid_to_world(key.cell));
            if distance < pickup_reach {
                debug!(key = key.id.get(), distance, "key within reach");
                out.push(Command::CollectKey { key: key.id });
            }
        }

        let separation = player.position.distance(enemy.position);
        if separation < self.capture_radius {
            debug!(separation, "enemy reached the player");
            out.push(Command::CapturePlayer);
        }

        if spatial.world_to_grid(player.position) == exit {
            out.push(Command::ReachExit);
        }
    }
}

impl Default for Interaction {
    fn default() -> Self {
        Self::new(&InteractionTuning::default())
    }
}

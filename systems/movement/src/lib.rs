#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement system that turns player input into world commands.

use std::time::Duration;

use glam::Vec2;
use maze_runner_core::{Command, PlayerInput, PlayerSnapshot, PlayerTuning, WorldPosition};
use maze_runner_system_collision::CollisionResolver;

/// Pure system that resolves player intent against the maze walls.
#[derive(Clone, Copy, Debug)]
pub struct Movement {
    look_sensitivity: f32,
}

impl Movement {
    /// Creates the system from the player's tuning.
    #[must_use]
    pub fn new(tuning: &PlayerTuning) -> Self {
        Self {
            look_sensitivity: tuning.look_sensitivity,
        }
    }

    /// Consumes one tick of input and emits facing and position commands.
    ///
    /// Facing is updated from the look delta first; the movement intent is
    /// then rotated by the new facing and slid along walls.
    pub fn handle(
        &self,
        input: &PlayerInput,
        player: &PlayerSnapshot,
        resolver: &CollisionResolver<'_>,
        dt: Duration,
        out: &mut Vec<Command>,
    ) {
        let mut facing = player.facing;
        if input.look_delta != 0.0 {
            facing += input.look_delta * self.look_sensitivity;
            out.push(Command::TurnPlayer { facing });
        }

        if input.intent.is_idle() {
            return;
        }

        let (strafe, advance) = input.intent.local_axes();
        let heading = rotate(Vec2::new(strafe, advance).normalize_or_zero(), facing);
        let displacement = heading * player.move_speed * dt.as_secs_f32();

        let to = resolver.resolve(player.position, displacement, player.collision_radius);
        if to != player.position {
            out.push(Command::MovePlayer { to });
        }
    }
}

impl Default for Movement {
    fn default() -> Self {
        Self::new(&PlayerTuning::default())
    }
}

/// Yaw that makes forward movement head from `from` toward `to`.
#[must_use]
pub fn facing_toward(from: WorldPosition, to: WorldPosition) -> f32 {
    (to.x() - from.x()).atan2(to.z() - from.z())
}

/// Rotates a local `(strafe, advance)` vector into world `(x, z)` for a yaw.
fn rotate(local: Vec2, facing: f32) -> Vec2 {
    let (sin, cos) = facing.sin_cos();
    Vec2::new(
        local.x * cos + local.y * sin,
        -local.x * sin + local.y * cos,
    )
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn forward_at_zero_yaw_points_along_z() {
        let heading = rotate(Vec2::new(0.0, 1.0), 0.0);
        assert!((heading - Vec2::new(0.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn forward_at_quarter_turn_points_along_x() {
        let heading = rotate(Vec2::new(0.0, 1.0), FRAC_PI_2);
        assert!((heading - Vec2::new(1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn strafe_right_is_perpendicular_to_forward() {
        let facing = 0.6;
        let forward = rotate(Vec2::new(0.0, 1.0), facing);
        let right = rotate(Vec2::new(1.0, 0.0), facing);
        assert!(forward.dot(right).abs() < 1e-6);
    }

    #[test]
    fn facing_toward_matches_forward_heading() {
        let from = WorldPosition::new(1.0, 1.0);
        let to = WorldPosition::new(4.0, -3.0);
        let heading = rotate(Vec2::new(0.0, 1.0), facing_toward(from, to));
        let expected = Vec2::new(3.0, -4.0).normalize();
        assert!((heading - expected).length() < 1e-5);
    }
}

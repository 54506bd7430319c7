//! Tunable parameters that shape movement, pursuit and interactions.

use serde::Deserialize;

/// Aggregated tuning knobs for a session.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Side length of a maze cell in world units.
    pub cell_size: f32,
    /// Player movement parameters.
    pub player: PlayerTuning,
    /// Enemy pursuit parameters.
    pub enemy: EnemyTuning,
    /// Proximity thresholds for pickups, capture and the exit.
    pub interaction: InteractionTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            cell_size: 2.0,
            player: PlayerTuning::default(),
            enemy: EnemyTuning::default(),
            interaction: InteractionTuning::default(),
        }
    }
}

/// Player movement parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// World units travelled per second at full intent.
    pub move_speed: f32,
    /// Half side of the player's collision square.
    pub collision_radius: f32,
    /// Multiplier applied to look input before it changes the facing.
    pub look_sensitivity: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            move_speed: 2.5,
            collision_radius: 0.3,
            look_sensitivity: 1.0,
        }
    }
}

/// Enemy pursuit parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    /// World units travelled per second along a path.
    pub move_speed: f32,
    /// Half side of the enemy's collision square.
    pub collision_radius: f32,
    /// Range within which the enemy replans toward its target.
    pub detection_radius: f32,
    /// Distance below which a waypoint counts as reached.
    pub arrival_threshold: f32,
    /// Replan at most once every this many ticks while the target is in range.
    ///
    /// `1` replans on every tick.
    pub replan_interval: u32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            move_speed: 3.0,
            collision_radius: 0.5,
            detection_radius: 10.0,
            arrival_threshold: 0.5,
            replan_interval: 1,
        }
    }
}

/// Proximity thresholds evaluated by the interaction system.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct InteractionTuning {
    /// Pickup radius of a key, added to the player's collision radius.
    pub key_radius: f32,
    /// Distance below which the enemy captures the player.
    pub capture_radius: f32,
}

impl Default for InteractionTuning {
    fn default() -> Self {
        Self {
            key_radius: 0.7,
            capture_radius: 1.0,
        }
    }
}

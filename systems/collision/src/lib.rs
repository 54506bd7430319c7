#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Circle-versus-wall collision resolution with per-axis sliding.

use glam::Vec2;
use maze_runner_core::{CellKind, GridView, SpatialIndex, WorldPosition};

/// Tests agent footprints against the wall cells of a maze.
#[derive(Clone, Copy, Debug)]
pub struct CollisionResolver<'a> {
    view: GridView<'a>,
    spatial: SpatialIndex,
}

impl<'a> CollisionResolver<'a> {
    /// Creates a resolver over the provided grid and coordinate mapping.
    #[must_use]
    pub fn new(view: GridView<'a>, spatial: SpatialIndex) -> Self {
        Self { view, spatial }
    }

    /// Reports whether a square footprint of half-width `radius` centred on
    /// `candidate` overlaps any wall in the surrounding 3x3 cells.
    ///
    /// Cells beyond the grid block like walls.
    #[must_use]
    pub fn is_blocked(&self, candidate: WorldPosition, radius: f32) -> bool {
        let (row, column) = self.spatial.world_to_cell(candidate);
        let reach = radius + self.spatial.cell_size() / 2.0;

        for row_offset in -1..=1 {
            for column_offset in -1..=1 {
                let (r, c) = (row + row_offset, column + column_offset);
                if !matches!(self.view.cell_at(r, c), None | Some(CellKind::Wall)) {
                    continue;
                }
                let wall = self.spatial.cell_centre(r, c);
                if (candidate.x() - wall.x()).abs() < reach
                    && (candidate.z() - wall.z()).abs() < reach
                {
                    return true;
                }
            }
        }
        false
    }

    /// Moves from `from` by `displacement`, applying `x` then `z` and
    /// reverting each axis independently when it would collide.
    #[must_use]
    pub fn resolve(&self, from: WorldPosition, displacement: Vec2, radius: f32) -> WorldPosition {
        let mut position = from;

        let along_x = position.offset(displacement.x, 0.0);
        if !self.is_blocked(along_x, radius) {
            position = along_x;
        }

        let along_z = position.offset(0.0, displacement.y);
        if !self.is_blocked(along_z, radius) {
            position = along_z;
        }

        position
    }
}

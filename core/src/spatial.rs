//! Affine mapping between grid coordinates and world positions.

use crate::{GridCoord, WorldPosition};

/// Converts between grid cells and world positions.
///
/// Cell `(row, column)` is centred at
/// `((column - size / 2) * cell_size, (row - size / 2) * cell_size)`, so the
/// world origin sits at the centre of the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpatialIndex {
    size: u32,
    cell_size: f32,
}

impl SpatialIndex {
    /// Creates a mapping for a square grid of `size` cells per side.
    #[must_use]
    pub const fn new(size: u32, cell_size: f32) -> Self {
        Self { size, cell_size }
    }

    /// Number of rows and columns of the mapped grid.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Side length of a cell in world units.
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// World position of the centre of the provided cell.
    ///
    /// # Panics
    ///
    /// Panics when the coordinate lies outside the grid; callers validate
    /// coordinates before converting them.
    #[must_use]
    pub fn grid_to_world(&self, coord: GridCoord) -> WorldPosition {
        assert!(
            coord.row() < self.size && coord.column() < self.size,
            "grid coordinate {coord:?} outside a {size}x{size} grid",
            size = self.size
        );
        self.cell_centre(i64::from(coord.row()), i64::from(coord.column()))
    }

    /// World position of the centre of a signed `(row, column)` cell.
    ///
    /// Unlike [`SpatialIndex::grid_to_world`] the cell may lie outside the grid.
    #[must_use]
    pub fn cell_centre(&self, row: i64, column: i64) -> WorldPosition {
        WorldPosition::new(self.axis_to_world(column), self.axis_to_world(row))
    }

    /// Cell containing the provided position, clamped into the grid.
    #[must_use]
    pub fn world_to_grid(&self, position: WorldPosition) -> GridCoord {
        let (row, column) = self.world_to_cell(position);
        GridCoord::new(self.clamp_axis(row), self.clamp_axis(column))
    }

    /// Signed `(row, column)` of the cell containing the provided position.
    ///
    /// The result may lie outside the grid.
    #[must_use]
    pub fn world_to_cell(&self, position: WorldPosition) -> (i64, i64) {
        (self.world_to_axis(position.z()), self.world_to_axis(position.x()))
    }

    fn half_extent(&self) -> f32 {
        self.size as f32 / 2.0
    }

    fn axis_to_world(&self, index: i64) -> f32 {
        (index as f32 - self.half_extent()) * self.cell_size
    }

    fn world_to_axis(&self, value: f32) -> i64 {
        (value / self.cell_size + self.half_extent()).round() as i64
    }

    fn clamp_axis(&self, value: i64) -> u32 {
        let upper = i64::from(self.size.saturating_sub(1));
        u32::try_from(value.clamp(0, upper)).unwrap_or(0)
    }
}

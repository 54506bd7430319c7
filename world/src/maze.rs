//! Immutable maze layout shared by every component of a session.

use std::fmt;

use maze_runner_core::{CellKind, GridCoord, GridView};
use thiserror::Error;

/// Square grid of cells plus the landmarks placed on it.
///
/// A model is only ever produced in a fully validated state and never changes
/// afterwards; sessions share it behind an `Arc`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeModel {
    size: u32,
    cells: Vec<CellKind>,
    start: GridCoord,
    end: GridCoord,
    keys: Vec<GridCoord>,
}

impl MazeModel {
    /// Builds a model from row-major cells, validating dimensions and landmarks.
    pub fn new(
        size: u32,
        cells: Vec<CellKind>,
        start: GridCoord,
        end: GridCoord,
        keys: Vec<GridCoord>,
    ) -> Result<Self, MazeError> {
        if size == 0 {
            return Err(MazeError::InvalidSize(0));
        }

        let expected = u64::from(size) * u64::from(size);
        if u64::try_from(cells.len()).map_or(true, |found| found != expected) {
            return Err(MazeError::CellCount {
                expected,
                found: cells.len(),
            });
        }

        ensure_within(Landmark::Start, start, size)?;
        ensure_within(Landmark::End, end, size)?;
        for (index, key) in keys.iter().enumerate() {
            ensure_within(Landmark::Key(index), *key, size)?;
        }

        Ok(Self::from_parts(size, cells, start, end, keys))
    }

    /// Builds a model from already validated parts.
    pub(crate) fn from_parts(
        size: u32,
        cells: Vec<CellKind>,
        start: GridCoord,
        end: GridCoord,
        keys: Vec<GridCoord>,
    ) -> Self {
        Self {
            size,
            cells,
            start,
            end,
            keys,
        }
    }

    /// Number of rows and columns of the grid.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Cell the player starts on.
    #[must_use]
    pub const fn start(&self) -> GridCoord {
        self.start
    }

    /// Exit cell declared by the maze source.
    #[must_use]
    pub const fn end(&self) -> GridCoord {
        self.end
    }

    /// Cells hosting keys, in source order.
    #[must_use]
    pub fn keys(&self) -> &[GridCoord] {
        &self.keys
    }

    /// Row-major cells of the grid.
    #[must_use]
    pub fn cells(&self) -> &[CellKind] {
        &self.cells
    }

    /// Returns the cell at the coordinate, if it lies within the grid.
    #[must_use]
    pub fn cell(&self, coord: GridCoord) -> Option<CellKind> {
        self.view().cell(coord)
    }

    /// Read-only view used by planners and collision queries.
    #[must_use]
    pub fn view(&self) -> GridView<'_> {
        GridView::new(&self.cells, self.size)
    }
}

/// Landmark named by a validation failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Landmark {
    /// Player start cell.
    Start,
    /// Exit cell.
    End,
    /// Key at the provided source index.
    Key(usize),
}

impl fmt::Display for Landmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
            Self::Key(index) => write!(f, "key #{index}"),
        }
    }
}

/// Reasons a maze layout is rejected.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    /// The declared size is zero or negative.
    #[error("maze size must be a positive integer, got {0}")]
    InvalidSize(i64),
    /// The number of rows differs from the declared size.
    #[error("expected {expected} rows, found {found}")]
    RowCount {
        /// Declared size.
        expected: usize,
        /// Rows present in the source.
        found: usize,
    },
    /// A row's length differs from the declared size.
    #[error("row {row} holds {found} cells, expected {expected}")]
    RowLength {
        /// Offending row index.
        row: usize,
        /// Declared size.
        expected: usize,
        /// Cells present in the row.
        found: usize,
    },
    /// The flattened cell buffer does not describe a square grid.
    #[error("expected {expected} cells, found {found}")]
    CellCount {
        /// Number of cells implied by the size.
        expected: u64,
        /// Cells supplied.
        found: usize,
    },
    /// A cell value outside `{0, 1, 2}`.
    #[error("cell at row {row}, column {column} holds unknown value {value}")]
    UnknownCell {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        column: usize,
        /// Value found in the source.
        value: i64,
    },
    /// A landmark lies outside the grid.
    #[error("{landmark} at x={x}, y={y} lies outside a {size}x{size} grid")]
    OutOfBounds {
        /// Landmark that failed validation.
        landmark: Landmark,
        /// Column supplied for the landmark.
        x: i64,
        /// Row supplied for the landmark.
        y: i64,
        /// Declared size.
        size: u32,
    },
}

fn ensure_within(landmark: Landmark, coord: GridCoord, size: u32) -> Result<(), MazeError> {
    if coord.row() < size && coord.column() < size {
        Ok(())
    } else {
        Err(MazeError::OutOfBounds {
            landmark,
            x: i64::from(coord.column()),
            y: i64::from(coord.row()),
            size,
        })
    }
}

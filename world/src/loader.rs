//! JSON maze sources and the per-session load cache.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use maze_runner_core::{CellKind, GridCoord};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::maze::{Landmark, MazeError, MazeModel};

/// Raw maze document as stored on disk.
///
/// Points use `x` for the column and `y` for the row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeSource {
    /// Number of rows and columns.
    pub size: i64,
    /// Row-major cell codes: `0` path, `1` wall, `2` key spot.
    pub maze: Vec<Vec<i64>>,
    /// Player start.
    pub start: SourcePoint,
    /// Declared exit.
    pub end: SourcePoint,
    /// Key locations, if the level has any.
    #[serde(default)]
    pub keys: Option<Vec<SourcePoint>>,
}

/// Grid point in source notation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePoint {
    /// Column index.
    pub x: i64,
    /// Row index.
    pub y: i64,
}

impl MazeSource {
    /// Parses a maze document from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Captures a model back into source notation.
    #[must_use]
    pub fn from_model(model: &MazeModel) -> Self {
        let width = model.size() as usize;
        let maze = model
            .cells()
            .chunks(width.max(1))
            .map(|row| row.iter().map(|cell| i64::from(cell.code())).collect())
            .collect();
        Self {
            size: i64::from(model.size()),
            maze,
            start: SourcePoint::from(model.start()),
            end: SourcePoint::from(model.end()),
            keys: Some(model.keys().iter().copied().map(SourcePoint::from).collect()),
        }
    }
}

impl From<GridCoord> for SourcePoint {
    fn from(coord: GridCoord) -> Self {
        Self {
            x: i64::from(coord.column()),
            y: i64::from(coord.row()),
        }
    }
}

impl TryFrom<MazeSource> for MazeModel {
    type Error = MazeError;

    fn try_from(source: MazeSource) -> Result<Self, Self::Error> {
        let size = u32::try_from(source.size)
            .ok()
            .filter(|size| *size > 0)
            .ok_or(MazeError::InvalidSize(source.size))?;
        let width = size as usize;

        if source.maze.len() != width {
            return Err(MazeError::RowCount {
                expected: width,
                found: source.maze.len(),
            });
        }

        let mut cells = Vec::with_capacity(width * width);
        for (row, values) in source.maze.iter().enumerate() {
            if values.len() != width {
                return Err(MazeError::RowLength {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            for (column, value) in values.iter().copied().enumerate() {
                let cell = CellKind::from_code(value).ok_or(MazeError::UnknownCell {
                    row,
                    column,
                    value,
                })?;
                cells.push(cell);
            }
        }

        let start = point_to_coord(Landmark::Start, source.start, size)?;
        let end = point_to_coord(Landmark::End, source.end, size)?;
        let keys = source
            .keys
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, point)| point_to_coord(Landmark::Key(index), point, size))
            .collect::<Result<Vec<_>, _>>()?;

        MazeModel::new(size, cells, start, end, keys)
    }
}

fn point_to_coord(
    landmark: Landmark,
    point: SourcePoint,
    size: u32,
) -> Result<GridCoord, MazeError> {
    let out_of_bounds = MazeError::OutOfBounds {
        landmark,
        x: point.x,
        y: point.y,
        size,
    };
    let row = u32::try_from(point.y).map_err(|_| out_of_bounds.clone())?;
    let column = u32::try_from(point.x).map_err(|_| out_of_bounds.clone())?;
    if row >= size || column >= size {
        return Err(out_of_bounds);
    }
    Ok(GridCoord::new(row, column))
}

/// Reasons a maze source could not be turned into a model.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source file could not be read.
    #[error("failed to read maze source {path}")]
    Io {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The document is not structurally a maze source.
    #[error("maze source {id} is malformed")]
    Parse {
        /// Identifier of the source.
        id: String,
        /// Underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },
    /// The document parsed but violates a layout rule.
    #[error("maze source {id} failed validation")]
    Invalid {
        /// Identifier of the source.
        id: String,
        /// Violated rule.
        #[source]
        source: MazeError,
    },
}

/// Loads maze sources and caches successful results by identifier.
///
/// The cache lives as long as the loader; callers create one per session and
/// clear it when they want sources to be read again.
#[derive(Debug, Default)]
pub struct MazeLoader {
    cache: HashMap<String, Arc<MazeModel>>,
}

impl MazeLoader {
    /// Creates a loader with an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the maze stored at `path`, reusing a cached model when present.
    pub fn load_path(&mut self, path: &Path) -> Result<Arc<MazeModel>, LoadError> {
        let id = path.display().to_string();
        if let Some(model) = self.cached(&id) {
            return Ok(model);
        }

        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_and_cache(id, &text)
    }

    /// Loads a maze from JSON text registered under `id`.
    pub fn load_str(&mut self, id: &str, text: &str) -> Result<Arc<MazeModel>, LoadError> {
        if let Some(model) = self.cached(id) {
            return Ok(model);
        }
        self.parse_and_cache(id.to_owned(), text)
    }

    /// Number of cached models.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Drops every cached model.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    fn cached(&self, id: &str) -> Option<Arc<MazeModel>> {
        let model = self.cache.get(id).cloned();
        if model.is_some() {
            debug!(source = id, "maze cache hit");
        }
        model
    }

    fn parse_and_cache(&mut self, id: String, text: &str) -> Result<Arc<MazeModel>, LoadError> {
        let source = MazeSource::from_json(text).map_err(|source| LoadError::Parse {
            id: id.clone(),
            source,
        })?;
        let model = MazeModel::try_from(source).map_err(|source| LoadError::Invalid {
            id: id.clone(),
            source,
        })?;

        info!(
            source = %id,
            size = model.size(),
            keys = model.keys().len(),
            "loaded maze"
        );
        let model = Arc::new(model);
        let _ = self.cache.insert(id, Arc::clone(&model));
        Ok(model)
    }
}

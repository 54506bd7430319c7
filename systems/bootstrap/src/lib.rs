#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Maze Runner experience.

use std::{path::Path, sync::Arc};

use maze_runner_world::{generate, MazeLoader, MazeModel, DEFAULT_MAZE_SIZE};
use tracing::warn;

/// Picks the level a session plays.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Loads the maze at `path`, falling back to a generated maze.
    ///
    /// A missing path, an unreadable file or an invalid source all produce a
    /// maze generated from `seed`; failures are logged as warnings.
    pub fn prepare_maze(
        &self,
        loader: &mut MazeLoader,
        path: Option<&Path>,
        seed: u64,
    ) -> Arc<MazeModel> {
        let Some(path) = path else {
            return Arc::new(generate(DEFAULT_MAZE_SIZE, seed));
        };

        match loader.load_path(path) {
            Ok(maze) => maze,
            Err(error) => {
                warn!(%error, seed, "falling back to a generated maze");
                Arc::new(generate(DEFAULT_MAZE_SIZE, seed))
            }
        }
    }
}

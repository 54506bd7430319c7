use std::{fs, path::Path};

use anyhow::{Context, Result};
use maze_runner_world::{MazeModel, MazeSource};

/// Encodes a maze in the JSON source notation accepted by the loader.
pub(crate) fn encode(maze: &MazeModel) -> Result<String> {
    serde_json::to_string_pretty(&MazeSource::from_model(maze)).context("failed to encode maze")
}

/// Writes the maze to `path` so the same level can be replayed with `--maze`.
pub(crate) fn write(path: &Path, maze: &MazeModel) -> Result<()> {
    let text = encode(maze)?;
    fs::write(path, text).with_context(|| format!("failed to write maze to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use maze_runner_world::{generate, MazeLoader};

    use super::*;

    #[test]
    fn exported_maze_loads_back_unchanged() {
        let maze = generate(11, 5);
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("level.json");

        write(&path, &maze).expect("export maze");
        let loaded = MazeLoader::new().load_path(&path).expect("reload maze");

        assert_eq!(*loaded, maze);
    }

    #[test]
    fn encoded_maze_names_every_landmark() {
        let text = encode(&generate(9, 1)).expect("encode maze");
        for field in ["\"size\"", "\"maze\"", "\"start\"", "\"end\"", "\"keys\""] {
            assert!(text.contains(field), "missing {field}");
        }
    }
}

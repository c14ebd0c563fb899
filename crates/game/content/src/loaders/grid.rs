//! Tile grid loader.
//!
//! Loads pure terrain data from grid RON files. Entity placement is handled
//! separately via scenario files.

use std::path::Path;

use glam::Vec2;
use prowl_core::TileGrid;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Grid data structure for RON files.
///
/// ```ron
/// (
///     tile_size: 32.0,
///     origin: (0.0, 0.0),
///     rows: [
///         [1, 1, 1, 1],
///         [1, 0, 0, 1],
///         [1, 1, 1, 1],
///     ],
/// )
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GridDataRon {
    tile_size: f32,
    #[serde(default)]
    origin: (f32, f32),
    /// 0 = floor, 1 = wall; every row must have the same length.
    rows: Vec<Vec<u8>>,
}

/// Loader for tile grids from RON files.
pub struct GridLoader;

impl GridLoader {
    pub fn load(path: &Path) -> LoadResult<TileGrid> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid grid {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<TileGrid> {
        let data: GridDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse grid RON: {}", e))?;
        let origin = Vec2::new(data.origin.0, data.origin.1);
        let grid = TileGrid::from_rows(&data.rows, data.tile_size, origin)?;
        tracing::debug!(
            width = data.rows.first().map_or(0, Vec::len),
            height = data.rows.len(),
            "loaded grid"
        );
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use prowl_core::{MapOracle, TilePos};

    use super::*;

    #[test]
    fn parses_rows_and_origin() {
        let grid = GridLoader::parse(
            "(tile_size: 16.0, origin: (8.0, 0.0), rows: [[1, 1, 1], [1, 0, 1], [1, 1, 1]])",
        )
        .unwrap();

        assert_eq!(grid.dimensions().width, 3);
        assert!(grid.is_walkable(TilePos::new(1, 1)));
        assert!(!grid.is_walkable(TilePos::new(0, 1)));
        assert_eq!(grid.tile_center(TilePos::new(1, 1)), Vec2::new(32.0, 24.0));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = GridLoader::parse("(tile_size: 32.0, rows: [[0, 0], [0]])").unwrap_err();
        assert!(err.to_string().contains("row 1"), "{err}");
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("room.ron");
        std::fs::write(&path, "(tile_size: 32.0, rows: [[0, 0, 0]])").unwrap();

        let grid = GridLoader::load(&path).unwrap();

        assert_eq!(grid.dimensions().width, 3);
        assert_eq!(grid.dimensions().height, 1);
    }
}

//! Oracle access and level data errors.

use crate::error::{ErrorSeverity, GameError};

/// Errors that occur when accessing Oracle data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// No grid was supplied for the current level.
    #[error("grid not available")]
    MapNotAvailable,
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            // Agents without a grid stay put in Patrol instead of failing
            OracleError::MapNotAvailable => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            OracleError::MapNotAvailable => "ORACLE_MAP_NOT_AVAILABLE",
        }
    }
}

/// Errors raised while building a [`TileGrid`](super::TileGrid) from raw level data.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum GridError {
    #[error("grid has no tiles")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("cell ({x}, {y}) has value {value}, expected 0 (floor) or 1 (wall)")]
    InvalidCell { x: usize, y: usize, value: u8 },

    #[error("tile size must be positive and finite, got {0}")]
    InvalidTileSize(f32),
}

impl GameError for GridError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            GridError::Empty => "GRID_EMPTY",
            GridError::RaggedRow { .. } => "GRID_RAGGED_ROW",
            GridError::InvalidCell { .. } => "GRID_INVALID_CELL",
            GridError::InvalidTileSize(_) => "GRID_INVALID_TILE_SIZE",
        }
    }
}

//! World population errors.

use crate::error::{ErrorContext, ErrorSeverity, GameError};

/// Errors raised while placing agents or actors into a [`World`](super::World).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SpawnError {
    /// Spawn point lies on a wall tile.
    #[error("spawn point is on a wall")]
    OnWall { context: ErrorContext },

    /// Spawn point lies outside the grid.
    #[error("spawn point is outside the grid")]
    OutOfBounds { context: ErrorContext },

    /// Too many entities of one kind.
    #[error("{kind} list is full (max: {max})")]
    CapacityExceeded { kind: &'static str, max: usize },
}

impl GameError for SpawnError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            SpawnError::OnWall { context } | SpawnError::OutOfBounds { context } => Some(context),
            SpawnError::CapacityExceeded { .. } => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SpawnError::OnWall { .. } => "SPAWN_ON_WALL",
            SpawnError::OutOfBounds { .. } => "SPAWN_OUT_OF_BOUNDS",
            SpawnError::CapacityExceeded { .. } => "SPAWN_CAPACITY_EXCEEDED",
        }
    }
}

/// The world could not be encoded for fingerprinting.
#[cfg(feature = "serde")]
#[derive(Debug, thiserror::Error)]
#[error("world snapshot could not be serialized: {0}")]
pub struct FingerprintError(#[from] pub bincode::Error);

#[cfg(feature = "serde")]
impl GameError for FingerprintError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        "WORLD_FINGERPRINT_FAILED"
    }
}

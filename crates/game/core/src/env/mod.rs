//! Read-only level data handed to each simulation step.
//!
//! The grid is optional: a world without one still ticks, but agents stay put
//! in Patrol and line-of-sight checks fail. [`SimEnv`] bundles the grid with the
//! injected [`SimConfig`] so no step reads global state.
mod error;
mod map;
mod rng;

pub use error::{GridError, OracleError};
pub use map::{MapDimensions, MapOracle, TerrainKind, TileGrid};
pub use rng::{PcgRng, compute_seed};

use crate::config::SimConfig;

/// Borrowed view of everything a tick reads but never writes.
#[derive(Clone, Copy, Debug)]
pub struct SimEnv<'a> {
    grid: Option<&'a TileGrid>,
    config: &'a SimConfig,
}

impl<'a> SimEnv<'a> {
    pub fn new(grid: Option<&'a TileGrid>, config: &'a SimConfig) -> Self {
        Self { grid, config }
    }

    pub fn with_grid(grid: &'a TileGrid, config: &'a SimConfig) -> Self {
        Self::new(Some(grid), config)
    }

    pub fn without_grid(config: &'a SimConfig) -> Self {
        Self::new(None, config)
    }

    /// Returns the level grid, or an error if none was supplied.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::MapNotAvailable` if no grid was provided.
    pub fn grid(&self) -> Result<&'a TileGrid, OracleError> {
        self.grid.ok_or(OracleError::MapNotAvailable)
    }

    pub fn has_grid(&self) -> bool {
        self.grid.is_some()
    }

    pub fn config(&self) -> &'a SimConfig {
        self.config
    }

    /// Shorthand for the injected per-tick trace flag.
    pub fn tracing_enabled(&self) -> bool {
        self.config.debug_trace
    }
}

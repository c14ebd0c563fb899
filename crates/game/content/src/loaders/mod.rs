//! Content loaders for reading level data from files.
//!
//! Grids and scenarios are RON, tuning is TOML. [`ContentFactory`] ties them
//! together into a ready-to-run [`Level`].

pub mod config;
pub mod factory;
pub mod grid;
pub mod scenario;

pub use config::ConfigLoader;
pub use factory::{ActorRoute, ContentFactory, Level};
pub use grid::GridLoader;
pub use scenario::{ActorSpawn, AgentSpawn, ScenarioLoader, ScenarioSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

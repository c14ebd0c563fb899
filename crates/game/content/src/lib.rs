//! Data-driven level content and loaders.
//!
//! This crate reads the files a host needs to start a simulation:
//! - Tile grids (data-driven via RON)
//! - Scenario spawn lists with scripted actor routes (data-driven via RON)
//! - Simulation tuning (data-driven via TOML)
//!
//! Content is turned into a [`prowl_core::World`] plus the read-only grid and
//! never appears in simulation state beyond the spawned entities.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ActorRoute, ActorSpawn, AgentSpawn, ConfigLoader, ContentFactory, GridLoader, Level,
    LoadResult, ScenarioLoader, ScenarioSpec,
};

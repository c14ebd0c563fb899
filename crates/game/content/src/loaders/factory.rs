//! Content factory for building a runnable level from data files.

use std::path::{Path, PathBuf};

use anyhow::Context;
use glam::Vec2;
use prowl_core::{ActorId, SimConfig, TileGrid, Weapon, World};

use crate::loaders::{ConfigLoader, GridLoader, LoadResult, ScenarioLoader, ScenarioSpec};

/// Content factory that loads all level content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── grids/
/// │   └── arena.ron
/// └── scenarios/
///     └── skirmish.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

/// A scenario resolved into a grid, a populated world and actor scripts.
#[derive(Debug, Clone)]
pub struct Level {
    pub grid: TileGrid,
    pub world: World,
    pub routes: Vec<ActorRoute>,
}

/// Waypoints (tile centers) an actor walks in a loop.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorRoute {
    pub actor: ActorId,
    pub waypoints: Vec<Vec2>,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load tuning from `config.toml`, or defaults when the file is absent.
    pub fn load_config(&self) -> LoadResult<SimConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(SimConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load a grid from `grids/{name}.ron`.
    pub fn load_grid(&self, name: &str) -> LoadResult<TileGrid> {
        let path = self.data_dir.join("grids").join(format!("{}.ron", name));
        GridLoader::load(&path)
    }

    /// Load a scenario from `scenarios/{name}.ron`.
    pub fn load_scenario(&self, name: &str) -> LoadResult<ScenarioSpec> {
        let path = self.data_dir.join("scenarios").join(format!("{}.ron", name));
        ScenarioLoader::load(&path)
    }

    /// Load scenario `name` and its grid, then spawn everything it lists.
    ///
    /// The world seed is the scenario's seed if it has one, else `config.seed`.
    pub fn build_world(&self, name: &str, config: &SimConfig) -> LoadResult<Level> {
        let spec = self.load_scenario(name)?;
        let grid = self.load_grid(&spec.grid)?;
        Self::assemble(&spec, grid, config)
            .with_context(|| format!("Failed to build scenario '{}'", name))
    }

    /// Spawns the entities of `spec` onto `grid`.
    pub fn assemble(spec: &ScenarioSpec, grid: TileGrid, config: &SimConfig) -> LoadResult<Level> {
        let seed = spec.seed.unwrap_or(config.seed);
        let mut world = World::new(seed);

        for (index, spawn) in spec.agents.iter().enumerate() {
            let position = grid.tile_center(spawn.tile_pos());
            let id = world
                .spawn_agent(spawn.archetype, position, Some(&grid))
                .with_context(|| format!("agent #{} at {:?}", index, spawn.tile))?;
            if let (Some((x, y)), Some(agent)) = (spawn.facing, world.agent_mut(id)) {
                agent.set_facing(Vec2::new(x, y));
            }
        }

        let mut routes = Vec::new();
        for (index, spawn) in spec.actors.iter().enumerate() {
            let position = grid.tile_center(spawn.tile_pos());
            let health = spawn.health.unwrap_or(config.actor.max_health);
            let id = world
                .spawn_actor(position, health, Some(&grid))
                .with_context(|| format!("actor #{} at {:?}", index, spawn.tile))?;
            if let Some(actor) = world.actor_mut(id) {
                if let Some((x, y)) = spawn.facing {
                    actor.set_facing(Vec2::new(x, y));
                }
                actor.weapon = spawn.weapon.map(Weapon::new);
            }
            if !spawn.route.is_empty() {
                let waypoints = spawn.route_tiles().map(|tile| grid.tile_center(tile)).collect();
                routes.push(ActorRoute { actor: id, waypoints });
            }
        }

        tracing::info!(
            seed,
            agents = world.agents().len(),
            actors = world.actors().len(),
            "level assembled"
        );
        Ok(Level { grid, world, routes })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

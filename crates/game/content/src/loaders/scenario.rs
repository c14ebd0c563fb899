//! Scenario loader.
//!
//! A scenario names the grid it is played on and lists the agents and actors
//! to spawn, all placed by tile coordinates.

use std::path::Path;

use prowl_core::{Archetype, TilePos, WeaponKind};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Scenario file contents.
///
/// ```ron
/// (
///     grid: "arena",
///     seed: Some(7),
///     agents: [
///         (archetype: leaper, tile: (4, 2)),
///         (archetype: flamer, tile: (9, 6)),
///     ],
///     actors: [
///         (tile: (1, 1), weapon: Some(freezer), route: [(1, 1), (8, 1)]),
///     ],
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    /// Grid file name under `grids/`, without the `.ron` extension.
    pub grid: String,
    /// Overrides the tuning seed when present.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub agents: Vec<AgentSpawn>,
    #[serde(default)]
    pub actors: Vec<ActorSpawn>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSpawn {
    pub archetype: Archetype,
    pub tile: (i32, i32),
    /// Initial facing; agents face down the grid (+y) otherwise.
    #[serde(default)]
    pub facing: Option<(f32, f32)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorSpawn {
    pub tile: (i32, i32),
    #[serde(default)]
    pub facing: Option<(f32, f32)>,
    #[serde(default)]
    pub weapon: Option<WeaponKind>,
    /// Overrides `actor.max_health` from the tuning file.
    #[serde(default)]
    pub health: Option<u32>,
    /// Tiles visited in a loop by the host's scripted movement.
    #[serde(default)]
    pub route: Vec<(i32, i32)>,
}

impl AgentSpawn {
    pub fn tile_pos(&self) -> TilePos {
        TilePos::new(self.tile.0, self.tile.1)
    }
}

impl ActorSpawn {
    pub fn tile_pos(&self) -> TilePos {
        TilePos::new(self.tile.0, self.tile.1)
    }

    pub fn route_tiles(&self) -> impl Iterator<Item = TilePos> + '_ {
        self.route.iter().map(|&(x, y)| TilePos::new(x, y))
    }
}

/// Loader for scenario files from RON.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<ScenarioSpec> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid scenario {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<ScenarioSpec> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_default() {
        let spec = ScenarioLoader::parse(
            r#"(
                grid: "hall",
                agents: [(archetype: shocker, tile: (2, 3))],
                actors: [(tile: (0, 0))],
            )"#,
        )
        .unwrap();

        assert_eq!(spec.grid, "hall");
        assert_eq!(spec.seed, None);
        assert_eq!(spec.agents[0].archetype, Archetype::Shocker);
        assert_eq!(spec.agents[0].tile_pos(), TilePos::new(2, 3));
        assert_eq!(spec.actors[0].weapon, None);
        assert!(spec.actors[0].route.is_empty());
    }

    #[test]
    fn full_actor_entry() {
        let spec = ScenarioLoader::parse(
            r#"(
                grid: "hall",
                seed: Some(3),
                actors: [(
                    tile: (1, 1),
                    facing: Some((1.0, 0.0)),
                    weapon: Some(extinguisher),
                    health: Some(5),
                    route: [(1, 1), (4, 1)],
                )],
            )"#,
        )
        .unwrap();

        let actor = &spec.actors[0];
        assert_eq!(spec.seed, Some(3));
        assert_eq!(actor.weapon, Some(WeaponKind::Extinguisher));
        assert_eq!(actor.health, Some(5));
        assert_eq!(
            actor.route_tiles().collect::<Vec<_>>(),
            [TilePos::new(1, 1), TilePos::new(4, 1)]
        );
    }

    #[test]
    fn unknown_archetype_is_an_error() {
        let err = ScenarioLoader::parse(r#"(grid: "hall", agents: [(archetype: dragon, tile: (0, 0))])"#)
            .unwrap_err();
        assert!(err.to_string().contains("scenario"));
    }
}

//! Mutable simulation snapshot.
//!
//! [`World`] owns every agent and actor plus the tick counter. The grid and
//! tuning are not part of it: they are read-only inputs supplied through
//! [`SimEnv`](crate::env::SimEnv) on each step.
mod error;
pub mod types;

use glam::Vec2;

pub use error::SpawnError;
#[cfg(feature = "serde")]
pub use error::FingerprintError;
pub use types::{
    Actor, ActorId, Agent, AgentId, AgentState, Archetype, AttackPhase, Countdown, Countdowns,
    DisabledPhase, Exposure, ExposureTable, FlamePhase, LeapPhase, ResourceMeter, ShockPhase,
    StateKind, StruckActors, Tick, TilePos, Wander, Weapon, WeaponKind,
};

use crate::config::SimConfig;
use crate::env::{MapOracle, TileGrid};
use crate::error::ErrorContext;

/// Canonical snapshot of everything a tick mutates.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct World {
    /// Base seed for per-agent random streams. Set once at creation.
    pub seed: u64,
    pub tick: Tick,
    agents: Vec<Agent>,
    actors: Vec<Actor>,
    /// Sequential id allocators; ids are never reused.
    next_agent_id: u32,
    next_actor_id: u32,
}

impl World {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|agent| agent.id() == id)
    }

    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.iter_mut().find(|agent| agent.id() == id)
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|actor| actor.id == id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|actor| actor.id == id)
    }

    /// Split borrow used by the engine step.
    pub(crate) fn parts_mut(&mut self) -> (&mut [Agent], &mut [Actor]) {
        (&mut self.agents, &mut self.actors)
    }

    /// Places a new agent in Patrol at `position`.
    ///
    /// When a grid is supplied the position must lie on one of its floor tiles.
    ///
    /// # Errors
    ///
    /// Returns [`SpawnError`] for wall or out-of-grid positions, or when the
    /// world already holds [`SimConfig::MAX_AGENTS`] agents.
    pub fn spawn_agent(
        &mut self,
        archetype: Archetype,
        position: Vec2,
        grid: Option<&TileGrid>,
    ) -> Result<AgentId, SpawnError> {
        if self.agents.len() >= SimConfig::MAX_AGENTS {
            return Err(SpawnError::CapacityExceeded {
                kind: "agent",
                max: SimConfig::MAX_AGENTS,
            });
        }
        let id = AgentId(self.next_agent_id);
        if let Some(grid) = grid {
            check_placement(grid, position, self.tick).map_err(|err| match err {
                SpawnError::OnWall { context } => SpawnError::OnWall {
                    context: context.with_agent(id),
                },
                SpawnError::OutOfBounds { context } => SpawnError::OutOfBounds {
                    context: context.with_agent(id),
                },
                other => other,
            })?;
        }

        self.next_agent_id += 1;
        self.agents
            .push(Agent::new(id, archetype, position, self.seed));
        tracing::debug!(%id, %archetype, ?position, "spawned agent");
        Ok(id)
    }

    /// Places a new actor with full health at `position`.
    ///
    /// # Errors
    ///
    /// Same placement rules as [`World::spawn_agent`], capped at
    /// [`SimConfig::MAX_ACTORS`].
    pub fn spawn_actor(
        &mut self,
        position: Vec2,
        max_health: u32,
        grid: Option<&TileGrid>,
    ) -> Result<ActorId, SpawnError> {
        if self.actors.len() >= SimConfig::MAX_ACTORS {
            return Err(SpawnError::CapacityExceeded {
                kind: "actor",
                max: SimConfig::MAX_ACTORS,
            });
        }
        if let Some(grid) = grid {
            check_placement(grid, position, self.tick)?;
        }

        let id = ActorId(self.next_actor_id);
        self.next_actor_id += 1;
        self.actors.push(Actor::new(id, position, max_health));
        tracing::debug!(%id, ?position, "spawned actor");
        Ok(id)
    }

    /// Removes an actor; agents holding it as a target drop it on their next tick.
    pub fn remove_actor(&mut self, id: ActorId) -> Option<Actor> {
        let index = self.actors.iter().position(|actor| actor.id == id)?;
        Some(self.actors.remove(index))
    }

    /// Number of agents that have reached the terminal state.
    pub fn dead_count(&self) -> usize {
        self.agents.iter().filter(|agent| agent.is_dead()).count()
    }
}

fn check_placement(grid: &TileGrid, position: Vec2, tick: Tick) -> Result<(), SpawnError> {
    let tile = grid.world_to_tile(position);
    let context = ErrorContext::new(tick).with_tile(tile);
    if !grid.contains(tile) {
        return Err(SpawnError::OutOfBounds { context });
    }
    if !grid.is_walkable(tile) {
        return Err(SpawnError::OnWall { context });
    }
    Ok(())
}

/// SHA-256 fingerprint of a world snapshot.
///
/// Two runs from the same seed, grid, tuning and inputs produce the same root
/// after every tick.
///
/// Requires the `serde` feature.
///
/// # Errors
///
/// Returns [`FingerprintError`] if the snapshot cannot be encoded; no root is
/// produced in that case.
#[cfg(feature = "serde")]
pub fn compute_world_root(world: &World) -> Result<[u8; 32], FingerprintError> {
    use sha2::{Digest, Sha256};

    // bincode output is deterministic for a given value
    let bytes = bincode::serialize(world)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> TileGrid {
        let rows: [&[u8]; 2] = [&[0, 1], &[0, 0]];
        TileGrid::from_rows(&rows, 32.0, Vec2::ZERO).unwrap()
    }

    #[test]
    fn ids_are_sequential_and_never_reused() {
        let mut world = World::new(1);
        let a = world.spawn_actor(Vec2::new(16.0, 16.0), 3, None).unwrap();
        world.remove_actor(a);
        let b = world.spawn_actor(Vec2::new(16.0, 16.0), 3, None).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_wall_and_outside_spawns() {
        let g = grid();
        let mut world = World::new(1);

        let err = world
            .spawn_agent(Archetype::Leaper, Vec2::new(40.0, 10.0), Some(&g))
            .unwrap_err();
        assert!(matches!(err, SpawnError::OnWall { .. }));
        assert_eq!(
            crate::error::GameError::context(&err).and_then(|c| c.tile),
            Some(TilePos::new(1, 0))
        );

        assert!(matches!(
            world.spawn_actor(Vec2::new(-1.0, 10.0), 3, Some(&g)),
            Err(SpawnError::OutOfBounds { .. })
        ));
        assert!(world.agents().is_empty());
    }

    #[test]
    fn actor_capacity_is_enforced() {
        let mut world = World::new(1);
        for _ in 0..SimConfig::MAX_ACTORS {
            world.spawn_actor(Vec2::ZERO, 1, None).unwrap();
        }
        assert!(matches!(
            world.spawn_actor(Vec2::ZERO, 1, None),
            Err(SpawnError::CapacityExceeded { kind: "actor", .. })
        ));
    }

    #[test]
    fn world_root_is_the_hash_of_the_encoded_snapshot() {
        use sha2::{Digest, Sha256};

        let mut world = World::new(4);
        world.spawn_actor(Vec2::new(16.0, 16.0), 3, None).unwrap();
        let bytes = bincode::serialize(&world).unwrap();
        let expected: [u8; 32] = Sha256::digest(&bytes).into();

        assert_eq!(compute_world_root(&world).unwrap(), expected);
    }

    #[test]
    fn world_root_changes_with_state() {
        let mut world = World::new(9);
        let before = compute_world_root(&world).unwrap();
        world.spawn_agent(Archetype::Flamer, Vec2::ZERO, None).unwrap();
        let after = compute_world_root(&world).unwrap();
        assert_ne!(before, after);
        assert_eq!(after, compute_world_root(&world.clone()).unwrap());
    }
}

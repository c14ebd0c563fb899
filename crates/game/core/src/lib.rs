//! Deterministic agent AI and combat rules for a tile-based arena.
//!
//! `prowl-core` owns the simulation snapshot ([`World`]), the per-agent state
//! machines (patrol, alert, archetype attacks, disabled, dead), vision-cone
//! sensing, grid pathfinding and weapon resolution. It performs no I/O: hosts
//! supply a [`TileGrid`] and [`SimConfig`] through [`SimEnv`] and call
//! [`SimEngine::step`] once per tick. All state mutation flows through the
//! engine, and supporting crates depend on the types re-exported here.
pub mod ai;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod geometry;
pub mod nav;
pub mod sensing;
pub mod state;

pub use ai::{approach, ready_phase};
pub use combat::{WeaponEffect, acquire_target, apply_damage, effect_for, resolve_weapons};
pub use config::{
    ActorTuning, AgentProfile, ConfigError, DurationWindow, FlamerProfile, LeaperProfile,
    MotionTuning, PatrolTuning, SensingProfile, ShockerProfile, SimConfig, WeaponProfile,
    WeaponTable,
};
pub use engine::{DeathMarker, SimEngine, SimEvent, TickReport};
pub use env::{
    GridError, MapDimensions, MapOracle, OracleError, PcgRng, SimEnv, TerrainKind, TileGrid,
    compute_seed,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use geometry::{angle_between, distance, in_cone, line_of_sight, normalize_or_zero, turn_toward};
pub use nav::{PathPlan, find_path, path_to_world, plan_path};
pub use sensing::{detect, run_sensing};
pub use state::{
    Actor, ActorId, Agent, AgentId, AgentState, Archetype, AttackPhase, Countdown, DisabledPhase,
    FlamePhase, LeapPhase, ResourceMeter, ShockPhase, SpawnError, StateKind, Tick, TilePos,
    Wander, Weapon, WeaponKind, World,
};

#[cfg(feature = "serde")]
pub use state::{FingerprintError, compute_world_root};

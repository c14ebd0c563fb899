//! Plain data types that make up the simulation snapshot.
pub mod actor;
pub mod agent;
pub mod common;
pub mod phase;
pub mod timers;
pub mod weapon;

pub use actor::Actor;
pub use agent::{Agent, AgentState, Archetype, StateKind};
pub use common::{ActorId, AgentId, ResourceMeter, Tick, TilePos};
pub use phase::{
    AttackPhase, DisabledPhase, Exposure, ExposureTable, FlamePhase, LeapPhase, ShockPhase,
    StruckActors, Wander,
};
pub use timers::{Countdown, Countdowns};
pub use weapon::{Weapon, WeaponKind};

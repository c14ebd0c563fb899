use glam::Vec2;

use super::common::{ActorId, AgentId, TilePos};
use super::phase::{AttackPhase, DisabledPhase, Wander};
use super::timers::{Countdown, Countdowns};
use crate::env::PcgRng;

/// Concrete enemy behavior profiles.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Archetype {
    /// Fast melee: leap, strike once, recuperate.
    Leaper,
    /// Charges in place, then releases an expanding burst.
    Shocker,
    /// Holds a forward cone of continuous damage.
    Flamer,
}

/// Top-level state of an agent, with the phase data that belongs to it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentState {
    Patrol(Wander),
    Alert,
    Attacking(AttackPhase),
    Disabled(DisabledPhase),
    Dead,
}

impl AgentState {
    pub fn kind(&self) -> StateKind {
        match self {
            AgentState::Patrol(_) => StateKind::Patrol,
            AgentState::Alert => StateKind::Alert,
            AgentState::Attacking(_) => StateKind::Attacking,
            AgentState::Disabled(_) => StateKind::Disabled,
            AgentState::Dead => StateKind::Dead,
        }
    }

    /// Initial patrol state; the first tick rolls a real sub-behavior.
    pub const fn patrol() -> Self {
        AgentState::Patrol(Wander::Resting)
    }
}

/// Payload-free discriminant of [`AgentState`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateKind {
    Patrol,
    Alert,
    Attacking,
    Disabled,
    Dead,
}

/// Enemy entity driven by the state machine.
///
/// Identity, archetype and spawn position come from the spawner; everything
/// else is runtime state advanced once per tick.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    id: AgentId,
    archetype: Archetype,
    pub(crate) state: AgentState,
    pub(crate) position: Vec2,
    pub(crate) facing: Vec2,
    pub(crate) velocity: Vec2,
    /// Multiplier on profile speeds, lowered by slowing hits.
    pub(crate) speed_factor: f32,
    /// Actor currently pursued or attacked.
    pub(crate) target: Option<ActorId>,
    /// Last known position of the pursued actor, or an externally set location.
    pub(crate) alert_target: Option<Vec2>,
    /// Chase route computed this tick.
    pub(crate) path: Vec<TilePos>,
    pub(crate) timers: Countdowns,
    pub(crate) status_hits: u32,
    pub(crate) rng: PcgRng,
}

impl Agent {
    pub fn new(id: AgentId, archetype: Archetype, position: Vec2, world_seed: u64) -> Self {
        Self {
            id,
            archetype,
            state: AgentState::patrol(),
            position,
            facing: Vec2::Y,
            velocity: Vec2::ZERO,
            speed_factor: 1.0,
            target: None,
            alert_target: None,
            path: Vec::new(),
            timers: Countdowns::default(),
            status_hits: 0,
            rng: PcgRng::for_agent(world_seed, id.0),
        }
    }

    pub fn with_facing(mut self, facing: Vec2) -> Self {
        self.set_facing(facing);
        self
    }

    /// Points the agent along `facing`; a zero vector is ignored.
    pub fn set_facing(&mut self, facing: Vec2) {
        let facing = facing.normalize_or_zero();
        if facing != Vec2::ZERO {
            self.facing = facing;
        }
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    pub fn kind(&self) -> StateKind {
        self.state.kind()
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn facing(&self) -> Vec2 {
        self.facing
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn speed_factor(&self) -> f32 {
        self.speed_factor
    }

    pub fn target(&self) -> Option<ActorId> {
        self.target
    }

    pub fn alert_target(&self) -> Option<Vec2> {
        self.alert_target
    }

    /// Route followed during the last chase tick.
    pub fn path(&self) -> &[TilePos] {
        &self.path
    }

    pub fn countdown(&self, countdown: Countdown) -> f32 {
        self.timers.get(countdown)
    }

    pub fn status_hits(&self) -> u32 {
        self.status_hits
    }

    pub fn is_dead(&self) -> bool {
        matches!(self.state, AgentState::Dead)
    }

    /// Moves to `next`, dropping everything that belonged to the old state:
    /// the phase countdown, the chase route and any momentum.
    pub(crate) fn transition(&mut self, next: AgentState) {
        self.timers.clear(Countdown::Phase);
        self.path.clear();
        self.velocity = Vec2::ZERO;
        self.state = next;
    }

    /// Returns to Patrol and forgets both the target and the alert location.
    pub(crate) fn revert_to_patrol(&mut self) {
        self.target = None;
        self.alert_target = None;
        self.timers.clear(Countdown::Behavior);
        self.transition(AgentState::patrol());
    }

    /// Drops back to Alert, keeping the last known target position.
    pub(crate) fn revert_to_alert(&mut self) {
        self.target = None;
        self.transition(AgentState::Alert);
    }
}

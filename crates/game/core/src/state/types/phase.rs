//! Sub-state payloads carried by [`AgentState`](super::AgentState) variants.
//!
//! Phase data only exists inside the state that owns it, so leaving Attacking
//! or Disabled drops it along with the variant.

use arrayvec::ArrayVec;
use glam::Vec2;

use super::common::{ActorId, TilePos};
use crate::config::SimConfig;

/// Patrol sub-behavior, re-rolled whenever the behavior countdown lapses.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Wander {
    /// Walking to the center of an adjacent floor tile.
    Moving { destination: TilePos },
    /// Standing still while turning toward `heading`.
    Looking { heading: Vec2 },
    Resting,
}

/// Archetype-specific choreography of an attack in progress.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackPhase {
    Leap(LeapPhase),
    Shock(ShockPhase),
    Flame(FlamePhase),
}

impl AttackPhase {
    pub fn name(&self) -> &'static str {
        match self {
            AttackPhase::Leap(phase) => phase.name(),
            AttackPhase::Shock(phase) => phase.name(),
            AttackPhase::Flame(phase) => phase.name(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LeapPhase {
    /// Facing the target and waiting for the cooldown.
    Ready,
    /// Flying along `heading`, fixed at leap start.
    Leaping {
        heading: Vec2,
        /// Distance still to cover.
        remaining: f32,
        /// Latched after the single contact hit of this leap.
        struck: bool,
    },
    /// Immobile pause after landing.
    Recuperating,
}

impl LeapPhase {
    pub fn name(&self) -> &'static str {
        match self {
            LeapPhase::Ready => "ready",
            LeapPhase::Leaping { .. } => "leaping",
            LeapPhase::Recuperating => "recuperating",
        }
    }
}

pub type StruckActors = ArrayVec<ActorId, { SimConfig::MAX_ACTORS }>;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShockPhase {
    Ready,
    /// Standing still and re-aiming until the charge countdown lapses.
    Charging,
    /// Expanding ring; every actor in `struck` has already been hit by it.
    Bursting { struck: StruckActors },
}

impl ShockPhase {
    pub fn name(&self) -> &'static str {
        match self {
            ShockPhase::Ready => "ready",
            ShockPhase::Charging => "charging",
            ShockPhase::Bursting { .. } => "bursting",
        }
    }
}

/// Time an actor has spent inside a hot cone since its last hit.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Exposure {
    pub actor: ActorId,
    pub seconds: f32,
}

pub type ExposureTable = ArrayVec<Exposure, { SimConfig::MAX_ACTORS }>;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlamePhase {
    Ready,
    /// Cone is hot until the attack cooldown lapses.
    Burning {
        /// Seconds since the cone opened; drives its length.
        elapsed: f32,
        exposure: ExposureTable,
    },
}

impl FlamePhase {
    pub fn name(&self) -> &'static str {
        match self {
            FlamePhase::Ready => "ready",
            FlamePhase::Burning { .. } => "burning",
        }
    }
}

/// Timed sub-phases of the Disabled state.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr, strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DisabledPhase {
    /// Full stun from a disabling hit.
    Stunned,
    /// Inert period after being doused.
    Doused,
    /// Short recovery after `Doused`.
    Reigniting,
}

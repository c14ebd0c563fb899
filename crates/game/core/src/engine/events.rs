use glam::Vec2;

use crate::combat::WeaponEffect;
use crate::state::{ActorId, AgentId, Archetype, Tick, WeaponKind};

/// What the host should leave behind where an agent died.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeathMarker {
    /// A permanent environmental marker (frozen remains).
    Persistent,
    /// The body fades out over `seconds`.
    FadeOut { seconds: f32 },
}

/// Fire-and-forget signals for the host. Nothing in the core reads them back.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimEvent {
    /// An agent entered Alert, either by spotting `actor` or by an external call.
    AgentAlerted {
        agent: AgentId,
        actor: Option<ActorId>,
        position: Vec2,
    },
    AgentDied {
        agent: AgentId,
        position: Vec2,
        archetype: Archetype,
        marker: DeathMarker,
    },
    ActorDamaged {
        actor: ActorId,
        agent: AgentId,
        amount: u32,
        remaining: u32,
    },
    ActorDowned {
        actor: ActorId,
    },
    /// Visual request for a shot; `effect` is what the hit did to the agent.
    WeaponDischarged {
        actor: ActorId,
        agent: AgentId,
        weapon: WeaponKind,
        effect: WeaponEffect,
        from: Vec2,
        to: Vec2,
    },
}

/// Everything that happened during one [`SimEngine::step`](super::SimEngine::step).
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickReport {
    pub tick: Tick,
    pub events: Vec<SimEvent>,
}

impl TickReport {
    pub fn deaths(&self) -> impl Iterator<Item = &SimEvent> {
        self.events
            .iter()
            .filter(|event| matches!(event, SimEvent::AgentDied { .. }))
    }

    pub fn damage_to(&self, actor: ActorId) -> u32 {
        self.events
            .iter()
            .filter_map(|event| match event {
                SimEvent::ActorDamaged {
                    actor: hit, amount, ..
                } if *hit == actor => Some(*amount),
                _ => None,
            })
            .sum()
    }
}

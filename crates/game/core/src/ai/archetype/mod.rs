//! Attack choreography per archetype.
//!
//! Every Attacking tick first re-validates the target in a fixed order:
//! missing or downed target, abandon distance, disengage range. Only then
//! does the archetype's phase machine run. Each phase machine takes its
//! phase by value and answers with an [`AttackStep`] that this module applies,
//! so phase-local data and the phase countdown are always reset together.

mod flame;
mod leap;
mod shock;

use glam::Vec2;

use crate::config::SimConfig;
use crate::engine::SimEvent;
use crate::env::TileGrid;
use crate::geometry::distance;
use crate::state::{
    Actor, Agent, AgentState, Archetype, AttackPhase, Countdown, FlamePhase, LeapPhase,
    ShockPhase,
};

/// Phase an archetype starts in when it enters Attacking.
pub fn ready_phase(archetype: Archetype) -> AttackPhase {
    match archetype {
        Archetype::Leaper => AttackPhase::Leap(LeapPhase::Ready),
        Archetype::Shocker => AttackPhase::Shock(ShockPhase::Ready),
        Archetype::Flamer => AttackPhase::Flame(FlamePhase::Ready),
    }
}

/// What a phase machine wants to happen next.
#[derive(Debug)]
pub(crate) enum AttackStep {
    /// Stay in Attacking with updated phase data; countdowns keep running.
    Hold(AttackPhase),
    /// Enter a new phase with a fresh phase countdown.
    Enter(AttackPhase, f32),
    /// Attack cycle over; back to Alert, optionally restarting the cooldown.
    Finish { restart_cooldown: bool },
    /// Target moved out of attack range before the attack began.
    Pursue,
}

/// Everything a phase machine may read or damage during one tick.
pub(crate) struct AttackContext<'a> {
    pub actors: &'a mut [Actor],
    /// Index of the validated target in `actors`.
    pub target: usize,
    pub grid: &'a TileGrid,
    pub config: &'a SimConfig,
    pub dt: f32,
    pub events: &'a mut Vec<SimEvent>,
}

impl AttackContext<'_> {
    pub fn target_position(&self) -> Vec2 {
        self.actors[self.target].position
    }
}

pub(super) fn update(
    agent: &mut Agent,
    dt: f32,
    actors: &mut [Actor],
    grid: &TileGrid,
    config: &SimConfig,
    events: &mut Vec<SimEvent>,
) {
    let Some(target) = validate_target(agent, actors, config) else {
        return;
    };

    let AgentState::Attacking(phase) = core::mem::replace(&mut agent.state, AgentState::Alert)
    else {
        return;
    };
    let before = phase.name();

    let mut ctx = AttackContext {
        actors,
        target,
        grid,
        config,
        dt,
        events,
    };
    let step = match phase {
        AttackPhase::Leap(phase) => leap::update(agent, phase, &mut ctx),
        AttackPhase::Shock(phase) => shock::update(agent, phase, &mut ctx),
        AttackPhase::Flame(phase) => flame::update(agent, phase, &mut ctx),
    };

    match step {
        AttackStep::Hold(phase) => agent.state = AgentState::Attacking(phase),
        AttackStep::Enter(phase, seconds) => {
            tracing::debug!(agent = %agent.id(), from = before, to = phase.name(), "attack phase");
            agent.transition(AgentState::Attacking(phase));
            agent.timers.set(Countdown::Phase, seconds);
        }
        AttackStep::Finish { restart_cooldown } => {
            tracing::debug!(agent = %agent.id(), from = before, "attack finished");
            if restart_cooldown {
                let cooldown = config.profile(agent.archetype()).attack_cooldown;
                agent.timers.set(Countdown::AttackCooldown, cooldown);
            }
            agent.transition(AgentState::Alert);
        }
        AttackStep::Pursue => agent.transition(AgentState::Alert),
    }
}

/// Applies the fallbacks that take priority over any phase.
///
/// Returns the target's index when the attack may continue.
fn validate_target(agent: &mut Agent, actors: &[Actor], config: &SimConfig) -> Option<usize> {
    let found = agent
        .target
        .and_then(|id| actors.iter().position(|actor| actor.id == id));
    let Some(index) = found.filter(|&i| !actors[i].is_downed()) else {
        tracing::debug!(agent = %agent.id(), target = ?agent.target, "target lost mid-attack");
        agent.revert_to_alert();
        return None;
    };

    let actor = &actors[index];
    let range = distance(agent.position, actor.position);
    if range >= config.abandon_distance {
        tracing::debug!(agent = %agent.id(), range, "abandoned attack");
        agent.revert_to_patrol();
        return None;
    }
    if range > config.profile(agent.archetype()).disengage_range {
        tracing::debug!(agent = %agent.id(), range, "target out of range");
        agent.revert_to_alert();
        return None;
    }

    agent.alert_target = Some(actor.position);
    Some(index)
}

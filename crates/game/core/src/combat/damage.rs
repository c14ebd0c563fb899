use crate::config::ActorTuning;
use crate::engine::SimEvent;
use crate::state::{Actor, AgentId};

/// Deals `amount` damage from `source` to `actor`, honoring its
/// invulnerability window.
///
/// Emits `ActorDamaged` (and `ActorDowned` when health runs out) only when the
/// hit actually lands. Returns whether it did.
pub fn apply_damage(
    actor: &mut Actor,
    source: AgentId,
    amount: u32,
    tuning: &ActorTuning,
    events: &mut Vec<SimEvent>,
) -> bool {
    if !actor.take_damage(amount, tuning.invulnerability_secs) {
        return false;
    }
    tracing::debug!(actor = %actor.id, agent = %source, amount, hp = actor.health.current, "actor hit");
    events.push(SimEvent::ActorDamaged {
        actor: actor.id,
        agent: source,
        amount,
        remaining: actor.health.current,
    });
    if actor.is_downed() {
        events.push(SimEvent::ActorDowned { actor: actor.id });
    }
    true
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::state::ActorId;

    #[test]
    fn reports_hit_and_downing() {
        let tuning = ActorTuning {
            max_health: 1,
            invulnerability_secs: 0.5,
        };
        let mut actor = Actor::new(ActorId(2), Vec2::ZERO, 1);
        let mut events = Vec::new();

        assert!(apply_damage(&mut actor, AgentId(0), 1, &tuning, &mut events));
        assert!(!apply_damage(&mut actor, AgentId(0), 1, &tuning, &mut events));
        assert_eq!(
            events,
            vec![
                SimEvent::ActorDamaged {
                    actor: ActorId(2),
                    agent: AgentId(0),
                    amount: 1,
                    remaining: 0
                },
                SimEvent::ActorDowned { actor: ActorId(2) },
            ]
        );
    }
}

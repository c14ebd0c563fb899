use glam::Vec2;

use crate::config::SimConfig;
use crate::state::{Agent, AgentState, Countdown, DisabledPhase};

/// Holds the agent still until its disabled phases run out, then returns it
/// to Patrol.
pub(super) fn update(agent: &mut Agent, phase: DisabledPhase, config: &SimConfig) {
    agent.velocity = Vec2::ZERO;
    if !agent.timers.is_elapsed(Countdown::Phase) {
        return;
    }

    match phase {
        DisabledPhase::Doused if config.flamer.reignite_secs > 0.0 => {
            tracing::debug!(agent = %agent.id(), "reigniting");
            agent.transition(AgentState::Disabled(DisabledPhase::Reigniting));
            agent.timers.set(Countdown::Phase, config.flamer.reignite_secs);
        }
        DisabledPhase::Stunned | DisabledPhase::Doused | DisabledPhase::Reigniting => {
            tracing::debug!(agent = %agent.id(), %phase, "recovered");
            agent.revert_to_patrol();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::WeaponEffect;
    use crate::env::{SimEnv, TileGrid};
    use crate::state::{Actor, ActorId, AgentId, Archetype, AttackPhase, ShockPhase, StateKind};

    #[test]
    fn stun_wears_off_after_its_duration() {
        let rows = vec![vec![0u8; 8]; 8];
        let grid = TileGrid::from_rows(&rows, 32.0, Vec2::ZERO).unwrap();
        let config = SimConfig::default();
        let env = SimEnv::with_grid(&grid, &config);

        let start = Vec2::new(112.0, 112.0);
        let mut agent = Agent::new(AgentId(4), Archetype::Shocker, start, 2);
        agent.state = AgentState::Attacking(AttackPhase::Shock(ShockPhase::Charging));
        agent.target = Some(ActorId(0));
        agent.timers.set(Countdown::Phase, config.shocker.charge_secs);
        let mut actors = [Actor::new(ActorId(0), start + Vec2::new(40.0, 0.0), 3)];

        assert_eq!(agent.apply_effect(WeaponEffect::Stun, &config), None);
        assert_eq!(agent.target(), None);

        // stun_secs is 2.5: four half-second ticks leave it running
        let dt = 0.5;
        for _ in 0..4 {
            let mut events = Vec::new();
            agent.advance(dt, &mut actors, &env, &mut events);
            assert_eq!(agent.state(), &AgentState::Disabled(DisabledPhase::Stunned));
            assert_eq!(agent.position(), start);
            assert!(events.is_empty());
        }
        assert_eq!(agent.countdown(Countdown::Phase), 0.5);

        agent.advance(dt, &mut actors, &env, &mut Vec::new());

        assert_eq!(agent.kind(), StateKind::Patrol);
        assert_eq!(agent.target(), None);
        assert_eq!(agent.alert_target(), None);
        assert_eq!(agent.countdown(Countdown::Phase), 0.0);
        assert_eq!(actors[0].health.current, 3);
    }
}

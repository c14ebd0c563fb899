//! Per-agent state machines.
//!
//! [`Agent::advance`] is the single per-tick entry point: it runs the agent's
//! countdowns, then dispatches on the current [`AgentState`]. Sensing (the
//! Patrol → Alert promotion) and weapon hits happen outside this module, in
//! [`crate::sensing`] and [`crate::combat`].
mod alert;
mod archetype;
mod disabled;
mod motion;
mod patrol;

pub use archetype::ready_phase;
pub use motion::approach;

use glam::Vec2;

use crate::engine::SimEvent;
use crate::env::SimEnv;
use crate::state::types::timers::sanitize;
use crate::state::{Actor, Agent, AgentState};

impl Agent {
    /// Advances this agent by `dt` seconds.
    ///
    /// Without a grid the agent cannot path or see, so anything other than
    /// Patrol falls back to Patrol and the agent stays put.
    pub fn advance(
        &mut self,
        dt: f32,
        actors: &mut [Actor],
        env: &SimEnv<'_>,
        events: &mut Vec<SimEvent>,
    ) {
        if self.is_dead() {
            return;
        }
        let dt = sanitize(dt);
        self.timers.tick(dt);
        let config = env.config();

        let grid = match env.grid() {
            Ok(grid) => grid,
            Err(err) => {
                if !matches!(self.state, AgentState::Patrol(_)) {
                    tracing::warn!(agent = %self.id(), error = %err, "no grid, reverting to patrol");
                    self.revert_to_patrol();
                }
                self.velocity = Vec2::ZERO;
                return;
            }
        };

        match self.state {
            AgentState::Patrol(_) => patrol::update(self, dt, grid, config),
            AgentState::Alert => alert::update(self, dt, actors, grid, config),
            AgentState::Attacking(_) => archetype::update(self, dt, actors, grid, config, events),
            AgentState::Disabled(phase) => disabled::update(self, phase, config),
            AgentState::Dead => {}
        }
    }

    /// Sends a Patrol or Alert agent to investigate `position`.
    ///
    /// Attacking, Disabled and Dead agents ignore the call; returns whether the
    /// alert was taken.
    pub fn alert(&mut self, position: Vec2) -> bool {
        match self.state {
            AgentState::Patrol(_) => {
                self.target = None;
                self.alert_target = Some(position);
                self.transition(AgentState::Alert);
            }
            AgentState::Alert => {
                self.target = None;
                self.alert_target = Some(position);
            }
            AgentState::Attacking(_) | AgentState::Disabled(_) | AgentState::Dead => return false,
        }
        tracing::debug!(agent = %self.id(), ?position, "alerted");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::env::TileGrid;
    use crate::state::{ActorId, AgentId, Archetype, Countdown, DisabledPhase, StateKind};

    fn grid() -> TileGrid {
        let rows = vec![vec![0u8; 8]; 8];
        TileGrid::from_rows(&rows, 32.0, Vec2::ZERO).unwrap()
    }

    #[test]
    fn missing_grid_forces_stationary_patrol() {
        let config = SimConfig::default();
        let env = SimEnv::without_grid(&config);
        let mut agent = Agent::new(AgentId(0), Archetype::Leaper, Vec2::new(48.0, 48.0), 1);
        agent.state = AgentState::Alert;
        agent.target = Some(ActorId(0));
        agent.velocity = Vec2::new(10.0, 0.0);
        let mut actors = [Actor::new(ActorId(0), Vec2::new(60.0, 48.0), 3)];

        for _ in 0..10 {
            agent.advance(0.1, &mut actors, &env, &mut Vec::new());
        }

        assert_eq!(agent.kind(), StateKind::Patrol);
        assert_eq!(agent.target(), None);
        assert_eq!(agent.position(), Vec2::new(48.0, 48.0));
    }

    #[test]
    fn dead_agents_do_not_advance() {
        let grid = grid();
        let config = SimConfig::default();
        let env = SimEnv::with_grid(&grid, &config);
        let mut agent = Agent::new(AgentId(0), Archetype::Shocker, Vec2::new(48.0, 48.0), 1);
        agent.state = AgentState::Dead;
        agent.timers.set(Countdown::Behavior, 1.0);

        agent.advance(0.5, &mut [], &env, &mut Vec::new());

        assert!(agent.is_dead());
        assert_eq!(agent.countdown(Countdown::Behavior), 1.0);
    }

    #[test]
    fn doused_flamer_reignites_then_patrols() {
        let grid = grid();
        let config = SimConfig::default();
        let env = SimEnv::with_grid(&grid, &config);
        let mut agent = Agent::new(AgentId(0), Archetype::Flamer, Vec2::new(48.0, 48.0), 1);
        agent.transition(AgentState::Disabled(DisabledPhase::Doused));
        agent.timers.set(Countdown::Phase, config.flamer.douse_secs);

        let mut seen = vec![agent.kind()];
        let mut phases = vec![DisabledPhase::Doused];
        for _ in 0..100 {
            agent.advance(0.1, &mut [], &env, &mut Vec::new());
            if let AgentState::Disabled(phase) = agent.state {
                if phases.last() != Some(&phase) {
                    phases.push(phase);
                }
            }
            if seen.last() != Some(&agent.kind()) {
                seen.push(agent.kind());
            }
        }

        assert_eq!(phases, [DisabledPhase::Doused, DisabledPhase::Reigniting]);
        assert_eq!(seen, [StateKind::Disabled, StateKind::Patrol]);
    }

    #[test]
    fn external_alert_only_reaches_idle_agents() {
        let mut patrolling = Agent::new(AgentId(0), Archetype::Leaper, Vec2::ZERO, 1);
        assert!(patrolling.alert(Vec2::new(64.0, 0.0)));
        assert_eq!(patrolling.kind(), StateKind::Alert);
        assert_eq!(patrolling.alert_target(), Some(Vec2::new(64.0, 0.0)));

        let mut stunned = Agent::new(AgentId(1), Archetype::Shocker, Vec2::ZERO, 1);
        stunned.transition(AgentState::Disabled(DisabledPhase::Stunned));
        assert!(!stunned.alert(Vec2::new(64.0, 0.0)));
        assert_eq!(stunned.alert_target(), None);
    }
}

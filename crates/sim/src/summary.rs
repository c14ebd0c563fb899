//! Run statistics collected from tick reports.

use std::collections::BTreeMap;

use prowl_core::{FingerprintError, SimEvent, TickReport, World};
use serde::Serialize;

/// JSON-serializable outcome of one `run`.
#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    pub scenario: String,
    pub seed: u64,
    pub ticks: u64,
    pub simulated_secs: f32,
    pub alerts: u32,
    pub deaths: u32,
    pub shots: u32,
    pub damage_taken: u32,
    pub actors_downed: u32,
    /// Agent count per state name at the end of the run.
    pub final_states: BTreeMap<String, usize>,
    /// Hex SHA-256 of the final world.
    pub world_root: String,
}

impl RunSummary {
    pub fn new(scenario: &str, seed: u64) -> Self {
        Self {
            scenario: scenario.to_string(),
            seed,
            ..Self::default()
        }
    }

    pub fn record(&mut self, report: &TickReport, dt: f32) {
        self.ticks += 1;
        self.simulated_secs += dt;
        for event in &report.events {
            match event {
                SimEvent::AgentAlerted { .. } => self.alerts += 1,
                SimEvent::AgentDied { .. } => self.deaths += 1,
                SimEvent::WeaponDischarged { .. } => self.shots += 1,
                SimEvent::ActorDamaged { amount, .. } => self.damage_taken += amount,
                SimEvent::ActorDowned { .. } => self.actors_downed += 1,
            }
        }
    }

    /// Records the final agent states and the world fingerprint.
    pub fn finish(&mut self, world: &World) -> Result<(), FingerprintError> {
        self.final_states.clear();
        for agent in world.agents() {
            *self.final_states.entry(agent.kind().to_string()).or_default() += 1;
        }
        self.world_root = hex::encode(prowl_core::compute_world_root(world)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use prowl_core::{ActorId, AgentId, Archetype, DeathMarker, Tick};

    use super::*;

    #[test]
    fn counts_events_by_kind() {
        let mut summary = RunSummary::new("duel", 4);
        let report = TickReport {
            tick: Tick(1),
            events: vec![
                SimEvent::ActorDamaged {
                    actor: ActorId(0),
                    agent: AgentId(0),
                    amount: 2,
                    remaining: 1,
                },
                SimEvent::AgentDied {
                    agent: AgentId(1),
                    position: Vec2::ZERO,
                    archetype: Archetype::Leaper,
                    marker: DeathMarker::Persistent,
                },
            ],
        };

        summary.record(&report, 0.5);
        summary.record(&TickReport::default(), 0.5);

        assert_eq!(summary.ticks, 2);
        assert_eq!(summary.simulated_secs, 1.0);
        assert_eq!(summary.damage_taken, 2);
        assert_eq!(summary.deaths, 1);
        assert_eq!(summary.alerts, 0);
    }

    #[test]
    fn finish_groups_agents_by_state() {
        let mut world = World::new(1);
        world.spawn_agent(Archetype::Leaper, Vec2::ZERO, None).unwrap();
        world.spawn_agent(Archetype::Flamer, Vec2::ZERO, None).unwrap();
        let mut summary = RunSummary::new("duel", 1);

        summary.finish(&world).unwrap();

        assert_eq!(summary.final_states.get("patrol"), Some(&2));
        assert_eq!(summary.world_root.len(), 64);
    }
}

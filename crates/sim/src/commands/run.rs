//! `run`: fixed-step simulation of one scenario.

use anyhow::Result;
use clap::Parser;
use prowl_content::ContentFactory;
use prowl_core::{SimEngine, SimEnv, SimEvent, TickReport};

use super::ScenarioArgs;
use crate::script::ScriptedActors;
use crate::settings::SimSettings;
use crate::summary::RunSummary;

/// Simulate a scenario for a fixed number of ticks
#[derive(Parser, Debug)]
pub struct Run {
    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Steps per simulated second [env: PROWL_TICK_HZ]
    #[arg(long)]
    pub tick_hz: Option<u32>,

    /// Number of steps to run [env: PROWL_TICKS]
    #[arg(long)]
    pub ticks: Option<u64>,

    /// Walking speed of scripted actors
    #[arg(long)]
    pub actor_speed: Option<f32>,

    /// Stop early once every agent is dead or every actor is downed
    #[arg(long)]
    pub until_resolved: bool,

    /// Emit per-tick trace output from the simulation
    #[arg(long)]
    pub trace: bool,

    /// Pretty-print the JSON summary
    #[arg(long)]
    pub pretty: bool,
}

impl Run {
    pub fn execute(self) -> Result<()> {
        let settings = self.settings();
        let summary = simulate(&settings, self.until_resolved, self.trace)?;

        let json = if self.pretty {
            serde_json::to_string_pretty(&summary)?
        } else {
            serde_json::to_string(&summary)?
        };
        println!("{}", json);
        Ok(())
    }

    fn settings(&self) -> SimSettings {
        let mut settings = self.scenario.settings();
        if let Some(hz) = self.tick_hz {
            settings.tick_hz = hz.max(1);
        }
        if let Some(ticks) = self.ticks {
            settings.ticks = ticks;
        }
        if let Some(speed) = self.actor_speed {
            settings.actor_speed = speed;
        }
        settings
    }
}

/// Loads the scenario and steps it according to `settings`.
pub fn simulate(settings: &SimSettings, until_resolved: bool, trace: bool) -> Result<RunSummary> {
    let factory = ContentFactory::new(&settings.data_dir);
    let mut config = factory.load_config()?;
    if let Some(seed) = settings.seed {
        config.seed = seed;
    }
    config.debug_trace |= trace;

    let mut level = factory.build_world(&settings.scenario, &config)?;
    if let Some(seed) = settings.seed {
        level.world.seed = seed;
    }
    let env = SimEnv::with_grid(&level.grid, &config);
    let mut script = ScriptedActors::new(level.routes, settings.actor_speed);
    let mut summary = RunSummary::new(&settings.scenario, level.world.seed);
    let dt = settings.dt();

    tracing::info!(
        scenario = %settings.scenario,
        seed = level.world.seed,
        tick_hz = settings.tick_hz,
        ticks = settings.ticks,
        "starting run"
    );

    for _ in 0..settings.ticks {
        script.advance(&mut level.world, dt);
        let report = SimEngine::new(&mut level.world).step(&env, dt);
        log_report(&report);
        summary.record(&report, dt);

        if until_resolved && is_resolved(&level.world) {
            tracing::info!(tick = %report.tick, "scenario resolved");
            break;
        }
    }

    summary.finish(&level.world)?;
    tracing::info!(
        deaths = summary.deaths,
        damage = summary.damage_taken,
        root = %summary.world_root,
        "run complete"
    );
    Ok(summary)
}

fn is_resolved(world: &prowl_core::World) -> bool {
    let agents_cleared = world.agents().iter().all(|agent| agent.is_dead());
    let actors_down = world.actors().iter().all(|actor| actor.is_downed());
    agents_cleared || actors_down
}

fn log_report(report: &TickReport) {
    for event in &report.events {
        match event {
            SimEvent::AgentAlerted {
                agent, actor: Some(actor), ..
            } => tracing::info!(tick = %report.tick, %agent, %actor, "agent alerted"),
            SimEvent::AgentAlerted {
                agent, position, ..
            } => tracing::info!(tick = %report.tick, %agent, ?position, "agent investigating"),
            SimEvent::AgentDied {
                agent, archetype, marker, ..
            } => tracing::info!(tick = %report.tick, %agent, %archetype, ?marker, "agent died"),
            SimEvent::ActorDowned { actor } => {
                tracing::info!(tick = %report.tick, %actor, "actor downed")
            }
            other => tracing::debug!(tick = %report.tick, event = ?other),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn write_data(dir: &Path) {
        std::fs::create_dir_all(dir.join("grids")).unwrap();
        std::fs::create_dir_all(dir.join("scenarios")).unwrap();
        std::fs::write(
            dir.join("grids/yard.ron"),
            "(tile_size: 32.0, rows: [[0, 0, 0, 0, 0, 0], [0, 0, 0, 0, 0, 0], [0, 0, 0, 0, 0, 0], [0, 0, 0, 0, 0, 0]])",
        )
        .unwrap();
        std::fs::write(
            dir.join("scenarios/standoff.ron"),
            r#"(
                grid: "yard",
                agents: [(archetype: leaper, tile: (1, 1)), (archetype: shocker, tile: (4, 1))],
                actors: [(tile: (2, 3), weapon: Some(freezer), route: [(2, 3), (5, 3)])],
            )"#,
        )
        .unwrap();
    }

    fn settings(dir: &Path) -> SimSettings {
        SimSettings {
            data_dir: dir.to_path_buf(),
            scenario: "standoff".to_string(),
            ticks: 120,
            seed: Some(5),
            ..SimSettings::default()
        }
    }

    #[test]
    fn runs_are_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        write_data(dir.path());

        let first = simulate(&settings(dir.path()), false, false).unwrap();
        let second = simulate(&settings(dir.path()), false, false).unwrap();

        assert_eq!(first.ticks, 120);
        assert_eq!(first.seed, 5);
        assert_eq!(first.world_root, second.world_root);
        assert_eq!(first.final_states.values().sum::<usize>(), 2);
    }

    #[test]
    fn missing_scenario_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = settings(dir.path());
        settings.scenario = "nowhere".to_string();

        assert!(simulate(&settings, false, false).is_err());
    }
}

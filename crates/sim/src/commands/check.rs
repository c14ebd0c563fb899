//! `check`: load a scenario and look for problems before running it.

use anyhow::Result;
use clap::Parser;
use prowl_content::{ContentFactory, Level};
use prowl_core::{MapOracle, plan_path};

use super::ScenarioArgs;

/// Load a scenario and report problems without simulating
#[derive(Parser, Debug)]
pub struct Check {
    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Treat warnings (unreachable routes, isolated agents) as errors
    #[arg(long)]
    pub strict: bool,
}

impl Check {
    pub fn execute(self) -> Result<()> {
        let settings = self.scenario.settings();
        let factory = ContentFactory::new(&settings.data_dir);
        let config = factory.load_config()?;
        let level = factory.build_world(&settings.scenario, &config)?;

        let dims = level.grid.dimensions();
        println!(
            "scenario '{}': {}x{} grid, {} agents, {} actors, seed {}",
            settings.scenario,
            dims.width,
            dims.height,
            level.world.agents().len(),
            level.world.actors().len(),
            level.world.seed,
        );

        let warnings = inspect(&level);
        for warning in &warnings {
            tracing::warn!("{}", warning);
            println!("warning: {}", warning);
        }

        if self.strict && !warnings.is_empty() {
            anyhow::bail!("{} warning(s) in strict mode", warnings.len());
        }
        println!("ok");
        Ok(())
    }
}

/// Reachability problems in an assembled level.
pub fn inspect(level: &Level) -> Vec<String> {
    let grid = &level.grid;
    let mut warnings = Vec::new();

    for agent in level.world.agents() {
        let from = grid.world_to_tile(agent.position());
        let reaches_any = level.world.actors().iter().any(|actor| {
            plan_path(grid, from, grid.world_to_tile(actor.position)).is_reachable()
        });
        if !level.world.actors().is_empty() && !reaches_any {
            warnings.push(format!(
                "{} ({}) at {:?} cannot reach any actor",
                agent.id(),
                agent.archetype(),
                from
            ));
        }
    }

    for route in &level.routes {
        let legs = route.waypoints.iter().zip(route.waypoints.iter().cycle().skip(1));
        for (leg, (&start, &end)) in legs.enumerate() {
            let (start, end) = (grid.world_to_tile(start), grid.world_to_tile(end));
            if !grid.is_walkable(end) {
                warnings.push(format!("{} route waypoint {} is a wall", route.actor, leg + 1));
            } else if !plan_path(grid, start, end).is_reachable() {
                warnings.push(format!(
                    "{} route leg {} ({:?} -> {:?}) has no path",
                    route.actor, leg, start, end
                ));
            }
        }
    }

    warnings
}

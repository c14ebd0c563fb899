//! Subcommand implementations.

mod check;
mod run;

pub use check::Check;
pub use run::Run;

use std::path::PathBuf;

use clap::Args;

use crate::settings::SimSettings;

/// Flags shared by every subcommand that loads a scenario.
#[derive(Args, Debug, Clone)]
pub struct ScenarioArgs {
    /// Content directory holding config.toml, grids/ and scenarios/ [env: PROWL_DATA_DIR]
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Scenario name under scenarios/, without extension
    #[arg(short, long)]
    pub scenario: Option<String>,

    /// Override the world seed
    #[arg(long)]
    pub seed: Option<u64>,
}

impl ScenarioArgs {
    /// Flags win over environment variables, which win over defaults.
    pub fn settings(&self) -> SimSettings {
        let mut settings = SimSettings::from_env();
        if let Some(dir) = &self.data_dir {
            settings.data_dir = dir.clone();
        }
        if let Some(scenario) = &self.scenario {
            settings.scenario = scenario.clone();
        }
        settings.seed = self.seed;
        settings
    }
}

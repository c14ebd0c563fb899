//! Headless host loop for the prowl simulation.
//!
//! Loads a scenario from a data directory, drives [`prowl_core::SimEngine`]
//! at a fixed tick rate with scripted actor movement, and prints a JSON run
//! summary.
//!
//! ```bash
//! prowl-sim run --data-dir data --scenario skirmish --ticks 1800
//! prowl-sim check --data-dir data --scenario skirmish
//! ```

mod commands;
mod logging;
mod script;
mod settings;
mod summary;

use anyhow::Result;
use clap::Parser;
use commands::{Check, Run};

/// Headless runner for prowl scenarios
#[derive(Parser)]
#[command(name = "prowl-sim")]
#[command(about = "Run and validate prowl scenarios", long_about = None)]
#[command(version)]
struct Cli {
    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Simulate a scenario for a fixed number of ticks
    Run(Run),

    /// Load a scenario and report problems without simulating
    Check(Check),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for PROWL_* and RUST_LOG)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = logging::setup_logging(cli.log_file.as_deref())?;

    match cli.command {
        Command::Run(cmd) => cmd.execute(),
        Command::Check(cmd) => cmd.execute(),
    }
}

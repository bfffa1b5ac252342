//! Headless skirmish driver.
//!
//! Replays a scripted scenario through the turn engine and prints what each
//! pass resolved, or checks that two independent runs agree.
//!
//! ```bash
//! cargo run -p tactics-sim -- run opening
//! cargo run -p tactics-sim -- --verbose run duel --json
//! cargo run -p tactics-sim -- verify opening
//! ```

mod commands;
mod logging;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use commands::{Run, Verify};
use tactics_sim::SimConfig;

/// Headless turn resolution for scripted skirmishes
#[derive(Parser)]
#[command(name = "skirmish")]
#[command(about = "Replay scripted skirmishes through the turn engine", long_about = None)]
#[command(version)]
struct Cli {
    /// Content data directory (overrides SKIRMISH_DATA_DIR)
    #[arg(short, long, value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Log every resolved event
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Replay a scenario and print each pass
    Run(Run),

    /// Replay a scenario twice and compare checksums
    Verify(Verify),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for SKIRMISH_DATA_DIR and RUST_LOG)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::setup_logging(cli.verbose);

    let mut config = SimConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    tracing::debug!("Content data directory: {}", config.data_dir.display());

    match cli.command {
        Command::Run(cmd) => cmd.execute(&config),
        Command::Verify(cmd) => cmd.execute(&config),
    }
}

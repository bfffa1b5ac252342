//! Run a scenario on two independent instances and compare every checksum.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use tactics_content::ContentFactory;
use tactics_sim::{LogSink, Replay, SimConfig};

/// Replay a scenario twice and compare checksums
#[derive(Parser)]
pub struct Verify {
    /// Scenario name under scenarios/ (without .ron)
    #[arg(value_name = "SCENARIO")]
    scenario: String,
}

impl Verify {
    pub fn execute(self, config: &SimConfig) -> Result<()> {
        let factory = ContentFactory::new(&config.data_dir);
        let load = || -> Result<Replay> {
            Ok(Replay::load(&factory, &self.scenario)
                .with_context(|| format!("Failed to load scenario '{}'", self.scenario))?
                .with_idle_passes(config.idle_passes))
        };

        let first = load()?.run(&mut LogSink::default());
        let second = load()?.run(&mut LogSink::default());

        if first.len() != second.len() {
            anyhow::bail!(
                "Runs diverged in length: {} passes vs {}",
                first.len(),
                second.len()
            );
        }
        for (a, b) in first.iter().zip(&second) {
            if a.checksum != b.checksum {
                anyhow::bail!(
                    "Checksum mismatch at pass {}: {} vs {}",
                    a.pass + 1,
                    a.checksum,
                    b.checksum
                );
            }
        }

        let last = first
            .last()
            .map(|outcome| outcome.checksum.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{} {} passes agree (final checksum {})",
            style("OK").bold().green(),
            first.len(),
            last
        );
        Ok(())
    }
}

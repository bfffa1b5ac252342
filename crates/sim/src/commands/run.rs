//! Replay a scenario and print what each pass resolved.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use tactics_content::ContentFactory;
use tactics_sim::{LogSink, PassOutcome, Replay, SimConfig, describe};

/// Replay a scenario and print each pass
#[derive(Parser)]
pub struct Run {
    /// Scenario name under scenarios/ (without .ron)
    #[arg(value_name = "SCENARIO")]
    scenario: String,

    /// Order-free passes to resolve after the script (overrides SKIRMISH_IDLE_PASSES)
    #[arg(long, value_name = "N")]
    idle: Option<usize>,

    /// Print one JSON object per pass instead of text
    #[arg(long)]
    json: bool,
}

impl Run {
    pub fn execute(self, config: &SimConfig) -> Result<()> {
        let factory = ContentFactory::new(&config.data_dir);
        let mut replay = Replay::load(&factory, &self.scenario)
            .with_context(|| format!("Failed to load scenario '{}'", self.scenario))?
            .with_idle_passes(self.idle.unwrap_or(config.idle_passes));

        let mut sink = LogSink::default();
        while let Some(outcome) = replay.step(&mut sink) {
            if self.json {
                print_json(&outcome)?;
            } else {
                print_pass(&outcome);
            }
        }

        if !self.json {
            println!();
            match replay.state().turn.winner {
                Some(winner) => println!("{} {}", style("Winner:").bold().green(), winner),
                None => println!("{}", style("No winner yet").bold().yellow()),
            }
            println!("{} {}", style("Final checksum:").bold().cyan(), replay.state().checksum());
        }
        tracing::info!(events = sink.seen(), "replay finished");

        Ok(())
    }
}

fn print_pass(outcome: &PassOutcome) {
    println!(
        "{} {} ({})",
        style("Pass").bold().cyan(),
        outcome.pass + 1,
        outcome.player
    );
    for (order, err) in &outcome.rejected {
        println!("  {} {:?}: {}", style("rejected").red(), order, err);
    }
    for event in &outcome.report.events {
        println!("  {}", describe(event));
    }
    println!("  {} {}", style("checksum").dim(), outcome.checksum);
}

fn print_json(outcome: &PassOutcome) -> Result<()> {
    let rejected: Vec<_> = outcome
        .rejected
        .iter()
        .map(|(order, err)| serde_json::json!({ "order": format!("{:?}", order), "error": err }))
        .collect();
    let line = serde_json::json!({
        "pass": outcome.pass,
        "player": outcome.player,
        "rejected": rejected,
        "report": outcome.report,
        "checksum": outcome.checksum.to_string(),
    });
    println!("{}", serde_json::to_string(&line)?);
    Ok(())
}

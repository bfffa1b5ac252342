//! Pass-by-pass replay of a scenario script.

use anyhow::Result;
use tactics_content::{ContentFactory, Order, Scenario, Skirmish};
use tactics_core::{
    ActionError, GameConfig, GameEnv, GameState, PcgRng, Player, PresentationSink,
    StateChecksum, TurnEngine, TurnReport,
};
use tracing::info;

/// What one resolution pass did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PassOutcome {
    /// Zero-based pass index.
    pub pass: usize,
    /// Side whose orders were resolved.
    pub player: Player,
    /// Scripted orders the planning writers refused.
    pub rejected: Vec<(Order, ActionError)>,
    pub report: TurnReport,
    pub checksum: StateChecksum,
}

pub struct Replay {
    config: GameConfig,
    scenario: Scenario,
    skirmish: Skirmish,
    idle_passes: usize,
    pass: usize,
}

impl Replay {
    pub fn new(config: GameConfig, scenario: Scenario, skirmish: Skirmish) -> Self {
        Self {
            config,
            scenario,
            skirmish,
            idle_passes: 0,
            pass: 0,
        }
    }

    /// Loads `scenario` and everything it references from `factory`.
    pub fn load(factory: &ContentFactory, scenario: &str) -> Result<Self> {
        let (config, scenario, skirmish) = factory.load_skirmish(scenario)?;
        info!(
            scenario = %scenario.name,
            seed = scenario.seed,
            units = skirmish.units.len(),
            passes = scenario.turns.len(),
            "scenario loaded"
        );
        Ok(Self::new(config, scenario, skirmish))
    }

    /// Keeps resolving `passes` order-free passes once the script runs out.
    pub fn with_idle_passes(mut self, passes: usize) -> Self {
        self.idle_passes = passes;
        self
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn state(&self) -> &GameState {
        &self.skirmish.state
    }

    pub fn is_finished(&self) -> bool {
        self.skirmish.state.turn.is_over()
            || self.pass >= self.scenario.turns.len() + self.idle_passes
    }

    /// Queues the next pass's orders and resolves it.
    pub fn step(&mut self, sink: &mut dyn PresentationSink) -> Option<PassOutcome> {
        if self.is_finished() {
            return None;
        }

        let pass = self.pass;
        let player = self.skirmish.state.turn.current_player;
        let rejected = match self.scenario.turns.get(pass) {
            Some(orders) => self.skirmish.queue(orders),
            None => Vec::new(),
        };

        let rng = PcgRng;
        let env = GameEnv::new(&self.config, &rng);
        let report = TurnEngine::new(&mut self.skirmish.state, env)
            .with_sink(sink)
            .execute_turn();
        let checksum = self.skirmish.state.checksum();
        self.pass += 1;

        Some(PassOutcome {
            pass,
            player,
            rejected,
            report,
            checksum,
        })
    }

    /// Resolves every remaining pass.
    pub fn run(&mut self, sink: &mut dyn PresentationSink) -> Vec<PassOutcome> {
        let mut outcomes = Vec::new();
        while let Some(outcome) = self.step(sink) {
            outcomes.push(outcome);
        }
        outcomes
    }
}

//! Turn resolution.
//!
//! [`TurnEngine`] is the only mutator of [`GameState`] during a turn. One
//! call to [`TurnEngine::execute_turn`] runs a full pass:
//!
//! 1. echo pre-pass for the ending player, then furniture appraisal
//! 2. collect queued orders plus implicit trap ticks
//! 3. order by `action_timestamp`, ties broken by a seeded draw
//! 4. resolve each entry (release grip, move, attack, skill), then run the
//!    post-step triggers and re-appraise furniture
//! 5. hazard pass for the ending player
//! 6. status decay and rest healing for the ending player
//! 7. victory check
//! 8. clear orders, tick cooldowns, switch player, run turn-start hooks
//!
//! A stale order is skipped and reported; it never aborts the pass.

mod combat;
mod death;
mod order;
mod phases;
mod report;
mod resolve;

pub use report::{DamageCause, PresentationSink, ResolvedEvent, TurnReport};

use tracing::info;

use crate::env::GameEnv;
use crate::state::{GameState, UnitId};

/// Damage that left its target alive; re-examined once the step finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CriticalCheck {
    pub victim: UnitId,
    pub source: Option<UnitId>,
}

pub struct TurnEngine<'a> {
    pub(crate) state: &'a mut GameState,
    pub(crate) env: GameEnv<'a>,
    sink: Option<&'a mut dyn PresentationSink>,
    events: Vec<ResolvedEvent>,
    pub(crate) pending_checks: Vec<CriticalCheck>,
    /// Chance rolls made this pass; keeps each roll on its own seed.
    pub(crate) rolls: u32,
}

impl<'a> TurnEngine<'a> {
    pub fn new(state: &'a mut GameState, env: GameEnv<'a>) -> Self {
        Self {
            state,
            env,
            sink: None,
            events: Vec::new(),
            pending_checks: Vec::new(),
            rolls: 0,
        }
    }

    /// Mirrors every event to `sink` as it happens.
    pub fn with_sink(mut self, sink: &'a mut dyn PresentationSink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Resolves every pending order and hands the turn to the other player.
    ///
    /// Once a winner is recorded this is a no-op that reports the winner.
    pub fn execute_turn(&mut self) -> TurnReport {
        if let Some(winner) = self.state.turn.winner {
            return TurnReport {
                winner: Some(winner),
                events: Vec::new(),
            };
        }

        let ending = self.state.turn.current_player;
        info!(
            turn = self.state.turn.turn_number,
            player = %ending,
            "resolving turn"
        );
        self.state.turn.nonce += 1;
        self.rolls = 0;

        self.expire_echoes(ending);
        self.appraise_furniture();

        let idle = self.idle_units(ending);
        for entry in self.collect_entries() {
            self.resolve_entry(entry);
            self.run_post_step_triggers();
            self.appraise_furniture();
        }

        self.hazard_pass(ending);
        self.decay_pass(ending, &idle);

        let winner = self.check_victory();
        self.switch_turn(ending, winner.is_none());

        TurnReport {
            winner,
            events: core::mem::take(&mut self.events),
        }
    }

    pub(crate) fn emit(&mut self, event: ResolvedEvent) {
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.on_event(&event);
        }
        self.events.push(event);
    }
}
